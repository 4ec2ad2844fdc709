//! Backtracking combinators the field grammars are built from.
//!
//! A [Producer] reads from a [Source] and yields a value.  A [Clause]
//! reads from a [Source] and stores what it found into a target.
//! Producers become clauses through the adapters of [Producer]
//! ([Producer::skip], [Producer::consume], [Producer::to_container],
//! [Producer::as_result]), clauses are grouped in tuples and combined
//! with [sequence], [alternatives], [maybe] and [repeat], and
//! [produce] turns a group of clauses back into a producer.
//!
//! ```
//! use hfparse::{produce, symbol, token_producer, try_parse, Producer};
//!
//! #[derive(Default)]
//! struct MediaType {
//!     type_: String,
//!     subtype: String,
//! }
//!
//! let media_type = produce::<MediaType, _>((
//!     token_producer().to_lower().consume(|m: &mut MediaType, v| m.type_ = v),
//!     symbol(b'/'),
//!     token_producer().to_lower().consume(|m: &mut MediaType, v| m.subtype = v),
//! ));
//!
//! let m = try_parse("Text/HTML", &media_type).unwrap();
//!
//! assert_eq!("text", m.type_);
//! assert_eq!("html", m.subtype);
//! ```
//!
//! A failing clause may leave partial writes in its target.  Grammars
//! that must not observe them build the value with [produce], which
//! only hands it out on success.
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

use crate::chars::is_digit;
use crate::error::{Error, Reason};
use crate::log::{debug, trace};
use crate::source::Source;

/// Unbounded upper limit for [repeat].
pub const N: usize = usize::MAX;

/// Producer recognizes a construct at the current position of a
/// [Source] and yields its value.
///
/// On failure a producer may leave the cursor anywhere; the
/// combinators wrapping it put the cursor back where it was.
pub trait Producer {
    type Output;

    fn try_parse(&self, from: &mut Source<'_>) -> Result<Self::Output, Error>;

    /// Discards the produced value.
    fn skip(self) -> Skip<Self>
    where
        Self: Sized,
    {
        Skip(self)
    }

    /// Transforms the produced value.
    fn map<F, U>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> U,
    {
        Map { producer: self, f }
    }

    /// Converts the produced string to ASCII lowercase.
    fn to_lower(self) -> ToLower<Self>
    where
        Self: Sized + Producer<Output = String>,
    {
        ToLower(self)
    }

    /// Hands the produced value to `f` together with the target,
    /// typically to store it into one field of the target.
    fn consume<T, F>(self, f: F) -> Consume<Self, F>
    where
        Self: Sized,
        F: Fn(&mut T, Self::Output),
    {
        Consume { producer: self, f }
    }

    /// Appends the produced value to the target container.
    fn to_container(self) -> ToContainer<Self>
    where
        Self: Sized,
    {
        ToContainer(self)
    }

    /// Replaces the target with the produced value.
    fn as_result(self) -> AsResult<Self>
    where
        Self: Sized,
    {
        AsResult(self)
    }
}

impl<P: Producer + ?Sized> Producer for &P {
    type Output = P::Output;

    fn try_parse(&self, from: &mut Source<'_>) -> Result<P::Output, Error> {
        (**self).try_parse(from)
    }
}

impl<P: Producer + ?Sized> Producer for Box<P> {
    type Output = P::Output;

    fn try_parse(&self, from: &mut Source<'_>) -> Result<P::Output, Error> {
        (**self).try_parse(from)
    }
}

/// Clause is one step of a grammar that stores its result into a
/// target of type `T`.
pub trait Clause<T> {
    fn try_process(&self, from: &mut Source<'_>, target: &mut T) -> Result<(), Error>;
}

/// Clauses is a tuple of [Clause] sharing one target.
pub trait Clauses<T> {
    /// Processes every clause in order, stopping at the first failure.
    fn process_all(&self, from: &mut Source<'_>, target: &mut T) -> Result<(), Error>;

    /// Processes clauses in order until one succeeds.  The cursor is
    /// put back before the next clause is tried.  Returns the error of
    /// the last clause if none succeeds.
    fn process_any(&self, from: &mut Source<'_>, target: &mut T) -> Result<(), Error>;
}

macro_rules! clauses_tuple {
    ($($name:ident $idx:tt),+) => {
        impl<T, $($name: Clause<T>),+> Clauses<T> for ($($name,)+) {
            fn process_all(&self, from: &mut Source<'_>, target: &mut T) -> Result<(), Error> {
                $(self.$idx.try_process(from, target)?;)+

                Ok(())
            }

            fn process_any(&self, from: &mut Source<'_>, target: &mut T) -> Result<(), Error> {
                let mut result = Err(Error::new(from.current_position(), Reason::PatternNotFound));

                $(
                    if result.is_err() {
                        let mut consumer = from.consumer();

                        result = self.$idx.try_process(&mut consumer, target);
                        if result.is_ok() {
                            consumer.commit();
                        }
                    }
                )+

                result
            }
        }
    };
}

clauses_tuple!(A 0);
clauses_tuple!(A 0, B 1);
clauses_tuple!(A 0, B 1, C 2);
clauses_tuple!(A 0, B 1, C 2, D 3);
clauses_tuple!(A 0, B 1, C 2, D 3, E 4);
clauses_tuple!(A 0, B 1, C 2, D 3, E 4, F 5);
clauses_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
clauses_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);

// ===== Adapters =====

#[derive(Debug, Clone, Copy)]
pub struct Skip<P>(P);

impl<T, P: Producer> Clause<T> for Skip<P> {
    fn try_process(&self, from: &mut Source<'_>, _: &mut T) -> Result<(), Error> {
        self.0.try_parse(from)?;

        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Map<P, F> {
    producer: P,
    f: F,
}

impl<P, F, U> Producer for Map<P, F>
where
    P: Producer,
    F: Fn(P::Output) -> U,
{
    type Output = U;

    fn try_parse(&self, from: &mut Source<'_>) -> Result<U, Error> {
        self.producer.try_parse(from).map(&self.f)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ToLower<P>(P);

impl<P: Producer<Output = String>> Producer for ToLower<P> {
    type Output = String;

    fn try_parse(&self, from: &mut Source<'_>) -> Result<String, Error> {
        let mut v = self.0.try_parse(from)?;
        v.make_ascii_lowercase();

        Ok(v)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Consume<P, F> {
    producer: P,
    f: F,
}

impl<T, P, F> Clause<T> for Consume<P, F>
where
    P: Producer,
    F: Fn(&mut T, P::Output),
{
    fn try_process(&self, from: &mut Source<'_>, target: &mut T) -> Result<(), Error> {
        let v = self.producer.try_parse(from)?;
        (self.f)(target, v);

        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ToContainer<P>(P);

impl<C, P> Clause<C> for ToContainer<P>
where
    P: Producer,
    C: Container<P::Output>,
{
    fn try_process(&self, from: &mut Source<'_>, target: &mut C) -> Result<(), Error> {
        let v = self.0.try_parse(from)?;
        target.append(v);

        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AsResult<P>(P);

impl<P: Producer> Clause<P::Output> for AsResult<P> {
    fn try_process(&self, from: &mut Source<'_>, target: &mut P::Output) -> Result<(), Error> {
        *target = self.0.try_parse(from)?;

        Ok(())
    }
}

/// Container is the append policy used by [Producer::to_container].
pub trait Container<T> {
    fn append(&mut self, item: T);
}

impl<T> Container<T> for Vec<T> {
    fn append(&mut self, item: T) {
        self.push(item);
    }
}

impl<T> Container<T> for VecDeque<T> {
    fn append(&mut self, item: T) {
        self.push_back(item);
    }
}

impl Container<char> for String {
    fn append(&mut self, item: char) {
        self.push(item);
    }
}

impl Container<String> for String {
    fn append(&mut self, item: String) {
        self.push_str(&item);
    }
}

/// The first occurrence of a key is kept.
impl<K: Ord, V> Container<(K, V)> for BTreeMap<K, V> {
    fn append(&mut self, (k, v): (K, V)) {
        self.entry(k).or_insert(v);
    }
}

/// The first occurrence of a key is kept.
impl<K: Eq + Hash, V, S: BuildHasher> Container<(K, V)> for HashMap<K, V, S> {
    fn append(&mut self, (k, v): (K, V)) {
        self.entry(k).or_insert(v);
    }
}

// ===== Combinators =====

#[derive(Debug, Clone, Copy)]
pub struct Sequence<S>(S);

/// All clauses must succeed in order.  On failure the cursor is put
/// back and the first error is returned.
pub fn sequence<S>(clauses: S) -> Sequence<S> {
    Sequence(clauses)
}

impl<T, S: Clauses<T>> Clause<T> for Sequence<S> {
    fn try_process(&self, from: &mut Source<'_>, target: &mut T) -> Result<(), Error> {
        let mut consumer = from.consumer();

        self.0.process_all(&mut consumer, target)?;
        consumer.commit();

        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Alternatives<S>(S);

/// The first clause that succeeds wins.
pub fn alternatives<S>(clauses: S) -> Alternatives<S> {
    Alternatives(clauses)
}

impl<T, S: Clauses<T>> Clause<T> for Alternatives<S> {
    fn try_process(&self, from: &mut Source<'_>, target: &mut T) -> Result<(), Error> {
        self.0.process_any(from, target)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Maybe<S>(S);

/// Like [sequence], but a failure is not an error: nothing is
/// consumed and processing continues.
pub fn maybe<S>(clauses: S) -> Maybe<S> {
    Maybe(clauses)
}

impl<T, S: Clauses<T>> Clause<T> for Maybe<S> {
    fn try_process(&self, from: &mut Source<'_>, target: &mut T) -> Result<(), Error> {
        let mut consumer = from.consumer();

        if self.0.process_all(&mut consumer, target).is_ok() {
            consumer.commit();
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Repeat<S> {
    min: usize,
    max: usize,
    clauses: S,
}

/// Matches the clauses as a sequence at least `min` and at most `max`
/// times.  Use [N] for no upper limit.
///
/// Repetition stops at the first iteration that fails, which consumes
/// nothing.  The clause fails only if fewer than `min` iterations
/// matched.
pub fn repeat<S>(min: usize, max: usize, clauses: S) -> Repeat<S> {
    Repeat { min, max, clauses }
}

impl<T, S: Clauses<T>> Clause<T> for Repeat<S> {
    fn try_process(&self, from: &mut Source<'_>, target: &mut T) -> Result<(), Error> {
        let mut count = 0;

        while count < self.max {
            let mut consumer = from.consumer();

            if let Err(err) = self.clauses.process_all(&mut consumer, target) {
                if count < self.min {
                    return Err(err);
                }

                break;
            }

            let progressed = consumer.current_position() != consumer.started_at();
            consumer.commit();
            count += 1;

            // an iteration matching nothing matches forever
            if !progressed {
                break;
            }
        }

        Ok(())
    }
}

#[derive(Debug)]
pub struct Produce<T, S> {
    clauses: S,
    _target: PhantomData<fn() -> T>,
}

impl<T, S: Clone> Clone for Produce<T, S> {
    fn clone(&self) -> Self {
        Produce {
            clauses: self.clauses.clone(),
            _target: PhantomData,
        }
    }
}

/// Creates a producer that runs the clauses as a sequence on
/// `T::default()` and yields the result.
pub fn produce<T, S>(clauses: S) -> Produce<T, S> {
    Produce {
        clauses,
        _target: PhantomData,
    }
}

impl<T: Default, S: Clauses<T>> Producer for Produce<T, S> {
    type Output = T;

    fn try_parse(&self, from: &mut Source<'_>) -> Result<T, Error> {
        let mut value = T::default();
        let mut consumer = from.consumer();

        self.clauses.process_all(&mut consumer, &mut value)?;
        consumer.commit();

        Ok(value)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FromFn<F>(F);

/// Creates a producer from a function.
///
/// ```
/// use hfparse::{from_fn, try_parse, Error, Source};
///
/// let rest = from_fn(|from: &mut Source<'_>| -> Result<usize, Error> {
///     let n = from.remaining().len();
///     while from.getch().is_some() {}
///     Ok(n)
/// });
///
/// assert_eq!(Ok(3), try_parse("abc", rest));
/// ```
pub fn from_fn<F, T>(f: F) -> FromFn<F>
where
    F: Fn(&mut Source<'_>) -> Result<T, Error>,
{
    FromFn(f)
}

impl<F, T> Producer for FromFn<F>
where
    F: Fn(&mut Source<'_>) -> Result<T, Error>,
{
    type Output = T;

    fn try_parse(&self, from: &mut Source<'_>) -> Result<T, Error> {
        (self.0)(from)
    }
}

// ===== Symbols =====

fn take_if(from: &mut Source<'_>, predicate: impl Fn(u8) -> bool) -> Result<u8, Error> {
    match from.getch() {
        Some(ch) if predicate(ch) => Ok(ch),
        Some(_) => {
            from.putback();

            Err(Error::new(from.current_position(), Reason::UnexpectedCharacter))
        }
        None => Err(Error::new(from.current_position(), Reason::UnexpectedEof)),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SymbolProducer(u8);

/// Creates a producer of exactly the byte `expected`.
pub fn symbol_producer(expected: u8) -> SymbolProducer {
    SymbolProducer(expected)
}

/// Matches exactly the byte `expected` and discards it.
pub fn symbol(expected: u8) -> Skip<SymbolProducer> {
    symbol_producer(expected).skip()
}

impl Producer for SymbolProducer {
    type Output = u8;

    fn try_parse(&self, from: &mut Source<'_>) -> Result<u8, Error> {
        take_if(from, |ch| ch == self.0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DigitProducer;

/// Creates a producer of a single DIGIT.
pub fn digit_producer() -> DigitProducer {
    DigitProducer
}

impl Producer for DigitProducer {
    type Output = u8;

    fn try_parse(&self, from: &mut Source<'_>) -> Result<u8, Error> {
        take_if(from, is_digit)
    }
}

/// Runs `producer` over the whole `input`.
///
/// Fails with [Reason::UnexpectedCharacter] at the first byte the
/// producer left unconsumed.
///
/// ```
/// use hfparse::{try_parse, token_producer, Reason};
///
/// assert_eq!(Ok("gzip".to_string()), try_parse("gzip", token_producer()));
///
/// let err = try_parse("gzip;q=1", token_producer()).unwrap_err();
/// assert_eq!(4, err.index());
/// assert_eq!(Reason::UnexpectedCharacter, err.reason());
/// ```
pub fn try_parse<'a, P: Producer>(
    input: impl Into<Source<'a>>,
    producer: P,
) -> Result<P::Output, Error> {
    let mut from = input.into();

    let v = match producer.try_parse(&mut from) {
        Ok(v) => v,
        Err(err) => {
            debug!("field value rejected: {err}");

            return Err(err);
        }
    };

    if !from.eof() {
        let err = Error::new(from.current_position(), Reason::UnexpectedCharacter);
        debug!("field value rejected: {err}, trailing data");

        return Err(err);
    }

    trace!("parsed field value of {} bytes", from.current_position());

    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse<P: Producer>(input: &str, p: P) -> (Result<P::Output, Error>, usize) {
        let mut from = Source::from(input);
        let r = p.try_parse(&mut from);

        (r, from.current_position())
    }

    fn err(index: usize, reason: Reason) -> Error {
        Error::ParseError { index, reason }
    }

    #[test]
    fn symbols() {
        assert_eq!((Ok(b'a'), 1), parse("ab", symbol_producer(b'a')));
        assert_eq!(
            (Err(err(0, Reason::UnexpectedCharacter)), 0),
            parse("ba", symbol_producer(b'a'))
        );
        assert_eq!(
            (Err(err(0, Reason::UnexpectedEof)), 0),
            parse("", symbol_producer(b'a'))
        );
        assert_eq!((Ok(b'7'), 1), parse("7", digit_producer()));
        assert_eq!(
            (Err(err(0, Reason::UnexpectedCharacter)), 0),
            parse("x", digit_producer())
        );
    }

    #[test]
    fn sequence_rolls_back() {
        let p = produce::<String, _>((
            symbol_producer(b'a').map(char::from).to_container(),
            sequence((
                symbol_producer(b'b').map(char::from).to_container(),
                symbol_producer(b'c').map(char::from).to_container(),
            )),
        ));

        assert_eq!((Ok("abc".to_string()), 3), parse("abc", &p));
        assert_eq!(
            (Err(err(2, Reason::UnexpectedCharacter)), 0),
            parse("abd", &p)
        );
    }

    #[test]
    fn alternatives_report_last_error() {
        let p = produce::<u8, _>((alternatives((
            symbol_producer(b'a').as_result(),
            sequence((symbol(b'b'), symbol_producer(b'c').as_result())),
            symbol_producer(b'd').as_result(),
        )),));

        assert_eq!((Ok(b'a'), 1), parse("a", &p));
        assert_eq!((Ok(b'c'), 2), parse("bc", &p));
        assert_eq!((Ok(b'd'), 1), parse("d", &p));
        assert_eq!(
            (Err(err(0, Reason::UnexpectedCharacter)), 0),
            parse("bd", &p)
        );
        assert_eq!((Err(err(0, Reason::UnexpectedEof)), 0), parse("", &p));
    }

    #[test]
    fn maybe_consumes_nothing_on_failure() {
        let p = produce::<Vec<u8>, _>((
            symbol_producer(b'a').to_container(),
            maybe((symbol(b'b'), symbol_producer(b'c').to_container())),
        ));

        assert_eq!((Ok(vec![b'a', b'c']), 3), parse("abc", &p));
        assert_eq!((Ok(vec![b'a']), 1), parse("abd", &p));
        assert_eq!((Ok(vec![b'a']), 1), parse("a", &p));
    }

    #[test]
    fn repeat_bounds() {
        let digits = |min, max| {
            produce::<String, _>((repeat(
                min,
                max,
                (digit_producer().map(char::from).to_container(),),
            ),))
        };

        assert_eq!((Ok("123".to_string()), 3), parse("123x", digits(0, N)));
        assert_eq!((Ok("12".to_string()), 2), parse("123", digits(0, 2)));
        assert_eq!((Ok(String::new()), 0), parse("x", digits(0, N)));
        assert_eq!(
            (Err(err(2, Reason::UnexpectedCharacter)), 0),
            parse("12x", digits(3, N))
        );
    }

    #[test]
    fn repeat_stops_on_empty_match() {
        let p = produce::<u32, _>((repeat(
            0,
            N,
            (
                maybe((symbol(b'a'),)),
                from_fn(|_: &mut Source<'_>| Ok(())).consume(|n: &mut u32, _| *n += 1),
            ),
        ),));

        assert_eq!((Ok(3), 2), parse("aa", &p));
    }

    fn list<P>(p: P) -> Repeat<(Maybe<(Skip<SymbolProducer>,)>, P)> {
        repeat(0, N, (maybe((symbol(b','),)), p))
    }

    #[test]
    fn containers() {
        let pair = produce::<(u8, u8), _>((
            digit_producer().consume(|p: &mut (u8, u8), v| p.0 = v),
            symbol(b'='),
            digit_producer().consume(|p: &mut (u8, u8), v| p.1 = v),
        ));
        let btree = produce::<BTreeMap<u8, u8>, _>((list((&pair).to_container()),));

        assert_eq!((Ok(BTreeMap::new()), 0), parse("1=a", &btree));
        assert_eq!(
            (Ok(BTreeMap::from([(b'1', b'2'), (b'3', b'4')])), 11),
            parse("1=2,3=4,1=5", &btree)
        );

        let hash = produce::<HashMap<u8, u8>, _>((list((&pair).to_container()),));
        let (map, _) = parse("1=2,1=5", &hash);
        assert_eq!(Some(&b'2'), map.unwrap().get(&b'1'));

        let deque = produce::<VecDeque<u8>, _>((list(digit_producer().to_container()),));
        assert_eq!((Ok(VecDeque::from([b'1', b'2'])), 2), parse("12", &deque));
    }

    #[test]
    fn boxed_producer() {
        let p: Box<dyn Producer<Output = u8>> = Box::new(digit_producer().map(|d| d - b'0'));

        assert_eq!(Ok(4), try_parse("4", &p));
        assert_eq!(
            Err(err(1, Reason::UnexpectedCharacter)),
            try_parse("42", p)
        );
    }
}
