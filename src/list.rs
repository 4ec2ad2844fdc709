//! Comma-separated lists of
//! [RFC 7230 Section 7](https://datatracker.ietf.org/doc/html/rfc7230#section-7).
//!
//! The `#rule` extension allows empty list elements, so `a,,b` is a
//! list of two elements.  Empty elements never reach the resulting
//! container.
use std::marker::PhantomData;

use crate::basics::ows;
use crate::error::Error;
use crate::producer::{alternatives, maybe, produce, repeat, symbol, Container, Producer, N};
use crate::source::Source;

pub struct NonEmptyCommaSeparatedListProducer<C, E> {
    element: E,
    _container: PhantomData<fn() -> C>,
}

/// Creates a producer of a list with at least one element.
///
/// ```text
/// 1#element => *( "," OWS ) element *( OWS "," [ OWS element ] )
/// ```
///
/// ```
/// use hfparse::{non_empty_comma_separated_list_producer, token_producer, try_parse};
///
/// let p = non_empty_comma_separated_list_producer::<Vec<String>, _>(token_producer());
///
/// assert_eq!(Ok(vec!["a".to_string(), "b".to_string()]), try_parse(", a,,b ,", &p));
/// assert!(try_parse("", &p).is_err());
/// ```
pub fn non_empty_comma_separated_list_producer<C, E>(
    element: E,
) -> NonEmptyCommaSeparatedListProducer<C, E>
where
    E: Producer,
    C: Container<E::Output> + Default,
{
    NonEmptyCommaSeparatedListProducer {
        element,
        _container: PhantomData,
    }
}

impl<C, E> Producer for NonEmptyCommaSeparatedListProducer<C, E>
where
    E: Producer,
    C: Container<E::Output> + Default,
{
    type Output = C;

    fn try_parse(&self, from: &mut Source<'_>) -> Result<C, Error> {
        produce::<C, _>((
            repeat(0, N, (symbol(b','), ows())),
            (&self.element).to_container(),
            repeat(
                0,
                N,
                (ows(), symbol(b','), maybe((ows(), (&self.element).to_container()))),
            ),
        ))
        .try_parse(from)
    }
}

pub struct MaybeEmptyCommaSeparatedListProducer<C, E> {
    element: E,
    _container: PhantomData<fn() -> C>,
}

/// Creates a producer of a list that may be empty.
///
/// ```text
/// #element => [ ( "," / element ) *( OWS "," [ OWS element ] ) ]
/// ```
///
/// ```
/// use hfparse::{maybe_empty_comma_separated_list_producer, token_producer, try_parse};
///
/// let p = maybe_empty_comma_separated_list_producer::<Vec<String>, _>(token_producer());
///
/// assert_eq!(Ok(vec![]), try_parse("", &p));
/// assert_eq!(Ok(vec![]), try_parse(",", &p));
/// assert_eq!(Ok(vec!["a".to_string()]), try_parse("a ,", &p));
/// ```
pub fn maybe_empty_comma_separated_list_producer<C, E>(
    element: E,
) -> MaybeEmptyCommaSeparatedListProducer<C, E>
where
    E: Producer,
    C: Container<E::Output> + Default,
{
    MaybeEmptyCommaSeparatedListProducer {
        element,
        _container: PhantomData,
    }
}

impl<C, E> Producer for MaybeEmptyCommaSeparatedListProducer<C, E>
where
    E: Producer,
    C: Container<E::Output> + Default,
{
    type Output = C;

    fn try_parse(&self, from: &mut Source<'_>) -> Result<C, Error> {
        produce::<C, _>((maybe((
            alternatives((symbol(b','), (&self.element).to_container())),
            repeat(
                0,
                N,
                (ows(), symbol(b','), maybe((ows(), (&self.element).to_container()))),
            ),
        )),))
        .try_parse(from)
    }
}

macro_rules! list_producer_impls {
    ($($name:ident),+) => {
        $(
            impl<C, E: Clone> Clone for $name<C, E> {
                fn clone(&self) -> Self {
                    $name {
                        element: self.element.clone(),
                        _container: PhantomData,
                    }
                }
            }

            impl<C, E: std::fmt::Debug> std::fmt::Debug for $name<C, E> {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.debug_struct(stringify!($name))
                        .field("element", &self.element)
                        .finish()
                }
            }
        )+
    };
}

list_producer_impls!(
    NonEmptyCommaSeparatedListProducer,
    MaybeEmptyCommaSeparatedListProducer
);
