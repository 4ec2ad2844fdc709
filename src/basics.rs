//! Producers for the basic rules of
//! [RFC 7230](https://datatracker.ietf.org/doc/html/rfc7230#section-3.2.6)
//! and [RFC 7231](https://datatracker.ietf.org/doc/html/rfc7231#section-5.3.1).
use crate::chars::{is_obs_text, is_qdtext, is_space, is_token_char, is_vchar};
use crate::error::{Error, Reason};
use crate::producer::{
    alternatives, digit_producer, maybe, produce, sequence, symbol, symbol_producer, Clause,
    Producer, Skip,
};
use crate::qvalue::QValue;
use crate::source::Source;

#[derive(Debug, Clone, Copy, Default)]
pub struct OwsProducer;

/// Creates a producer of OWS.
///
/// ```text
/// OWS = *( SP / HTAB )
/// ```
///
/// The producer yields `Some(' ')` if at least one space was consumed,
/// and `None` otherwise.  It never fails.
pub fn ows_producer() -> OwsProducer {
    OwsProducer
}

/// Matches OWS and discards it.
pub fn ows() -> Skip<OwsProducer> {
    ows_producer().skip()
}

impl Producer for OwsProducer {
    type Output = Option<char>;

    fn try_parse(&self, from: &mut Source<'_>) -> Result<Option<char>, Error> {
        let mut extracted = 0;

        while let Some(ch) = from.getch() {
            if !is_space(ch) {
                from.putback();
                break;
            }

            extracted += 1;
        }

        Ok((extracted > 0).then_some(' '))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokenProducer;

/// Creates a producer of token.
///
/// ```text
/// token = 1*tchar
/// ```
///
/// ```
/// use hfparse::{token_producer, Producer, Source};
///
/// let mut from = Source::from("no-cache, private");
///
/// assert_eq!(Ok("no-cache".to_string()), token_producer().try_parse(&mut from));
/// assert_eq!(b", private", from.remaining());
/// ```
pub fn token_producer() -> TokenProducer {
    TokenProducer
}

impl Producer for TokenProducer {
    type Output = String;

    fn try_parse(&self, from: &mut Source<'_>) -> Result<String, Error> {
        let mut value = String::new();

        let reason = loop {
            match from.getch() {
                Some(ch) if is_token_char(ch) => value.push(char::from(ch)),
                Some(_) => {
                    from.putback();
                    break Reason::UnexpectedCharacter;
                }
                None => break Reason::UnexpectedEof,
            }
        };

        if value.is_empty() {
            return Err(Error::new(from.current_position(), reason));
        }

        Ok(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QuotedStringProducer;

/// Creates a producer of quoted-string.
///
/// ```text
/// quoted-string = DQUOTE *( qdtext / quoted-pair ) DQUOTE
/// qdtext        = HTAB / SP / %x21 / %x23-5B / %x5D-7E / obs-text
/// quoted-pair   = "\" ( HTAB / SP / VCHAR / obs-text )
/// ```
///
/// The producer yields the content between the quotes with
/// quoted-pairs replaced by the escaped character.  On failure the
/// cursor is left where it was.
///
/// ```
/// use hfparse::{quoted_string_producer, try_parse};
///
/// assert_eq!(
///     Ok(r#"a"b"#.to_string()),
///     try_parse(r#""a\"b""#, quoted_string_producer())
/// );
/// ```
pub fn quoted_string_producer() -> QuotedStringProducer {
    QuotedStringProducer
}

impl Producer for QuotedStringProducer {
    type Output = String;

    fn try_parse(&self, from: &mut Source<'_>) -> Result<String, Error> {
        let mut consumer = from.consumer();
        let started_at = consumer.started_at();

        match consumer.getch() {
            Some(b'"') => (),
            Some(_) => return Err(Error::new(started_at, Reason::UnexpectedCharacter)),
            None => return Err(Error::new(started_at, Reason::UnexpectedEof)),
        }

        let value = parse_quoted_content(&mut consumer)?;
        let value = String::from_utf8(value)
            .map_err(|_| Error::new(started_at, Reason::UnexpectedCharacter))?;

        consumer.commit();

        Ok(value)
    }
}

// Parses the rest of quoted-string after the opening DQUOTE.
fn parse_quoted_content(from: &mut Source<'_>) -> Result<Vec<u8>, Error> {
    let mut value = Vec::new();

    loop {
        match from.getch() {
            Some(b'"') => return Ok(value),
            Some(b'\\') => match from.getch() {
                Some(ch) if is_space(ch) || is_vchar(ch) || is_obs_text(ch) => value.push(ch),
                Some(_) => {
                    from.putback();

                    return Err(Error::new(from.current_position(), Reason::UnexpectedCharacter));
                }
                None => return Err(Error::new(from.current_position(), Reason::UnexpectedEof)),
            },
            Some(ch) if is_qdtext(ch) => value.push(ch),
            Some(_) => {
                from.putback();

                return Err(Error::new(from.current_position(), Reason::UnexpectedCharacter));
            }
            None => return Err(Error::new(from.current_position(), Reason::UnexpectedEof)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QValueProducer;

/// Creates a producer of qvalue.
///
/// ```text
/// qvalue = ( "0" [ "." 0*3DIGIT ] )
///        / ( "1" [ "." 0*3("0") ] )
/// ```
///
/// Matching stops at the first fractional digit that does not fit the
/// rule.  `1.001` yields `1.000` and leaves the last `1` unconsumed.
///
/// ```
/// use hfparse::{qvalue_producer, Producer, Source};
///
/// let mut from = Source::from("0.5");
/// assert_eq!(500, qvalue_producer().try_parse(&mut from).unwrap().as_uint());
///
/// let mut from = Source::from("1.001");
/// assert_eq!(1000, qvalue_producer().try_parse(&mut from).unwrap().as_uint());
/// assert_eq!(b"1", from.remaining());
/// ```
pub fn qvalue_producer() -> QValueProducer {
    QValueProducer
}

// Adds the value of a DIGIT scaled by multiplier.
fn digit(multiplier: u16) -> impl Clause<u16> {
    digit_producer().consume(move |v: &mut u16, d| *v += multiplier * u16::from(d - b'0'))
}

impl Producer for QValueProducer {
    type Output = QValue;

    fn try_parse(&self, from: &mut Source<'_>) -> Result<QValue, Error> {
        produce::<u16, _>((alternatives((
            sequence((
                symbol(b'0'),
                maybe((
                    symbol(b'.'),
                    maybe((digit(100), maybe((digit(10), maybe((digit(1),)))))),
                )),
            )),
            sequence((
                symbol_producer(b'1').consume(|v: &mut u16, _| *v = QValue::MAXIMUM.as_uint()),
                maybe((
                    symbol(b'.'),
                    maybe((symbol(b'0'), maybe((symbol(b'0'), maybe((symbol(b'0'),)))))),
                )),
            )),
        )),))
        .map(QValue::trusted)
        .try_parse(from)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WeightProducer;

/// Creates a producer of weight.
///
/// ```text
/// weight = OWS ";" OWS ( "q" / "Q" ) "=" qvalue
/// ```
///
/// ```
/// use hfparse::{weight_producer, try_parse};
///
/// assert_eq!(300, try_parse(" ; q=0.3", weight_producer()).unwrap().as_uint());
/// ```
pub fn weight_producer() -> WeightProducer {
    WeightProducer
}

impl Producer for WeightProducer {
    type Output = QValue;

    fn try_parse(&self, from: &mut Source<'_>) -> Result<QValue, Error> {
        produce::<QValue, _>((
            ows(),
            symbol(b';'),
            ows(),
            alternatives((symbol(b'q'), symbol(b'Q'))),
            symbol(b'='),
            qvalue_producer().as_result(),
        ))
        .try_parse(from)
    }
}
