//! [RFC 7230](https://datatracker.ietf.org/doc/html/rfc7230) and
//! [RFC 7231](https://datatracker.ietf.org/doc/html/rfc7231) field
//! value grammar primitives.
//!
//! Provides producers of the building blocks of HTTP field values:
//! tokens, quoted-strings, OWS, qvalues and weights, comma-separated
//! lists and `;`-delimited parameters.  They are composed with the
//! backtracking combinators of this crate into parsers of complete
//! field values.
//!
//! This is an example of parsing
//! [Accept-Encoding](https://datatracker.ietf.org/doc/html/rfc7231#section-5.3.4)
//! header field:
//!
//! ```
//! use hfparse::{
//!     maybe, non_empty_comma_separated_list_producer, produce, token_producer, try_parse,
//!     weight_producer, Producer, QValue,
//! };
//!
//! #[derive(Debug, Default)]
//! struct Coding {
//!     name: String,
//!     weight: Option<QValue>,
//! }
//!
//! let coding = produce::<Coding, _>((
//!     token_producer().to_lower().consume(|c: &mut Coding, v| c.name = v),
//!     maybe((weight_producer().consume(|c: &mut Coding, v| c.weight = Some(v)),)),
//! ));
//! let accept_encoding = non_empty_comma_separated_list_producer::<Vec<Coding>, _>(coding);
//!
//! for c in try_parse("gzip;q=1.0, identity; q=0.5, *;q=0", &accept_encoding).unwrap() {
//!     println!("{} {}", c.name, c.weight.unwrap_or(QValue::MAXIMUM));
//! }
//! ```
mod basics;
pub mod chars;
mod error;
mod list;
mod log;
mod params;
mod producer;
mod qvalue;
mod source;

pub use crate::basics::{
    ows, ows_producer, quoted_string_producer, qvalue_producer, token_producer, weight_producer,
    OwsProducer, QValueProducer, QuotedStringProducer, TokenProducer, WeightProducer,
};
pub use crate::error::{Error, InvalidQValue, Reason};
pub use crate::list::{
    maybe_empty_comma_separated_list_producer, non_empty_comma_separated_list_producer,
    MaybeEmptyCommaSeparatedListProducer, NonEmptyCommaSeparatedListProducer,
};
pub use crate::params::{
    find_first, params_with_opt_value_producer, params_with_value_producer, NotFound,
    ParameterValue, ParameterWithMandatoryValue, ParameterWithMandatoryValueContainer,
    ParameterWithOptionalValue, ParameterWithOptionalValueContainer, ParamsWithOptValueProducer,
    ParamsWithValueProducer,
};
pub use crate::producer::{
    alternatives, digit_producer, from_fn, maybe, produce, repeat, sequence, symbol,
    symbol_producer, try_parse, Alternatives, AsResult, Clause, Clauses, Consume, Container,
    DigitProducer, FromFn, Map, Maybe, Produce, Producer, Repeat, Sequence, Skip, SymbolProducer,
    ToContainer, ToLower, N,
};
pub use crate::qvalue::QValue;
pub use crate::source::{Consumer, Source};
