//! Parameters of field values, such as the ones of `Content-Type`
//! and `Cache-Control`.
//!
//! Parameter names are converted to lower case.  Values are kept as
//! they are, except that quoted-strings are unquoted.
use crate::basics::{ows, quoted_string_producer, token_producer};
use crate::error::Error;
use crate::producer::{alternatives, maybe, produce, repeat, symbol, Producer, N};
use crate::source::Source;

/// A parameter that always has a value.
pub type ParameterWithMandatoryValue = (String, String);

/// Parameters with values, in the order they appear.
pub type ParameterWithMandatoryValueContainer = Vec<ParameterWithMandatoryValue>;

/// A parameter whose value may be omitted.
pub type ParameterWithOptionalValue = (String, Option<String>);

/// Parameters with optional values, in the order they appear.
pub type ParameterWithOptionalValueContainer = Vec<ParameterWithOptionalValue>;

#[derive(Debug, Clone, Copy, Default)]
pub struct ParamsWithValueProducer;

/// Creates a producer of parameters that must have a value.
///
/// ```text
/// T := *( OWS ";" OWS token "=" ( token / quoted-string ) )
/// ```
///
/// The producer never fails; it stops before the first parameter that
/// does not match.
///
/// ```
/// use hfparse::{params_with_value_producer, try_parse};
///
/// assert_eq!(
///     Ok(vec![
///         ("charset".to_string(), "UTF-8".to_string()),
///         ("format".to_string(), "flowed".to_string()),
///     ]),
///     try_parse(r#"; CharSet=UTF-8 ;format="flowed""#, params_with_value_producer())
/// );
/// ```
pub fn params_with_value_producer() -> ParamsWithValueProducer {
    ParamsWithValueProducer
}

impl Producer for ParamsWithValueProducer {
    type Output = ParameterWithMandatoryValueContainer;

    fn try_parse(&self, from: &mut Source<'_>) -> Result<Self::Output, Error> {
        type P = ParameterWithMandatoryValue;

        let param = produce::<P, _>((
            ows(),
            symbol(b';'),
            ows(),
            token_producer().to_lower().consume(|p: &mut P, name| p.0 = name),
            symbol(b'='),
            alternatives((
                token_producer().consume(|p: &mut P, value| p.1 = value),
                quoted_string_producer().consume(|p: &mut P, value| p.1 = value),
            )),
        ));

        produce::<Self::Output, _>((repeat(0, N, (param.to_container(),)),)).try_parse(from)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ParamsWithOptValueProducer;

/// Creates a producer of parameters whose value may be omitted.
///
/// ```text
/// T := *( OWS ";" OWS token [ "=" ( token / quoted-string ) ] )
/// ```
///
/// ```
/// use hfparse::{params_with_opt_value_producer, try_parse};
///
/// assert_eq!(
///     Ok(vec![
///         ("private".to_string(), None),
///         ("max-age".to_string(), Some("60".to_string())),
///     ]),
///     try_parse("; private; Max-Age=60", params_with_opt_value_producer())
/// );
/// ```
pub fn params_with_opt_value_producer() -> ParamsWithOptValueProducer {
    ParamsWithOptValueProducer
}

impl Producer for ParamsWithOptValueProducer {
    type Output = ParameterWithOptionalValueContainer;

    fn try_parse(&self, from: &mut Source<'_>) -> Result<Self::Output, Error> {
        type P = ParameterWithOptionalValue;

        let param = produce::<P, _>((
            ows(),
            symbol(b';'),
            ows(),
            token_producer().to_lower().consume(|p: &mut P, name| p.0 = name),
            maybe((
                symbol(b'='),
                alternatives((
                    token_producer().consume(|p: &mut P, value| p.1 = Some(value)),
                    quoted_string_producer().consume(|p: &mut P, value| p.1 = Some(value)),
                )),
            )),
        ));

        produce::<Self::Output, _>((repeat(0, N, (param.to_container(),)),)).try_parse(from)
    }
}

/// Indicates that [find_first] found no parameter with the given name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, thiserror::Error)]
#[error("parameter not found")]
pub struct NotFound;

/// Value of a parameter as returned by [find_first].
pub trait ParameterValue {
    type Ref<'a>
    where
        Self: 'a;

    fn as_value(&self) -> Self::Ref<'_>;
}

impl ParameterValue for String {
    type Ref<'a> = &'a str;

    fn as_value(&self) -> &str {
        self
    }
}

/// `None` means the parameter is present without a value.
impl ParameterValue for Option<String> {
    type Ref<'a> = Option<&'a str>;

    fn as_value(&self) -> Option<&str> {
        self.as_deref()
    }
}

/// Returns the value of the first parameter called `name`.  Names are
/// compared ignoring ASCII case.
///
/// ```
/// use hfparse::{find_first, NotFound};
///
/// let params = vec![("CharSet".to_string(), "utf-8".to_string())];
///
/// assert_eq!(Ok("utf-8"), find_first(&params, "charset"));
/// assert_eq!(Err(NotFound), find_first(&params, "boundary"));
/// ```
///
/// For parameters with optional values a parameter without value is
/// distinguished from a missing one:
///
/// ```
/// use hfparse::{find_first, NotFound};
///
/// let params = vec![
///     ("no-cache".to_string(), None),
///     ("max-age".to_string(), Some("60".to_string())),
/// ];
///
/// assert_eq!(Ok(None), find_first(&params, "no-cache"));
/// assert_eq!(Ok(Some("60")), find_first(&params, "Max-Age"));
/// assert_eq!(Err(NotFound), find_first(&params, "private"));
/// ```
pub fn find_first<'a, V: ParameterValue>(
    params: &'a [(String, V)],
    name: &str,
) -> Result<V::Ref<'a>, NotFound> {
    params
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_value())
        .ok_or(NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestCase<'a, V> {
        name: &'a str,
        input: &'a str,
        expect: Vec<(&'a str, V)>,
        // position of the cursor after parsing
        pos: usize,
    }

    fn owned(params: &[(&str, &str)]) -> ParameterWithMandatoryValueContainer {
        params
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    fn owned_opt(params: &[(&str, Option<&str>)]) -> ParameterWithOptionalValueContainer {
        params
            .iter()
            .map(|(n, v)| (n.to_string(), v.map(str::to_string)))
            .collect()
    }

    #[test]
    fn parse_params_with_value() {
        [
            TestCase {
                name: "empty input",
                input: "",
                expect: vec![],
                pos: 0,
            },
            TestCase {
                name: "token and quoted-string",
                input: r#";a=1;b="two words""#,
                expect: vec![("a", "1"), ("b", "two words")],
                pos: 18,
            },
            TestCase {
                name: "names are lowercased",
                input: "; CharSet=UTF-8",
                expect: vec![("charset", "UTF-8")],
                pos: 15,
            },
            TestCase {
                name: "spaces around semicolons",
                input: " ;\ta=b ; c=d",
                expect: vec![("a", "b"), ("c", "d")],
                pos: 12,
            },
            TestCase {
                name: "duplicates are kept",
                input: ";a=1;A=2;a=3",
                expect: vec![("a", "1"), ("a", "2"), ("a", "3")],
                pos: 12,
            },
            TestCase {
                name: "escaped quote in value",
                input: r#";title="say \"hi\"""#,
                expect: vec![("title", r#"say "hi""#)],
                pos: 19,
            },
            TestCase {
                name: "empty quoted value",
                input: r#";a="""#,
                expect: vec![("a", "")],
                pos: 5,
            },
            TestCase {
                name: "missing value stops",
                input: ";a=1;b;c=3",
                expect: vec![("a", "1")],
                pos: 4,
            },
            TestCase {
                name: "space before equals stops",
                input: ";a =1",
                expect: vec![],
                pos: 0,
            },
            TestCase {
                name: "unterminated quoted value stops",
                input: r#";a=1;b="x"#,
                expect: vec![("a", "1")],
                pos: 4,
            },
            TestCase {
                name: "list delimiter stops",
                input: ";a=1, text/plain",
                expect: vec![("a", "1")],
                pos: 4,
            },
        ]
        .iter()
        .for_each(|t| {
            let mut from = Source::from(t.input);

            assert_eq!(
                Ok(owned(&t.expect)),
                params_with_value_producer().try_parse(&mut from),
                "{}",
                t.name
            );
            assert_eq!(t.pos, from.current_position(), "{}: position", t.name);
        });
    }

    #[test]
    fn parse_params_with_opt_value() {
        [
            TestCase {
                name: "empty input",
                input: "",
                expect: vec![],
                pos: 0,
            },
            TestCase {
                name: "mixed",
                input: r#"; no-cache; Max-Age=60 ;ext="a b""#,
                expect: vec![
                    ("no-cache", None),
                    ("max-age", Some("60")),
                    ("ext", Some("a b")),
                ],
                pos: 33,
            },
            TestCase {
                name: "equals without value",
                input: ";a=;b",
                expect: vec![("a", None)],
                pos: 2,
            },
            TestCase {
                name: "empty name stops",
                input: ";a;=1",
                expect: vec![("a", None)],
                pos: 2,
            },
        ]
        .iter()
        .for_each(|t| {
            let mut from = Source::from(t.input);

            assert_eq!(
                Ok(owned_opt(&t.expect)),
                params_with_opt_value_producer().try_parse(&mut from),
                "{}",
                t.name
            );
            assert_eq!(t.pos, from.current_position(), "{}: position", t.name);
        });
    }

    #[test]
    fn find_first_with_value() {
        let params = owned(&[("charset", "utf-8"), ("Boundary", "x"), ("charset", "latin1")]);

        assert_eq!(Ok("utf-8"), find_first(&params, "charset"));
        assert_eq!(Ok("utf-8"), find_first(&params, "CHARSET"));
        assert_eq!(Ok("x"), find_first(&params, "boundary"));
        assert_eq!(Err(NotFound), find_first(&params, "char"));
        assert_eq!(Err(NotFound), find_first(&params, "charsets"));
        assert_eq!(Err(NotFound), find_first::<String>(&[], "charset"));
    }

    #[test]
    fn find_first_with_opt_value() {
        let params = owned_opt(&[("CharSet", Some("utf-8")), ("flag", None), ("flag", Some("1"))]);

        assert_eq!(Ok(Some("utf-8")), find_first(&params, "charset"));
        assert_eq!(Ok(None), find_first(&params, "FLAG"));
        assert_eq!(Err(NotFound), find_first(&params, "other"));
    }

    #[test]
    fn parse_then_find() {
        let mut from = Source::from("; Q=0.5; Level=1");
        let params = params_with_value_producer().try_parse(&mut from).unwrap();

        assert!(from.eof());
        assert_eq!(Ok("0.5"), find_first(&params, "q"));
        assert_eq!(Ok("1"), find_first(&params, "LEVEL"));
    }
}
