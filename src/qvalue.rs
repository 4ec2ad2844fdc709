use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidQValue};
use crate::log::debug;

/// QValue is a quality value of
/// [RFC 7231](https://datatracker.ietf.org/doc/html/rfc7231#section-5.3.1).
///
/// ```text
/// qvalue = ( "0" [ "." 0*3DIGIT ] )
///        / ( "1" [ "." 0*3("0") ] )
/// ```
///
/// A qvalue has at most three digits after the point and lies in
/// [0.000, 1.000], so it is kept as an integer in [0, 1000]: `0.5` is
/// stored as 500.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QValue(u16);

impl QValue {
    /// The maximal qvalue, `1.000`.
    pub const MAXIMUM: QValue = QValue(1000);
    /// The minimal qvalue, `0.000`.
    pub const ZERO: QValue = QValue(0);

    /// Creates QValue without checking the range.  value must not
    /// exceed 1000.
    pub const fn trusted(value: u16) -> QValue {
        debug_assert!(value <= 1000);

        QValue(value)
    }

    /// Creates QValue from value that has not been checked yet.
    ///
    /// ```
    /// use hfparse::QValue;
    ///
    /// assert_eq!(QValue::trusted(700), QValue::untrusted(700).unwrap());
    /// assert!(QValue::untrusted(1001).is_err());
    /// ```
    pub fn untrusted(value: u16) -> Result<QValue, InvalidQValue> {
        if value > Self::MAXIMUM.0 {
            debug!("qvalue {value} is out of range");

            return Err(InvalidQValue(value));
        }

        Ok(QValue(value))
    }

    /// Returns the value multiplied by 1000.
    pub const fn as_uint(&self) -> u16 {
        self.0
    }

    /// Returns the decimal form of the value, which is always five
    /// characters long.
    ///
    /// ```
    /// use hfparse::QValue;
    ///
    /// assert_eq!("0.050", QValue::trusted(50).as_string());
    /// assert_eq!("1.000", QValue::MAXIMUM.as_string());
    /// ```
    pub fn as_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1000.. => f.pad("1.000"),
            v => f.pad(&format!("0.{v:03}")),
        }
    }
}

impl TryFrom<u16> for QValue {
    type Error = InvalidQValue;

    fn try_from(value: u16) -> Result<QValue, InvalidQValue> {
        QValue::untrusted(value)
    }
}

impl From<QValue> for u16 {
    fn from(v: QValue) -> u16 {
        v.0
    }
}

/// Parses a whole string as qvalue.
///
/// ```
/// use hfparse::QValue;
///
/// assert_eq!(Ok(QValue::trusted(250)), "0.25".parse());
/// assert!("0.25 ".parse::<QValue>().is_err());
/// ```
impl FromStr for QValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<QValue, Error> {
        crate::try_parse(s, crate::qvalue_producer())
    }
}
