//! Best-effort conversion of stored [`Value`]s into requested types.
//!
//! Every target follows the same priority: a value already in the target's
//! native representation is returned as is, text is parsed with the target's
//! parse rules, and anything else is refused. The lenient accessors turn a
//! refusal into the target's zero value; the strict ones surface the
//! [`CoerceError`].

use crate::error::CoerceError;
use crate::value::{Kind, Value};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Text values that read as `true`. Matching is exact and case-sensitive.
pub const TRUE_LITERALS: [&str; 5] = ["true", "yes", "1", "-1", "on"];

/// Characters removed from text before it is parsed as a decimal.
pub const DECIMAL_STRIP_CHARS: [char; 2] = [',', ' '];

mod sealed {
    pub trait Sealed {}
}

/// The closed set of types a stored value can be coerced into.
///
/// Implemented for `String`, `i32`, `i64`, `u64`, `f32`, `f64`, `bool` and
/// [`Decimal`]. The trait is sealed.
///
/// # Examples
///
/// ```
/// use sovran_namevalue::{Scalar, Value};
///
/// assert_eq!(i32::from_value(&Value::from("1028")), 1028);
/// assert_eq!(i32::from_value(&Value::from("ten")), 0);
/// assert!(i32::try_from_value(&Value::from("ten")).is_err());
/// ```
pub trait Scalar: sealed::Sealed + Sized + Default + Clone {
    /// The representation that converts without parsing
    const KIND: Kind;

    /// Converts `value`, reporting why when it cannot
    fn try_from_value(value: &Value) -> Result<Self, CoerceError>;

    /// Converts `value`, falling back to the zero value
    fn from_value(value: &Value) -> Self {
        Self::try_from_value(value).unwrap_or_default()
    }
}

/// `None` becomes a null of the scalar's kind.
impl<T> From<Option<T>> for Value
where
    T: Scalar + Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null(T::KIND), Into::into)
    }
}

fn refuse(value: &Value, target: Kind) -> CoerceError {
    match value {
        Value::Null(kind) => CoerceError::Null {
            kind: *kind,
            target,
        },
        other => CoerceError::Incompatible {
            from: other.kind(),
            to: target,
        },
    }
}

fn parse_text<T: FromStr>(text: &str, target: Kind) -> Result<T, CoerceError> {
    text.parse().map_err(|_| CoerceError::Parse {
        target,
        input: text.to_string(),
    })
}

/// Implements [`Scalar`] for a type whose only conversions are the native
/// variant and parsing text.
macro_rules! parsed_scalar {
    ($ty:ty, $variant:ident) => {
        impl sealed::Sealed for $ty {}

        impl Scalar for $ty {
            const KIND: Kind = Kind::$variant;

            fn try_from_value(value: &Value) -> Result<Self, CoerceError> {
                match value {
                    Value::$variant(native) => Ok(*native),
                    Value::String(text) => parse_text(text, Self::KIND),
                    other => Err(refuse(other, Self::KIND)),
                }
            }
        }
    };
}

parsed_scalar!(i32, Int);
parsed_scalar!(i64, Int64);
parsed_scalar!(u64, UInt64);
parsed_scalar!(f32, Float32);
parsed_scalar!(f64, Float64);

impl sealed::Sealed for String {}

impl Scalar for String {
    const KIND: Kind = Kind::String;

    fn try_from_value(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::String(text) => Ok(text.clone()),
            other => Err(refuse(other, Self::KIND)),
        }
    }
}

impl sealed::Sealed for bool {}

impl Scalar for bool {
    const KIND: Kind = Kind::Bool;

    fn try_from_value(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::Bool(native) => Ok(*native),
            Value::String(text) => Ok(TRUE_LITERALS.contains(&text.as_str())),
            other => Err(refuse(other, Self::KIND)),
        }
    }
}

impl sealed::Sealed for Decimal {}

impl Scalar for Decimal {
    const KIND: Kind = Kind::Decimal;

    fn try_from_value(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::Decimal(native) => Ok(*native),
            Value::String(text) => parse_decimal(text),
            Value::Int(i) => Ok(Decimal::from(*i)),
            Value::Int64(i) => Ok(Decimal::from(*i)),
            Value::UInt64(u) => Ok(Decimal::from(*u)),
            Value::Float32(f) => decimal_from_float(*f, f.is_finite()),
            Value::Float64(f) => decimal_from_float(*f, f.is_finite()),
            other => Err(refuse(other, Self::KIND)),
        }
    }
}

/// Parses grouped text such as `"10,281,028.4321"` or `"1 000"`, in plain or
/// scientific notation.
fn parse_decimal(text: &str) -> Result<Decimal, CoerceError> {
    let cleaned: String = text
        .chars()
        .filter(|c| !DECIMAL_STRIP_CHARS.contains(c))
        .collect();

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| CoerceError::Parse {
            target: Kind::Decimal,
            input: text.to_string(),
        })
}

/// Floats go through their shortest round-trip text, so `0.1f64` becomes
/// exactly `0.1`.
fn decimal_from_float<F: ToString>(value: F, finite: bool) -> Result<Decimal, CoerceError> {
    if !finite {
        return Err(CoerceError::NonFinite {
            target: Kind::Decimal,
        });
    }
    parse_decimal(&value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn dec(text: &str) -> Decimal {
        Decimal::from_str(text).unwrap()
    }

    #[test]
    fn test_native_values_pass_through() {
        assert_eq!(i32::try_from_value(&Value::Int(1028)), Ok(1028));
        assert_eq!(i64::try_from_value(&Value::Int64(1028)), Ok(1028));
        assert_eq!(u64::try_from_value(&Value::UInt64(1028)), Ok(1028));
        assert_eq!(f64::try_from_value(&Value::Float64(1028.4321)), Ok(1028.4321));
        assert_eq!(f32::try_from_value(&Value::Float32(2.5)), Ok(2.5));
        assert_eq!(bool::try_from_value(&Value::Bool(true)), Ok(true));
        assert_eq!(
            String::try_from_value(&Value::from("Razzie")),
            Ok("Razzie".to_string())
        );
        assert_eq!(
            Decimal::try_from_value(&Value::Decimal(dec("1.5"))),
            Ok(dec("1.5"))
        );
    }

    #[test]
    fn test_text_is_parsed() {
        assert_eq!(i32::try_from_value(&Value::from("1028")), Ok(1028));
        assert_eq!(i32::try_from_value(&Value::from("-7")), Ok(-7));
        assert_eq!(
            i64::try_from_value(&Value::from("102810281028")),
            Ok(102810281028)
        );
        assert_eq!(f64::try_from_value(&Value::from("1028.4321")), Ok(1028.4321));
        assert_eq!(f32::try_from_value(&Value::from("0.25")), Ok(0.25));
    }

    #[test]
    fn test_malformed_text_reports_parse_error() {
        assert_eq!(
            i32::try_from_value(&Value::from("forty")),
            Err(CoerceError::Parse {
                target: Kind::Int,
                input: "forty".to_string()
            })
        );
        // Out of range for i32 but fine for i64.
        assert!(i32::try_from_value(&Value::from("102810281028")).is_err());
        assert!(f64::try_from_value(&Value::from("")).is_err());
        assert_eq!(i32::from_value(&Value::from("forty")), 0);
        assert_eq!(f64::from_value(&Value::from("1.2.3")), 0.0);
    }

    #[test]
    fn test_other_widths_are_refused() {
        assert_eq!(
            i64::try_from_value(&Value::Int(5)),
            Err(CoerceError::Incompatible {
                from: Kind::Int,
                to: Kind::Int64
            })
        );
        assert!(i32::try_from_value(&Value::Int64(5)).is_err());
        assert!(f64::try_from_value(&Value::Float32(1.0)).is_err());
        assert!(f64::try_from_value(&Value::Int(1)).is_err());
        assert_eq!(String::from_value(&Value::Int(48)), "");
        assert_eq!(String::from_value(&Value::Bool(true)), "");
        assert!(bool::try_from_value(&Value::Int(1)).is_err());
        assert!(i32::try_from_value(&Value::Timestamp(Utc::now())).is_err());
    }

    #[test]
    fn test_nulls_are_refused() {
        assert_eq!(
            i32::try_from_value(&Value::null(Kind::Int)),
            Err(CoerceError::Null {
                kind: Kind::Int,
                target: Kind::Int
            })
        );
        assert_eq!(String::from_value(&Value::null(Kind::String)), "");
        assert!(!bool::from_value(&Value::default()));
    }

    #[test]
    fn test_bool_literals() {
        for literal in TRUE_LITERALS {
            assert_eq!(bool::try_from_value(&Value::from(literal)), Ok(true), "{literal}");
        }
        for literal in ["false", "no", "0", "off", "TRUE", "Yes", "ON", "", "2"] {
            assert_eq!(bool::try_from_value(&Value::from(literal)), Ok(false), "{literal}");
        }
    }

    #[test]
    fn test_decimal_from_grouped_text() {
        assert_eq!(
            Decimal::from_value(&Value::from("10,281,028.4321")),
            dec("10281028.4321")
        );
        assert_eq!(Decimal::from_value(&Value::from("1 000 000")), dec("1000000"));
        assert_eq!(Decimal::from_value(&Value::from("-0.50")), dec("-0.50"));
        assert_eq!(Decimal::from_value(&Value::from("1.5e3")), dec("1500"));
    }

    #[test]
    fn test_decimal_from_numbers() {
        assert_eq!(Decimal::from_value(&Value::Int(1028)), dec("1028"));
        assert_eq!(
            Decimal::from_value(&Value::Int64(102810281028)),
            dec("102810281028")
        );
        assert_eq!(Decimal::from_value(&Value::UInt64(42)), dec("42"));
        assert_eq!(
            Decimal::from_value(&Value::Float64(10281028.4321)),
            dec("10281028.4321")
        );
        assert_eq!(Decimal::from_value(&Value::Float32(0.5)), dec("0.5"));
    }

    #[test]
    fn test_decimal_failures() {
        assert_eq!(
            Decimal::try_from_value(&Value::Float64(f64::NAN)),
            Err(CoerceError::NonFinite {
                target: Kind::Decimal
            })
        );
        assert!(Decimal::try_from_value(&Value::Float32(f32::INFINITY)).is_err());
        assert!(Decimal::try_from_value(&Value::from("12abc")).is_err());
        assert!(Decimal::try_from_value(&Value::Bool(true)).is_err());
        assert_eq!(Decimal::from_value(&Value::from("")), Decimal::ZERO);
    }

    #[test]
    fn test_none_becomes_typed_null() {
        assert_eq!(Value::from(None::<i64>), Value::null(Kind::Int64));
        assert_eq!(Value::from(None::<String>), Value::null(Kind::String));
        assert_eq!(Value::from(Some(3i32)), Value::Int(3));
        assert_eq!(Value::from(Some(dec("2.5"))), Value::Decimal(dec("2.5")));
    }
}
