//! Typed values produced by coercion

use serde::{Deserialize, Serialize};
use std::fmt;

/// A coerced environment value.
///
/// Serialized untagged, so JSON `"x"`, `3000`, `true` and `["a", "b"]`
/// map onto the matching variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Name of the variant, used in conversion error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) if n.is_infinite() => {
                let sign = if n.is_sign_negative() { "-" } else { "" };
                write!(f, "{sign}Infinity")
            }
            Value::Number(n) => fmt_number(*n, f),
            Value::String(s) => f.write_str(s),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

/// Format a finite number as JavaScript's `String(number)` does: plain
/// decimal between `1e-6` and `1e21`, exponent form with a signed exponent
/// outside that range.
fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n == 0.0 {
        return f.write_str("0");
    }

    let magnitude = n.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let exp = format!("{n:e}");
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                write!(f, "{mantissa}e+{power}")
            }
            _ => f.write_str(&exp),
        };
    }

    write!(f, "{n}")
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Array(values.into_iter().map(Into::into).collect())
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(value as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Declared primitive type of a property.
///
/// `Other` holds any unrecognised type name from a dynamic declaration
/// source; coercing it records an unsupported type error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    #[default]
    String,
    Number,
    Boolean,
    Other(String),
}

impl From<String> for PropertyType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "string" => PropertyType::String,
            "number" => PropertyType::Number,
            "boolean" => PropertyType::Boolean,
            _ => PropertyType::Other(name),
        }
    }
}

impl From<&str> for PropertyType {
    fn from(name: &str) -> Self {
        PropertyType::from(name.to_string())
    }
}

impl From<PropertyType> for String {
    fn from(ty: PropertyType) -> Self {
        ty.to_string()
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::String => f.write_str("string"),
            PropertyType::Number => f.write_str("number"),
            PropertyType::Boolean => f.write_str("boolean"),
            PropertyType::Other(name) => f.write_str(name),
        }
    }
}

/// Parse a number the way JavaScript's `Number(string)` does.
///
/// Returns `None` for anything that would be `NaN`, including the empty
/// string.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(n) = parse_prefixed_integer(s) {
        return Some(n);
    }

    let (sign, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, s.strip_prefix('+').unwrap_or(s)),
    };
    if unsigned == "Infinity" {
        return Some(sign * f64::INFINITY);
    }

    // Rust also accepts "inf" and "nan"; Number() does not.
    let numeric = unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !numeric {
        return None;
    }

    s.parse::<f64>().ok()
}

fn parse_prefixed_integer(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };

    s[2..].chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|digit| acc * f64::from(radix) + f64::from(digit))
    })
}

/// Rust types that can be bound to an environment variable.
///
/// The derive macro uses this to build declarations from field types and to
/// turn resolved values back into fields.
pub trait EnvValue: Sized {
    /// Element type used for coercion.
    fn property_type() -> PropertyType;

    /// Whether the raw value is split into an array.
    fn is_array() -> bool {
        false
    }

    /// Convert a resolved value into `Self`.
    fn from_value(value: Value) -> Result<Self, String>;

    /// Convert `self` into a value, used for declared defaults.
    fn into_value(self) -> Value;
}

impl EnvValue for String {
    fn property_type() -> PropertyType {
        PropertyType::String
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(format!("expected a string, got {}", other.kind())),
        }
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl EnvValue for bool {
    fn property_type() -> PropertyType {
        PropertyType::Boolean
    }

    fn from_value(value: Value) -> Result<Self, String> {
        value
            .as_bool()
            .ok_or_else(|| format!("expected a boolean, got {}", value.kind()))
    }

    fn into_value(self) -> Value {
        Value::Boolean(self)
    }
}

impl EnvValue for f64 {
    fn property_type() -> PropertyType {
        PropertyType::Number
    }

    fn from_value(value: Value) -> Result<Self, String> {
        value
            .as_f64()
            .ok_or_else(|| format!("expected a number, got {}", value.kind()))
    }

    fn into_value(self) -> Value {
        Value::Number(self)
    }
}

impl EnvValue for f32 {
    fn property_type() -> PropertyType {
        PropertyType::Number
    }

    fn from_value(value: Value) -> Result<Self, String> {
        f64::from_value(value).map(|n| n as f32)
    }

    fn into_value(self) -> Value {
        Value::Number(f64::from(self))
    }
}

macro_rules! impl_env_value_integer {
    ($($ty:ty),*) => {
        $(
            impl EnvValue for $ty {
                fn property_type() -> PropertyType {
                    PropertyType::Number
                }

                fn from_value(value: Value) -> Result<Self, String> {
                    let n = f64::from_value(value)?;
                    // MAX as f64 rounds up to a power of two for the wide types, so
                    // the upper bound is exclusive.
                    let upper = <$ty>::MAX as f64 + 1.0;
                    if n.fract() != 0.0 || n < <$ty>::MIN as f64 || n >= upper {
                        return Err(format!("{} is out of range for {}", n, stringify!($ty)));
                    }
                    Ok(n as $ty)
                }

                fn into_value(self) -> Value {
                    Value::Number(self as f64)
                }
            }
        )*
    };
}

impl_env_value_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl<T: EnvValue> EnvValue for Vec<T> {
    fn property_type() -> PropertyType {
        T::property_type()
    }

    fn is_array() -> bool {
        true
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Array(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(format!("expected an array, got {}", other.kind())),
        }
    }

    fn into_value(self) -> Value {
        Value::Array(self.into_iter().map(EnvValue::into_value).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_and_float() {
        assert_eq!(parse_number("1"), Some(1.0));
        assert_eq!(parse_number("1.1"), Some(1.1));
        assert_eq!(parse_number("-42"), Some(-42.0));
        assert_eq!(parse_number("+7"), Some(7.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("5."), Some(5.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_number("  8080\n"), Some(8080.0));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("wrong"), None);
        assert_eq!(parse_number("12px"), None);
        assert_eq!(parse_number("1_000"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("--5"), None);
    }

    #[test]
    fn test_parse_infinity() {
        assert_eq!(parse_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_number("-Infinity"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_parse_radix_prefixes() {
        assert_eq!(parse_number("0x1F"), Some(31.0));
        assert_eq!(parse_number("0o17"), Some(15.0));
        assert_eq!(parse_number("0b101"), Some(5.0));
        assert_eq!(parse_number("0x"), None);
        assert_eq!(parse_number("0xZZ"), None);
        assert_eq!(parse_number("-0x10"), None);
    }

    #[test]
    fn test_display_matches_message_format() {
        assert_eq!(Value::Number(3000.0).to_string(), "3000");
        assert_eq!(Value::Number(1.5).to_string(), "1.5");
        assert_eq!(Value::Number(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::from(vec!["a", "b"]).to_string(), "a,b");
        assert_eq!(Value::Boolean(true).to_string(), "true");
    }

    #[test]
    fn test_display_uses_exponent_outside_decimal_range() {
        assert_eq!(Value::Number(1e21).to_string(), "1e+21");
        assert_eq!(Value::Number(1.5e300).to_string(), "1.5e+300");
        assert_eq!(Value::Number(-2e22).to_string(), "-2e+22");
        assert_eq!(Value::Number(1e-7).to_string(), "1e-7");
        assert_eq!(Value::Number(1e20).to_string(), "100000000000000000000");
        assert_eq!(Value::Number(0.000001).to_string(), "0.000001");
        assert_eq!(Value::Number(-0.0).to_string(), "0");
    }

    #[test]
    fn test_property_type_names() {
        assert_eq!(PropertyType::from("number"), PropertyType::Number);
        assert_eq!(
            PropertyType::from("date"),
            PropertyType::Other("date".to_string())
        );
        assert_eq!(PropertyType::Boolean.to_string(), "boolean");
    }

    #[test]
    fn test_value_deserialize_untagged() {
        let value: Value = serde_json::from_str(r#"["a", 1, true]"#).unwrap();
        assert_eq!(
            value,
            Value::Array(vec![
                Value::from("a"),
                Value::Number(1.0),
                Value::Boolean(true)
            ])
        );
    }

    #[test]
    fn test_integer_from_value_range_check() {
        assert_eq!(u16::from_value(Value::Number(8080.0)), Ok(8080));
        assert!(u16::from_value(Value::Number(70000.0)).is_err());
        assert!(u16::from_value(Value::Number(-1.0)).is_err());
        assert!(i32::from_value(Value::Number(1.5)).is_err());
        assert_eq!(u8::from_value(Value::Number(255.0)), Ok(255));
        assert!(u8::from_value(Value::Number(256.0)).is_err());
    }

    #[test]
    fn test_wide_integer_upper_bound_is_exclusive() {
        // 2^64 and 2^63 are what u64::MAX and i64::MAX round to as f64
        assert!(u64::from_value(Value::Number(18446744073709551616.0)).is_err());
        assert!(i64::from_value(Value::Number(9223372036854775808.0)).is_err());
        assert!(usize::from_value(Value::Number(1e30)).is_err());
        assert_eq!(
            i64::from_value(Value::Number(-9223372036854775808.0)),
            Ok(i64::MIN)
        );
        assert_eq!(
            u64::from_value(Value::Number(9007199254740992.0)),
            Ok(9_007_199_254_740_992)
        );
    }

    #[test]
    fn test_vec_from_value() {
        let value = Value::from(vec![1, 2, 3]);
        assert_eq!(Vec::<u8>::from_value(value), Ok(vec![1, 2, 3]));
        assert!(<Vec<u8>>::is_array());
        assert_eq!(<Vec<u8>>::property_type(), PropertyType::Number);
    }
}
