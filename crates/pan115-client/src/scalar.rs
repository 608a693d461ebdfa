//! Tolerant decoding of wire scalars.
//!
//! The 115 web API is loose about JSON types: the same field can arrive as
//! `123`, `"123"`, `""` or not at all depending on the endpoint, and flags
//! show up as `true`, `1` or `"1"`. Raw response types keep such fields as
//! opaque [`Scalar`] tokens; the mappers decode them one field at a time
//! through [`decode`], so a malformed token is always reported together with
//! the field it came from.
//!
//! Decoding is total over numbers, numeric strings, empty strings and
//! `null`/absent. Everything else is a [`DecodeError`].

use std::fmt;

use serde::Deserialize;
use serde_json::{Number, Value};

/// The semantic type a wire field is decoded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// 32-bit integer.
    Int,
    /// 64-bit integer (sizes, unix timestamps).
    Int64,
    /// Boolean carried as `0`/`1`.
    BoolAsInt,
    /// Floating point (progress, rates).
    Float,
    /// Opaque identifier carried as either a number or a string.
    Id,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Int => "int",
            ScalarKind::Int64 => "int64",
            ScalarKind::BoolAsInt => "bool-as-int",
            ScalarKind::Float => "float",
            ScalarKind::Id => "id",
        };
        f.write_str(name)
    }
}

/// A decoded, canonical scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Int(i32),
    Int64(i64),
    Bool(bool),
    Float(f64),
    Id(String),
}

/// A wire token that could not be decoded into its field's kind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("cannot decode field '{field}' as {kind} from {token}")]
pub struct DecodeError {
    /// Name of the offending wire field.
    pub field: String,
    /// Kind the field was expected to hold.
    pub kind: ScalarKind,
    /// The raw token, rendered as JSON.
    pub token: String,
}

impl DecodeError {
    fn new(field: &str, kind: ScalarKind, token: &Value) -> Self {
        Self {
            field: field.to_string(),
            kind,
            token: token.to_string(),
        }
    }
}

/// Decode `token` as `kind`, naming `field` on failure.
pub fn decode(field: &str, kind: ScalarKind, token: &Value) -> Result<ScalarValue, DecodeError> {
    match kind {
        ScalarKind::Int => decode_as::<i32>(field, token).map(ScalarValue::Int),
        ScalarKind::Int64 => decode_as::<i64>(field, token).map(ScalarValue::Int64),
        ScalarKind::BoolAsInt => decode_as::<bool>(field, token).map(ScalarValue::Bool),
        ScalarKind::Float => decode_as::<f64>(field, token).map(ScalarValue::Float),
        ScalarKind::Id => decode_as::<String>(field, token).map(ScalarValue::Id),
    }
}

/// Native types a token can decode into.
trait ScalarTarget: Sized {
    const KIND: ScalarKind;

    fn zero() -> Self;
    fn from_number(n: &Number) -> Option<Self>;
    fn from_literal(s: &str) -> Option<Self>;

    fn from_bool(_b: bool) -> Option<Self> {
        None
    }
}

impl ScalarTarget for i32 {
    const KIND: ScalarKind = ScalarKind::Int;

    fn zero() -> Self {
        0
    }

    fn from_number(n: &Number) -> Option<Self> {
        n.as_i64().and_then(|v| i32::try_from(v).ok())
    }

    fn from_literal(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

impl ScalarTarget for i64 {
    const KIND: ScalarKind = ScalarKind::Int64;

    fn zero() -> Self {
        0
    }

    fn from_number(n: &Number) -> Option<Self> {
        n.as_i64()
    }

    fn from_literal(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

impl ScalarTarget for bool {
    const KIND: ScalarKind = ScalarKind::BoolAsInt;

    fn zero() -> Self {
        false
    }

    fn from_number(n: &Number) -> Option<Self> {
        n.as_i64().map(|v| v != 0)
    }

    fn from_literal(s: &str) -> Option<Self> {
        s.parse::<i64>().ok().map(|v| v != 0)
    }

    fn from_bool(b: bool) -> Option<Self> {
        Some(b)
    }
}

impl ScalarTarget for f64 {
    const KIND: ScalarKind = ScalarKind::Float;

    fn zero() -> Self {
        0.0
    }

    fn from_number(n: &Number) -> Option<Self> {
        n.as_f64()
    }

    fn from_literal(s: &str) -> Option<Self> {
        s.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

impl ScalarTarget for String {
    const KIND: ScalarKind = ScalarKind::Id;

    fn zero() -> Self {
        String::new()
    }

    fn from_number(n: &Number) -> Option<Self> {
        if n.is_f64() {
            return None;
        }
        Some(n.to_string())
    }

    fn from_literal(s: &str) -> Option<Self> {
        Some(s.to_string())
    }
}

fn decode_as<T: ScalarTarget>(field: &str, token: &Value) -> Result<T, DecodeError> {
    let decoded = match token {
        Value::Null => Some(T::zero()),
        Value::Number(n) => T::from_number(n),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Some(T::zero())
            } else {
                T::from_literal(s)
            }
        }
        Value::Bool(b) => T::from_bool(*b),
        Value::Array(_) | Value::Object(_) => None,
    };
    decoded.ok_or_else(|| DecodeError::new(field, T::KIND, token))
}

/// An undecoded wire scalar.
///
/// Deserializes from any JSON token; a missing field (with `#[serde(default)]`)
/// is the same as `null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Scalar(Value);

impl Scalar {
    /// Wrap a raw token.
    pub fn new(token: impl Into<Value>) -> Self {
        Self(token.into())
    }

    /// The raw token.
    pub fn token(&self) -> &Value {
        &self.0
    }

    /// Whether the field was absent or `null`.
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// Decode as a 32-bit integer.
    pub fn int(&self, field: &str) -> Result<i32, DecodeError> {
        decode_as(field, &self.0)
    }

    /// Decode as a 64-bit integer.
    pub fn int64(&self, field: &str) -> Result<i64, DecodeError> {
        decode_as(field, &self.0)
    }

    /// Decode as a `0`/`1` boolean.
    pub fn flag(&self, field: &str) -> Result<bool, DecodeError> {
        decode_as(field, &self.0)
    }

    /// Decode as a float.
    pub fn float(&self, field: &str) -> Result<f64, DecodeError> {
        decode_as(field, &self.0)
    }

    /// Decode as an identifier string.
    pub fn id(&self, field: &str) -> Result<String, DecodeError> {
        decode_as(field, &self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_int_from_number_and_string_agree() {
        for n in [0_i64, 1, 7, 30, 1150, 20130827, i32::MAX as i64] {
            let from_number = decode("n", ScalarKind::Int, &json!(n)).unwrap();
            let from_string = decode("n", ScalarKind::Int, &json!(n.to_string())).unwrap();
            assert_eq!(from_number, from_string);
            assert_eq!(from_number, ScalarValue::Int(n as i32));
        }
    }

    #[test]
    fn test_empty_string_is_zero() {
        assert_eq!(decode("n", ScalarKind::Int, &json!("")).unwrap(), ScalarValue::Int(0));
        assert_eq!(
            decode("m", ScalarKind::BoolAsInt, &json!("")).unwrap(),
            ScalarValue::Bool(false)
        );
        assert_eq!(
            decode("s", ScalarKind::Int64, &json!("   ")).unwrap(),
            ScalarValue::Int64(0)
        );
    }

    #[test]
    fn test_null_is_zero() {
        assert_eq!(decode("n", ScalarKind::Int, &Value::Null).unwrap(), ScalarValue::Int(0));
        assert_eq!(
            decode("p", ScalarKind::Float, &Value::Null).unwrap(),
            ScalarValue::Float(0.0)
        );
        assert_eq!(
            decode("fid", ScalarKind::Id, &Value::Null).unwrap(),
            ScalarValue::Id(String::new())
        );
    }

    #[test]
    fn test_non_numeric_string_fails_with_field() {
        let err = decode("count", ScalarKind::Int, &json!("abc")).unwrap_err();
        assert_eq!(err.field, "count");
        assert_eq!(err.kind, ScalarKind::Int);
        assert_eq!(err.token, "\"abc\"");
        assert!(err.to_string().contains("count"));
    }

    #[test]
    fn test_containers_fail() {
        assert!(decode("s", ScalarKind::Int64, &json!([1])).is_err());
        assert!(decode("s", ScalarKind::Int64, &json!({"v": 1})).is_err());
        assert!(decode("fid", ScalarKind::Id, &json!({})).is_err());
    }

    #[test]
    fn test_int_rejects_fraction_and_overflow() {
        assert!(decode("n", ScalarKind::Int, &json!(1.5)).is_err());
        assert!(decode("n", ScalarKind::Int, &json!(i64::MAX)).is_err());
        assert_eq!(
            decode("n", ScalarKind::Int64, &json!(i64::MAX)).unwrap(),
            ScalarValue::Int64(i64::MAX)
        );
    }

    #[test]
    fn test_string_is_trimmed() {
        assert_eq!(
            decode("s", ScalarKind::Int64, &json!(" 1024 ")).unwrap(),
            ScalarValue::Int64(1024)
        );
    }

    #[test]
    fn test_bool_as_int() {
        assert_eq!(
            decode("m", ScalarKind::BoolAsInt, &json!("1")).unwrap(),
            ScalarValue::Bool(true)
        );
        assert_eq!(
            decode("m", ScalarKind::BoolAsInt, &json!(0)).unwrap(),
            ScalarValue::Bool(false)
        );
        assert_eq!(
            decode("state", ScalarKind::BoolAsInt, &json!(true)).unwrap(),
            ScalarValue::Bool(true)
        );
        assert!(decode("m", ScalarKind::BoolAsInt, &json!("yes")).is_err());
    }

    #[test]
    fn test_bool_token_rejected_for_numbers() {
        assert!(decode("n", ScalarKind::Int, &json!(true)).is_err());
    }

    #[test]
    fn test_float() {
        assert_eq!(
            decode("percentDone", ScalarKind::Float, &json!("45.5")).unwrap(),
            ScalarValue::Float(45.5)
        );
        assert_eq!(
            decode("percentDone", ScalarKind::Float, &json!(100)).unwrap(),
            ScalarValue::Float(100.0)
        );
        assert!(decode("percentDone", ScalarKind::Float, &json!("NaN")).is_err());
    }

    #[test]
    fn test_id_accepts_both_encodings() {
        let big = json!(2593093001609739968_u64);
        assert_eq!(Scalar::new(big).id("cid").unwrap(), "2593093001609739968");
        assert_eq!(Scalar::new("2593093001609739968").id("cid").unwrap(), "2593093001609739968");
        assert!(Scalar::new(1.5).id("cid").is_err());
    }

    #[test]
    fn test_scalar_deserializes_missing_as_null() {
        #[derive(Deserialize)]
        struct Wire {
            #[serde(default)]
            s: Scalar,
        }

        let wire: Wire = serde_json::from_value(json!({})).unwrap();
        assert!(wire.s.is_null());
        assert_eq!(wire.s.int64("s").unwrap(), 0);

        let wire: Wire = serde_json::from_value(json!({"s": "42"})).unwrap();
        assert_eq!(wire.s.int64("s").unwrap(), 42);
    }
}
