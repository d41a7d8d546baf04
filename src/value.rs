use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Rendering of a null timestamp, the RFC 3339 form of 0001-01-01 UTC.
const ZERO_TIMESTAMP: &str = "0001-01-01T00:00:00Z";

/// The native representation of a stored [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Int,
    Int64,
    UInt64,
    Float32,
    Float64,
    Bool,
    Decimal,
    Timestamp,
    Opaque,
    /// No representation at all; only ever seen inside [`Value::Null`]
    Untyped,
}

impl Kind {
    /// True for every kind that renders as `0` when null
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Kind::Int | Kind::Int64 | Kind::UInt64 | Kind::Float32 | Kind::Float64 | Kind::Decimal
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::String => "string",
            Kind::Int => "int",
            Kind::Int64 => "int64",
            Kind::UInt64 => "uint64",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
            Kind::Bool => "bool",
            Kind::Decimal => "decimal",
            Kind::Timestamp => "timestamp",
            Kind::Opaque => "opaque",
            Kind::Untyped => "untyped",
        };
        f.write_str(name)
    }
}

/// A type-erased payload for values outside the closed [`Value`] set.
///
/// The payload is shared, so cloning a collection never clones it.
#[derive(Clone)]
pub struct OpaqueValue {
    type_id: TypeId,
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

impl OpaqueValue {
    /// Wraps any `Send + Sync` value
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            value: Arc::new(value),
        }
    }

    /// Check if the contained value is of type T
    pub fn is_type<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Get a reference to the contained value if it is of type T
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Two opaque values are equal only when they share the same payload.
impl PartialEq for OpaqueValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

/// A dynamically-typed value stored under a name.
///
/// Values keep the representation they were built with; the typed accessors of
/// [`NameValues`](crate::NameValues) decide on each read how to turn that
/// representation into the type the caller asked for.
///
/// # Examples
///
/// ```
/// use sovran_namevalue::{Kind, Value};
///
/// assert_eq!(Value::from("48").kind(), Kind::String);
/// assert_eq!(Value::from(48i64).to_string(), "48");
/// assert_eq!(Value::from(None::<bool>).to_string(), "false");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i32),
    Int64(i64),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Bool(bool),
    Decimal(Decimal),
    Timestamp(DateTime<Utc>),
    /// A typed reference that holds nothing
    Null(Kind),
    Opaque(OpaqueValue),
}

impl Value {
    /// Builds a typed null
    pub fn null(kind: Kind) -> Self {
        Value::Null(kind)
    }

    /// The native representation; a null reports the kind it stands in for
    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Int(_) => Kind::Int,
            Value::Int64(_) => Kind::Int64,
            Value::UInt64(_) => Kind::UInt64,
            Value::Float32(_) => Kind::Float32,
            Value::Float64(_) => Kind::Float64,
            Value::Bool(_) => Kind::Bool,
            Value::Decimal(_) => Kind::Decimal,
            Value::Timestamp(_) => Kind::Timestamp,
            Value::Null(kind) => *kind,
            Value::Opaque(_) => Kind::Opaque,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null(Kind::Untyped)
    }
}

/// Display text used by interpolation.
///
/// Floats use six fractional digits, timestamps are quoted RFC 3339, and nulls
/// render as the zero text of their kind.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Int64(i) => write!(f, "{}", i),
            Value::UInt64(u) => write!(f, "{}", u),
            Value::Float32(v) => write!(f, "{:.6}", v),
            Value::Float64(v) => write!(f, "{:.6}", v),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::Timestamp(t) => {
                write!(f, "'{}'", t.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            Value::Null(Kind::Bool) => f.write_str("false"),
            Value::Null(Kind::Timestamp) => write!(f, "'{}'", ZERO_TIMESTAMP),
            Value::Null(kind) if kind.is_numeric() => f.write_str("0"),
            Value::Null(_) | Value::Opaque(_) => Ok(()),
        }
    }
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

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::UInt64(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float32(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float64(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }
}

impl From<OpaqueValue> for Value {
    fn from(value: OpaqueValue) -> Self {
        Value::Opaque(value)
    }
}

impl From<Option<DateTime<Utc>>> for Value {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(Value::Null(Kind::Timestamp), Value::Timestamp)
    }
}
