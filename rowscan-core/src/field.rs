use crate::{List, Value};
use rust_decimal::Decimal;
use std::fmt::{self, Display};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Element type of a sequence field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Text,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Bytes,
}

impl ElementKind {
    /// Width in bytes of numeric elements, `None` for the others.
    pub fn width(&self) -> Option<usize> {
        match self {
            ElementKind::Int16 => Some(2),
            ElementKind::Int32 | ElementKind::Float32 => Some(4),
            ElementKind::Int64 | ElementKind::Float64 => Some(8),
            ElementKind::Text | ElementKind::Bytes => None,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ElementKind::Int16 | ElementKind::Int32 | ElementKind::Int64
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, ElementKind::Float32 | ElementKind::Float64)
    }
}

impl Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ElementKind::Text => "String",
            ElementKind::Int16 => "i16",
            ElementKind::Int32 => "i32",
            ElementKind::Int64 => "i64",
            ElementKind::Float32 => "f32",
            ElementKind::Float64 => "f64",
            ElementKind::Bytes => "Vec<u8>",
        })
    }
}

/// Declared type of a leaf field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Boolean,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Numeric,
    Text,
    Bytes,
    Date,
    Time,
    Timestamp,
    TimestampWithTimezone,
    Uuid,
    List(ElementKind),
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Boolean => f.write_str("bool"),
            FieldKind::Int16 => f.write_str("i16"),
            FieldKind::Int32 => f.write_str("i32"),
            FieldKind::Int64 => f.write_str("i64"),
            FieldKind::Float32 => f.write_str("f32"),
            FieldKind::Float64 => f.write_str("f64"),
            FieldKind::Numeric => f.write_str("Decimal"),
            FieldKind::Text => f.write_str("String"),
            FieldKind::Bytes => f.write_str("Vec<u8>"),
            FieldKind::Date => f.write_str("Date"),
            FieldKind::Time => f.write_str("Time"),
            FieldKind::Timestamp => f.write_str("PrimitiveDateTime"),
            FieldKind::TimestampWithTimezone => f.write_str("OffsetDateTime"),
            FieldKind::Uuid => f.write_str("Uuid"),
            FieldKind::List(element) => write!(f, "Vec<{element}>"),
        }
    }
}

/// Types that can be stored in a record field.
///
/// Conversion is type preserving: a value is accepted only when its variant is
/// exactly the one declared by `KIND`. On failure the value is handed back so the
/// caller can report what was received.
pub trait FromValue: Sized {
    const KIND: FieldKind;
    const NULLABLE: bool = false;

    fn from_value(value: Value) -> Result<Self, Value>;
}

macro_rules! impl_from_value {
    ($source:ty, $kind:expr, $($pat:pat => $expr:expr),+ $(,)?) => {
        impl FromValue for $source {
            const KIND: FieldKind = $kind;
            fn from_value(value: Value) -> Result<Self, Value> {
                match value {
                    $($pat => Ok($expr),)+
                    _ => Err(value),
                }
            }
        }
    };
}
impl_from_value!(bool, FieldKind::Boolean, Value::Boolean(v) => v);
impl_from_value!(i16, FieldKind::Int16, Value::Int16(v) => v);
impl_from_value!(i32, FieldKind::Int32, Value::Int32(v) => v);
impl_from_value!(i64, FieldKind::Int64, Value::Int64(v) => v);
impl_from_value!(f32, FieldKind::Float32, Value::Float32(v) => v);
impl_from_value!(f64, FieldKind::Float64, Value::Float64(v) => v);
impl_from_value!(Decimal, FieldKind::Numeric, Value::Numeric(v) => v);
impl_from_value!(String, FieldKind::Text, Value::Text(v) => v);
impl_from_value!(Vec<u8>, FieldKind::Bytes, Value::Bytes(v) => v);
impl_from_value!(Date, FieldKind::Date, Value::Date(v) => v);
impl_from_value!(Time, FieldKind::Time, Value::Time(v) => v);
impl_from_value!(PrimitiveDateTime, FieldKind::Timestamp, Value::Timestamp(v) => v);
impl_from_value!(
    OffsetDateTime,
    FieldKind::TimestampWithTimezone,
    Value::TimestampWithTimezone(v) => v,
);
impl_from_value!(Uuid, FieldKind::Uuid, Value::Uuid(v) => v);
impl_from_value!(
    Vec<String>,
    FieldKind::List(ElementKind::Text),
    Value::List(List::Text(v)) => v,
);
impl_from_value!(
    Vec<i16>,
    FieldKind::List(ElementKind::Int16),
    Value::List(List::Int16(v)) => v,
);
impl_from_value!(
    Vec<i32>,
    FieldKind::List(ElementKind::Int32),
    Value::List(List::Int32(v)) => v,
);
impl_from_value!(
    Vec<i64>,
    FieldKind::List(ElementKind::Int64),
    Value::List(List::Int64(v)) => v,
);
impl_from_value!(
    Vec<f32>,
    FieldKind::List(ElementKind::Float32),
    Value::List(List::Float32(v)) => v,
);
impl_from_value!(
    Vec<f64>,
    FieldKind::List(ElementKind::Float64),
    Value::List(List::Float64(v)) => v,
);
impl_from_value!(
    Vec<Vec<u8>>,
    FieldKind::List(ElementKind::Bytes),
    Value::List(List::Bytes(v)) => v,
);

impl<T: FromValue> FromValue for Option<T> {
    const KIND: FieldKind = T::KIND;
    const NULLABLE: bool = true;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Null => Ok(None),
            v => T::from_value(v).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Box<T> {
    const KIND: FieldKind = T::KIND;
    const NULLABLE: bool = T::NULLABLE;

    fn from_value(value: Value) -> Result<Self, Value> {
        T::from_value(value).map(Box::new)
    }
}
