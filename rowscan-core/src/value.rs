use rust_decimal::Decimal;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Dynamically typed value of one column in the current row.
///
/// Row sources produce one `Value` per column. Scalars carry the exact width they
/// were decoded with, arrays keep the dimension header sent by the server so the
/// mapper can tell a simple list apart from a matrix.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Numeric(Decimal),
    Text(String),
    Bytes(Vec<u8>),
    Date(Date),
    Time(Time),
    Timestamp(PrimitiveDateTime),
    TimestampWithTimezone(OffsetDateTime),
    Uuid(Uuid),
    /// Array as received from the wire.
    Array(Array),
    /// Native homogeneous sequence, ready to be stored in a `Vec` field.
    List(List),
    /// Value of a source type without a native mapping, carries the source type name.
    Unknown(String),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(..) => "bool",
            Value::Int16(..) => "int2",
            Value::Int32(..) => "int4",
            Value::Int64(..) => "int8",
            Value::Float32(..) => "float4",
            Value::Float64(..) => "float8",
            Value::Numeric(..) => "numeric",
            Value::Text(..) => "text",
            Value::Bytes(..) => "bytea",
            Value::Date(..) => "date",
            Value::Time(..) => "time",
            Value::Timestamp(..) => "timestamp",
            Value::TimestampWithTimezone(..) => "timestamptz",
            Value::Uuid(..) => "uuid",
            Value::Array(array) => array.elements.kind_name(),
            Value::List(list) => list.kind_name(),
            Value::Unknown(..) => "unknown",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// One dimension of a wire array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayDimension {
    pub len: i32,
    pub lower_bound: i32,
}

/// Array value with its dimension header.
///
/// Elements are stored flattened in row-major order, as sent by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    pub dimensions: Vec<ArrayDimension>,
    pub elements: ArrayElements,
}

impl Array {
    /// One-dimensional array with lower bound 1.
    ///
    /// The wire header stores lengths as `i32`, longer arrays report `i32::MAX`.
    pub fn simple(elements: impl Into<ArrayElements>) -> Self {
        let elements = elements.into();
        Self {
            dimensions: vec![ArrayDimension {
                len: i32::try_from(elements.len()).unwrap_or(i32::MAX),
                lower_bound: 1,
            }],
            elements,
        }
    }

    /// Array with an explicit shape, every dimension has lower bound 1.
    ///
    /// The product of the dimensions must match the number of elements, an empty
    /// shape holds no elements.
    pub fn with_shape(shape: &[i32], elements: impl Into<ArrayElements>) -> Self {
        let elements = elements.into();
        debug_assert_eq!(
            Self::shape_len(shape),
            elements.len() as u64,
            "Array shape {shape:?} does not match the number of elements"
        );
        Self {
            dimensions: shape
                .iter()
                .map(|&len| ArrayDimension { len, lower_bound: 1 })
                .collect(),
            elements,
        }
    }

    fn shape_len(shape: &[i32]) -> u64 {
        if shape.is_empty() {
            return 0;
        }
        shape.iter().map(|&len| len.max(0) as u64).product()
    }

    pub fn is_simple(&self) -> bool {
        self.dimensions.len() == 1
    }
}

/// Elements of the array kinds recognized by the mapper.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayElements {
    Text(Vec<String>),
    Int2(Vec<i16>),
    Int4(Vec<i32>),
    Int8(Vec<i64>),
    Float4(Vec<f32>),
    Float8(Vec<f64>),
    Bytea(Vec<Vec<u8>>),
}

impl ArrayElements {
    pub fn len(&self) -> usize {
        match self {
            ArrayElements::Text(v) => v.len(),
            ArrayElements::Int2(v) => v.len(),
            ArrayElements::Int4(v) => v.len(),
            ArrayElements::Int8(v) => v.len(),
            ArrayElements::Float4(v) => v.len(),
            ArrayElements::Float8(v) => v.len(),
            ArrayElements::Bytea(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ArrayElements::Text(..) => "text[]",
            ArrayElements::Int2(..) => "int2[]",
            ArrayElements::Int4(..) => "int4[]",
            ArrayElements::Int8(..) => "int8[]",
            ArrayElements::Float4(..) => "float4[]",
            ArrayElements::Float8(..) => "float8[]",
            ArrayElements::Bytea(..) => "bytea[]",
        }
    }
}

/// Native homogeneous sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum List {
    Text(Vec<String>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Bytes(Vec<Vec<u8>>),
}

impl List {
    pub fn kind_name(&self) -> &'static str {
        match self {
            List::Text(..) => "Vec<String>",
            List::Int16(..) => "Vec<i16>",
            List::Int32(..) => "Vec<i32>",
            List::Int64(..) => "Vec<i64>",
            List::Float32(..) => "Vec<f32>",
            List::Float64(..) => "Vec<f64>",
            List::Bytes(..) => "Vec<Vec<u8>>",
        }
    }
}

macro_rules! impl_from {
    ($source:ty, $destination:path) => {
        impl From<$source> for Value {
            fn from(value: $source) -> Self {
                $destination(value)
            }
        }
    };
    ($source:ty, $outer:path, $inner:path) => {
        impl From<$source> for $outer {
            fn from(value: $source) -> Self {
                $inner(value)
            }
        }
    };
}
impl_from!(bool, Value::Boolean);
impl_from!(i16, Value::Int16);
impl_from!(i32, Value::Int32);
impl_from!(i64, Value::Int64);
impl_from!(f32, Value::Float32);
impl_from!(f64, Value::Float64);
impl_from!(Decimal, Value::Numeric);
impl_from!(String, Value::Text);
impl_from!(Vec<u8>, Value::Bytes);
impl_from!(Date, Value::Date);
impl_from!(Time, Value::Time);
impl_from!(PrimitiveDateTime, Value::Timestamp);
impl_from!(OffsetDateTime, Value::TimestampWithTimezone);
impl_from!(Uuid, Value::Uuid);
impl_from!(Array, Value::Array);
impl_from!(List, Value::List);

impl_from!(Vec<String>, ArrayElements, ArrayElements::Text);
impl_from!(Vec<i16>, ArrayElements, ArrayElements::Int2);
impl_from!(Vec<i32>, ArrayElements, ArrayElements::Int4);
impl_from!(Vec<i64>, ArrayElements, ArrayElements::Int8);
impl_from!(Vec<f32>, ArrayElements, ArrayElements::Float4);
impl_from!(Vec<f64>, ArrayElements, ArrayElements::Float8);
impl_from!(Vec<Vec<u8>>, ArrayElements, ArrayElements::Bytea);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.into())
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
