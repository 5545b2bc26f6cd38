use fallible_iterator::FallibleIterator;
use postgres_protocol::types;
use postgres_types::{FromSql, Type};
use rowscan_core::{Array, ArrayDimension, ArrayElements, Value};
use rust_decimal::Decimal;
use std::error::Error;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

type BoxError = Box<dyn Error + Sync + Send>;

/// Column value decoded from the Postgres binary format.
#[derive(Debug)]
pub struct WireValue(pub Value);

impl From<WireValue> for Value {
    fn from(value: WireValue) -> Self {
        value.0
    }
}

impl<'a> FromSql<'a> for WireValue {
    fn from_sql(ty: &Type, raw: &'a [u8]) -> Result<Self, BoxError> {
        Self::from_sql_nullable(ty, Some(raw))
    }
    fn from_sql_null(_ty: &Type) -> Result<Self, BoxError> {
        Ok(WireValue(Value::Null))
    }
    fn from_sql_nullable(ty: &Type, raw: Option<&'a [u8]>) -> Result<Self, BoxError> {
        let Some(raw) = raw else {
            return Ok(WireValue(Value::Null));
        };
        macro_rules! to_value {
            ($ty_var:ident, $raw:ident, $($($ty:path)|+ => $value:path, $decode:expr,)+) => {
                match *$ty_var {
                    $($($ty)|+ => $value($decode),)+
                    _ => {
                        log::debug!("No native mapping for sql type `{}`", $ty_var);
                        Value::Unknown($ty_var.name().to_string())
                    }
                }
            };
        }
        let value = to_value!(ty, raw,
            Type::BOOL => Value::Boolean, bool::from_sql(ty, raw)?,
            Type::INT2 => Value::Int16, i16::from_sql(ty, raw)?,
            Type::INT4 => Value::Int32, i32::from_sql(ty, raw)?,
            Type::INT8 => Value::Int64, i64::from_sql(ty, raw)?,
            Type::FLOAT4 => Value::Float32, f32::from_sql(ty, raw)?,
            Type::FLOAT8 => Value::Float64, f64::from_sql(ty, raw)?,
            Type::NUMERIC => Value::Numeric, Decimal::from_sql(ty, raw)?,
            Type::TEXT
            | Type::VARCHAR
            | Type::NAME
            | Type::BPCHAR
            | Type::JSON
            | Type::XML
            | Type::UNKNOWN => Value::Text, types::text_from_sql(raw)?.to_string(),
            Type::BYTEA => Value::Bytes, types::bytea_from_sql(raw).to_vec(),
            Type::DATE => Value::Date, Date::from_sql(ty, raw)?,
            Type::TIME => Value::Time, Time::from_sql(ty, raw)?,
            Type::TIMESTAMP => Value::Timestamp, PrimitiveDateTime::from_sql(ty, raw)?,
            Type::TIMESTAMPTZ => Value::TimestampWithTimezone, OffsetDateTime::from_sql(ty, raw)?,
            Type::UUID => Value::Uuid, Uuid::from_sql(ty, raw)?,
            Type::TEXT_ARRAY
            | Type::VARCHAR_ARRAY
            | Type::NAME_ARRAY
            | Type::BPCHAR_ARRAY => Value::Array, decode_array(raw, ArrayElements::Text, |v| {
                Ok(types::text_from_sql(v)?.to_string())
            })?,
            Type::INT2_ARRAY => Value::Array, decode_array(raw, ArrayElements::Int2, types::int2_from_sql)?,
            Type::INT4_ARRAY => Value::Array, decode_array(raw, ArrayElements::Int4, types::int4_from_sql)?,
            Type::INT8_ARRAY => Value::Array, decode_array(raw, ArrayElements::Int8, types::int8_from_sql)?,
            Type::FLOAT4_ARRAY => Value::Array, decode_array(raw, ArrayElements::Float4, types::float4_from_sql)?,
            Type::FLOAT8_ARRAY => Value::Array, decode_array(raw, ArrayElements::Float8, types::float8_from_sql)?,
            Type::BYTEA_ARRAY => Value::Array, decode_array(raw, ArrayElements::Bytea, |v| {
                Ok(types::bytea_from_sql(v).to_vec())
            })?,
        );
        Ok(WireValue(value))
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }
}

/// Decodes an array keeping its dimension header.
///
/// NULL elements become the default value of the element type. Postgres sends empty
/// arrays without dimensions, those are reported as one dimension of length 0.
fn decode_array<T, F>(
    raw: &[u8],
    make: impl FnOnce(Vec<T>) -> ArrayElements,
    decode: F,
) -> Result<Array, BoxError>
where
    T: Default,
    F: Fn(&[u8]) -> Result<T, BoxError>,
{
    let array = types::array_from_sql(raw)?;
    let mut dimensions: Vec<ArrayDimension> = array
        .dimensions()
        .map(|d| {
            Ok(ArrayDimension {
                len: d.len,
                lower_bound: d.lower_bound,
            })
        })
        .collect()?;
    let elements: Vec<T> = array
        .values()
        .map(|v| match v {
            Some(v) => decode(v),
            None => Ok(T::default()),
        })
        .collect()?;
    if dimensions.is_empty() {
        dimensions.push(ArrayDimension {
            len: 0,
            lower_bound: 1,
        });
    }
    Ok(Array {
        dimensions,
        elements: make(elements),
    })
}
