use crate::{Array, ArrayElements, ElementKind, FieldKind, List};

/// Why an array could not be turned into a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoerceError {
    /// The field is not a sequence of a compatible element type.
    Incompatible,
    /// The array has more (or less) than one dimension.
    NotSimple { dimensions: usize },
}

/// True when an array with these elements can be stored in a sequence of `element`.
///
/// Numeric elements may widen (`int2[]` fits `Vec<i16>`, `Vec<i32>` and `Vec<i64>`)
/// but never narrow.
pub fn accepts(elements: &ArrayElements, element: ElementKind) -> bool {
    use ElementKind::*;
    matches!(
        (elements, element),
        (ArrayElements::Text(..), Text)
            | (ArrayElements::Int2(..), Int16 | Int32 | Int64)
            | (ArrayElements::Int4(..), Int32 | Int64)
            | (ArrayElements::Int8(..), Int64)
            | (ArrayElements::Float4(..), Float32 | Float64)
            | (ArrayElements::Float8(..), Float64)
            | (ArrayElements::Bytea(..), Bytes)
    )
}

/// Materializes a wire array as a list of the declared field type.
///
/// The field type is checked first, then the array must be exactly one dimensional.
/// The result is always a new sequence that replaces the field content.
pub fn coerce_array(array: Array, target: FieldKind) -> Result<List, CoerceError> {
    let FieldKind::List(element) = target else {
        return Err(CoerceError::Incompatible);
    };
    if !accepts(&array.elements, element) {
        return Err(CoerceError::Incompatible);
    }
    if !array.is_simple() {
        return Err(CoerceError::NotSimple {
            dimensions: array.dimensions.len(),
        });
    }
    macro_rules! widen {
        ($values:expr, $variant:path, $ty:ty) => {
            $variant($values.into_iter().map(<$ty>::from).collect())
        };
    }
    Ok(match (array.elements, element) {
        (ArrayElements::Text(v), _) => List::Text(v),
        (ArrayElements::Int2(v), ElementKind::Int16) => List::Int16(v),
        (ArrayElements::Int2(v), ElementKind::Int32) => widen!(v, List::Int32, i32),
        (ArrayElements::Int2(v), _) => widen!(v, List::Int64, i64),
        (ArrayElements::Int4(v), ElementKind::Int32) => List::Int32(v),
        (ArrayElements::Int4(v), _) => widen!(v, List::Int64, i64),
        (ArrayElements::Int8(v), _) => List::Int64(v),
        (ArrayElements::Float4(v), ElementKind::Float32) => List::Float32(v),
        (ArrayElements::Float4(v), _) => widen!(v, List::Float64, f64),
        (ArrayElements::Float8(v), _) => List::Float64(v),
        (ArrayElements::Bytea(v), _) => List::Bytes(v),
    })
}
