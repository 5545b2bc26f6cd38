use crate::{Record, ScanError};
use rust_decimal::Decimal;
use std::{rc::Rc, sync::Arc};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// What a destination resolves to once dereferenced.
pub enum Target<'a> {
    /// A record that can be written in place.
    Record(&'a mut dyn Record),
    /// A reference that points to nothing.
    Absent,
    /// Shared access only, the value cannot be written in place.
    Shared,
    /// Something that is not a record.
    Value,
}

impl<'a> Target<'a> {
    pub fn into_record(self) -> Result<&'a mut dyn Record, ScanError> {
        match self {
            Target::Record(record) => Ok(record),
            Target::Absent => Err(ScanError::ReferenceIsAbsent),
            Target::Shared => Err(ScanError::NotAReference),
            Target::Value => Err(ScanError::NotAComposite),
        }
    }
}

/// Anything a row can be read into.
pub trait Destination {
    fn target(&mut self) -> Target<'_>;
}

impl<T: Destination + ?Sized> Destination for &mut T {
    fn target(&mut self) -> Target<'_> {
        (**self).target()
    }
}

impl<T: ?Sized> Destination for &T {
    fn target(&mut self) -> Target<'_> {
        Target::Shared
    }
}

impl<T: Destination> Destination for Option<T> {
    fn target(&mut self) -> Target<'_> {
        match self {
            Some(v) => v.target(),
            None => Target::Absent,
        }
    }
}

impl<T: Destination + ?Sized> Destination for Box<T> {
    fn target(&mut self) -> Target<'_> {
        (**self).target()
    }
}

macro_rules! impl_destination_shared {
    ($wrapper:ident) => {
        impl<T: Destination + ?Sized> Destination for $wrapper<T> {
            fn target(&mut self) -> Target<'_> {
                match $wrapper::get_mut(self) {
                    Some(v) => v.target(),
                    None => Target::Shared,
                }
            }
        }
    };
}
impl_destination_shared!(Rc);
impl_destination_shared!(Arc);

macro_rules! impl_destination_value {
    ($($source:ty),+ $(,)?) => {
        $(
            impl Destination for $source {
                fn target(&mut self) -> Target<'_> {
                    Target::Value
                }
            }
        )+
    };
}
impl_destination_value!(
    bool,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    char,
    String,
    Decimal,
    Date,
    Time,
    PrimitiveDateTime,
    OffsetDateTime,
    Uuid,
);

impl<T> Destination for Vec<T> {
    fn target(&mut self) -> Target<'_> {
        Target::Value
    }
}

impl<T, const N: usize> Destination for [T; N] {
    fn target(&mut self) -> Target<'_> {
        Target::Value
    }
}
