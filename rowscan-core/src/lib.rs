mod coerce;
mod destination;
mod error;
mod field;
mod matcher;
mod record;
mod row;
mod scanner;
mod value;

pub use coerce::*;
pub use destination::*;
pub use error::*;
pub use field::*;
pub use matcher::*;
pub use record::*;
pub use row::*;
pub use scanner::*;
pub use value::*;

pub use ::anyhow::Context;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
