mod pg_row;
mod wire_value;

pub use pg_row::*;
pub use wire_value::*;
