pub use rowscan_core::*;
pub use rowscan_macros::*;
