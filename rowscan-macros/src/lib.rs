mod decode_field;
mod decode_record;
mod record_trait;

use decode_record::decode_record;
use proc_macro::TokenStream;
use record_trait::record_trait;
use syn::{ItemStruct, parse_macro_input};

/// Implements `Record` and `Destination` for a struct with named fields.
///
/// Only `pub` fields are collected, restricted ones like `pub(crate)` are left out.
/// Attributes:
/// - `#[record(rename_all = "camelCase")]` on the struct changes the labels of all fields.
/// - `#[record(name = "column")]` sets the label of a field.
/// - `#[record(skip)]` leaves the field out.
/// - `#[record(flatten)]` lifts the fields of an embedded record, even if the field is private.
/// - `#[record(readonly)]` matches the field but never writes it.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let item: ItemStruct = parse_macro_input!(input as ItemStruct);
    let record = decode_record(item);
    record_trait(&record).into()
}
