use crate::{FieldKind, Value};
use std::{collections::HashSet, iter};

/// Leaf field of a record, as seen by the mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Rust identifier of the field.
    pub name: &'static str,
    /// Name the column names are matched against.
    pub label: &'static str,
    pub kind: FieldKind,
    pub nullable: bool,
    /// False when the field is collected and matched but never written.
    pub settable: bool,
    /// Embedding depth, 0 for fields declared directly on the record.
    pub depth: usize,
    /// Positions to follow through the embedded records to reach the field.
    pub route: Box<[u16]>,
}

impl FieldDef {
    pub fn new(
        name: &'static str,
        label: &'static str,
        kind: FieldKind,
        nullable: bool,
        settable: bool,
    ) -> Self {
        Self {
            name,
            label,
            kind,
            nullable,
            settable,
            depth: 0,
            route: Box::new([]),
        }
    }
}

/// Building block of a schema, one per collected field of a record.
#[derive(Debug)]
pub enum Slot {
    /// Leaf field at the given position.
    Field(u16, FieldDef),
    /// Embedded record at the given position, its leaf fields are lifted.
    Flatten(u16, &'static Schema),
}

/// Flattened description of the leaf fields of a record type.
///
/// Fields are ordered by embedding depth, then by declaration order. When two
/// fields share the same label only the first one in that order is kept: the
/// outermost field wins and, at equal depth, the one declared first.
#[derive(Debug)]
pub struct Schema {
    name: &'static str,
    fields: Box<[FieldDef]>,
}

impl Schema {
    pub fn build(name: &'static str, slots: impl IntoIterator<Item = Slot>) -> Self {
        let mut fields = Vec::new();
        for slot in slots {
            match slot {
                Slot::Field(position, mut def) => {
                    def.depth = 0;
                    def.route = Box::new([position]);
                    fields.push(def);
                }
                Slot::Flatten(position, schema) => {
                    fields.extend(schema.fields.iter().map(|child| FieldDef {
                        depth: child.depth + 1,
                        route: iter::once(position)
                            .chain(child.route.iter().copied())
                            .collect(),
                        ..child.clone()
                    }));
                }
            }
        }
        fields.sort_by_key(|f| f.depth);
        let mut seen = HashSet::new();
        fields.retain(|f| {
            let first = seen.insert(f.label);
            if !first {
                log::trace!(
                    "`{}.{}` is shadowed by a field with the same name closer to the surface",
                    name,
                    f.name
                );
            }
            first
        });
        Self {
            name,
            fields: fields.into_boxed_slice(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn field(&self, label: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.label == label)
    }
}

/// A struct whose fields can receive the columns of a row.
///
/// Normally implemented with `#[derive(Record)]`.
pub trait Record {
    /// Schema of the type, built once and reused.
    fn schema() -> &'static Schema
    where
        Self: Sized;

    /// Same as [`Record::schema`], callable on a trait object.
    fn record_schema(&self) -> &'static Schema;

    /// Stores `value` into the field reached through `route`.
    ///
    /// The value is returned back when the field cannot hold it.
    fn assign(&mut self, route: &[u16], value: Value) -> Result<(), Value>;
}

/// Leaf fields reachable for assignment in `record`.
pub fn collect_fields(record: &dyn Record) -> &'static [FieldDef] {
    record.record_schema().fields()
}
