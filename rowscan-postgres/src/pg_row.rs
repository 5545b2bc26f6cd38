use crate::WireValue;
use rowscan_core::{ColumnDescriptor, Context, Error, Result, Row, RowSource};

/// Row source over one row returned by `tokio_postgres`.
///
/// Values are decoded when fetched, the row can be fetched once.
pub struct PgRow {
    columns: Box<[ColumnDescriptor]>,
    row: Option<tokio_postgres::Row>,
}

impl PgRow {
    pub fn new(row: tokio_postgres::Row) -> Self {
        Self {
            columns: row
                .columns()
                .iter()
                .map(|c| ColumnDescriptor::new(c.name()))
                .collect(),
            row: Some(row),
        }
    }
}

impl From<tokio_postgres::Row> for PgRow {
    fn from(value: tokio_postgres::Row) -> Self {
        Self::new(value)
    }
}

impl RowSource for PgRow {
    fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    fn values(&mut self) -> Result<Row> {
        let row = self
            .row
            .take()
            .ok_or_else(|| Error::msg("The values of this row were already fetched"))?;
        row_to_values(&row)
    }
}

pub(crate) fn row_to_values(row: &tokio_postgres::Row) -> Result<Row> {
    (0..row.len())
        .map(|i| {
            row.try_get::<_, WireValue>(i)
                .map(Into::into)
                .with_context(|| {
                    let column = &row.columns()[i];
                    format!(
                        "Could not deserialize column {} `{}`: {}",
                        i,
                        column.name(),
                        column.type_()
                    )
                })
        })
        .collect()
}
