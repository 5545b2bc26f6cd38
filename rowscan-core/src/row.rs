use crate::{Error, Result, Value};
use std::{collections::VecDeque, sync::Arc};

/// Values of one row, aligned by index with the column descriptors.
pub type Row = Box<[Value]>;

/// Shared column descriptors of a result set.
pub type RowNames = Arc<[ColumnDescriptor]>;

/// Description of one result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<&str> for ColumnDescriptor {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ColumnDescriptor {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Source of the current row of a result set.
///
/// The caller advances the underlying cursor, the mapper only reads the row it is
/// positioned on. `values()` is called at most once per row: implementations are
/// free to hand out their buffers and fail on a second call.
pub trait RowSource {
    /// Column descriptors, in the same order as the values.
    fn columns(&self) -> &[ColumnDescriptor];
    /// Values of the current row.
    fn values(&mut self) -> Result<Row>;
    /// Error left by the last operation of the source, checked before fetching values.
    fn last_error(&mut self) -> Option<Error> {
        None
    }
}

impl<T: RowSource + ?Sized> RowSource for &mut T {
    fn columns(&self) -> &[ColumnDescriptor] {
        (**self).columns()
    }
    fn values(&mut self) -> Result<Row> {
        (**self).values()
    }
    fn last_error(&mut self) -> Option<Error> {
        (**self).last_error()
    }
}

fn make_names<I>(labels: I) -> RowNames
where
    I: IntoIterator,
    I::Item: Into<ColumnDescriptor>,
{
    labels.into_iter().map(Into::into).collect()
}

/// A single in memory row with its column labels.
#[derive(Debug, Clone)]
pub struct RowLabeled {
    labels: RowNames,
    values: Option<Row>,
}

impl RowLabeled {
    pub fn new<I>(labels: I, values: impl Into<Row>) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ColumnDescriptor>,
    {
        Self {
            labels: make_names(labels),
            values: Some(values.into()),
        }
    }

    pub fn with_names(labels: RowNames, values: impl Into<Row>) -> Self {
        Self {
            labels,
            values: Some(values.into()),
        }
    }

    pub fn names(&self) -> &RowNames {
        &self.labels
    }

    /// True until the values are fetched.
    pub fn is_pending(&self) -> bool {
        self.values.is_some()
    }
}

impl RowSource for RowLabeled {
    fn columns(&self) -> &[ColumnDescriptor] {
        &self.labels
    }
    fn values(&mut self) -> Result<Row> {
        self.values
            .take()
            .ok_or_else(|| Error::msg("The values of this row were already fetched"))
    }
}

/// In memory result set, the caller moves through it with [`Rows::next`].
#[derive(Debug)]
pub struct Rows {
    labels: RowNames,
    pending: VecDeque<Row>,
    current: Option<Row>,
    error: Option<Error>,
}

impl Rows {
    pub fn new<I, R>(labels: I, rows: R) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ColumnDescriptor>,
        R: IntoIterator,
        R::Item: Into<Row>,
    {
        Self {
            labels: make_names(labels),
            pending: rows.into_iter().map(Into::into).collect(),
            current: None,
            error: None,
        }
    }

    /// Moves to the next row, returns false once the rows are exhausted.
    pub fn next(&mut self) -> bool {
        self.current = self.pending.pop_front();
        self.current.is_some()
    }

    /// Number of rows not yet reached.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Marks the result set as failed, every following read reports the error.
    pub fn fail(&mut self, error: Error) {
        self.error = Some(error);
    }
}

impl RowSource for Rows {
    fn columns(&self) -> &[ColumnDescriptor] {
        &self.labels
    }
    fn values(&mut self) -> Result<Row> {
        self.current
            .take()
            .ok_or_else(|| Error::msg("There is no current row, call `next()` first"))
    }
    fn last_error(&mut self) -> Option<Error> {
        self.error.as_ref().map(|e| Error::msg(format!("{e:#}")))
    }
}
