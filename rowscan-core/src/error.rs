/// Reasons a row could not be read into a destination.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    #[error("destination is absent")]
    DestinationAbsent,

    #[error("destination is not a mutable reference")]
    NotAReference,

    #[error("destination points to nothing")]
    ReferenceIsAbsent,

    #[error("destination is not a record")]
    NotAComposite,

    #[error("destination record has no fields")]
    EmptyDestination,

    /// Error coming from the row source, returned unchanged.
    #[error(transparent)]
    RowSource(#[from] anyhow::Error),

    #[error("column `{column}` is a {dimensions} dimensional array, field `{field}` can only hold a simple one")]
    NotASimpleArray {
        field: String,
        column: String,
        dimensions: usize,
    },

    #[error("field `{field}` can't hold result `{column}` of type {value}")]
    IncompatibleDestination {
        field: String,
        column: String,
        value: &'static str,
    },

    #[error("row has {columns} columns but {values} values")]
    ColumnCountMismatch { columns: usize, values: usize },
}

/// Fieldless tag of a [`ScanError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DestinationAbsent,
    NotAReference,
    ReferenceIsAbsent,
    NotAComposite,
    EmptyDestination,
    RowSource,
    NotASimpleArray,
    IncompatibleDestination,
    ColumnCountMismatch,
}

impl ScanError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScanError::DestinationAbsent => ErrorKind::DestinationAbsent,
            ScanError::NotAReference => ErrorKind::NotAReference,
            ScanError::ReferenceIsAbsent => ErrorKind::ReferenceIsAbsent,
            ScanError::NotAComposite => ErrorKind::NotAComposite,
            ScanError::EmptyDestination => ErrorKind::EmptyDestination,
            ScanError::RowSource(..) => ErrorKind::RowSource,
            ScanError::NotASimpleArray { .. } => ErrorKind::NotASimpleArray,
            ScanError::IncompatibleDestination { .. } => ErrorKind::IncompatibleDestination,
            ScanError::ColumnCountMismatch { .. } => ErrorKind::ColumnCountMismatch,
        }
    }
}
