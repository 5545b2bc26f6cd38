use crate::{
    CoerceError, DefaultNameMatcher, Destination, FieldDef, NameMatcher, Record, RowSource,
    ScanError, Value, coerce_array, collect_fields,
};
use std::iter::zip;

/// Reads rows into records.
///
/// The scanner carries the name matching strategy, there is no process wide state:
/// two scanners with different matchers can be used at the same time.
///
/// ```rust
/// use rowscan_core::{ErrorKind, RowLabeled, Scanner, Value};
/// let scanner = Scanner::with_matcher(|field: &str, column: &str| {
///     column.strip_prefix("c_") == Some(field)
/// });
/// let mut rows = RowLabeled::new(["c_name"], [Value::from("xy")]);
/// let mut dest = 5i32;
/// let error = scanner.read_struct(Some(&mut dest), &mut rows).unwrap_err();
/// assert_eq!(error.kind(), ErrorKind::NotAComposite);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Scanner<M: NameMatcher = DefaultNameMatcher> {
    matcher: M,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: NameMatcher> Scanner<M> {
    pub fn with_matcher(matcher: M) -> Self {
        Self { matcher }
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    /// Assigns the current row of `rows` to the fields of `dest`.
    ///
    /// Columns are matched to fields by name, each field receives at most one column.
    /// Columns without a field and fields without a column are left alone, so are
    /// matched fields that are not settable.
    ///
    /// Nothing is written unless the destination is valid and the row values were
    /// fetched. Once assignment started, the first failing column stops the process
    /// and the fields assigned before it keep their new value.
    pub fn read_struct<D, R>(&self, dest: Option<&mut D>, rows: &mut R) -> Result<(), ScanError>
    where
        D: Destination + ?Sized,
        R: RowSource + ?Sized,
    {
        let Some(dest) = dest else {
            return Err(ScanError::DestinationAbsent);
        };
        let record = dest.target().into_record()?;
        let fields = collect_fields(record);
        if fields.is_empty() {
            return Err(ScanError::EmptyDestination);
        }
        if let Some(error) = rows.last_error() {
            return Err(ScanError::RowSource(error));
        }
        let values = rows.values()?;
        let columns = rows.columns();
        if columns.len() != values.len() {
            return Err(ScanError::ColumnCountMismatch {
                columns: columns.len(),
                values: values.len(),
            });
        }
        let mut remaining: Vec<&FieldDef> = fields.iter().collect();
        for (column, value) in zip(columns, values.into_vec()) {
            if remaining.is_empty() {
                break;
            }
            let column = column.name.as_str();
            let Some(i) = remaining
                .iter()
                .position(|f| self.matcher.matches(f.label, column))
            else {
                log::trace!("Column `{}` has no matching field, skipped", column);
                continue;
            };
            let field = remaining.remove(i);
            if !field.settable {
                log::debug!(
                    "Field `{}` matches column `{}` but it is not settable, skipped",
                    field.name,
                    column
                );
                continue;
            }
            if let Err(error) = assign(record, field, column, value) {
                log::debug!("{:#}", error);
                return Err(error);
            }
        }
        Ok(())
    }

    /// Reads the current row into a new default constructed record.
    pub fn read_new<T, R>(&self, rows: &mut R) -> Result<T, ScanError>
    where
        T: Record + Destination + Default,
        R: RowSource + ?Sized,
    {
        let mut result = T::default();
        self.read_struct(Some(&mut result), rows)?;
        Ok(result)
    }
}

/// Reads the current row into `dest` using the default name matching.
pub fn read_struct<D, R>(dest: Option<&mut D>, rows: &mut R) -> Result<(), ScanError>
where
    D: Destination + ?Sized,
    R: RowSource + ?Sized,
{
    Scanner::new().read_struct(dest, rows)
}

fn assign(
    record: &mut dyn Record,
    field: &FieldDef,
    column: &str,
    value: Value,
) -> Result<(), ScanError> {
    let incompatible = |value: &'static str| ScanError::IncompatibleDestination {
        field: field.name.into(),
        column: column.into(),
        value,
    };
    let value = match value {
        Value::Array(array) => {
            let kind = array.elements.kind_name();
            match coerce_array(array, field.kind) {
                Ok(list) => Value::List(list),
                Err(CoerceError::Incompatible) => return Err(incompatible(kind)),
                Err(CoerceError::NotSimple { dimensions }) => {
                    return Err(ScanError::NotASimpleArray {
                        field: field.name.into(),
                        column: column.into(),
                        dimensions,
                    });
                }
            }
        }
        v => v,
    };
    record
        .assign(&field.route, value)
        .map_err(|v| incompatible(v.kind_name()))
}
