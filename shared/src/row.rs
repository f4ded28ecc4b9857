//! Positional row mapping
//!
//! The endpoint hands every sheet back as an array of rows, each row an
//! array of untyped cell values. A record type declares its column table
//! once with [`sheet_columns!`](crate::sheet_columns); reads go through
//! [`RowReader`], writes through [`RowWriter`], and both consult the same
//! table so a column move is a one-line change.

use std::fmt::Debug;
use std::marker::PhantomData;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Row as returned by the endpoint
pub type RawRow = Vec<Value>;

/// Row mapping error
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RowError {
    /// Header label does not match the column table
    #[error("sheet '{sheet}' column {column}: header is '{found}', expected '{expected}'")]
    HeaderMismatch {
        sheet: String,
        column: usize,
        expected: &'static str,
        found: String,
    },

    /// Two fields claim the same position
    #[error("column table assigns index {0} twice")]
    DuplicateIndex(usize),

    /// Field position outside the declared row width
    #[error("column index {index} exceeds row width {width}")]
    OutOfBounds { index: usize, width: usize },

    /// Required cell is empty
    #[error("column '{column}' is empty")]
    MissingValue { column: &'static str },

    /// Cell holds a value the record cannot represent
    #[error("column '{column}' holds unrecognised value '{value}'")]
    InvalidValue { column: &'static str, value: String },
}

/// How strictly header labels are compared against the column table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderCheck {
    /// Log mismatches and keep reading
    #[default]
    Lenient,
    /// Refuse to map a sheet whose headers disagree
    Strict,
}

/// A field of a sheet layout, bound to a fixed column position.
pub trait Column: Copy + Eq + Debug + Send + Sync + 'static {
    /// Number of cells in a written row
    const WIDTH: usize;
    /// Every field, in declaration order
    const ALL: &'static [Self];

    /// 0-based position in the row
    fn index(self) -> usize;

    /// Header label expected above this column
    fn header(self) -> &'static str;

    /// 1-based column number, as `updateCell` expects
    fn number(self) -> usize {
        self.index() + 1
    }

    /// Field stored at `index`, if any
    fn at(index: usize) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.index() == index)
    }
}

/// Declare a column table: an enum of fields, each with its position and
/// header label, plus the total row width.
///
/// ```
/// shared::sheet_columns! {
///     pub enum PairColumn [2] {
///         Key = 0 => "Key",
///         Value = 1 => "Value",
///     }
/// }
/// use shared::row::Column;
/// assert_eq!(PairColumn::Value.number(), 2);
/// assert_eq!(PairColumn::at(0), Some(PairColumn::Key));
/// ```
#[macro_export]
macro_rules! sheet_columns {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident [$width:literal] {
            $( $(#[$vmeta:meta])* $variant:ident = $index:literal => $header:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::row::Column for $name {
            const WIDTH: usize = $width;
            const ALL: &'static [Self] = &[ $( Self::$variant ),+ ];

            fn index(self) -> usize {
                match self {
                    $( Self::$variant => $index ),+
                }
            }

            fn header(self) -> &'static str {
                match self {
                    $( Self::$variant => $header ),+
                }
            }
        }
    };
}

/// Check a column table: every index unique and inside the row width.
pub fn validate_layout<C: Column>() -> Result<(), RowError> {
    let mut seen = vec![false; C::WIDTH];
    for column in C::ALL {
        let index = column.index();
        let slot = seen.get_mut(index).ok_or(RowError::OutOfBounds {
            index,
            width: C::WIDTH,
        })?;
        if *slot {
            return Err(RowError::DuplicateIndex(index));
        }
        *slot = true;
    }
    Ok(())
}

/// Render a cell the way the sheet displays it.
///
/// `null` becomes an empty string and whole numbers lose the `.0` that JSON
/// floats would otherwise carry.
pub fn cell_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                        format!("{}", f as i64)
                    }
                    _ => n.to_string(),
                }
            }
        }
        other => other.to_string(),
    }
}

fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Compare a header row against the column table.
pub fn check_header<C: Column>(
    sheet: &str,
    header: &[Value],
    mode: HeaderCheck,
) -> Result<(), RowError> {
    let mismatches: Vec<RowError> = C::ALL
        .iter()
        .filter_map(|column| {
            let found = header.get(column.index()).map(cell_to_string).unwrap_or_default();
            (normalize_label(&found) != normalize_label(column.header())).then(|| {
                RowError::HeaderMismatch {
                    sheet: sheet.to_string(),
                    column: column.number(),
                    expected: column.header(),
                    found,
                }
            })
        })
        .collect();

    let Some(first) = mismatches.into_iter().next() else {
        return Ok(());
    };

    match mode {
        HeaderCheck::Strict => Err(first),
        HeaderCheck::Lenient => {
            tracing::warn!(sheet, "Header row differs from column table: {}", first);
            Ok(())
        }
    }
}

/// Read access to one row through its column table
#[derive(Debug, Clone, Copy)]
pub struct RowReader<'a, C> {
    cells: &'a [Value],
    _column: PhantomData<C>,
}

impl<'a, C: Column> RowReader<'a, C> {
    pub fn new(cells: &'a [Value]) -> Self {
        Self {
            cells,
            _column: PhantomData,
        }
    }

    /// Cell text; missing cells read as empty
    pub fn get(&self, column: C) -> String {
        self.cells
            .get(column.index())
            .map(cell_to_string)
            .unwrap_or_default()
    }

    /// Cell text with surrounding whitespace removed
    pub fn trimmed(&self, column: C) -> String {
        self.get(column).trim().to_string()
    }

    /// Non-empty cell text or [`RowError::MissingValue`]
    pub fn required(&self, column: C) -> Result<String, RowError> {
        let value = self.trimmed(column);
        if value.is_empty() {
            return Err(RowError::MissingValue {
                column: column.header(),
            });
        }
        Ok(value)
    }

    pub fn is_blank(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell_to_string(cell).trim().is_empty())
    }
}

/// Builds a row of exactly `C::WIDTH` cells
#[derive(Debug, Clone)]
pub struct RowWriter<C> {
    cells: Vec<String>,
    _column: PhantomData<C>,
}

impl<C: Column> RowWriter<C> {
    pub fn new() -> Self {
        Self {
            cells: vec![String::new(); C::WIDTH],
            _column: PhantomData,
        }
    }

    pub fn set(&mut self, column: C, value: impl Into<String>) -> &mut Self {
        let index = column.index();
        if index >= self.cells.len() {
            self.cells.resize(index + 1, String::new());
        }
        self.cells[index] = value.into();
        self
    }

    pub fn finish(self) -> Vec<String> {
        self.cells
    }
}

impl<C: Column> Default for RowWriter<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// A record stored as one sheet row
pub trait SheetRow: Sized {
    type Column: Column;

    fn read(row: &RowReader<'_, Self::Column>) -> Result<Self, RowError>;
}

/// A record this client appends to a sheet
pub trait WriteRow: SheetRow {
    fn write(&self, row: &mut RowWriter<Self::Column>);

    fn to_row(&self) -> Vec<String> {
        let mut writer = RowWriter::new();
        self.write(&mut writer);
        writer.finish()
    }
}

/// A mapped record together with its 1-based sheet row number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetEntry<T> {
    pub row_number: usize,
    pub record: T,
}

/// Map every data row below `header_row` into `R`.
///
/// Sheets with no data rows yield an empty list. Blank rows are skipped, and
/// so are rows `R` refuses to read (logged at warn level).
pub fn parse_rows<R: SheetRow>(
    sheet: &str,
    rows: &[RawRow],
    header_row: usize,
    check: HeaderCheck,
) -> Result<Vec<SheetEntry<R>>, RowError> {
    if rows.len() < header_row + 2 {
        return Ok(Vec::new());
    }
    check_header::<R::Column>(sheet, &rows[header_row], check)?;

    let mut entries = Vec::with_capacity(rows.len() - header_row - 1);
    for (position, cells) in rows.iter().enumerate().skip(header_row + 1) {
        let reader = RowReader::<R::Column>::new(cells);
        if reader.is_blank() {
            continue;
        }
        match R::read(&reader) {
            Ok(record) => entries.push(SheetEntry {
                row_number: position + 1,
                record,
            }),
            Err(e) => {
                tracing::warn!(sheet, row = position + 1, error = %e, "Skipping unreadable row");
            }
        }
    }
    Ok(entries)
}
