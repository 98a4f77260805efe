use std::collections::HashMap;
use std::path::Path;

use calamine::{Data, Range, Reader};
use tracing::{debug, warn};

use crate::{CellValue, Schema};

/// Possible errors to occur while reading a POAM spreadsheet
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Spreadsheet(#[from] calamine::Error),
    #[error("The workbook does not contain any worksheet")]
    NoWorksheet,
}

/// One row of a POAM export
///
/// Every column of the schema the row was loaded with has an entry, cells
/// missing from the spreadsheet row are stored as [`CellValue::Empty`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoamRow {
    fields: HashMap<&'static str, CellValue>,
}

impl PoamRow {
    /// Assigns the cells to the schema columns by position
    ///
    /// Missing trailing cells are padded with empty values, cells without a
    /// column are dropped.
    pub fn from_cells<I>(schema: Schema, cells: I) -> Self
        where I: IntoIterator<Item = CellValue>
    {
        let mut cells = cells.into_iter();
        let fields = schema
            .columns()
            .iter()
            .map(|&name| (name, cells.next().unwrap_or_default()))
            .collect();

        Self { fields }
    }

    /// The value of a named column
    ///
    /// Unknown names read as empty, as if the cell were blank.
    pub fn field(&self, name: &str) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.fields.get(name).unwrap_or(&EMPTY)
    }

    /// Whether the row carries a column with this name
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}

/// The rows of a POAM export together with the schema they were mapped by
#[derive(Debug)]
pub struct PoamSheet {
    schema: Schema,
    rows: Vec<PoamRow>,
}

impl PoamSheet {
    /// Maps every row of a worksheet range onto the schema
    ///
    /// The first row is data, there is no header to skip.
    pub fn from_range(schema: Schema, range: &Range<Data>) -> Self {
        // calamine trims blank leading rows and columns from the used range,
        // positions have to stay anchored to column A
        let leading_columns = range.start().map_or(0, |(_, column)| column as usize);
        let width = leading_columns + range.width();
        if width > schema.len() {
            warn!(
                columns = width,
                expected = schema.len(),
                "ignoring cells beyond the last known column",
            );
        }

        let rows = range
            .rows()
            .map(|cells| {
                let cells = std::iter::repeat(CellValue::Empty)
                    .take(leading_columns)
                    .chain(cells.iter().map(CellValue::from));
                PoamRow::from_cells(schema, cells)
            })
            .collect();

        Self { schema, rows }
    }

    pub fn new(schema: Schema, rows: Vec<PoamRow>) -> Self {
        Self { schema, rows }
    }

    /// The schema the rows were mapped by
    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// The rows in spreadsheet order
    pub fn rows(&self) -> &[PoamRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Reads the first worksheet of a spreadsheet file
pub fn load(path: &Path, schema: Schema) -> Result<PoamSheet, LoadError> {
    let mut workbook = calamine::open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(LoadError::NoWorksheet)??;
    debug!(path = %path.display(), rows = range.height(), "loaded worksheet");

    Ok(PoamSheet::from_range(schema, &range))
}
