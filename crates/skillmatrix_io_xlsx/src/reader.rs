//! Tabular row sources.

use std::path::PathBuf;

use calamine::{Data, Reader, open_workbook_auto};

use crate::spec::{EnumCellValue, SpecSheetRow};

/// Read rows of a named sheet.
pub trait TabularSource {
    /// Read every non-blank row of `sheet_name` with absolute positions.
    ///
    /// Returns `Ok(None)` when the sheet does not exist.
    fn read_sheet_rows(&self, sheet_name: &str) -> Result<Option<Vec<SpecSheetRow>>, String>;

    /// Human-readable source description for logs.
    fn describe(&self) -> String;
}

/// Spreadsheet file source (xlsx, xlsm, xlsb, xls, ods).
#[derive(Debug, Clone)]
pub struct XlsxSource {
    path_file_in: PathBuf,
}

impl XlsxSource {
    /// Bind source to a spreadsheet path. The file is opened on each read.
    pub fn new(path_file_in: impl Into<PathBuf>) -> Self {
        Self {
            path_file_in: path_file_in.into(),
        }
    }
}

impl TabularSource for XlsxSource {
    fn read_sheet_rows(&self, sheet_name: &str) -> Result<Option<Vec<SpecSheetRow>>, String> {
        let mut workbook = open_workbook_auto(&self.path_file_in).map_err(|err| {
            format!(
                "Failed to open workbook {}: {err}",
                self.path_file_in.display()
            )
        })?;

        if !workbook
            .sheet_names()
            .iter()
            .any(|c_name| c_name == sheet_name)
        {
            return Ok(None);
        }

        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|err| format!("Failed to read sheet {sheet_name:?}: {err}"))?;

        // Used range may not begin at A1.
        let (n_row_start, n_col_start) = range.start().unwrap_or((0, 0));

        let mut l_rows = Vec::new();
        for (n_idx_row, row) in range.rows().enumerate() {
            let mut l_cells = vec![EnumCellValue::Empty; n_col_start as usize];
            l_cells.extend(row.iter().map(derive_cell_value_from_data));

            if l_cells.iter().all(EnumCellValue::is_blank) {
                continue;
            }
            l_rows.push(SpecSheetRow {
                row_idx: n_row_start as usize + n_idx_row,
                cells: l_cells,
            });
        }

        Ok(Some(l_rows))
    }

    fn describe(&self) -> String {
        self.path_file_in.display().to_string()
    }
}

/// Map one calamine cell into the closed cell-value variant.
///
/// Booleans, error cells and ISO strings keep their display form as text.
pub fn derive_cell_value_from_data(cell: &Data) -> EnumCellValue {
    match cell {
        Data::Empty => EnumCellValue::Empty,
        Data::String(val) => EnumCellValue::Text(val.clone()),
        Data::Float(val) => EnumCellValue::Number(*val),
        Data::Int(val) => EnumCellValue::Number(*val as f64),
        Data::DateTime(val) => EnumCellValue::Date(val.as_f64()),
        other => EnumCellValue::Text(other.to_string()),
    }
}
