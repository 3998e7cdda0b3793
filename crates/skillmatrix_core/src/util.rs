//! Shared helpers for the loaders.

use skillmatrix_io_xlsx::{SpecSheetRow, TabularSource};
use tracing::{debug, warn};

use crate::conf::N_ROWS_HEADER_INPUT;
use crate::report::ReportRunBuilder;

/// Read the data rows (below the header) of `sheet_name`.
///
/// A missing sheet or an unreadable source yields no rows and a warning.
pub(crate) fn read_data_rows(
    source: &dyn TabularSource,
    sheet_name: &str,
    report: &mut ReportRunBuilder,
) -> Vec<SpecSheetRow> {
    let l_rows = match source.read_sheet_rows(sheet_name) {
        Ok(Some(l_rows)) => l_rows,
        Ok(None) => {
            let c_msg = format!(
                "Sheet {sheet_name:?} not found in {}; treating it as empty.",
                source.describe()
            );
            warn!("{c_msg}");
            report.add_warning(c_msg);
            return vec![];
        }
        Err(err) => {
            let c_msg = format!(
                "Failed to read {sheet_name:?} from {}: {err}; treating it as empty.",
                source.describe()
            );
            warn!("{c_msg}");
            report.add_warning(c_msg);
            return vec![];
        }
    };

    let l_data_rows: Vec<SpecSheetRow> = l_rows
        .into_iter()
        .filter(|row| row.row_idx >= N_ROWS_HEADER_INPUT)
        .collect();
    debug!(
        sheet = sheet_name,
        rows = l_data_rows.len(),
        "read data rows"
    );
    l_data_rows
}
