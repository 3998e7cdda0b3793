//! Roster loader: one person per data row.

use skillmatrix_io_xlsx::{SpecSheetRow, TabularSource};
use tracing::info;

use crate::conf::{
    N_COL_IN_DISCIPLINE, N_COL_IN_EMAIL, N_COL_IN_FULL_NAME, N_COL_IN_GRADE, N_COL_IN_JOB_TITLE,
    N_COL_IN_LOCATION,
};
use crate::report::ReportRunBuilder;
use crate::spec::SpecPerson;
use crate::util::read_data_rows;

/// Project fixed columns of each data row into a person. Values pass through unchanged.
pub fn load_roster(rows: &[SpecSheetRow]) -> Vec<SpecPerson> {
    rows.iter()
        .map(|row| SpecPerson {
            full_name: row.cell(N_COL_IN_FULL_NAME - 1),
            email: row.cell(N_COL_IN_EMAIL - 1),
            job_title: row.cell(N_COL_IN_JOB_TITLE - 1),
            grade: row.cell(N_COL_IN_GRADE - 1),
            discipline: row.cell(N_COL_IN_DISCIPLINE - 1),
            location: row.cell(N_COL_IN_LOCATION - 1),
        })
        .collect()
}

/// Read `sheet_name` from `source` and build the roster.
pub fn load_roster_from_source(
    source: &dyn TabularSource,
    sheet_name: &str,
    report: &mut ReportRunBuilder,
) -> Vec<SpecPerson> {
    let l_rows = read_data_rows(source, sheet_name, report);
    let l_persons = load_roster(&l_rows);

    report.cnt_persons = l_persons.len() as u64;
    info!(persons = l_persons.len(), "loaded roster");
    l_persons
}
