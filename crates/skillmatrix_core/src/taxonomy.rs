//! Taxonomy loader: `(category, skill)` rows into an ordered category map.

use skillmatrix_io_xlsx::{SpecSheetRow, TabularSource};
use tracing::info;

use crate::conf::{N_COL_IN_CATEGORY, N_COL_IN_SKILL};
use crate::report::ReportRunBuilder;
use crate::spec::SpecTaxonomy;
use crate::util::read_data_rows;

/// Build a taxonomy from data rows (header already skipped).
///
/// Column A is the category and column B the skill, both trimmed. Categories keep
/// first-seen order, each skill list is sorted ascending, and repeated pairs stay
/// repeated.
pub fn load_taxonomy(rows: &[SpecSheetRow]) -> SpecTaxonomy {
    SpecTaxonomy::from_pairs(rows.iter().map(|row| {
        (
            row.cell(N_COL_IN_CATEGORY - 1).to_text().trim().to_string(),
            row.cell(N_COL_IN_SKILL - 1).to_text().trim().to_string(),
        )
    }))
}

/// Read `sheet_name` from `source` and build the taxonomy.
///
/// A missing sheet or unreadable source gives an empty taxonomy.
pub fn load_taxonomy_from_source(
    source: &dyn TabularSource,
    sheet_name: &str,
    report: &mut ReportRunBuilder,
) -> SpecTaxonomy {
    let l_rows = read_data_rows(source, sheet_name, report);
    let taxonomy = load_taxonomy(&l_rows);

    report.cnt_categories = taxonomy.len() as u64;
    info!(
        categories = taxonomy.len(),
        skills = taxonomy.n_skills(),
        "loaded taxonomy"
    );
    taxonomy
}
