//! End-to-end run: load both inputs, plan the layout, write the workbook.

use std::path::Path;

use skillmatrix_io_xlsx::{TabularSource, XlsxSource};
use tracing::info;

use crate::emit::emit_workbook;
use crate::layout::plan_grid_layout;
use crate::report::{ReportRun, ReportRunBuilder};
use crate::roster::load_roster_from_source;
use crate::spec::{SkillMatrixError, SpecPipelineConfig};
use crate::taxonomy::load_taxonomy_from_source;

/// Run the generator for a resolved configuration.
///
/// Unreadable inputs and missing sheets are recovered as empty and recorded as
/// warnings; only an invalid config or a failed write is returned as an error.
pub fn run_pipeline(config: &SpecPipelineConfig) -> Result<ReportRun, SkillMatrixError> {
    config.validate()?;

    let source_roster = XlsxSource::new(&config.roster.path);
    let source_taxonomy = XlsxSource::new(&config.taxonomy.path);

    run_pipeline_from_sources(
        &source_roster,
        &config.roster.sheet,
        &source_taxonomy,
        &config.taxonomy.sheet,
        &config.path_file_out,
    )
}

/// Run the generator against arbitrary tabular sources.
pub fn run_pipeline_from_sources(
    source_roster: &dyn TabularSource,
    sheet_roster: &str,
    source_taxonomy: &dyn TabularSource,
    sheet_taxonomy: &str,
    path_file_out: &Path,
) -> Result<ReportRun, SkillMatrixError> {
    let mut report = ReportRunBuilder::default();

    let taxonomy = load_taxonomy_from_source(source_taxonomy, sheet_taxonomy, &mut report);
    let l_persons = load_roster_from_source(source_roster, sheet_roster, &mut report);

    let layout = plan_grid_layout(&l_persons, &taxonomy);
    report.cnt_skill_columns = layout.n_skill_columns() as u64;
    report.cnt_validated_cells = layout
        .validation_region()
        .map_or(0, |region| region.n_cells() as u64);
    info!(
        skill_columns = report.cnt_skill_columns,
        validated_cells = report.cnt_validated_cells,
        "layout ready"
    );

    for xlsx_report in emit_workbook(path_file_out, &l_persons, &layout)? {
        for c_warning in xlsx_report.warnings {
            report.add_warning(c_warning);
        }
    }

    let report = report.build(path_file_out.to_path_buf());
    info!("{report}");
    Ok(report)
}
