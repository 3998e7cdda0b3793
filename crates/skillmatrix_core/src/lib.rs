//! `skillmatrix_core` v1:
//! Skills matrix layout and workbook generation.
//!
//! Module layout:
//! - `conf`     : sheet constants, format presets and config-file loading
//! - `spec`     : people, taxonomy, config models and errors
//! - `taxonomy` : category -> skills loader
//! - `roster`   : person loader
//! - `layout`   : grid layout engine (pure coordinate planning)
//! - `emit`     : sheet plans built from a layout, written via `skillmatrix_io_xlsx`
//! - `pipeline` : end-to-end run
//! - `report`   : run report model
pub mod conf;
pub mod emit;
pub mod layout;
pub mod pipeline;
pub mod report;
pub mod roster;
pub mod spec;
pub mod taxonomy;
mod util;

pub use conf::{load_pipeline_config, load_pipeline_config_partial};
pub use emit::{emit_workbook, plan_matrix_sheet, plan_roster_sheet};
pub use layout::{
    SpecCategoryBand, SpecGridLayout, SpecMergeRegion, SpecSkillColumn, SpecValidationRegion,
    plan_grid_layout,
};
pub use pipeline::{run_pipeline, run_pipeline_from_sources};
pub use report::{ReportRun, ReportRunBuilder};
pub use roster::{load_roster, load_roster_from_source};
pub use spec::{
    SkillMatrixError, SpecCategory, SpecPerson, SpecPipelineConfig, SpecPipelineConfigPartial,
    SpecSheetSource, SpecSheetSourcePartial, SpecTaxonomy,
};
pub use taxonomy::{load_taxonomy, load_taxonomy_from_source};

pub use skillmatrix_io_xlsx::{EnumCellValue, SpecSheetRow, TabularSource, XlsxSource};
