//! `skillmatrix_io_xlsx` v1:
//! Spreadsheet collaborator kernel for the skills matrix pipeline.
//!
//! Module layout:
//! - `conf`   : Excel limits and default format presets
//! - `spec`   : cell values, sheet plans and report models
//! - `util`   : pure helper functions (addresses, sheet names, text rendering)
//! - `reader` : tabular row source over calamine
//! - `writer` : plan-driven workbook writer over rust_xlsxwriter
pub mod conf;
pub mod reader;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL,
};
pub use reader::{TabularSource, XlsxSource};
pub use spec::{
    EnumCellValue, SpecCellFormat, SpecCellWrite, SpecInternalLink, SpecListValidation,
    SpecSheetAutofilter, SpecSheetHorizontalMerge, SpecSheetPlan, SpecSheetRow,
    SpecSheetSummary, SpecXlsxReport,
};
pub use util::{
    derive_cell_address, derive_column_letters, derive_internal_link_target,
    format_number_text, sanitize_sheet_name,
};
pub use writer::XlsxWriter;
