//! Shared XLSX specification models.

use std::collections::BTreeMap;

use crate::util::format_number_text;

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification, overlaid by key when a plan is written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Single underline.
    pub underline: Option<bool>,

    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,

    /// Number format code.
    pub num_format: Option<String>,
    /// Font color.
    pub font_color: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            underline: other.underline.or(self.underline),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellValues

/// Opaque cell value as read from a source sheet or written to an output sheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnumCellValue {
    /// Missing/blank value.
    #[default]
    Empty,
    /// Text value.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Date/time as an Excel serial number (1900 date system).
    Date(f64),
}

impl EnumCellValue {
    /// Whether the cell carries no visible content.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            Self::Number(_) | Self::Date(_) => false,
        }
    }

    /// Render the value as plain display text.
    ///
    /// Integral numbers drop the fractional part (`3.0` renders as `3`).
    pub fn to_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.clone(),
            Self::Number(n) | Self::Date(n) => format_number_text(*n),
        }
    }
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for EnumCellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for EnumCellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// One non-blank source row with absolute positions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecSheetRow {
    /// Zero-based sheet row index (row 1 in Excel is `0`).
    pub row_idx: usize,
    /// Cells indexed by zero-based sheet column (column A is `0`).
    pub cells: Vec<EnumCellValue>,
}

impl SpecSheetRow {
    /// Return the cell at zero-based column `col_idx`, or `Empty` past the row end.
    pub fn cell(&self, col_idx: usize) -> EnumCellValue {
        self.cells.get(col_idx).cloned().unwrap_or_default()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetPlanSpecification

/// One cell write. Coordinates are zero-based.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecCellWrite {
    /// Row index.
    pub row_idx: usize,
    /// Column index.
    pub col_idx: usize,
    /// Value to write.
    pub value: EnumCellValue,
    /// Key into the writer's format map.
    pub fmt_key: Option<String>,
}

/// Horizontal merge plan item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetHorizontalMerge {
    /// Row index where merge is applied.
    pub row_idx_start: usize,
    /// Start column index (inclusive).
    pub col_idx_start: usize,
    /// End column index (inclusive).
    pub col_idx_end: usize,
    /// Merge display text.
    pub text: String,
    /// Key into the writer's format map.
    pub fmt_key: Option<String>,
}

/// Hyperlink to a cell inside the same workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecInternalLink {
    /// Row index of the link cell.
    pub row_idx: usize,
    /// Column index of the link cell.
    pub col_idx: usize,
    /// Target reference, e.g. `'Sheet 2'!A3`.
    pub target: String,
    /// Display text.
    pub text: String,
    /// Key into the writer's format map.
    pub fmt_key: Option<String>,
}

/// List validation applied to an inclusive rectangular range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecListValidation {
    /// First row index (inclusive).
    pub row_idx_start: usize,
    /// First column index (inclusive).
    pub col_idx_start: usize,
    /// Last row index (inclusive).
    pub row_idx_end: usize,
    /// Last column index (inclusive).
    pub col_idx_end: usize,
    /// Allowed entries.
    pub values: Vec<String>,
    /// Accept blank cells.
    pub if_allow_blank: bool,
    /// Input prompt title.
    pub input_title: Option<String>,
    /// Input prompt body.
    pub input_message: Option<String>,
    /// Error alert title.
    pub error_title: Option<String>,
    /// Error alert body.
    pub error_message: Option<String>,
}

/// Autofilter over one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecSheetAutofilter {
    /// Header row index.
    pub row_idx: usize,
    /// First column index (inclusive).
    pub col_idx_start: usize,
    /// Last column index (inclusive).
    pub col_idx_end: usize,
}

/// Declarative description of one worksheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecSheetPlan {
    /// Requested sheet name (sanitized and de-duplicated at write time).
    pub sheet_name: String,
    /// Column widths by column index.
    pub col_widths: BTreeMap<usize, f64>,
    /// Cell writes.
    pub cells: Vec<SpecCellWrite>,
    /// Horizontal merges.
    pub merges: Vec<SpecSheetHorizontalMerge>,
    /// Internal hyperlinks.
    pub links: Vec<SpecInternalLink>,
    /// List validations.
    pub validations: Vec<SpecListValidation>,
    /// Frozen `(rows, cols)`.
    pub freeze: Option<(usize, usize)>,
    /// Autofilter range.
    pub autofilter: Option<SpecSheetAutofilter>,
}

impl SpecSheetPlan {
    /// Create an empty plan for `sheet_name`.
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            ..Default::default()
        }
    }

    /// Append one cell write.
    pub fn push_cell(
        &mut self,
        row_idx: usize,
        col_idx: usize,
        value: EnumCellValue,
        fmt_key: Option<&str>,
    ) {
        self.cells.push(SpecCellWrite {
            row_idx,
            col_idx,
            value,
            fmt_key: fmt_key.map(ToString::to_string),
        });
    }

    /// Return the last written value at `(row_idx, col_idx)`, if any.
    pub fn cell_value(&self, row_idx: usize, col_idx: usize) -> Option<&EnumCellValue> {
        self.cells
            .iter()
            .rev()
            .find(|cell| cell.row_idx == row_idx && cell.col_idx == col_idx)
            .map(|cell| &cell.value)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Written sheet summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetSummary {
    /// Actual unique sheet name in workbook.
    pub sheet_name: String,
    /// Number of cell writes.
    pub cnt_cells: usize,
    /// Number of merges.
    pub cnt_merges: usize,
    /// Number of hyperlinks.
    pub cnt_links: usize,
    /// Number of validation ranges.
    pub cnt_validations: usize,
}

/// Per-write call report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Sheets produced by the write call.
    pub sheets: Vec<SpecSheetSummary>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
