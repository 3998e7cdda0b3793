//! XLSX writer kernel that turns sheet plans into workbook output.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::PathBuf;

use rust_xlsxwriter::{
    DataValidation, Format, FormatAlign, FormatUnderline, Url, Workbook, Worksheet,
    XlsxError,
};

use crate::conf::{C_NUM_FORMAT_DATE, EnumFmtKey, N_NROWS_EXCEL_MAX};
use crate::spec::{
    EnumCellValue, SpecCellFormat, SpecInternalLink, SpecListValidation, SpecSheetHorizontalMerge,
    SpecSheetPlan, SpecSheetSummary, SpecXlsxReport,
};
use crate::util::{create_sheet_identifier, sanitize_sheet_name, validate_col_idx};

/// Stateful workbook writer.
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    dict_formats: BTreeMap<String, SpecCellFormat>,
    dict_format_cache: HashMap<SpecCellFormat, Format>,
    set_sheet_names_existing: BTreeSet<String>,
    l_reports: Vec<SpecXlsxReport>,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to output path and named format presets.
    ///
    /// The workbook is buffered in memory until [`Self::close`] is called.
    pub fn new(path_file_out: PathBuf, dict_formats: BTreeMap<String, SpecCellFormat>) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            dict_formats,
            dict_format_cache: HashMap::new(),
            set_sheet_names_existing: BTreeSet::new(),
            l_reports: Vec::new(),
            if_closed: false,
        }
    }

    /// Return immutable snapshot of per-sheet write reports.
    pub fn report(&self) -> Vec<SpecXlsxReport> {
        self.l_reports.clone()
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<(), String> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook
            .save(&self.path_file_out)
            .map_err(derive_xlsx_error_text)?;
        self.if_closed = true;
        Ok(())
    }

    /// Write one sheet plan and return the sheet name actually used.
    pub fn write_sheet(&mut self, plan: &SpecSheetPlan) -> Result<String, String> {
        if self.if_closed {
            return Err("Cannot write after close().".to_string());
        }
        validate_sheet_plan(plan)?;

        let mut report = SpecXlsxReport::default();

        let c_sheet_name_clean = sanitize_sheet_name(&plan.sheet_name, "_");
        let sheet_name_unique = self.derive_unique_sheet_name(&c_sheet_name_clean);
        if sheet_name_unique != plan.sheet_name {
            report.warn(format!(
                "Sheet name {:?} written as {:?}.",
                plan.sheet_name, sheet_name_unique
            ));
        }

        // Resolve formats before borrowing the worksheet mutably.
        let l_fmt_cells = plan
            .cells
            .iter()
            .map(|cell| {
                let spec = self.derive_cell_format_spec(cell.fmt_key.as_deref(), &cell.value);
                self.derive_format(spec)
            })
            .collect::<Vec<_>>();
        let l_fmt_merges = plan
            .merges
            .iter()
            .map(|merge| {
                let spec = self.derive_cell_format_spec(merge.fmt_key.as_deref(), &EnumCellValue::Empty);
                self.derive_format(spec)
            })
            .collect::<Vec<_>>();
        let l_fmt_links = plan
            .links
            .iter()
            .map(|link| {
                let spec = self.derive_cell_format_spec(link.fmt_key.as_deref(), &EnumCellValue::Empty);
                self.derive_format(spec)
            })
            .collect::<Vec<_>>();

        let worksheet = self.workbook.add_worksheet();
        worksheet
            .set_name(&sheet_name_unique)
            .map_err(derive_xlsx_error_text)?;

        for (n_idx_col, n_width) in &plan.col_widths {
            worksheet
                .set_column_width(cast_col_num(*n_idx_col)?, *n_width)
                .map_err(derive_xlsx_error_text)?;
        }

        for (cell, fmt) in plan.cells.iter().zip(&l_fmt_cells) {
            write_cell_with_format(worksheet, cell.row_idx, cell.col_idx, &cell.value, fmt.as_ref())?;
        }

        for (merge, fmt) in plan.merges.iter().zip(&l_fmt_merges) {
            write_horizontal_merge(worksheet, merge, fmt.as_ref())?;
        }

        for (link, fmt) in plan.links.iter().zip(&l_fmt_links) {
            write_internal_link(worksheet, link, fmt.as_ref())?;
        }

        for validation in &plan.validations {
            write_list_validation(worksheet, validation)?;
        }

        if let Some((n_row_freeze, n_col_freeze)) = plan.freeze {
            worksheet
                .set_freeze_panes(cast_row_num(n_row_freeze)?, cast_col_num(n_col_freeze)?)
                .map_err(derive_xlsx_error_text)?;
        }

        if let Some(autofilter) = &plan.autofilter {
            worksheet
                .autofilter(
                    cast_row_num(autofilter.row_idx)?,
                    cast_col_num(autofilter.col_idx_start)?,
                    cast_row_num(autofilter.row_idx)?,
                    cast_col_num(autofilter.col_idx_end)?,
                )
                .map_err(derive_xlsx_error_text)?;
        }

        report.sheets.push(SpecSheetSummary {
            sheet_name: sheet_name_unique.clone(),
            cnt_cells: plan.cells.len(),
            cnt_merges: plan.merges.len(),
            cnt_links: plan.links.len(),
            cnt_validations: plan.validations.len(),
        });
        self.l_reports.push(report);

        Ok(sheet_name_unique)
    }

    fn derive_cell_format_spec(
        &self,
        fmt_key: Option<&str>,
        value: &EnumCellValue,
    ) -> Option<SpecCellFormat> {
        let spec = fmt_key.and_then(|key| self.dict_formats.get(key)).cloned();

        if !matches!(value, EnumCellValue::Date(_)) {
            return spec;
        }
        let spec_date = spec.unwrap_or_default();
        if spec_date.num_format.is_some() {
            return Some(spec_date);
        }
        let c_num_format = self
            .dict_formats
            .get(EnumFmtKey::Date.as_str())
            .and_then(|fmt| fmt.num_format.clone())
            .unwrap_or_else(|| C_NUM_FORMAT_DATE.to_string());
        Some(spec_date.with_(SpecCellFormat {
            num_format: Some(c_num_format),
            ..Default::default()
        }))
    }

    fn derive_format(&mut self, spec: Option<SpecCellFormat>) -> Option<Format> {
        let spec = spec?;
        Some(
            self.dict_format_cache
                .entry(spec)
                .or_insert_with_key(derive_rust_xlsx_format)
                .clone(),
        )
    }

    fn derive_unique_sheet_name(&mut self, name: &str) -> String {
        if !self.set_sheet_names_existing.contains(name) {
            self.set_sheet_names_existing.insert(name.to_string());
            return name.to_string();
        }

        let mut n_idx = 2usize;
        loop {
            let candidate = create_sheet_identifier(name, n_idx);
            if !self.set_sheet_names_existing.contains(&candidate) {
                self.set_sheet_names_existing.insert(candidate.clone());
                return candidate;
            }
            n_idx += 1;
        }
    }
}

fn validate_sheet_plan(plan: &SpecSheetPlan) -> Result<(), String> {
    for cell in &plan.cells {
        validate_row_idx(cell.row_idx)?;
        validate_col_idx(cell.col_idx)?;
    }
    for merge in &plan.merges {
        validate_row_idx(merge.row_idx_start)?;
        validate_col_idx(merge.col_idx_end)?;
        if merge.col_idx_end < merge.col_idx_start {
            return Err(format!(
                "Merge end column {} precedes start column {}.",
                merge.col_idx_end, merge.col_idx_start
            ));
        }
    }
    for validation in &plan.validations {
        validate_row_idx(validation.row_idx_end)?;
        validate_col_idx(validation.col_idx_end)?;
        if validation.row_idx_end < validation.row_idx_start
            || validation.col_idx_end < validation.col_idx_start
        {
            return Err("Validation range end precedes its start.".to_string());
        }
        if validation.values.is_empty() {
            return Err("List validation requires at least one value.".to_string());
        }
    }
    Ok(())
}

fn validate_row_idx(row_idx: usize) -> Result<(), String> {
    if row_idx >= N_NROWS_EXCEL_MAX {
        return Err(format!(
            "Row index {row_idx} exceeds Excel limit of {N_NROWS_EXCEL_MAX} rows."
        ));
    }
    Ok(())
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: Option<&Format>,
) -> Result<(), String> {
    let n_row = cast_row_num(row_idx)?;
    let n_col = cast_col_num(col_idx)?;
    let fmt_default = Format::new();
    let format = format.unwrap_or(&fmt_default);

    match value {
        EnumCellValue::Empty => {
            worksheet
                .write_blank(n_row, n_col, format)
                .map_err(derive_xlsx_error_text)?;
        }
        EnumCellValue::Text(val) => {
            worksheet
                .write_string_with_format(n_row, n_col, val, format)
                .map_err(derive_xlsx_error_text)?;
        }
        EnumCellValue::Number(val) | EnumCellValue::Date(val) => {
            worksheet
                .write_number_with_format(n_row, n_col, *val, format)
                .map_err(derive_xlsx_error_text)?;
        }
    }
    Ok(())
}

fn write_horizontal_merge(
    worksheet: &mut Worksheet,
    merge: &SpecSheetHorizontalMerge,
    format: Option<&Format>,
) -> Result<(), String> {
    let fmt_default = Format::new();
    let format = format.unwrap_or(&fmt_default);

    // Excel rejects single-cell merges.
    if merge.col_idx_start == merge.col_idx_end {
        worksheet
            .write_string_with_format(
                cast_row_num(merge.row_idx_start)?,
                cast_col_num(merge.col_idx_start)?,
                &merge.text,
                format,
            )
            .map_err(derive_xlsx_error_text)?;
        return Ok(());
    }

    worksheet
        .merge_range(
            cast_row_num(merge.row_idx_start)?,
            cast_col_num(merge.col_idx_start)?,
            cast_row_num(merge.row_idx_start)?,
            cast_col_num(merge.col_idx_end)?,
            &merge.text,
            format,
        )
        .map_err(derive_xlsx_error_text)?;
    Ok(())
}

fn write_internal_link(
    worksheet: &mut Worksheet,
    link: &SpecInternalLink,
    format: Option<&Format>,
) -> Result<(), String> {
    let url = Url::new(format!("internal:{}", link.target)).set_text(&link.text);
    let n_row = cast_row_num(link.row_idx)?;
    let n_col = cast_col_num(link.col_idx)?;

    match format {
        Some(fmt) => worksheet
            .write_url_with_format(n_row, n_col, url, fmt)
            .map_err(derive_xlsx_error_text)?,
        None => worksheet
            .write_url(n_row, n_col, url)
            .map_err(derive_xlsx_error_text)?,
    };
    Ok(())
}

fn write_list_validation(
    worksheet: &mut Worksheet,
    validation: &SpecListValidation,
) -> Result<(), String> {
    let l_values: Vec<&str> = validation.values.iter().map(String::as_str).collect();
    let mut dv = DataValidation::new()
        .allow_list_strings(&l_values)
        .map_err(derive_xlsx_error_text)?
        .ignore_blank(validation.if_allow_blank);

    if let Some(val) = &validation.input_title {
        dv = dv.set_input_title(val).map_err(derive_xlsx_error_text)?;
    }
    if let Some(val) = &validation.input_message {
        dv = dv.set_input_message(val).map_err(derive_xlsx_error_text)?;
    }
    if let Some(val) = &validation.error_title {
        dv = dv.set_error_title(val).map_err(derive_xlsx_error_text)?;
    }
    if let Some(val) = &validation.error_message {
        dv = dv.set_error_message(val).map_err(derive_xlsx_error_text)?;
    }

    worksheet
        .add_data_validation(
            cast_row_num(validation.row_idx_start)?,
            cast_col_num(validation.col_idx_start)?,
            cast_row_num(validation.row_idx_end)?,
            cast_col_num(validation.col_idx_end)?,
            &dv,
        )
        .map_err(derive_xlsx_error_text)?;
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    if spec.underline.unwrap_or(false) {
        format = format.set_underline(FormatUnderline::Single);
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }

    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }
    if let Some(val) = &spec.font_color {
        format = format.set_font_color(val.as_str());
    }

    format
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

fn cast_row_num(value: usize) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("row index overflow: {value}"))
}

fn cast_col_num(value: usize) -> Result<u16, String> {
    u16::try_from(value).map_err(|_| format!("column index overflow: {value}"))
}

fn derive_xlsx_error_text(err: XlsxError) -> String {
    format!("xlsx write error: {err}")
}
