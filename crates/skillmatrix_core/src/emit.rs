//! Workbook emitter: turns a grid layout into the two sheet plans and writes them.

use std::path::Path;

use skillmatrix_io_xlsx::{
    EnumCellValue, SpecInternalLink, SpecListValidation, SpecSheetAutofilter,
    SpecSheetHorizontalMerge, SpecSheetPlan, SpecXlsxReport, XlsxWriter,
};
use tracing::{debug, info};

use crate::conf::{
    C_FMT_BODY, C_FMT_CATEGORY, C_FMT_HEADER, C_FMT_LINK, C_FMT_NAME, C_LABEL_MATRIX_NAME,
    C_PROFICIENCY_ERROR_MESSAGE, C_PROFICIENCY_ERROR_TITLE, C_PROFICIENCY_INPUT_MESSAGE,
    C_PROFICIENCY_INPUT_TITLE, C_SHEET_NAME_MATRIX, C_SHEET_NAME_ROSTER, N_COL_MATRIX_NAME,
    N_COL_ROSTER_AUTOFILTER_END, N_COL_ROSTER_LINK, N_ROW_MATRIX_SKILL, N_ROWS_HEADER_MATRIX,
    N_ROWS_HEADER_ROSTER, N_WIDTH_MATRIX_NAME, TUP_PROFICIENCY_LEVELS, TUP_ROSTER_COLUMNS,
    derive_default_matrix_formats,
};
use crate::layout::SpecGridLayout;
use crate::spec::{SkillMatrixError, SpecPerson};

////////////////////////////////////////////////////////////////////////////////
// #region SheetPlanning

/// Plan the "Consultants" sheet.
///
/// Layout rows are 1-based; sheet plans are 0-based.
pub fn plan_roster_sheet(persons: &[SpecPerson], layout: &SpecGridLayout) -> SpecSheetPlan {
    let mut plan = SpecSheetPlan::new(C_SHEET_NAME_ROSTER);

    for (n_idx_col, (c_header, n_width)) in TUP_ROSTER_COLUMNS.iter().enumerate() {
        plan.col_widths.insert(n_idx_col, *n_width);
        plan.push_cell(0, n_idx_col, EnumCellValue::from(*c_header), Some(C_FMT_HEADER));
    }

    for (n_idx_person, person) in persons.iter().enumerate() {
        let n_idx_row = layout.person_roster_row(n_idx_person) - 1;
        let l_values = [
            &person.full_name,
            &person.email,
            &person.location,
            &person.job_title,
            &person.discipline,
            &person.grade,
        ];
        for (n_idx_col, value) in l_values.into_iter().enumerate() {
            plan.push_cell(n_idx_row, n_idx_col, value.clone(), Some(C_FMT_BODY));
        }

        plan.links.push(SpecInternalLink {
            row_idx: n_idx_row,
            col_idx: N_COL_ROSTER_LINK,
            target: layout.hyperlink_anchor(n_idx_person),
            text: format!("Go to {}'s Skills", person.full_name.to_text()),
            fmt_key: Some(C_FMT_LINK.to_string()),
        });
    }

    plan.freeze = Some((N_ROWS_HEADER_ROSTER, 0));
    plan.autofilter = Some(SpecSheetAutofilter {
        row_idx: 0,
        col_idx_start: 0,
        col_idx_end: N_COL_ROSTER_AUTOFILTER_END,
    });
    plan
}

/// Plan the "Skill Proficiencies" sheet.
pub fn plan_matrix_sheet(persons: &[SpecPerson], layout: &SpecGridLayout) -> SpecSheetPlan {
    let mut plan = SpecSheetPlan::new(C_SHEET_NAME_MATRIX);
    let n_idx_col_name = N_COL_MATRIX_NAME - 1;
    let n_idx_row_skill = N_ROW_MATRIX_SKILL - 1;

    plan.col_widths.insert(n_idx_col_name, N_WIDTH_MATRIX_NAME);

    for merge in layout.merge_regions() {
        plan.merges.push(SpecSheetHorizontalMerge {
            row_idx_start: merge.row - 1,
            col_idx_start: merge.col_start - 1,
            col_idx_end: merge.col_end - 1,
            text: merge.text,
            fmt_key: Some(C_FMT_CATEGORY.to_string()),
        });
    }

    plan.push_cell(
        n_idx_row_skill,
        n_idx_col_name,
        EnumCellValue::from(C_LABEL_MATRIX_NAME),
        Some(C_FMT_HEADER),
    );
    for (n_col, c_skill) in layout.skill_labels() {
        plan.push_cell(
            n_idx_row_skill,
            n_col - 1,
            EnumCellValue::from(c_skill),
            Some(C_FMT_HEADER),
        );
    }

    for (n_idx_person, person) in persons.iter().enumerate() {
        plan.push_cell(
            layout.person_matrix_row(n_idx_person) - 1,
            n_idx_col_name,
            person.full_name.clone(),
            Some(C_FMT_NAME),
        );
    }

    if let Some(region) = layout.validation_region() {
        plan.validations.push(SpecListValidation {
            row_idx_start: region.row_start - 1,
            col_idx_start: region.col_start - 1,
            row_idx_end: region.row_end - 1,
            col_idx_end: region.col_end - 1,
            values: TUP_PROFICIENCY_LEVELS.iter().map(ToString::to_string).collect(),
            if_allow_blank: true,
            input_title: Some(C_PROFICIENCY_INPUT_TITLE.to_string()),
            input_message: Some(C_PROFICIENCY_INPUT_MESSAGE.to_string()),
            error_title: Some(C_PROFICIENCY_ERROR_TITLE.to_string()),
            error_message: Some(C_PROFICIENCY_ERROR_MESSAGE.to_string()),
        });
    }

    plan.freeze = Some((N_ROWS_HEADER_MATRIX, N_COL_MATRIX_NAME));
    plan
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WorkbookOutput

/// Write both sheets to `path_file_out` and return the per-sheet writer reports.
pub fn emit_workbook(
    path_file_out: &Path,
    persons: &[SpecPerson],
    layout: &SpecGridLayout,
) -> Result<Vec<SpecXlsxReport>, SkillMatrixError> {
    let derive_write_error = |message: String| SkillMatrixError::Write {
        path: path_file_out.to_path_buf(),
        message,
    };

    let l_plans = [
        plan_roster_sheet(persons, layout),
        plan_matrix_sheet(persons, layout),
    ];

    let mut writer = XlsxWriter::new(path_file_out.to_path_buf(), derive_default_matrix_formats());
    for plan in &l_plans {
        let c_sheet_name = writer.write_sheet(plan).map_err(derive_write_error)?;
        debug!(
            sheet = c_sheet_name.as_str(),
            cells = plan.cells.len(),
            merges = plan.merges.len(),
            links = plan.links.len(),
            "sheet planned"
        );
    }
    writer.close().map_err(derive_write_error)?;

    info!(path = %path_file_out.display(), "workbook written");
    Ok(writer.report())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use calamine::{Data, Reader, open_workbook_auto};

    use super::*;
    use crate::layout::plan_grid_layout;
    use crate::spec::SpecTaxonomy;

    fn create_scenario() -> (Vec<SpecPerson>, SpecGridLayout) {
        let persons = vec![
            SpecPerson {
                full_name: EnumCellValue::from("Ada Lovelace"),
                email: EnumCellValue::from("ada@example.com"),
                job_title: EnumCellValue::from("Engineer"),
                grade: EnumCellValue::Number(7.0),
                discipline: EnumCellValue::from("Development"),
                location: EnumCellValue::from("London"),
            },
            SpecPerson::with_name("Grace Hopper"),
        ];
        let taxonomy = SpecTaxonomy::from_pairs([
            ("Frontend", "Vue"),
            ("Frontend", "React"),
            ("Backend", "Go"),
        ]);
        let layout = plan_grid_layout(&persons, &taxonomy);
        (persons, layout)
    }

    #[test]
    fn roster_plan_orders_columns_and_links_to_matrix_rows() {
        let (persons, layout) = create_scenario();
        let plan = plan_roster_sheet(&persons, &layout);

        assert_eq!(plan.sheet_name, "Consultants");
        assert_eq!(
            plan.cell_value(0, 6),
            Some(&EnumCellValue::from("Profile Link"))
        );
        assert_eq!(plan.col_widths[&0], 30.0);
        assert_eq!(plan.col_widths[&6], 20.0);

        assert_eq!(plan.cell_value(1, 0), Some(&EnumCellValue::from("Ada Lovelace")));
        assert_eq!(plan.cell_value(1, 2), Some(&EnumCellValue::from("London")));
        assert_eq!(plan.cell_value(1, 3), Some(&EnumCellValue::from("Engineer")));
        assert_eq!(plan.cell_value(1, 5), Some(&EnumCellValue::Number(7.0)));

        assert_eq!(plan.links.len(), 2);
        assert_eq!(plan.links[0].row_idx, 1);
        assert_eq!(plan.links[0].col_idx, 6);
        assert_eq!(plan.links[0].target, "'Skill Proficiencies'!A3");
        assert_eq!(plan.links[0].text, "Go to Ada Lovelace's Skills");
        assert_eq!(plan.links[1].target, "'Skill Proficiencies'!A4");

        assert_eq!(plan.freeze, Some((1, 0)));
        assert_eq!(
            plan.autofilter,
            Some(SpecSheetAutofilter {
                row_idx: 0,
                col_idx_start: 0,
                col_idx_end: 5,
            })
        );
    }

    #[test]
    fn matrix_plan_places_bands_labels_names_and_validation() {
        let (persons, layout) = create_scenario();
        let plan = plan_matrix_sheet(&persons, &layout);

        assert_eq!(plan.merges.len(), 2);
        assert_eq!(
            (plan.merges[0].col_idx_start, plan.merges[0].col_idx_end),
            (1, 2)
        );
        assert_eq!(plan.merges[0].text, "Frontend");
        assert_eq!(
            (plan.merges[1].col_idx_start, plan.merges[1].col_idx_end),
            (3, 3)
        );

        assert_eq!(plan.cell_value(1, 0), Some(&EnumCellValue::from("Name")));
        assert_eq!(plan.cell_value(1, 1), Some(&EnumCellValue::from("React")));
        assert_eq!(plan.cell_value(1, 2), Some(&EnumCellValue::from("Vue")));
        assert_eq!(plan.cell_value(1, 3), Some(&EnumCellValue::from("Go")));
        assert_eq!(plan.cell_value(2, 0), Some(&EnumCellValue::from("Ada Lovelace")));
        assert_eq!(plan.cell_value(3, 0), Some(&EnumCellValue::from("Grace Hopper")));

        assert_eq!(plan.validations.len(), 1);
        let validation = &plan.validations[0];
        assert_eq!(
            (
                validation.row_idx_start,
                validation.col_idx_start,
                validation.row_idx_end,
                validation.col_idx_end
            ),
            (2, 1, 3, 3)
        );
        assert_eq!(validation.values, vec!["1", "2", "3", "4", "5"]);
        assert!(validation.if_allow_blank);
        assert_eq!(validation.input_title.as_deref(), Some("Proficiency Level"));
        assert_eq!(
            validation.input_message.as_deref(),
            Some("Select a value between 1 and 5.")
        );
        assert_eq!(
            validation.error_title.as_deref(),
            Some("Invalid Proficiency Level")
        );
        assert_eq!(
            validation.error_message.as_deref(),
            Some("Please select a value from 1 to 5 or leave blank.")
        );

        assert_eq!(plan.freeze, Some((2, 1)));
        assert_eq!(plan.col_widths[&0], 30.0);
    }

    #[test]
    fn matrix_plan_with_empty_taxonomy_has_only_names() {
        let persons = vec![SpecPerson::with_name("Solo")];
        let layout = plan_grid_layout(&persons, &SpecTaxonomy::default());
        let plan = plan_matrix_sheet(&persons, &layout);

        assert!(plan.merges.is_empty());
        assert!(plan.validations.is_empty());
        assert_eq!(plan.cell_value(2, 0), Some(&EnumCellValue::from("Solo")));
        assert!(plan.cells.iter().all(|cell| cell.col_idx == 0));
    }

    #[test]
    fn emit_workbook_writes_both_sheets() {
        let (persons, layout) = create_scenario();
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("skills.xlsx");

        let l_reports = emit_workbook(&path, &persons, &layout).expect("emit");
        assert_eq!(l_reports.len(), 2);
        assert!(l_reports.iter().all(|report| report.warnings.is_empty()));

        let mut workbook = open_workbook_auto(&path).expect("open");
        assert_eq!(
            workbook.sheet_names(),
            vec!["Consultants".to_string(), "Skill Proficiencies".to_string()]
        );

        let range = workbook.worksheet_range("Consultants").expect("roster");
        assert_eq!(
            range.get_value((0, 0)),
            Some(&Data::String("Full Name".to_string()))
        );
        assert_eq!(
            range.get_value((2, 6)),
            Some(&Data::String("Go to Grace Hopper's Skills".to_string()))
        );

        let range = workbook
            .worksheet_range("Skill Proficiencies")
            .expect("matrix");
        assert_eq!(
            range.get_value((0, 1)),
            Some(&Data::String("Frontend".to_string()))
        );
        assert_eq!(
            range.get_value((0, 3)),
            Some(&Data::String("Backend".to_string()))
        );
        assert_eq!(
            range.get_value((3, 0)),
            Some(&Data::String("Grace Hopper".to_string()))
        );
    }

    #[test]
    fn emit_workbook_reports_write_failure() {
        let (persons, layout) = create_scenario();
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("missing").join("skills.xlsx");

        let err = emit_workbook(&path, &persons, &layout).expect_err("missing parent dir");
        assert!(matches!(err, SkillMatrixError::Write { .. }));
        assert!(err.to_string().contains("skills.xlsx"));
    }
}
