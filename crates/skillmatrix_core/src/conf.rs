//! Sheet constants, format presets and config-file loading.

use std::collections::BTreeMap;
use std::path::Path;

use skillmatrix_io_xlsx::SpecCellFormat;
use skillmatrix_io_xlsx::conf::{EnumFmtKey, derive_default_xlsx_formats};

use crate::spec::{SkillMatrixError, SpecPipelineConfig, SpecPipelineConfigPartial};

////////////////////////////////////////////////////////////////////////////////
// #region InputLayout

/// Header rows at the top of each input sheet.
pub const N_ROWS_HEADER_INPUT: usize = 1;

/// 1-based roster input column: full name.
pub const N_COL_IN_FULL_NAME: usize = 1;
/// Roster input column: email.
pub const N_COL_IN_EMAIL: usize = 6;
/// Roster input column: job title.
pub const N_COL_IN_JOB_TITLE: usize = 7;
/// Roster input column: grade.
pub const N_COL_IN_GRADE: usize = 8;
/// Roster input column: discipline.
pub const N_COL_IN_DISCIPLINE: usize = 9;
/// Roster input column: location.
pub const N_COL_IN_LOCATION: usize = 11;

/// 1-based taxonomy input column: category.
pub const N_COL_IN_CATEGORY: usize = 1;
/// Taxonomy input column: skill.
pub const N_COL_IN_SKILL: usize = 2;

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region OutputLayout

/// Roster output sheet name.
pub const C_SHEET_NAME_ROSTER: &str = "Consultants";
/// Matrix output sheet name.
pub const C_SHEET_NAME_MATRIX: &str = "Skill Proficiencies";

/// Header rows on the roster sheet.
pub const N_ROWS_HEADER_ROSTER: usize = 1;
/// Header rows on the matrix sheet (category band + skill labels).
pub const N_ROWS_HEADER_MATRIX: usize = 2;

/// 1-based matrix column holding person names.
pub const N_COL_MATRIX_NAME: usize = 1;
/// 1-based matrix row holding category labels.
pub const N_ROW_MATRIX_CATEGORY: usize = 1;
/// 1-based matrix row holding skill labels.
pub const N_ROW_MATRIX_SKILL: usize = 2;

/// Label above the name column on the matrix sheet.
pub const C_LABEL_MATRIX_NAME: &str = "Name";

/// Roster output columns: header text and width.
pub const TUP_ROSTER_COLUMNS: [(&str, f64); 7] = [
    ("Full Name", 30.0),
    ("Email", 30.0),
    ("Location", 20.0),
    ("Job Title", 20.0),
    ("Discipline", 20.0),
    ("Grade", 20.0),
    ("Profile Link", 20.0),
];
/// Roster header columns covered by the autofilter (A..F, 0-based inclusive end).
pub const N_COL_ROSTER_AUTOFILTER_END: usize = 5;
/// 0-based roster column holding the profile link.
pub const N_COL_ROSTER_LINK: usize = 6;

/// Width of the matrix name column.
pub const N_WIDTH_MATRIX_NAME: f64 = 30.0;

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Proficiency

/// Allowed proficiency entries.
pub const TUP_PROFICIENCY_LEVELS: [&str; 5] = ["1", "2", "3", "4", "5"];
/// Prompt title on proficiency cells.
pub const C_PROFICIENCY_INPUT_TITLE: &str = "Proficiency Level";
/// Prompt body on proficiency cells.
pub const C_PROFICIENCY_INPUT_MESSAGE: &str = "Select a value between 1 and 5.";
/// Alert title for rejected entries.
pub const C_PROFICIENCY_ERROR_TITLE: &str = "Invalid Proficiency Level";
/// Alert body for rejected entries.
pub const C_PROFICIENCY_ERROR_MESSAGE: &str = "Please select a value from 1 to 5 or leave blank.";

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Formats

/// Header cells (roster header, skill labels, `Name`).
pub const C_FMT_HEADER: &str = "sm_header";
/// Merged category labels.
pub const C_FMT_CATEGORY: &str = "sm_category";
/// Roster body cells.
pub const C_FMT_BODY: &str = "sm_body";
/// Person names on the matrix sheet.
pub const C_FMT_NAME: &str = "sm_name";
/// Profile links.
pub const C_FMT_LINK: &str = "sm_link";

/// Kernel presets plus the skills matrix styles.
pub fn derive_default_matrix_formats() -> BTreeMap<String, SpecCellFormat> {
    let mut dict_fmt = derive_default_xlsx_formats();

    let cfg_fmt_header = dict_fmt
        .get(EnumFmtKey::Header.as_str())
        .cloned()
        .unwrap_or_default()
        .with_(SpecCellFormat {
            font_size: Some(16),
            bold: Some(true),
            ..Default::default()
        });
    let cfg_fmt_text = dict_fmt
        .get(EnumFmtKey::Text.as_str())
        .cloned()
        .unwrap_or_default();
    let cfg_fmt_link = dict_fmt
        .get(EnumFmtKey::Link.as_str())
        .cloned()
        .unwrap_or_default();

    dict_fmt.insert(
        C_FMT_CATEGORY.to_string(),
        cfg_fmt_header.with_(SpecCellFormat {
            align: Some("center".to_string()),
            valign: Some("vcenter".to_string()),
            ..Default::default()
        }),
    );
    dict_fmt.insert(C_FMT_HEADER.to_string(), cfg_fmt_header);
    dict_fmt.insert(
        C_FMT_BODY.to_string(),
        cfg_fmt_text.with_(SpecCellFormat {
            font_size: Some(12),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        C_FMT_NAME.to_string(),
        cfg_fmt_text.with_(SpecCellFormat {
            font_size: Some(14),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        C_FMT_LINK.to_string(),
        cfg_fmt_link.with_(SpecCellFormat {
            font_size: Some(12),
            ..Default::default()
        }),
    );

    dict_fmt
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ConfigFile

/// Read a TOML config file that may leave fields unset.
///
/// ```toml
/// output = "Skills-Matrix.xlsx"
///
/// [roster]
/// path = "Skills matrix.xlsx"
/// sheet = "People Data"
///
/// [taxonomy]
/// path = "skills.xlsx"
/// sheet = "Result 1"
/// ```
pub fn load_pipeline_config_partial(
    path: &Path,
) -> Result<SpecPipelineConfigPartial, SkillMatrixError> {
    let c_text = std::fs::read_to_string(path).map_err(|source| SkillMatrixError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&c_text).map_err(|source| SkillMatrixError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a TOML config file that must set every field.
pub fn load_pipeline_config(path: &Path) -> Result<SpecPipelineConfig, SkillMatrixError> {
    load_pipeline_config_partial(path)?.finalize()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn load_pipeline_config_reads_all_fields() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("skillmatrix.toml");
        std::fs::write(
            &path,
            r#"
output = "out.xlsx"

[roster]
path = "people.xlsx"
sheet = "People Data"

[taxonomy]
path = "skills.xlsx"
sheet = "Result 1"
"#,
        )
        .expect("write config");

        let config = load_pipeline_config(&path).expect("config");
        assert_eq!(config.roster.path, PathBuf::from("people.xlsx"));
        assert_eq!(config.taxonomy.sheet, "Result 1");
        assert_eq!(config.path_file_out, PathBuf::from("out.xlsx"));
    }

    #[test]
    fn load_pipeline_config_partial_allows_gaps() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("partial.toml");
        std::fs::write(&path, "[roster]\nsheet = \"People\"\n").expect("write config");

        let partial = load_pipeline_config_partial(&path).expect("partial");
        assert_eq!(partial.roster.sheet.as_deref(), Some("People"));
        assert!(partial.output.is_none());
        assert!(load_pipeline_config(&path).is_err());
    }

    #[test]
    fn load_pipeline_config_reports_parse_and_read_errors() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_bad = tmp.path().join("bad.toml");
        std::fs::write(&path_bad, "output = [").expect("write config");

        assert!(matches!(
            load_pipeline_config(&path_bad),
            Err(SkillMatrixError::ConfigParse { .. })
        ));
        assert!(matches!(
            load_pipeline_config(&tmp.path().join("absent.toml")),
            Err(SkillMatrixError::ConfigRead { .. })
        ));
    }

    #[test]
    fn matrix_formats_extend_kernel_presets() {
        let dict_fmt = derive_default_matrix_formats();
        assert!(dict_fmt.contains_key(EnumFmtKey::Text.as_str()));

        let fmt_category = &dict_fmt[C_FMT_CATEGORY];
        assert_eq!(fmt_category.font_size, Some(16));
        assert_eq!(fmt_category.bold, Some(true));
        assert_eq!(fmt_category.align.as_deref(), Some("center"));

        assert_eq!(dict_fmt[C_FMT_NAME].font_size, Some(14));
        assert_eq!(dict_fmt[C_FMT_LINK].underline, Some(true));
    }
}
