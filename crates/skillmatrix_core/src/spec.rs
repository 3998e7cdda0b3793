//! Domain models, pipeline configuration and top-level error types.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use skillmatrix_io_xlsx::EnumCellValue;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region People

/// One roster entry. Values are opaque source cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecPerson {
    /// Full name (roster column 1).
    pub full_name: EnumCellValue,
    /// Email (roster column 6).
    pub email: EnumCellValue,
    /// Job title (roster column 7).
    pub job_title: EnumCellValue,
    /// Grade (roster column 8).
    pub grade: EnumCellValue,
    /// Discipline (roster column 9).
    pub discipline: EnumCellValue,
    /// Location (roster column 11).
    pub location: EnumCellValue,
}

impl SpecPerson {
    /// Person with only a name, other fields empty.
    pub fn with_name(full_name: impl Into<EnumCellValue>) -> Self {
        Self {
            full_name: full_name.into(),
            ..Default::default()
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Taxonomy

/// One skill category with its skills in column order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecCategory {
    /// Category label.
    pub name: String,
    /// Skill labels, ascending.
    pub skills: Vec<String>,
}

/// Ordered category -> skills mapping.
///
/// Categories keep first-seen order; skills inside a category are sorted.
/// Repeated `(category, skill)` pairs are kept as repeated skills.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecTaxonomy {
    /// Categories in first-seen order.
    pub categories: Vec<SpecCategory>,
}

impl SpecTaxonomy {
    /// Build from `(category, skill)` pairs: group by category, then sort each skill list.
    pub fn from_pairs<I, C, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, S)>,
        C: Into<String>,
        S: Into<String>,
    {
        let mut l_categories: Vec<SpecCategory> = Vec::new();
        let mut dict_pos: HashMap<String, usize> = HashMap::new();

        for (category, skill) in pairs {
            let c_category: String = category.into();
            let n_pos = *dict_pos.entry(c_category.clone()).or_insert_with(|| {
                l_categories.push(SpecCategory {
                    name: c_category,
                    skills: Vec::new(),
                });
                l_categories.len() - 1
            });
            l_categories[n_pos].skills.push(skill.into());
        }

        for category in &mut l_categories {
            category.skills.sort();
        }

        Self {
            categories: l_categories,
        }
    }

    /// Skills of `category`, if present.
    pub fn skills(&self, category: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|item| item.name == category)
            .map(|item| item.skills.as_slice())
    }

    /// Category names in order.
    pub fn category_names(&self) -> Vec<&str> {
        self.categories
            .iter()
            .map(|item| item.name.as_str())
            .collect()
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether there are no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total skill count across all categories.
    pub fn n_skills(&self) -> usize {
        self.categories.iter().map(|item| item.skills.len()).sum()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Configuration

/// One input file + sheet name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecSheetSource {
    /// Spreadsheet file path.
    pub path: PathBuf,
    /// Sheet name inside the file.
    pub sheet: String,
}

/// Fully resolved pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecPipelineConfig {
    /// Roster input.
    pub roster: SpecSheetSource,
    /// Taxonomy input.
    pub taxonomy: SpecSheetSource,
    /// Output workbook path.
    #[serde(rename = "output")]
    pub path_file_out: PathBuf,
}

impl SpecPipelineConfig {
    /// Reject empty paths and sheet names.
    pub fn validate(&self) -> Result<(), SkillMatrixError> {
        for (c_label, source) in [("roster", &self.roster), ("taxonomy", &self.taxonomy)] {
            if source.path.as_os_str().is_empty() {
                return Err(SkillMatrixError::Config(format!(
                    "{c_label}.path must not be empty"
                )));
            }
            if source.sheet.trim().is_empty() {
                return Err(SkillMatrixError::Config(format!(
                    "{c_label}.sheet must not be empty"
                )));
            }
        }
        if self.path_file_out.as_os_str().is_empty() {
            return Err(SkillMatrixError::Config(
                "output must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Partially specified configuration (config file and/or command line).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecPipelineConfigPartial {
    /// Roster input fields.
    pub roster: SpecSheetSourcePartial,
    /// Taxonomy input fields.
    pub taxonomy: SpecSheetSourcePartial,
    /// Output workbook path.
    pub output: Option<PathBuf>,
}

/// Partially specified input file + sheet name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecSheetSourcePartial {
    /// Spreadsheet file path.
    pub path: Option<PathBuf>,
    /// Sheet name inside the file.
    pub sheet: Option<String>,
}

impl SpecSheetSourcePartial {
    fn overlay(self, other: SpecSheetSourcePartial) -> SpecSheetSourcePartial {
        SpecSheetSourcePartial {
            path: other.path.or(self.path),
            sheet: other.sheet.or(self.sheet),
        }
    }

    fn finalize(self, c_label: &str) -> Result<SpecSheetSource, SkillMatrixError> {
        let path = self
            .path
            .ok_or_else(|| SkillMatrixError::Config(format!("{c_label}.path is required")))?;
        let sheet = self
            .sheet
            .ok_or_else(|| SkillMatrixError::Config(format!("{c_label}.sheet is required")))?;
        Ok(SpecSheetSource { path, sheet })
    }
}

impl SpecPipelineConfigPartial {
    /// Return a new partial config with right-side non-`None` fields winning.
    pub fn overlay(self, other: SpecPipelineConfigPartial) -> SpecPipelineConfigPartial {
        SpecPipelineConfigPartial {
            roster: self.roster.overlay(other.roster),
            taxonomy: self.taxonomy.overlay(other.taxonomy),
            output: other.output.or(self.output),
        }
    }

    /// Require every field and validate the result.
    pub fn finalize(self) -> Result<SpecPipelineConfig, SkillMatrixError> {
        let config = SpecPipelineConfig {
            roster: self.roster.finalize("roster")?,
            taxonomy: self.taxonomy.finalize("taxonomy")?,
            path_file_out: self
                .output
                .ok_or_else(|| SkillMatrixError::Config("output is required".to_string()))?,
        };
        config.validate()?;
        Ok(config)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// "Top-level call failed" errors.
#[derive(Debug, Error)]
pub enum SkillMatrixError {
    /// Missing or invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Config file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        /// Config file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Config file is not valid TOML for the expected shape.
    #[error("failed to parse config {}: {source}", .path.display())]
    ConfigParse {
        /// Config file path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },
    /// Output workbook could not be assembled or saved.
    #[error("failed to write {}: {message}", .path.display())]
    Write {
        /// Output path.
        path: PathBuf,
        /// Writer error text.
        message: String,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_from_pairs_keeps_first_seen_category_order_and_sorts_skills() {
        let taxonomy = SpecTaxonomy::from_pairs([
            ("Frontend", "Vue"),
            ("Backend", "Go"),
            ("Frontend", "React"),
            ("Backend", "Elixir"),
        ]);

        assert_eq!(taxonomy.category_names(), vec!["Frontend", "Backend"]);
        assert_eq!(
            taxonomy.skills("Frontend"),
            Some(&["React".to_string(), "Vue".to_string()][..])
        );
        assert_eq!(
            taxonomy.skills("Backend"),
            Some(&["Elixir".to_string(), "Go".to_string()][..])
        );
        assert_eq!(taxonomy.skills("Data"), None);
        assert_eq!(taxonomy.n_skills(), 4);
    }

    #[test]
    fn taxonomy_from_pairs_keeps_duplicates() {
        let taxonomy = SpecTaxonomy::from_pairs([("Cloud", "AWS"), ("Cloud", "AWS")]);
        assert_eq!(
            taxonomy.skills("Cloud"),
            Some(&["AWS".to_string(), "AWS".to_string()][..])
        );
    }

    #[test]
    fn config_partial_overlay_and_finalize() {
        let from_file = SpecPipelineConfigPartial {
            roster: SpecSheetSourcePartial {
                path: Some(PathBuf::from("people.xlsx")),
                sheet: Some("People Data".to_string()),
            },
            taxonomy: SpecSheetSourcePartial {
                path: Some(PathBuf::from("skills.xlsx")),
                sheet: None,
            },
            output: Some(PathBuf::from("file.xlsx")),
        };
        let from_cli = SpecPipelineConfigPartial {
            taxonomy: SpecSheetSourcePartial {
                path: None,
                sheet: Some("Result 1".to_string()),
            },
            output: Some(PathBuf::from("cli.xlsx")),
            ..Default::default()
        };

        let config = from_file.overlay(from_cli).finalize().expect("complete config");
        assert_eq!(config.roster.sheet, "People Data");
        assert_eq!(config.taxonomy.path, PathBuf::from("skills.xlsx"));
        assert_eq!(config.taxonomy.sheet, "Result 1");
        assert_eq!(config.path_file_out, PathBuf::from("cli.xlsx"));
    }

    #[test]
    fn config_partial_finalize_reports_missing_field() {
        let err = SpecPipelineConfigPartial::default()
            .finalize()
            .expect_err("incomplete config");
        assert_eq!(
            err.to_string(),
            "invalid configuration: roster.path is required"
        );
    }

    #[test]
    fn config_validate_rejects_blank_sheet() {
        let config = SpecPipelineConfig {
            roster: SpecSheetSource {
                path: PathBuf::from("a.xlsx"),
                sheet: "  ".to_string(),
            },
            taxonomy: SpecSheetSource {
                path: PathBuf::from("b.xlsx"),
                sheet: "S".to_string(),
            },
            path_file_out: PathBuf::from("out.xlsx"),
        };
        assert!(matches!(
            config.validate(),
            Err(SkillMatrixError::Config(_))
        ));
    }
}
