//! Run report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Counters and diagnostics for one pipeline run.
#[derive(Debug, Default, Clone)]
pub struct ReportRun {
    /// Output workbook path.
    pub path_file_out: PathBuf,
    /// Number of people loaded.
    pub cnt_persons: u64,
    /// Number of categories loaded.
    pub cnt_categories: u64,
    /// Number of skill columns on the matrix sheet.
    pub cnt_skill_columns: u64,
    /// Number of proficiency cells carrying a validation.
    pub cnt_validated_cells: u64,
    /// Non-fatal warnings (recovered load errors, renamed sheets).
    pub warnings: Vec<String>,
}

impl ReportRun {
    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_persons".to_string(), self.cnt_persons);
        dict_counts.insert("cnt_categories".to_string(), self.cnt_categories);
        dict_counts.insert("cnt_skill_columns".to_string(), self.cnt_skill_columns);
        dict_counts.insert("cnt_validated_cells".to_string(), self.cnt_validated_cells);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} persons={} categories={} skills={} validated={} warnings={}",
            dict_counts["cnt_persons"],
            dict_counts["cnt_categories"],
            dict_counts["cnt_skill_columns"],
            dict_counts["cnt_validated_cells"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[SKILLS]"))
    }
}

/// Mutable accumulator for run statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportRunBuilder {
    /// See [`ReportRun::cnt_persons`].
    pub cnt_persons: u64,
    /// See [`ReportRun::cnt_categories`].
    pub cnt_categories: u64,
    /// See [`ReportRun::cnt_skill_columns`].
    pub cnt_skill_columns: u64,
    /// See [`ReportRun::cnt_validated_cells`].
    pub cnt_validated_cells: u64,
    /// See [`ReportRun::warnings`].
    pub warnings: Vec<String>,
}

impl ReportRunBuilder {
    /// Add warning message.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Finalize builder into immutable report.
    pub fn build(self, path_file_out: PathBuf) -> ReportRun {
        ReportRun {
            path_file_out,
            cnt_persons: self.cnt_persons,
            cnt_categories: self.cnt_categories,
            cnt_skill_columns: self.cnt_skill_columns,
            cnt_validated_cells: self.cnt_validated_cells,
            warnings: self.warnings,
        }
    }
}
