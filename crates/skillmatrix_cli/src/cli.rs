//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;
use skillmatrix_core::{SpecPipelineConfigPartial, SpecSheetSourcePartial};

/// Build a skills matrix workbook from a roster and a skill taxonomy.
#[derive(Parser, Debug)]
#[command(name = "skillmatrix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Roster spreadsheet
    #[arg(long)]
    pub roster: Option<PathBuf>,

    /// Sheet holding the roster
    #[arg(long)]
    pub roster_sheet: Option<String>,

    /// Taxonomy spreadsheet
    #[arg(long)]
    pub taxonomy: Option<PathBuf>,

    /// Sheet holding the (category, skill) pairs
    #[arg(long)]
    pub taxonomy_sheet: Option<String>,

    /// Output workbook
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// TOML config file; flags override its values
    #[arg(short, long, env = "SKILLMATRIX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Config fields given on the command line.
    pub fn to_partial_config(&self) -> SpecPipelineConfigPartial {
        SpecPipelineConfigPartial {
            roster: SpecSheetSourcePartial {
                path: self.roster.clone(),
                sheet: self.roster_sheet.clone(),
            },
            taxonomy: SpecSheetSourcePartial {
                path: self.taxonomy.clone(),
                sheet: self.taxonomy_sheet.clone(),
            },
            output: self.output.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_partial_config() {
        let cli = Cli::parse_from([
            "skillmatrix",
            "--roster",
            "people.xlsx",
            "--roster-sheet",
            "People Data",
            "--taxonomy-sheet",
            "Result 1",
            "-o",
            "out.xlsx",
        ]);

        let partial = cli.to_partial_config();
        assert_eq!(partial.roster.path, Some(PathBuf::from("people.xlsx")));
        assert_eq!(partial.roster.sheet.as_deref(), Some("People Data"));
        assert_eq!(partial.taxonomy.path, None);
        assert_eq!(partial.taxonomy.sheet.as_deref(), Some("Result 1"));
        assert_eq!(partial.output, Some(PathBuf::from("out.xlsx")));
        assert!(!cli.verbose);
    }

    #[test]
    fn flags_override_config_file_values() {
        let from_file = SpecPipelineConfigPartial {
            roster: SpecSheetSourcePartial {
                path: Some(PathBuf::from("file-people.xlsx")),
                sheet: Some("People Data".to_string()),
            },
            taxonomy: SpecSheetSourcePartial {
                path: Some(PathBuf::from("skills.xlsx")),
                sheet: Some("Result 1".to_string()),
            },
            output: Some(PathBuf::from("file-out.xlsx")),
        };
        let cli = Cli::parse_from(["skillmatrix", "--roster", "cli-people.xlsx", "-v"]);

        let config = from_file
            .overlay(cli.to_partial_config())
            .finalize()
            .expect("config");
        assert_eq!(config.roster.path, PathBuf::from("cli-people.xlsx"));
        assert_eq!(config.roster.sheet, "People Data");
        assert_eq!(config.path_file_out, PathBuf::from("file-out.xlsx"));
        assert!(cli.verbose);
    }
}
