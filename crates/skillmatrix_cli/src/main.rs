//! skillmatrix - skills matrix workbook generator

mod cli;

use skillmatrix_core::{SpecPipelineConfigPartial, load_pipeline_config_partial, run_pipeline};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let from_file = match &cli.config {
        Some(path) => load_pipeline_config_partial(path)?,
        None => SpecPipelineConfigPartial::default(),
    };
    let config = from_file.overlay(cli.to_partial_config()).finalize()?;

    match run_pipeline(&config) {
        Ok(report) => {
            if report.warning_count() > 0 {
                warn!(warnings = report.warning_count(), "finished with warnings");
            }
            println!(
                "Excel file '{}' created successfully.",
                report.path_file_out.display()
            );
            Ok(())
        }
        Err(err) => {
            error!("Error creating Excel file: {err}");
            std::process::exit(1);
        }
    }
}
