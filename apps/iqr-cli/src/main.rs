//! Train and generate models for the IQR search application.
//!
//! Takes the UI configuration naming the target tab plus the same service
//! configuration the REST service later answers queries with, ingests the
//! given files into the tab's dataset, and builds descriptor models and the
//! nearest-neighbors index offline.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use iqr_core::config;
use iqr_core::error::Error;
use iqr_pipeline::{run, PluginHub};

#[derive(Debug, Parser)]
#[command(name = "iqr-model-gen", version, about)]
struct Args {
    /// Paths to the two JSON configuration files: first the UI (tab)
    /// configuration, second the IQR service configuration.
    #[arg(
        short,
        long,
        num_args = 2,
        value_names = ["UI_CONFIG", "IQR_CONFIG"],
        required = true
    )]
    config: Vec<PathBuf>,

    /// UI configuration tab naming the dataset to add the input files to.
    #[arg(short, long)]
    tab: String,

    /// Output additional debug logging.
    #[arg(short, long)]
    verbose: bool,

    /// File paths or shell globs to add to the configured dataset.
    #[arg(value_name = "GLOB", required = true)]
    input_files: Vec<String>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let (ui_path, iqr_path) = (&args.config[0], &args.config[1]);
    info!(path = %ui_path.display(), "loading UI config");
    info!(path = %iqr_path.display(), "loading IQR config");
    let (ui_config, iqr_config) = config::load_config_pair(ui_path, iqr_path)?;

    // Unknown tab is an explicit, logged early exit; nothing has been
    // instantiated at this point.
    let tab = match ui_config.resolve_tab(&args.tab) {
        Ok(tab) => tab,
        Err(Error::ConfigValidation(msg)) => {
            error!("{msg}");
            process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let hub = PluginHub::with_defaults();
    let report = run(&hub, tab, &iqr_config.iqr_service.plugins, &args.input_files)?;

    info!(
        files = report.files_ingested,
        descriptors = report.descriptor_count,
        pretrained = report.pretrained,
        functor_fitted = report.functor_fitted,
        "model generation complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn parses_full_command_line() {
        let args = Args::try_parse_from([
            "iqr-model-gen",
            "-v",
            "-c",
            "ui.json",
            "iqr.json",
            "-t",
            "demo",
            "data/*.txt",
            "extra.png",
        ])
        .expect("parses");
        assert!(args.verbose);
        assert_eq!(args.config.len(), 2);
        assert_eq!(args.tab, "demo");
        assert_eq!(args.input_files, vec!["data/*.txt", "extra.png"]);
    }

    #[test]
    fn requires_two_config_paths() {
        let result = Args::try_parse_from([
            "iqr-model-gen",
            "-c",
            "only-one.json",
            "-t",
            "demo",
            "x.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn requires_tab_and_at_least_one_glob() {
        assert!(Args::try_parse_from(["iqr-model-gen", "-c", "a.json", "b.json", "x.txt"]).is_err());
        assert!(Args::try_parse_from(["iqr-model-gen", "-c", "a.json", "b.json", "-t", "demo"])
            .is_err());
    }
}
