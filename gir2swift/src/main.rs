//! `gir2swift` command line tool.
//!
//! Run with: `gir2swift -p GObject-2.0.gir -o Sources/Gtk Gtk-3.0.gir`

use anyhow::{Context, Result, bail};
use clap::Parser;
use gir2swift::RunConfig;
use gir2swift::schema::CollisionPolicy;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Generate Swift bindings from GIR metadata.
#[derive(Parser, Debug)]
#[command(name = "gir2swift", version)]
#[command(about = "Generate Swift bindings for GObject libraries from .gir files")]
struct Cli {
    /// Produce verbose output.
    #[arg(short)]
    verbose: bool,

    /// Disable all filters; wrappers for private C types are generated too.
    #[arg(short = 'a')]
    all_files_generate: bool,

    /// Create a single .swift file per class.
    #[arg(short = 's')]
    single_file_per_class: bool,

    /// Add a prerequisite .gir file so its types are known.
    #[arg(short = 'p', value_name = "GIR")]
    prerequisite_gir: Vec<PathBuf>,

    /// Output directory for the generated files (standard output if absent).
    #[arg(short = 'o', value_name = "DIR")]
    output_directory: Option<PathBuf>,

    /// Hand-written Swift file placed at the top of each module file.
    #[arg(short = 'm', value_name = "FILE")]
    module_boilerplate: Option<PathBuf>,

    /// What to do when a type name is declared twice.
    #[arg(long, value_name = "POLICY", default_value = "replace", value_parser = parse_policy)]
    collisions: CollisionPolicy,

    /// Stop at the first file that fails to load.
    #[arg(long)]
    fail_fast: bool,

    /// The .gir metadata files to process.
    #[arg(required = true, value_name = "GIR_FILES")]
    gir_files: Vec<PathBuf>,
}

fn parse_policy(s: &str) -> Result<CollisionPolicy, String> {
    CollisionPolicy::parse(s)
        .ok_or_else(|| format!("unknown policy '{s}' (expected replace, keep-first or reject)"))
}

impl Cli {
    fn into_config(self) -> Result<RunConfig> {
        let mut builder = RunConfig::builder()
            .files(self.gir_files)
            .prerequisites(self.prerequisite_gir)
            .split(self.single_file_per_class)
            .generate_all(self.all_files_generate)
            .verbose(self.verbose)
            .fail_fast(self.fail_fast)
            .collision_policy(self.collisions);

        if let Some(dir) = self.output_directory.filter(|d| !d.as_os_str().is_empty()) {
            builder = builder.output_dir(dir);
        }
        if let Some(path) = self.module_boilerplate.filter(|p| !p.as_os_str().is_empty()) {
            builder = builder.boilerplate(path);
        }

        builder.build().context("invalid command line")
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.into_config()?;
    let total = config.files().len() + config.prerequisites().len();
    let summary = gir2swift::run(config).context("generation failed")?;

    if !summary.is_success() {
        bail!("{} of {} files failed", summary.failures.len(), total);
    }
    Ok(())
}
