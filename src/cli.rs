//! Command-line interface implementation.
//! Provides argument parsing and help text formatting using clap.

use crate::config::{Preset, StyleDialect};
use crate::constants::DEFAULT_TEMPLATE_DIR;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure.
#[derive(Parser, Debug)]
#[command(
    name = "create-vue-template",
    author,
    version,
    about = "Generate Vue 3 projects with Vite, Ant Design Vue, and TypeScript",
    long_about = None,
    after_help = "Examples:\n  $ create-vue-template my-app\n  $ create-vue-template my-app --skip-prompts\n  $ create-vue-template my-app --template full"
)]
pub struct Args {
    /// Name of the project to create
    #[arg(value_name = "PROJECT_NAME")]
    pub project_name: Option<String>,

    /// Skip interactive prompts and use defaults
    #[arg(short, long)]
    pub skip_prompts: bool,

    /// Preset used when prompts are skipped
    #[arg(short, long, value_enum, default_value_t = Preset::Basic)]
    pub template: Preset,

    /// CSS preprocessor (scss, less or none); overrides the preset
    #[arg(long, value_name = "DIALECT")]
    pub style: Option<StyleDialect>,

    /// Directory containing the project template tree
    #[arg(long, value_name = "DIR", default_value = DEFAULT_TEMPLATE_DIR)]
    pub template_dir: PathBuf,

    /// Directory where the project is generated (defaults to ./<PROJECT_NAME>)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Read answers as JSON or YAML from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Generate into a non-empty output directory
    #[arg(short, long)]
    pub force: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 0 after printing help when no arguments are given
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    if std::env::args_os().len() <= 1 {
        let _ = Args::command().print_help();
        std::process::exit(0);
    }
    Args::try_parse().unwrap_or_else(|e| e.exit())
}
