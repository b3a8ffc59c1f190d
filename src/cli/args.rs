//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// esdown JS down-level transform CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: esdown.toml)
    #[arg(short = 'C', long, default_value = "esdown.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Transpile one JS file, or concatenate several into a bundle
    #[command(visible_alias = "f")]
    File {
        /// Source file(s); more than one is bundled in input order
        #[arg(required = true, value_hint = clap::ValueHint::FilePath)]
        inputs: Vec<PathBuf>,

        /// Destination file; written to stdout when omitted
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// Skip the provenance header
        #[arg(long)]
        no_header: bool,

        /// Transpile target, overriding the config (e.g. es5, es2015)
        #[arg(short, long)]
        target: Option<String>,
    },

    /// Rewrite the script references of a generated page
    #[command(visible_alias = "p")]
    Page {
        /// Generated HTML page to process
        #[arg(value_hint = clap::ValueHint::FilePath)]
        page: PathBuf,

        /// Target build mode matched against link `mode=` metadata
        #[arg(short, long)]
        mode: Option<String>,
    },

    /// Render a dev-mode `<script>` tag for one file
    #[command(visible_alias = "r")]
    Render {
        /// JS file under the output root
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Site output root containing the file
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        root: PathBuf,

        /// Directory of the page referencing the file
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        page_dir: PathBuf,

        /// Inline the script body instead of referencing it
        #[arg(long)]
        inline: bool,
    },
}
