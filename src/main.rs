//! esdown - JS down-level transform cache and script-tag rewriter.

mod build;
mod cli;
mod compiler;
mod config;
mod freshness;
mod links;
mod logger;
mod render;
mod transform;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = Config::load(&cli.config)?;

    match &cli.command {
        Commands::File {
            inputs,
            output,
            no_header,
            target,
        } => cli::file::run(inputs, output.as_deref(), *no_header, target.clone(), &config),
        Commands::Page { page, mode } => cli::page::run(page, mode.clone(), &config),
        Commands::Render {
            file,
            root,
            page_dir,
            inline,
        } => cli::render::run(file, root, page_dir, *inline, &config),
    }
}
