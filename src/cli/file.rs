//! `esdown file` — transpile a single JS file or a multi-file bundle.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::compiler::OxcTranspiler;
use crate::config::Config;
use crate::debug;
use crate::log;
use crate::transform::{Pipeline, TransformFlags};

pub fn run(
    inputs: &[PathBuf],
    output: Option<&Path>,
    no_header: bool,
    target: Option<String>,
    config: &Config,
) -> Result<()> {
    let target = target.unwrap_or_else(|| config.build.target.clone());
    let mut pipeline = Pipeline::new(Box::new(OxcTranspiler::new(target)));

    let flags = TransformFlags {
        transpile: true,
        instrument: false,
        emit_header: config.build.header && !no_header,
    };

    let result = match inputs {
        [input] => pipeline.transform_file(input, output, flags)?,
        bundle => pipeline.transform_bundle(bundle, output, flags)?,
    };

    match result {
        Some(content) => match output {
            Some(dest) => log!("babel"; "wrote {}", dest.display()),
            None => print!("{content}"),
        },
        None => debug!("babel"; "output already current"),
    }

    Ok(())
}
