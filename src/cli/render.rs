//! `esdown render` — dev-mode script tag for one file.

use std::path::Path;

use anyhow::Result;

use crate::compiler::OxcTranspiler;
use crate::config::Config;
use crate::freshness::ContentHash;
use crate::render::{RenderData, RenderOptions, render};
use crate::transform::{Pipeline, TransformFlags};
use crate::utils::path::normalize_path;

pub fn run(
    file: &Path,
    root: &Path,
    page_dir: &Path,
    inline: bool,
    config: &Config,
) -> Result<()> {
    // Mixed relative/absolute CLI paths break strip_prefix; pin them down
    let file = normalize_path(file);
    let root = normalize_path(root);
    let page_dir = normalize_path(page_dir);

    let fingerprint = ContentHash::of_file(&file)?;
    let mut pipeline = Pipeline::new(Box::new(OxcTranspiler::new(&config.build.target)));

    let data = RenderData {
        fingerprint,
        page_dir: &page_dir,
        inline,
        external: false,
        attrs: None,
        tabs: 0,
        query: None,
    };
    let opt = RenderOptions {
        output_root: &root,
        subdir: &config.build.subdir,
        flags: TransformFlags {
            transpile: true,
            instrument: false,
            emit_header: config.build.header,
        },
    };

    let html = render(&file, &data, &opt, &mut pipeline)?;
    println!("{html}");
    Ok(())
}
