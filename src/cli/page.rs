//! `esdown page` — batch rewrite of a generated page's script references.

use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::build::{apply_line_map, build_page};
use crate::compiler::OxcTranspiler;
use crate::config::Config;
use crate::links::scan_links;
use crate::log;
use crate::transform::{Pipeline, TransformFlags};

pub fn run(page: &Path, mode: Option<String>, config: &Config) -> Result<()> {
    let html = fs::read_to_string(page)?;
    let page_dir = page.parent().unwrap_or_else(|| Path::new("."));

    let links = scan_links(&html, page_dir);
    if links.is_empty() {
        log!("page"; "no script links in {}", page.display());
        return Ok(());
    }

    let mode = mode.unwrap_or_else(|| config.build.mode.clone());
    let mut pipeline = Pipeline::new(Box::new(OxcTranspiler::new(&config.build.target)));
    let flags = TransformFlags {
        transpile: true,
        instrument: false,
        emit_header: config.build.header,
    };

    let map = build_page(&mode, &links, &mut pipeline, &config.build.infix, flags)?;

    if !map.is_empty() {
        fs::write(page, apply_line_map(&html, &map))?;
    }

    log!(
        "page";
        "{}: {} link(s), {} line(s) rewritten, {} destination(s) refreshed",
        page.display(),
        links.len(),
        map.len(),
        pipeline.cache().len()
    );

    Ok(())
}
