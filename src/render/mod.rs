//! Dev-mode single-file rendering.
//!
//! Used while watching: one JS file referenced by a freshly generated page
//! is relocated under the configured output subdirectory, transformed if
//! stale, and rendered back as either an inline `<script>` block or a
//! `<script src=...>` reference with a recomputed relative href.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::freshness::ContentHash;
use crate::transform::{Pipeline, TransformFlags};
use crate::utils::path::{relative_from_dir, to_href};

/// Cached page-side facts about the referenced file.
#[derive(Debug, Clone)]
pub struct RenderData<'a> {
    /// Fingerprint of the file content as the host last saw it.
    pub fingerprint: ContentHash,
    /// Directory of the page referencing the file; hrefs are relative to it.
    pub page_dir: &'a Path,
    /// Inline the script body instead of referencing it.
    pub inline: bool,
    /// File is externally hosted; inlining is never allowed.
    pub external: bool,
    /// Extra attributes rendered into the tag, e.g. `defer`.
    pub attrs: Option<&'a str>,
    /// Indent depth (four spaces per level).
    pub tabs: usize,
    /// Query string appended to the href.
    pub query: Option<&'a str>,
}

/// Where and how to place the transformed file.
#[derive(Debug, Clone)]
pub struct RenderOptions<'a> {
    /// Site output root the page tree lives under.
    pub output_root: &'a Path,
    /// Subdirectory under the root receiving relocated files.
    pub subdir: &'a str,
    pub flags: TransformFlags,
}

/// Transform `file` (when stale) and render its `<script>` HTML.
pub fn render(
    file: &Path,
    data: &RenderData,
    opt: &RenderOptions,
    pipeline: &mut Pipeline,
) -> Result<String> {
    let rel = file.strip_prefix(opt.output_root).with_context(|| {
        format!(
            "file {} is not under the output root {}",
            file.display(),
            opt.output_root.display()
        )
    })?;
    let dest = opt.output_root.join(opt.subdir).join(rel);

    if !pipeline.cache().is_current(&dest, data.fingerprint) {
        pipeline.transform_file(file, Some(&dest), opt.flags)?;
    }

    let indent = "    ".repeat(data.tabs);
    let attrs = match data.attrs {
        Some(attrs) if !attrs.is_empty() => format!(" {attrs}"),
        _ => String::new(),
    };

    // Inline only when explicitly requested and the file is local
    if data.inline && !data.external {
        let content = fs::read_to_string(&dest)?;
        let mut html = format!("{indent}<script{attrs}>\n");
        for line in content.lines() {
            html.push_str(&indent);
            html.push_str(line);
            html.push('\n');
        }
        html.push_str(&format!("{indent}</script>"));
        return Ok(html);
    }

    let mut href = to_href(&relative_from_dir(data.page_dir, &dest));
    if let Some(query) = data.query
        && !query.is_empty()
    {
        href.push('?');
        href.push_str(query.trim_start_matches('?'));
    }

    Ok(format!("{indent}<script src=\"{href}\"{attrs}></script>"))
}
