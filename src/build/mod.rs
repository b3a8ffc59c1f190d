//! Batch per-link rewriting for production builds.
//!
//! For every script link in a page, decide between dropping the line
//! (wrong mode), leaving it alone (opt-out), transpiling in place, or
//! transpiling into a sibling file and repointing the href.

use std::collections::BTreeMap;

use anyhow::Result;

use crate::links::{BabelDirective, ScriptLink};
use crate::transform::{Pipeline, TransformFlags};

/// Rewrite decisions for one page: line number → replacement line.
///
/// An empty replacement blanks the line. Lines without an entry are kept
/// as-is by the caller.
pub type LineMap = BTreeMap<usize, String>;

/// Process all links of a page built for `mode`.
///
/// Side effects: transpiled sibling (or in-place) files are written through
/// the pipeline, memoized by destination.
pub fn build_page(
    mode: &str,
    links: &[ScriptLink],
    pipeline: &mut Pipeline,
    infix: &str,
    flags: TransformFlags,
) -> Result<LineMap> {
    let mut map = LineMap::new();

    for link in links {
        // Links pinned to another mode are dropped from this page
        if let Some(link_mode) = link.meta.mode()
            && link_mode != mode
        {
            map.insert(link.no, String::new());
            continue;
        }

        match link.meta.babel() {
            BabelDirective::Skip => {}
            BabelDirective::InPlace => {
                let file = link.file.clone();
                pipeline.transform_file(&file, Some(&file), flags)?;
            }
            BabelDirective::Sibling => {
                let dest = link.sibling_file(infix);
                pipeline.transform_file(&link.file, Some(&dest), flags)?;
                map.insert(link.no, link.line_with_href(&link.sibling_href(infix)));
            }
        }
    }

    Ok(map)
}

/// Apply a [`LineMap`] to page content, returning the rewritten page.
///
/// Each line keeps its own terminator (`\r\n`, `\n`, or none on the final
/// line); replacements splice in before it.
pub fn apply_line_map(html: &str, map: &LineMap) -> String {
    let mut out = String::with_capacity(html.len());
    for (no, raw) in html.split_inclusive('\n').enumerate() {
        let (line, term) = match raw.strip_suffix("\r\n") {
            Some(line) => (line, "\r\n"),
            None => match raw.strip_suffix('\n') {
                Some(line) => (line, "\n"),
                None => (raw, ""),
            },
        };
        match map.get(&no) {
            Some(replacement) => out.push_str(replacement),
            None => out.push_str(line),
        }
        out.push_str(term);
    }
    out
}
