//! Script-tag scanning for generated pages.
//!
//! Pages are line-oriented: the host template writer emits one `<script>`
//! reference per line, and batch rewriting replaces whole lines. Each line
//! containing a script tag is parsed with `tl` to pull out the `src` and
//! `data-meta` attributes.

use std::ops::Range;
use std::path::Path;

use super::{LinkMeta, ScriptLink, compound_ext};

/// True for hrefs that point off-site and can never be transpiled locally.
pub fn is_external_href(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://") || href.starts_with("//")
}

/// Byte range of `href` inside its `src` attribute, searching from `from`.
///
/// Anchoring on `src=` keeps the span off identical text in other
/// attributes; the caller advances `from` past each match so repeated hrefs
/// on one line resolve to their own tags.
fn find_src_span(line: &str, href: &str, from: usize) -> Option<Range<usize>> {
    for quote in ['"', '\''] {
        let needle = format!("src={quote}{href}{quote}");
        if let Some(pos) = line[from..].find(&needle) {
            let start = from + pos + "src=".len() + 1;
            return Some(start..start + href.len());
        }
    }
    None
}

/// Enumerate `<script src=...>` links in `html`.
///
/// Relative hrefs are resolved against `page_dir` to locate the referenced
/// file on disk. External references are skipped.
pub fn scan_links(html: &str, page_dir: &Path) -> Vec<ScriptLink> {
    let mut links = Vec::new();

    for (no, line) in html.lines().enumerate() {
        if !line.contains("<script") {
            continue;
        }
        let Ok(dom) = tl::parse(line, tl::ParserOptions::default()) else {
            continue;
        };

        let mut cursor = 0;
        for node in dom.nodes() {
            let Some(tag) = node.as_tag() else {
                continue;
            };
            if tag.name().as_utf8_str() != "script" {
                continue;
            }
            let Some(Some(src)) = tag.attributes().get("src") else {
                continue;
            };
            let href = src.as_utf8_str().into_owned();
            if href.is_empty() || is_external_href(&href) {
                continue;
            }
            let Some(href_span) = find_src_span(line, &href, cursor) else {
                continue;
            };
            cursor = href_span.end;

            let meta = tag
                .attributes()
                .get("data-meta")
                .flatten()
                .map(|raw| LinkMeta::parse(&raw.as_utf8_str()))
                .unwrap_or_default();

            let path_part = href.split(['?', '#']).next().unwrap_or(href.as_str());
            let file = crate::utils::path::clean_path(&page_dir.join(path_part));
            let ext = compound_ext(&file);

            links.push(ScriptLink {
                no,
                line: line.to_string(),
                href_span,
                href,
                file,
                ext,
                meta,
            });
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::BabelDirective;
    use std::path::PathBuf;

    const PAGE: &str = "<!doctype html>\n\
        <html>\n\
        <head>\n\
            <script src=\"f/polyfill/polyfill.debug.js\" data-meta=\"mode=compat; babel=false;\"></script>\n\
            <script src=\"f/app.debug.js\"></script>\n\
            <script src=\"https://cdn.example.com/lib.js\"></script>\n\
        </head>\n\
        <body></body>\n\
        </html>\n";

    #[test]
    fn test_scan_finds_local_scripts_only() {
        let links = scan_links(PAGE, Path::new("htdocs"));
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].href, "f/polyfill/polyfill.debug.js");
        assert_eq!(links[1].href, "f/app.debug.js");
    }

    #[test]
    fn test_scan_line_numbers_and_lines() {
        let links = scan_links(PAGE, Path::new("htdocs"));
        assert_eq!(links[0].no, 3);
        assert_eq!(links[1].no, 4);
        assert!(links[0].line.contains("polyfill.debug.js"));
    }

    #[test]
    fn test_scan_resolves_file_and_ext() {
        let links = scan_links(PAGE, Path::new("htdocs"));
        assert_eq!(
            links[0].file,
            PathBuf::from("htdocs/f/polyfill/polyfill.debug.js")
        );
        assert_eq!(links[0].ext, ".debug.js");
    }

    #[test]
    fn test_scan_parses_meta() {
        let links = scan_links(PAGE, Path::new("htdocs"));
        assert_eq!(links[0].meta.mode(), Some("compat"));
        assert_eq!(links[0].meta.babel(), BabelDirective::Skip);
        assert_eq!(links[1].meta.babel(), BabelDirective::Sibling);
    }

    #[test]
    fn test_scan_href_span_matches() {
        let links = scan_links(PAGE, Path::new("htdocs"));
        for link in &links {
            assert_eq!(&link.line[link.href_span.clone()], link.href);
        }
    }

    #[test]
    fn test_scan_repeated_href_gets_distinct_spans() {
        let page = "<script src=\"f/a.js\"></script><script src=\"f/a.js\"></script>\n";
        let links = scan_links(page, Path::new("htdocs"));
        assert_eq!(links.len(), 2);
        assert_ne!(links[0].href_span, links[1].href_span);
        for link in &links {
            assert_eq!(&link.line[link.href_span.clone()], "f/a.js");
        }
        let rewritten = links[1].line_with_href("f/a.babel.js");
        assert_eq!(
            rewritten,
            "<script src=\"f/a.js\"></script><script src=\"f/a.babel.js\"></script>"
        );
    }

    #[test]
    fn test_scan_span_ignores_href_text_in_other_attributes() {
        let page = "<script data-orig=\"f/a.js\" src=\"f/a.js\"></script>\n";
        let links = scan_links(page, Path::new("htdocs"));
        assert_eq!(links.len(), 1);
        let span = links[0].href_span.clone();
        assert_eq!(&links[0].line[span.clone()], "f/a.js");
        assert_eq!(&links[0].line[span.start - 5..span.start], "src=\"");
    }

    #[test]
    fn test_is_external_href() {
        assert!(is_external_href("https://cdn.example.com/a.js"));
        assert!(is_external_href("//cdn.example.com/a.js"));
        assert!(!is_external_href("f/a.js"));
    }
}
