//! Script link descriptors and their metadata mini-language.
//!
//! A [`ScriptLink`] is one `<script src=...>` reference found in a generated
//! page. Its `data-meta` attribute carries semicolon-separated `key=value;`
//! pairs; the keys `mode` and `babel` drive the batch rewrite decisions.
//!
//! Sibling naming is structured: the href is parsed into base + compound
//! extension + query, the infix inserted, and the parts re-serialized. Line
//! rewriting splices at the recorded byte-span of the href instead of
//! searching the line again.

mod scan;

use std::ops::Range;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

pub use scan::scan_links;

/// What the `babel` metadata key asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BabelDirective {
    /// Default: transpile into a sibling file.
    Sibling,
    /// `babel=no;` or `babel=false;` — leave the link untouched.
    Skip,
    /// `babel=.;` — transpile back into the source file itself.
    InPlace,
}

/// Parsed `data-meta` attribute.
#[derive(Debug, Clone, Default)]
pub struct LinkMeta {
    pairs: FxHashMap<String, String>,
}

impl LinkMeta {
    /// Parse semicolon-separated `key=value;` pairs.
    ///
    /// Malformed fragments (no `=`) are ignored; later duplicates win.
    pub fn parse(raw: &str) -> Self {
        let mut pairs = FxHashMap::default();
        for part in raw.split(';') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            if let Some((key, value)) = part.split_once('=') {
                pairs.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    /// Declared build mode, if any.
    pub fn mode(&self) -> Option<&str> {
        self.get("mode")
    }

    /// Transpilation directive. Both `no` and `false` opt out.
    pub fn babel(&self) -> BabelDirective {
        match self.get("babel") {
            Some("no") | Some("false") => BabelDirective::Skip,
            Some(".") => BabelDirective::InPlace,
            _ => BabelDirective::Sibling,
        }
    }
}

/// One script reference in a generated page.
#[derive(Debug, Clone)]
pub struct ScriptLink {
    /// Zero-based line number in the page.
    pub no: usize,
    /// The whole HTML line.
    pub line: String,
    /// The `src` attribute value.
    pub href: String,
    /// Byte range of `href` within `line`.
    pub href_span: Range<usize>,
    /// Resolved on-disk path of the referenced file.
    pub file: PathBuf,
    /// Compound extension of the file, e.g. `.debug.js`.
    pub ext: String,
    pub meta: LinkMeta,
}

impl ScriptLink {
    /// Sibling href with `infix` inserted before the compound extension.
    pub fn sibling_href(&self, infix: &str) -> String {
        HrefParts::parse(&self.href, &self.ext).with_infix(infix)
    }

    /// Sibling destination path next to the source file.
    pub fn sibling_file(&self, infix: &str) -> PathBuf {
        let s = self.file.to_string_lossy();
        match s.strip_suffix(self.ext.as_str()) {
            Some(base) => PathBuf::from(format!("{base}{infix}{}", self.ext)),
            None => self.file.clone(),
        }
    }

    /// Rebuild the line with a new href, splicing at the recorded span.
    pub fn line_with_href(&self, new_href: &str) -> String {
        let mut line = String::with_capacity(self.line.len() + new_href.len());
        line.push_str(&self.line[..self.href_span.start]);
        line.push_str(new_href);
        line.push_str(&self.line[self.href_span.end..]);
        line
    }
}

/// Compound extension of a path: everything from the first dot of the file
/// name (`polyfill.debug.js` → `.debug.js`).
pub fn compound_ext(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.find('.') {
        Some(pos) => name[pos..].to_string(),
        None => String::new(),
    }
}

/// An href decomposed for re-serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HrefParts {
    base: String,
    ext: String,
    query: String,
}

impl HrefParts {
    /// Split `href` into base + `ext` + trailing query/fragment.
    ///
    /// Falls back to the href's own compound extension when it does not end
    /// with the supplied one.
    fn parse(href: &str, ext: &str) -> Self {
        let (path, query) = match href.find(['?', '#']) {
            Some(pos) => (&href[..pos], &href[pos..]),
            None => (href, ""),
        };

        let (base, ext) = if !ext.is_empty() && path.ends_with(ext) {
            (path[..path.len() - ext.len()].to_string(), ext.to_string())
        } else {
            let own = compound_ext(Path::new(path));
            if !own.is_empty() {
                (path[..path.len() - own.len()].to_string(), own)
            } else {
                (path.to_string(), String::new())
            }
        };

        Self {
            base,
            ext,
            query: query.to_string(),
        }
    }

    fn with_infix(&self, infix: &str) -> String {
        format!("{}{infix}{}{}", self.base, self.ext, self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_parse_pairs() {
        let meta = LinkMeta::parse("mode=compat; babel=false;");
        assert_eq!(meta.mode(), Some("compat"));
        assert_eq!(meta.get("babel"), Some("false"));
    }

    #[test]
    fn test_meta_babel_sentinels() {
        assert_eq!(LinkMeta::parse("babel=no;").babel(), BabelDirective::Skip);
        assert_eq!(
            LinkMeta::parse("babel=false;").babel(),
            BabelDirective::Skip
        );
        assert_eq!(
            LinkMeta::parse("babel=.;").babel(),
            BabelDirective::InPlace
        );
        assert_eq!(
            LinkMeta::parse("babel=yes;").babel(),
            BabelDirective::Sibling
        );
        assert_eq!(LinkMeta::parse("").babel(), BabelDirective::Sibling);
    }

    #[test]
    fn test_meta_ignores_malformed_fragments() {
        let meta = LinkMeta::parse("garbage; mode=standard");
        assert_eq!(meta.mode(), Some("standard"));
        assert_eq!(meta.get("garbage"), None);
    }

    fn link(href: &str, ext: &str) -> ScriptLink {
        let line = format!("    <script src=\"{href}\"></script>");
        let start = line.find(href).unwrap();
        ScriptLink {
            no: 0,
            href: href.to_string(),
            href_span: start..start + href.len(),
            file: PathBuf::from(format!("htdocs/{href}")),
            ext: ext.to_string(),
            meta: LinkMeta::default(),
            line,
        }
    }

    #[test]
    fn test_sibling_href_compound_ext() {
        let link = link("f/polyfill/polyfill.debug.js", ".debug.js");
        assert_eq!(
            link.sibling_href(".babel"),
            "f/polyfill/polyfill.babel.debug.js"
        );
    }

    #[test]
    fn test_sibling_href_keeps_query() {
        let link = link("f/app.js?v=3", ".js");
        assert_eq!(link.sibling_href(".babel"), "f/app.babel.js?v=3");
    }

    #[test]
    fn test_sibling_file() {
        let link = link("f/x.debug.js", ".debug.js");
        assert_eq!(
            link.sibling_file(".babel"),
            PathBuf::from("htdocs/f/x.babel.debug.js")
        );
    }

    #[test]
    fn test_line_with_href_splices_span() {
        let link = link("f/x.debug.js", ".debug.js");
        let rewritten = link.line_with_href("f/x.babel.debug.js");
        assert_eq!(
            rewritten,
            "    <script src=\"f/x.babel.debug.js\"></script>"
        );
    }

    #[test]
    fn test_compound_ext() {
        assert_eq!(compound_ext(Path::new("a/polyfill.debug.js")), ".debug.js");
        assert_eq!(compound_ext(Path::new("a/app.js")), ".js");
        assert_eq!(compound_ext(Path::new("a/Makefile")), "");
    }
}
