//! Strict-mode pragma demotion.
//!
//! The transpiler prepends `'use strict';` unconditionally. In the pages
//! this tool serves, strict semantics are decided by the surrounding bundle,
//! so the pragma is moved into a comment on the first line. This is a
//! textual edit only; everything after the first line is left byte-for-byte
//! as the transpiler produced it.

const PRAGMAS: [&str; 2] = ["'use strict';", "\"use strict\";"];

/// Split a leading strict-mode pragma off `content`.
///
/// Returns the demoted comment line and the untouched remainder, or `None`
/// when the content does not start with a pragma.
pub fn demote(content: &str) -> Option<(String, &str)> {
    for pragma in PRAGMAS {
        if let Some(rest) = content.strip_prefix(pragma) {
            let rest = rest
                .strip_prefix("\r\n")
                .or_else(|| rest.strip_prefix('\n'))
                .unwrap_or(rest);
            let comment = format!("//{pragma} // strict-mode pragma disabled");
            return Some((comment, rest));
        }
    }
    None
}
