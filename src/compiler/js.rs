//! Down-level JS transpilation via oxc.
//!
//! Parse → semantic analysis → transform to the configured target → codegen.
//! Parse and transform diagnostics are surfaced as errors, never panics.

use std::path::Path;

use anyhow::{Result, anyhow, bail};
use oxc::allocator::Allocator;
use oxc::codegen::Codegen;
use oxc::parser::Parser;
use oxc::semantic::SemanticBuilder;
use oxc::span::SourceType;
use oxc::transformer::{TransformOptions, Transformer};

use super::Transpiler;

/// oxc-backed transpiler targeting a fixed ECMAScript version.
pub struct OxcTranspiler {
    target: String,
}

impl OxcTranspiler {
    /// Create a transpiler for a target like `es2015` or `es5`.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl Transpiler for OxcTranspiler {
    fn transpile(&self, source: &str, file: &Path) -> Result<String> {
        let allocator = Allocator::default();

        // Page scripts are classic scripts, not modules
        let source_type = SourceType::cjs();
        let ret = Parser::new(&allocator, source, source_type).parse();
        if !ret.errors.is_empty() {
            let messages: Vec<String> = ret.errors.iter().map(|e| e.to_string()).collect();
            bail!(
                "parse failed for {}: {}",
                file.display(),
                messages.join("; ")
            );
        }
        let mut program = ret.program;

        let scoping = SemanticBuilder::new()
            .build(&program)
            .semantic
            .into_scoping();

        let options = TransformOptions::from_target(&self.target)
            .map_err(|e| anyhow!("invalid transpile target `{}`: {e}", self.target))?;
        let ret = Transformer::new(&allocator, file, &options)
            .build_with_scoping(scoping, &mut program);
        if !ret.errors.is_empty() {
            let messages: Vec<String> = ret.errors.iter().map(|e| e.to_string()).collect();
            bail!(
                "transform failed for {}: {}",
                file.display(),
                messages.join("; ")
            );
        }

        Ok(Codegen::new().build(&program).code)
    }
}
