#![allow(dead_code)]

use std::path::PathBuf;

use jstpack::error::{Error, Result};
use jstpack::renderer::{CompileOptions, CompiledTemplate, TemplateCompiler};
use serde_json::Value;

/// Compiler with predictable output.
///
/// Rendering yields `<source|data>`; the function source is
/// `function(){return "<source>";}`. Sources containing `SYNTAX` fail to
/// compile, sources containing `THROW` fail to render.
pub struct StubCompiler;

struct StubTemplate {
    file: PathBuf,
    source: String,
}

impl TemplateCompiler for StubCompiler {
    fn compile(&self, source: &str, options: &CompileOptions<'_>) -> Result<Box<dyn CompiledTemplate>> {
        if source.contains("SYNTAX") {
            return Err(Error::CompileError {
                file: options.filename.to_path_buf(),
                message: "unexpected token".to_string(),
            });
        }
        Ok(Box::new(StubTemplate { file: options.filename.to_path_buf(), source: source.to_string() }))
    }
}

impl CompiledTemplate for StubTemplate {
    fn render(&self, data: &Value) -> Result<String> {
        if self.source.contains("THROW") {
            return Err(Error::RenderError { file: self.file.clone(), message: "boom".to_string() });
        }
        Ok(format!("<{}|{}>", self.source, data))
    }

    fn source(&self) -> String {
        format!("function(){{return \"{}\";}}", self.source)
    }
}
