//! Template compiler interface and the MiniJinja-backed default compiler.
use std::path::{Path, PathBuf};

use minijinja::Environment;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Settings handed to the compiler for a single template.
///
/// Built fresh for every file from the run's options, so nothing leaks
/// from one template into the next.
#[derive(Debug, Clone, Copy)]
pub struct CompileOptions<'a> {
    /// Path of the template being compiled, used for diagnostics
    pub filename: &'a Path,
    /// Whether the caller wants the function source rather than rendered text
    pub client: bool,
    /// Free-form compiler settings from the configuration
    pub extras: &'a Map<String, Value>,
}

impl CompileOptions<'_> {
    /// Reads a boolean compiler setting, `false` when absent.
    pub fn flag(&self, key: &str) -> bool {
        self.extras.get(key).and_then(Value::as_bool).unwrap_or(false)
    }
}

/// A template that has been compiled and can be rendered or serialized.
pub trait CompiledTemplate {
    /// Renders the template with the given data.
    fn render(&self, data: &Value) -> Result<String>;

    /// Returns the source text of a function that renders the template.
    fn source(&self) -> String;
}

/// Trait for template compilers.
pub trait TemplateCompiler {
    /// Compiles template source text.
    ///
    /// # Errors
    /// * `Error::CompileError` if the source is rejected
    fn compile(&self, source: &str, options: &CompileOptions<'_>) -> Result<Box<dyn CompiledTemplate>>;
}

/// MiniJinja-based template compiler.
///
/// Honors the `trim_blocks`, `lstrip_blocks` and `keep_trailing_newline`
/// compiler settings.
pub struct MiniJinjaCompiler {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaCompiler {
    /// Creates a new MiniJinjaCompiler instance with default environment.
    pub fn new() -> Self {
        let env = Environment::new();
        Self { env }
    }
}

impl Default for MiniJinjaCompiler {
    fn default() -> Self {
        MiniJinjaCompiler::new()
    }
}

impl TemplateCompiler for MiniJinjaCompiler {
    fn compile(&self, source: &str, options: &CompileOptions<'_>) -> Result<Box<dyn CompiledTemplate>> {
        let mut env = self.env.clone();
        env.set_trim_blocks(options.flag("trim_blocks"));
        env.set_lstrip_blocks(options.flag("lstrip_blocks"));
        env.set_keep_trailing_newline(options.flag("keep_trailing_newline"));

        let name = options.filename.display().to_string();
        env.add_template_owned(name.clone(), source.to_string()).map_err(|e| {
            Error::CompileError { file: options.filename.to_path_buf(), message: e.to_string() }
        })?;

        Ok(Box::new(MiniJinjaTemplate {
            env,
            name,
            file: options.filename.to_path_buf(),
            source: source.to_string(),
        }))
    }
}

struct MiniJinjaTemplate {
    env: Environment<'static>,
    name: String,
    file: PathBuf,
    source: String,
}

impl CompiledTemplate for MiniJinjaTemplate {
    fn render(&self, data: &Value) -> Result<String> {
        let render_error =
            |e: minijinja::Error| Error::RenderError { file: self.file.clone(), message: e.to_string() };
        let tmpl = self.env.get_template(&self.name).map_err(render_error)?;
        tmpl.render(data).map_err(render_error)
    }

    /// The function delegates to the runtime's `render`, carrying the template
    /// text as a JSON string literal.
    fn source(&self) -> String {
        let literal = serde_json::to_string(&self.source).unwrap_or_else(|_| "\"\"".to_string());
        format!("function template(locals) {{ return jade.render({literal}, locals || {{}}); }}")
    }
}
