//! Compiles one resolved template into a fragment of its destination file.

use log::{debug, error};
use serde_json::Value;

use crate::error::Result;
use crate::fs::FileSystem;
use crate::mode::{FragmentStyle, OutputMode};
use crate::options::{DataContext, Options};
use crate::renderer::{CompileOptions, TemplateCompiler};
use crate::resolver::{ResolvedUnit, SourceSpec};

pub struct Adapter<'a> {
    compiler: &'a dyn TemplateCompiler,
    fs: &'a dyn FileSystem,
    options: &'a Options,
    mode: &'a OutputMode,
}

impl<'a> Adapter<'a> {
    pub fn new(
        compiler: &'a dyn TemplateCompiler,
        fs: &'a dyn FileSystem,
        options: &'a Options,
        mode: &'a OutputMode,
    ) -> Self {
        Self { compiler, fs, options, mode }
    }

    /// Reads, compiles and shapes a single template.
    ///
    /// # Errors
    /// * `Error::CompileError` / `Error::RenderError` from the compiler; both are
    ///   logged here before being returned
    /// * `Error::IoError` if the template cannot be read
    pub fn compile(&self, unit: &ResolvedUnit, spec: &SourceSpec) -> Result<String> {
        let source = self.options.process_content(&self.fs.read(&unit.source)?);
        let key = self.options.process_name(&unit.source.to_string_lossy());

        debug!("Compiling {} as {}", unit.source.display(), key);

        let compiled = self.compile_source(&source, unit, spec).inspect_err(|e| error!("{}", e))?;
        Ok(self.mode.fragment(&key, compiled))
    }

    fn compile_source(&self, source: &str, unit: &ResolvedUnit, spec: &SourceSpec) -> Result<String> {
        let compile_options = CompileOptions {
            filename: &unit.source,
            client: self.options.client,
            extras: &self.options.compiler,
        };
        let template = self.compiler.compile(source, &compile_options)?;

        if self.mode.style != FragmentStyle::Rendered {
            return Ok(template.source());
        }

        let data = match &self.options.data {
            Some(data) => {
                data.resolve(&DataContext { orig: &spec.orig, dest: &unit.dest, src: &spec.src })
            }
            None => Value::Null,
        };
        template.render(&data)
    }
}
