//! Core template processing orchestration.
//! Drives every destination group through resolution, compilation and
//! assembly, then writes the results.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::adapter::Adapter;
use crate::assembler::{Assembler, DestinationGroups};
use crate::error::Result;
use crate::fs::FileSystem;
use crate::mode::OutputMode;
use crate::options::Options;
use crate::renderer::TemplateCompiler;
use crate::resolver::{resolve, SourceSpec};

/// Non-fatal conditions reported during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A configured source entry does not exist
    MissingSource(PathBuf),
    /// A destination resolved to no templates and was not written
    EmptyOutput(String),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MissingSource(path) => write!(f, "Source file \"{}\" not found.", path.display()),
            Warning::EmptyOutput(dest) => write!(
                f,
                "Destination \"{dest}\" not written because compiled files were empty."
            ),
        }
    }
}

/// Outcome of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Destinations written, in order
    pub written: Vec<String>,
    pub warnings: Vec<Warning>,
}

pub struct Processor<'a> {
    compiler: &'a dyn TemplateCompiler,
    fs: &'a dyn FileSystem,
    options: &'a Options,
    mode: OutputMode,
}

impl<'a> Processor<'a> {
    pub fn new(compiler: &'a dyn TemplateCompiler, fs: &'a dyn FileSystem, options: &'a Options) -> Self {
        debug!("Options: {:?}", options);
        Self { compiler, fs, options, mode: OutputMode::from_options(options) }
    }

    /// Resolves and compiles a group without writing anything.
    ///
    /// Warnings raised while resolving are appended to `warnings`.
    pub fn compile_group(&self, spec: &SourceSpec, warnings: &mut Vec<Warning>) -> Result<DestinationGroups> {
        let resolution = resolve(self.fs, spec, self.options)?;
        warnings.extend(resolution.warnings);

        let adapter = Adapter::new(self.compiler, self.fs, self.options, &self.mode);
        let mut groups = DestinationGroups::new();
        for unit in &resolution.units {
            let fragment = adapter.compile(unit, spec)?;
            groups.push(unit.dest.clone(), fragment);
        }
        Ok(groups)
    }

    /// Compiles a whole group, then writes each of its destinations.
    ///
    /// Nothing is written for the group if any of its templates fails.
    pub fn process_group(&self, spec: &SourceSpec, report: &mut RunReport) -> Result<()> {
        let groups = self.compile_group(spec, &mut report.warnings)?;

        if groups.is_empty() {
            self.skip(&spec.dest, report);
            return Ok(());
        }

        let assembler = Assembler::new(&self.mode, &self.options.separator);
        for (dest, fragments) in groups.iter() {
            match assembler.assemble(fragments) {
                Some(text) => {
                    self.fs.write(Path::new(dest), &text)?;
                    info!("File \"{}\" created.", dest);
                    report.written.push(dest.to_string());
                }
                None => self.skip(dest, report),
            }
        }
        Ok(())
    }

    /// Processes every group in order. The first compile failure aborts the run.
    pub fn run(&self, specs: &[SourceSpec]) -> Result<RunReport> {
        let mut report = RunReport::default();
        for spec in specs {
            debug!("Processing group {} -> {}", spec.orig, spec.dest);
            self.process_group(spec, &mut report)?;
        }
        Ok(report)
    }

    fn skip(&self, dest: &str, report: &mut RunReport) {
        let warning = Warning::EmptyOutput(dest.to_string());
        warn!("{}", warning);
        report.warnings.push(warning);
    }
}
