//! Resolution of configured source entries into individual templates.
//!
//! A destination group lists files and directories. Files compile into the
//! group's destination as-is; directories are walked and every template found
//! below them gets its own destination, derived from its relative path with
//! the output extension substituted.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::Result;
use crate::fs::FileSystem;
use crate::options::Options;
use crate::processor::Warning;

/// One configured destination group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    /// Identifier of the group, handed to data callbacks
    pub orig: String,
    /// Destination file, or destination prefix for directory entries
    pub dest: String,
    /// Source files and directories, in order
    pub src: Vec<String>,
}

impl SourceSpec {
    pub fn new<O, D, I, S>(orig: O, dest: D, src: I) -> Self
    where
        O: Into<String>,
        D: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            orig: orig.into(),
            dest: dest.into(),
            src: src.into_iter().map(Into::into).collect(),
        }
    }
}

/// A single template and the destination it contributes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUnit {
    pub source: PathBuf,
    pub dest: String,
    /// Output file name derived for directory-discovered templates
    pub derived_filename: Option<String>,
}

/// Units of a group in traversal order, plus the warnings raised on the way.
#[derive(Debug, Default)]
pub struct Resolution {
    pub units: Vec<ResolvedUnit>,
    pub warnings: Vec<Warning>,
}

/// Replaces the extension of `filename` with `extension`, or appends it when
/// the name has none.
///
/// # Example
/// ```
/// use jstpack::resolver::derive_filename;
/// assert_eq!(derive_filename("foo.tmpl", "html"), "foo.html");
/// assert_eq!(derive_filename("foo", "html"), "foo.html");
/// ```
pub fn derive_filename(filename: &str, extension: &str) -> String {
    match filename.rfind('.') {
        Some(index) => format!("{}.{}", &filename[..index], extension),
        None => format!("{filename}.{extension}"),
    }
}

/// Joins the group destination, the template's subdirectory and its derived
/// name. The destination is used as a plain prefix.
pub fn destination_key(dest: &str, sub_dir: Option<&str>, derived: &str) -> String {
    match sub_dir {
        Some(sub_dir) => format!("{dest}{sub_dir}/{derived}"),
        None => format!("{dest}{derived}"),
    }
}

/// Resolves every source entry of `spec` into templates.
///
/// Missing entries are reported and dropped. Nothing is deduplicated: several
/// templates may share a destination.
pub fn resolve(fs: &dyn FileSystem, spec: &SourceSpec, options: &Options) -> Result<Resolution> {
    let mut resolution = Resolution::default();

    for entry in &spec.src {
        let path = Path::new(entry);
        if !fs.exists(path) {
            let warning = Warning::MissingSource(path.to_path_buf());
            warn!("{}", warning);
            resolution.warnings.push(warning);
            continue;
        }

        if !fs.is_dir(path) {
            resolution.units.push(ResolvedUnit {
                source: path.to_path_buf(),
                dest: spec.dest.clone(),
                derived_filename: None,
            });
            continue;
        }

        fs.recurse(path, &mut |walk_entry| {
            if !walk_entry.filename.contains(&options.template_ext) {
                debug!("Skipping non-template file {}", walk_entry.abs_path.display());
                return Ok(());
            }
            let derived = derive_filename(&walk_entry.filename, &options.extension);
            let dest = destination_key(&spec.dest, walk_entry.sub_dir.as_deref(), &derived);
            resolution.units.push(ResolvedUnit {
                source: walk_entry.abs_path,
                dest,
                derived_filename: Some(derived),
            });
            Ok(())
        })?;
    }

    Ok(resolution)
}
