//! Expansion of glob patterns in configured source lists.
//!
//! Entries without glob metacharacters are kept verbatim so that missing
//! paths still surface as warnings later on. Patterns are matched against
//! paths as written, with any leading `./` ignored; a leading `!` removes
//! matches of earlier entries. A pattern whose leading directory does not
//! exist matches nothing.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use indexmap::IndexSet;
use log::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};

const GLOB_META: [char; 4] = ['*', '?', '[', '{'];

/// Whether `entry` contains glob metacharacters.
pub fn is_glob(entry: &str) -> bool {
    entry.contains(GLOB_META)
}

fn matcher(pattern: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| Error::GlobError(format!("invalid pattern '{}': {}", pattern, e)))
}

/// Leading directory of `pattern` that contains no metacharacters.
fn literal_base(pattern: &str) -> PathBuf {
    let mut base = PathBuf::new();
    for component in Path::new(pattern).components() {
        if component.as_os_str().to_string_lossy().contains(GLOB_META) {
            break;
        }
        base.push(component);
    }
    base
}

fn slash_path(path: &Path) -> String {
    let text = path.to_string_lossy().replace('\\', "/");
    match text.strip_prefix("./") {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

/// Strips a leading `./` so patterns line up with walked paths.
fn normalize_pattern(pattern: &str) -> String {
    slash_path(Path::new(pattern))
}

fn glob_matches(pattern: &str) -> Result<Vec<String>> {
    let matcher = matcher(pattern)?;
    let base = literal_base(pattern);
    let root = if base.as_os_str().is_empty() { PathBuf::from(".") } else { base };
    if !root.exists() {
        debug!("Pattern '{}' skipped, '{}' does not exist", pattern, root.display());
        return Ok(Vec::new());
    }

    let mut matches = Vec::new();
    for entry in WalkDir::new(&root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::WalkError { path: root.clone(), message: e.to_string() })?;
        let candidate = slash_path(entry.path());
        if matcher.is_match(&candidate) {
            matches.push(candidate);
        }
    }
    Ok(matches)
}

/// Expands every pattern in `entries`, preserving order and dropping
/// duplicates.
pub fn expand_sources(entries: &[String]) -> Result<Vec<String>> {
    let mut expanded: IndexSet<String> = IndexSet::new();
    for entry in entries {
        if let Some(pattern) = entry.strip_prefix('!') {
            let excluded = matcher(&normalize_pattern(pattern))?;
            expanded.retain(|path| !excluded.is_match(path));
            continue;
        }
        if is_glob(entry) {
            let matches = glob_matches(&normalize_pattern(entry))?;
            debug!("Pattern '{}' matched {} path(s)", entry, matches.len());
            expanded.extend(matches);
        } else {
            expanded.insert(entry.clone());
        }
    }
    Ok(expanded.into_iter().collect())
}
