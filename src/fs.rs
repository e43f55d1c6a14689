//! File system access used by the pipeline.
//!
//! The pipeline never touches `std::fs` directly; it goes through
//! [`FileSystem`] so trees can be served from disk or from memory.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

use indexmap::{IndexMap, IndexSet};
use log::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// A file reached while recursing through a source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Path of the file, rooted at the directory passed to `recurse`
    pub abs_path: PathBuf,
    /// The directory passed to `recurse`
    pub root_dir: PathBuf,
    /// Directory of the file relative to `root_dir`, `/`-separated; `None` at the root
    pub sub_dir: Option<String>,
    pub filename: String,
}

/// Abstract file system interface.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Visits every file below `dir`, depth first. Directories themselves are
    /// not visited. An error returned by `visit` stops the walk.
    fn recurse(&self, dir: &Path, visit: &mut dyn FnMut(WalkEntry) -> Result<()>) -> Result<()>;

    fn read(&self, path: &Path) -> Result<String>;

    /// Writes `content`, creating parent directories as needed.
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

fn to_slash(path: &Path) -> Option<String> {
    let parts: Vec<String> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

fn walk_entry(root: &Path, path: &Path) -> Option<WalkEntry> {
    let relative = path.strip_prefix(root).ok()?;
    let filename = relative.file_name()?.to_string_lossy().into_owned();
    let sub_dir = relative.parent().and_then(to_slash);
    Some(WalkEntry {
        abs_path: path.to_path_buf(),
        root_dir: root.to_path_buf(),
        sub_dir,
        filename,
    })
}

/// Disk-backed file system. Directory entries are visited sorted by file
/// name so repeated runs produce identical output.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn recurse(&self, dir: &Path, visit: &mut dyn FnMut(WalkEntry) -> Result<()>) -> Result<()> {
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::WalkError {
                path: dir.to_path_buf(),
                message: e.to_string(),
            })?;
            if entry.file_type().is_dir() {
                continue;
            }
            if let Some(walk_entry) = walk_entry(dir, entry.path()) {
                visit(walk_entry)?;
            }
        }
        Ok(())
    }

    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(Error::IoError)
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(Error::IoError)?;
            }
        }
        debug!("Writing file: {}", path.display());
        fs::write(path, content).map_err(Error::IoError)
    }
}

/// In-memory file system.
///
/// Files are walked in the order they were added, which makes traversal
/// order explicit in tests and for embedders that build trees on the fly.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: Mutex<IndexMap<PathBuf, String>>,
    dirs: Mutex<IndexSet<PathBuf>>,
    writes: Mutex<Vec<(PathBuf, String)>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file<P: Into<PathBuf>, S: Into<String>>(self, path: P, content: S) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn with_dir<P: Into<PathBuf>>(self, path: P) -> Self {
        if let Ok(mut dirs) = self.dirs.lock() {
            dirs.insert(path.into());
        }
        self
    }

    pub fn add_file<P: Into<PathBuf>, S: Into<String>>(&self, path: P, content: S) {
        if let Ok(mut files) = self.files.lock() {
            files.insert(path.into(), content.into());
        }
    }

    /// Every write performed so far, in order.
    pub fn writes(&self) -> Vec<(PathBuf, String)> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }

    fn file_paths(&self) -> Vec<PathBuf> {
        self.files.lock().map(|f| f.keys().cloned().collect()).unwrap_or_default()
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let is_file = self.files.lock().map(|f| f.contains_key(path)).unwrap_or(false);
        is_file || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let declared = self.dirs.lock().map(|d| d.contains(path)).unwrap_or(false);
        declared || self.file_paths().iter().any(|p| p != path && p.starts_with(path))
    }

    fn recurse(&self, dir: &Path, visit: &mut dyn FnMut(WalkEntry) -> Result<()>) -> Result<()> {
        for path in self.file_paths() {
            if path == dir || !path.starts_with(dir) {
                continue;
            }
            if let Some(walk_entry) = walk_entry(dir, &path) {
                visit(walk_entry)?;
            }
        }
        Ok(())
    }

    fn read(&self, path: &Path) -> Result<String> {
        self.files
            .lock()
            .ok()
            .and_then(|f| f.get(path).cloned())
            .ok_or_else(|| {
                Error::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} not found", path.display()),
                ))
            })
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        self.add_file(path, content);
        if let Ok(mut writes) = self.writes.lock() {
            writes.push((path.to_path_buf(), content.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn collect(fs: &dyn FileSystem, dir: &Path) -> Vec<WalkEntry> {
        let mut entries = Vec::new();
        fs.recurse(dir, &mut |entry| {
            entries.push(entry);
            Ok(())
        })
        .unwrap();
        entries
    }

    #[test]
    fn test_memory_recurse_keeps_insertion_order() {
        let fs = MemoryFileSystem::new()
            .with_file("tpl/c.jade", "c")
            .with_file("tpl/sub/a.jade", "a")
            .with_file("other/b.jade", "b")
            .with_file("tpl/b.jade", "b");

        let entries = collect(&fs, Path::new("tpl"));
        let names: Vec<_> = entries.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(names, vec!["c.jade", "a.jade", "b.jade"]);
        assert_eq!(entries[0].sub_dir, None);
        assert_eq!(entries[1].sub_dir.as_deref(), Some("sub"));
        assert_eq!(entries[1].abs_path, PathBuf::from("tpl/sub/a.jade"));
    }

    #[test]
    fn test_memory_exists_and_is_dir() {
        let fs = MemoryFileSystem::new().with_file("tpl/a.jade", "a").with_dir("empty");
        assert!(fs.exists(Path::new("tpl")));
        assert!(fs.is_dir(Path::new("tpl")));
        assert!(fs.exists(Path::new("tpl/a.jade")));
        assert!(!fs.is_dir(Path::new("tpl/a.jade")));
        assert!(fs.is_dir(Path::new("empty")));
        assert!(!fs.exists(Path::new("missing")));
    }

    #[test]
    fn test_local_recurse_is_sorted_and_depth_first() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("b_dir")).unwrap();
        fs::write(root.join("c.jade"), "c").unwrap();
        fs::write(root.join("a.jade"), "a").unwrap();
        fs::write(root.join("b_dir/inner.jade"), "i").unwrap();

        let local = LocalFileSystem::new();
        let entries = collect(&local, root);
        let names: Vec<_> = entries.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(names, vec!["a.jade", "inner.jade", "c.jade"]);
        assert_eq!(entries[1].sub_dir.as_deref(), Some("b_dir"));
        assert_eq!(entries[1].root_dir, root.to_path_buf());
    }

    #[test]
    fn test_local_write_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("nested/dir/out.js");
        let local = LocalFileSystem::new();
        local.write(&target, "content").unwrap();
        assert_eq!(local.read(&target).unwrap(), "content");
    }
}
