//! Configuration handling for jstpack.
//! Loads the run options and destination groups from `jstpack.json`,
//! `jstpack.yml` or `jstpack.yaml`.

use crate::constants::{DEFAULT_EXTENSION, DEFAULT_TEMPLATE_EXT};
use crate::error::{Error, Result};
use crate::options::{Data, Namespace, Options};
use crate::resolver::SourceSpec;
use crate::sources::expand_sources;
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Options section of the configuration file.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct OptionsConfig {
    namespace: Namespace,
    separator: Option<String>,
    amd: bool,
    node: bool,
    client: bool,
    extension: String,
    template_ext: String,
    data: Option<Value>,
    compiler: Map<String, Value>,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            namespace: Namespace::default(),
            separator: None,
            amd: false,
            node: false,
            client: false,
            extension: DEFAULT_EXTENSION.to_string(),
            template_ext: DEFAULT_TEMPLATE_EXT.to_string(),
            data: None,
            compiler: Map::new(),
        }
    }
}

impl From<OptionsConfig> for Options {
    fn from(config: OptionsConfig) -> Self {
        let defaults = Options::default();
        Options {
            namespace: config.namespace,
            separator: config.separator.unwrap_or(defaults.separator),
            amd: config.amd,
            node: config.node,
            client: config.client,
            extension: config.extension,
            template_ext: config.template_ext,
            data: config.data.map(Data::Value),
            compiler: config.compiler,
            ..defaults
        }
    }
}

/// A single source or a list of sources.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Sources {
    One(String),
    Many(Vec<String>),
}

impl Sources {
    fn into_vec(self) -> Vec<String> {
        match self {
            Sources::One(src) => vec![src],
            Sources::Many(src) => src,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    name: Option<String>,
    dest: String,
    src: Sources,
}

/// Either a list of `{ dest, src }` records or a `dest: src` mapping.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FilesConfig {
    List(Vec<FileConfig>),
    Map(IndexMap<String, Sources>),
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    options: OptionsConfig,
    files: FilesConfig,
}

/// Fully parsed configuration.
#[derive(Debug)]
pub struct Config {
    pub options: Options,
    pub files: Vec<SourceSpec>,
}

/// Locates the configuration file.
///
/// # Arguments
/// * `path` - A configuration file, or a directory searched for `config_files`
/// * `config_files` - List of configuration files to try
///
/// # Errors
/// * `Error::ConfigError` if no configuration file exists
pub fn find_config<P: AsRef<Path>>(path: P, config_files: &[&str]) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    for file in config_files {
        let config_path = path.join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            return Ok(config_path);
        }
    }

    Err(Error::ConfigError(format!(
        "No configuration file found in '{}' (tried: {})",
        path.display(),
        config_files.join(", ")
    )))
}

/// Reads and parses the configuration at `path`. Relative source and
/// destination paths are resolved against the directory holding the file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(Error::IoError)?;
    parse_config(&content, path.parent().unwrap_or(Path::new("")))
}

/// Prefixes a relative path, or a `!` exclusion of one, with `base`.
///
/// Destinations are string prefixes, so the entry is appended as text and a
/// trailing `/` survives.
fn rebase(base: &Path, entry: &str) -> String {
    if let Some(pattern) = entry.strip_prefix('!') {
        return format!("!{}", rebase(base, pattern));
    }
    if base.as_os_str().is_empty() || base == Path::new(".") || Path::new(entry).is_absolute() {
        return entry.to_string();
    }
    let base = base.to_string_lossy().replace('\\', "/");
    let entry = entry.strip_prefix("./").unwrap_or(entry);
    format!("{}/{}", base.trim_end_matches('/'), entry)
}

fn source_spec(base: &Path, orig: String, dest: &str, src: Sources) -> Result<SourceSpec> {
    let src: Vec<String> = src.into_vec().iter().map(|entry| rebase(base, entry)).collect();
    Ok(SourceSpec::new(orig, rebase(base, dest), expand_sources(&src)?))
}

/// Parses configuration content, JSON first and YAML as a fallback, then
/// resolves relative paths against `base_dir` and expands glob patterns in
/// every source list.
///
/// Groups without a `name` are identified as `files[<index>]`, or by their
/// destination as written when given as a mapping.
pub fn parse_config(content: &str, base_dir: &Path) -> Result<Config> {
    let raw: RawConfig = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {}", e)))?,
    };

    let files = match raw.files {
        FilesConfig::List(files) => files
            .into_iter()
            .enumerate()
            .map(|(index, file)| {
                let orig = file.name.unwrap_or_else(|| format!("files[{}]", index));
                source_spec(base_dir, orig, &file.dest, file.src)
            })
            .collect::<Result<Vec<_>>>()?,
        FilesConfig::Map(files) => files
            .into_iter()
            .map(|(dest, src)| source_spec(base_dir, dest.clone(), &dest, src))
            .collect::<Result<Vec<_>>>()?,
    };

    Ok(Config { options: raw.options.into(), files })
}
