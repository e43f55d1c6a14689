//! Command-line interface implementation for jstpack.
//! Provides argument parsing and help text formatting using clap.

use clap::{builder::NonEmptyStringValueParser, Parser};
use std::path::PathBuf;

use crate::options::{Namespace, Options};

/// Command-line arguments structure for jstpack.
#[derive(Parser, Debug)]
#[command(author, version, about = "jstpack: compile template directories into JavaScript bundles", long_about = None)]
pub struct Args {
    /// Configuration file, or a directory containing jstpack.json / jstpack.yml / jstpack.yaml
    #[arg(value_name = "CONFIG", default_value = ".")]
    pub config: PathBuf,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit template functions instead of rendered output
    #[arg(long)]
    pub client: bool,

    /// Wrap every output file in an AMD define()
    #[arg(long)]
    pub amd: bool,

    /// Export the namespace object through module.exports
    #[arg(long)]
    pub node: bool,

    /// Emit templates without a namespace object
    #[arg(long, conflicts_with = "namespace")]
    pub no_namespace: bool,

    /// Namespace object the templates are assigned to
    #[arg(long, value_name = "NAME", value_parser = NonEmptyStringValueParser::new())]
    pub namespace: Option<String>,

    /// Extension given to files compiled from source directories
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,
}

impl Args {
    /// Applies command-line overrides on top of the configured options.
    /// Boolean flags can only switch a mode on.
    pub fn apply(&self, mut options: Options) -> Options {
        options.client |= self.client;
        options.amd |= self.amd;
        options.node |= self.node;
        if self.no_namespace {
            options.namespace = Namespace::Disabled;
        } else if let Some(namespace) = &self.namespace {
            options.namespace = Namespace::Named(namespace.clone());
        }
        if let Some(extension) = &self.extension {
            options.extension = extension.clone();
        }
        options
    }
}

/// Parses command line arguments and returns the Args structure.
/// Exits through clap's error handling on invalid arguments.
pub fn get_args() -> Args {
    Args::parse()
}
