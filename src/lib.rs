//! jstpack compiles template files into bundles.
//! Sources are resolved into individual templates, compiled, grouped by
//! destination and wrapped as plain text, a namespace object, an AMD module
//! or a node export.

/// Compilation of a single template into an output fragment
pub mod adapter;

/// Grouping of fragments and assembly of output files
pub mod assembler;

/// Command-line interface module for the jstpack binary
pub mod cli;

/// Configuration handling
/// Supports JSON and YAML formats (jstpack.json, jstpack.yml, jstpack.yaml)
pub mod config;

pub mod constants;

/// Error types and handling
pub mod error;

/// File system abstraction with disk and in-memory implementations
pub mod fs;

pub mod logger;

/// Output mode derived from the option flags
pub mod mode;

pub mod namespace;

pub mod options;

/// Core template processing orchestration
/// Combines all components to generate the final output
pub mod processor;

/// Template compiler interface and the MiniJinja compiler
pub mod renderer;

/// Resolution of source entries into templates and destinations
pub mod resolver;

/// Glob expansion of configured source lists
pub mod sources;
