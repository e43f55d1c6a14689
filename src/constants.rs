//! Common constants used throughout jstpack.

/// Supported configuration file names
pub const CONFIG_FILES: [&str; 3] = ["jstpack.json", "jstpack.yml", "jstpack.yaml"];

/// Namespace object used when none is configured
pub const DEFAULT_NAMESPACE: &str = "JST";

/// Output extension substituted for directory-discovered templates
pub const DEFAULT_EXTENSION: &str = "html";

/// Marker identifying template files inside source directories
pub const DEFAULT_TEMPLATE_EXT: &str = ".jade";

/// Platform line ending used when normalizing separators
#[cfg(windows)]
pub const LINEFEED: &str = "\r\n";
#[cfg(not(windows))]
pub const LINEFEED: &str = "\n";

/// Header of the module-loader wrapper
pub const AMD_HEADER: &str =
    "define(['jade'], function(jade) { if(jade && jade['runtime'] !== undefined) { jade = jade.runtime; }";

/// Footer of the module-loader wrapper
pub const AMD_FOOTER: &str = "});";

/// Loads the template runtime when bundles are required from node
pub const RUNTIME_SHIM: &str = "var jade = jade || require('jade').runtime;";
