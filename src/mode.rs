//! Output mode selection.
//!
//! The option flags are folded into one [`OutputMode`] per run; both the
//! per-template fragment shaping and the per-file wrapping read from it.

use crate::constants::{AMD_FOOTER, AMD_HEADER, RUNTIME_SHIM};
use crate::namespace::NamespaceDecl;
use crate::options::Options;

/// How a single compiled template is turned into a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentStyle {
    /// Rendered text
    Rendered,
    /// Bare function source
    Source,
    /// Function source returned from the AMD factory
    Returned,
    /// Function source assigned into the namespace object
    Assigned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputMode {
    pub style: FragmentStyle,
    pub namespace: Option<NamespaceDecl>,
    pub amd: bool,
    /// Export the namespace to node's `module.exports`
    pub export: bool,
}

impl OutputMode {
    pub fn from_options(options: &Options) -> Self {
        let namespace = options.namespace.name().map(NamespaceDecl::parse);
        let style = match (options.client, namespace.is_some(), options.amd) {
            (false, _, _) => FragmentStyle::Rendered,
            (true, true, _) => FragmentStyle::Assigned,
            (true, false, true) => FragmentStyle::Returned,
            (true, false, false) => FragmentStyle::Source,
        };
        let export = style == FragmentStyle::Assigned && options.node;
        Self { style, namespace, amd: options.amd, export }
    }

    /// Shapes one compiled template. `key` is the processed template name.
    pub fn fragment(&self, key: &str, compiled: String) -> String {
        match (self.style, &self.namespace) {
            (FragmentStyle::Returned, _) => format!("return {compiled}"),
            (FragmentStyle::Assigned, Some(ns)) => ns.assign(key, &compiled),
            _ => compiled,
        }
    }

    /// Lines emitted before the fragments of every output file.
    pub fn prelude(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.amd {
            lines.push(AMD_HEADER.to_string());
        }
        if let (FragmentStyle::Assigned, Some(ns)) = (self.style, &self.namespace) {
            if self.export {
                lines.push(RUNTIME_SHIM.to_string());
            }
            lines.push(ns.declaration());
        }
        lines
    }

    /// Lines emitted after the fragments of every output file.
    pub fn postlude(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let (true, Some(ns)) = (self.export, &self.namespace) {
            lines.push(format!(
                "if (typeof exports === 'object' && exports) {{module.exports = {};}}",
                ns.target()
            ));
        }
        if self.amd {
            // Namespaced AMD modules resolve to the namespace object, even when
            // the templates were rendered rather than emitted as functions.
            if let Some(ns) = &self.namespace {
                lines.push(format!("return {};", ns.target()));
            }
            lines.push(AMD_FOOTER.to_string());
        }
        lines
    }
}
