//! Options shared by every destination group of a run.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::constants::{DEFAULT_EXTENSION, DEFAULT_NAMESPACE, DEFAULT_TEMPLATE_EXT, LINEFEED};

/// Where compiled templates are collected in client mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Namespace {
    /// Dotted path of the namespace object, e.g. `JST` or `app.templates`
    Named(String),
    /// Templates are emitted bare
    Disabled,
}

impl Namespace {
    pub fn name(&self) -> Option<&str> {
        match self {
            Namespace::Named(name) => Some(name),
            Namespace::Disabled => None,
        }
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Namespace::Named(DEFAULT_NAMESPACE.to_string())
    }
}

/// Accepts either a non-empty namespace string or a boolean; `false` disables
/// namespacing and `true` selects the default namespace.
impl<'de> Deserialize<'de> for Namespace {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Name(String),
            Flag(bool),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Name(name) if name.is_empty() => {
                return Err(serde::de::Error::custom("namespace must not be empty"))
            }
            Repr::Name(name) => Namespace::Named(name),
            Repr::Flag(true) => Namespace::default(),
            Repr::Flag(false) => Namespace::Disabled,
        })
    }
}

/// Arguments handed to a data callback for every template it renders.
#[derive(Debug, Clone, Copy)]
pub struct DataContext<'a> {
    /// Identifier of the destination group
    pub orig: &'a str,
    /// Destination key the rendered template is written to
    pub dest: &'a str,
    /// Source entries declared by the group
    pub src: &'a [String],
}

pub type DataFn = Arc<dyn Fn(&DataContext<'_>) -> Value>;
pub type TextHook = Arc<dyn Fn(&str) -> String>;

/// Render data: a fixed value or a callback evaluated per template.
#[derive(Clone)]
pub enum Data {
    Value(Value),
    Fn(DataFn),
}

impl Data {
    pub fn resolve(&self, ctx: &DataContext<'_>) -> Value {
        match self {
            Data::Value(value) => value.clone(),
            Data::Fn(callback) => callback(ctx),
        }
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Data::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Data::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

/// Run-wide options. Never mutated while a run is in progress; per-file
/// compiler settings are passed separately as [`crate::renderer::CompileOptions`].
#[derive(Clone)]
pub struct Options {
    pub namespace: Namespace,
    /// Joins the lines of an output file; line endings are normalized on use
    pub separator: String,
    pub amd: bool,
    /// Export the namespace through `module.exports` (client + namespace only)
    pub node: bool,
    /// Emit template function source instead of rendered text
    pub client: bool,
    /// Extension given to files discovered in source directories
    pub extension: String,
    /// Substring a file name must contain to be picked up from a directory
    pub template_ext: String,
    pub data: Option<Data>,
    pub process_content: Option<TextHook>,
    pub process_name: Option<TextHook>,
    /// Passed through to the template compiler untouched
    pub compiler: Map<String, Value>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            namespace: Namespace::default(),
            separator: format!("{LINEFEED}{LINEFEED}"),
            amd: false,
            node: false,
            client: false,
            extension: DEFAULT_EXTENSION.to_string(),
            template_ext: DEFAULT_TEMPLATE_EXT.to_string(),
            data: None,
            process_content: None,
            process_name: None,
            compiler: Map::new(),
        }
    }
}

impl Options {
    /// Applies the content hook, identity by default.
    pub fn process_content(&self, content: &str) -> String {
        match &self.process_content {
            Some(hook) => hook(content),
            None => content.to_string(),
        }
    }

    /// Applies the name hook. By default the first occurrence of the template
    /// marker is removed from the path.
    pub fn process_name(&self, path: &str) -> String {
        match &self.process_name {
            Some(hook) => hook(path),
            None => path.replacen(&self.template_ext, "", 1),
        }
    }

    pub fn with_data_fn<F>(mut self, callback: F) -> Self
    where
        F: Fn(&DataContext<'_>) -> Value + 'static,
    {
        self.data = Some(Data::Fn(Arc::new(callback)));
        self
    }

    pub fn with_process_content<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str) -> String + 'static,
    {
        self.process_content = Some(Arc::new(hook));
        self
    }

    pub fn with_process_name<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str) -> String + 'static,
    {
        self.process_name = Some(Arc::new(hook));
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("namespace", &self.namespace)
            .field("separator", &self.separator)
            .field("amd", &self.amd)
            .field("node", &self.node)
            .field("client", &self.client)
            .field("extension", &self.extension)
            .field("template_ext", &self.template_ext)
            .field("data", &self.data)
            .field("process_content", &self.process_content.is_some())
            .field("process_name", &self.process_name.is_some())
            .field("compiler", &self.compiler)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_namespace_from_string_or_bool() {
        let ns: Namespace = serde_json::from_value(json!("app.templates")).unwrap();
        assert_eq!(ns, Namespace::Named("app.templates".to_string()));

        let ns: Namespace = serde_json::from_value(json!(false)).unwrap();
        assert_eq!(ns, Namespace::Disabled);

        let ns: Namespace = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(ns, Namespace::Named("JST".to_string()));

        assert!(serde_json::from_value::<Namespace>(json!("")).is_err());
    }

    #[test]
    fn test_default_process_name_strips_first_marker() {
        let options = Options::default();
        assert_eq!(options.process_name("views/home.jade"), "views/home");
        assert_eq!(options.process_name("a.jade/b.jade"), "a/b.jade");
        assert_eq!(options.process_name("views/home.tmpl"), "views/home.tmpl");
    }

    #[test]
    fn test_hooks_override_defaults() {
        let options = Options::default()
            .with_process_content(|s| s.to_uppercase())
            .with_process_name(|_| "fixed".to_string());
        assert_eq!(options.process_content("abc"), "ABC");
        assert_eq!(options.process_name("views/home.jade"), "fixed");
    }

    #[test]
    fn test_data_callback_sees_context() {
        let options = Options::default().with_data_fn(|ctx| json!({ "dest": ctx.dest, "orig": ctx.orig }));
        let src = vec!["views".to_string()];
        let ctx = DataContext { orig: "bundle", dest: "out/a.html", src: &src };
        let value = options.data.as_ref().unwrap().resolve(&ctx);
        assert_eq!(value, json!({ "dest": "out/a.html", "orig": "bundle" }));
    }
}
