//! Namespace object declarations for client bundles.

/// A parsed dotted namespace such as `app.templates`.
///
/// Each segment becomes a property of `this`; a leading or embedded `this`
/// segment is skipped, and the bare namespace `this` targets `this` itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDecl {
    parts: Vec<String>,
}

impl NamespaceDecl {
    pub fn parse(namespace: &str) -> Self {
        let parts = if namespace == "this" {
            Vec::new()
        } else {
            namespace
                .split('.')
                .filter(|part| *part != "this")
                .map(str::to_string)
                .collect()
        };
        Self { parts }
    }

    /// Property access expressions for every level, outermost first.
    fn levels(&self) -> Vec<String> {
        let mut current = String::from("this");
        let mut levels = Vec::with_capacity(self.parts.len());
        for part in &self.parts {
            current.push('[');
            current.push_str(&quote(part));
            current.push(']');
            levels.push(current.clone());
        }
        levels
    }

    /// Expression that evaluates to the namespace object.
    pub fn target(&self) -> String {
        self.levels().pop().unwrap_or_else(|| "this".to_string())
    }

    /// Statements creating every missing level of the namespace.
    pub fn declaration(&self) -> String {
        self.levels()
            .iter()
            .map(|level| format!("{level} = {level} || {{}};"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Assignment of a compiled template into the namespace under `key`.
    pub fn assign(&self, key: &str, fragment: &str) -> String {
        format!("{}[{}] = {};", self.target(), quote(key), fragment)
    }
}

fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
