//! Grouping of fragments per destination and assembly of output files.

use indexmap::IndexMap;

use crate::constants::LINEFEED;
use crate::mode::OutputMode;

/// Fragments keyed by destination, both in discovery order.
///
/// A destination is only present once it has received a fragment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DestinationGroups {
    groups: IndexMap<String, Vec<String>>,
}

impl DestinationGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, dest: impl Into<String>, fragment: String) {
        self.groups.entry(dest.into()).or_default().push(fragment);
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups.iter().map(|(dest, fragments)| (dest.as_str(), fragments.as_slice()))
    }
}

/// Converts every line ending in `text` to the platform line feed.
pub fn normalize_lf(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', LINEFEED)
}

pub struct Assembler<'a> {
    mode: &'a OutputMode,
    separator: String,
}

impl<'a> Assembler<'a> {
    pub fn new(mode: &'a OutputMode, separator: &str) -> Self {
        Self { mode, separator: normalize_lf(separator) }
    }

    /// Builds the text of one output file, or `None` when there is nothing to
    /// write.
    pub fn assemble(&self, fragments: &[String]) -> Option<String> {
        if fragments.is_empty() {
            return None;
        }
        let mut lines = self.mode.prelude();
        lines.extend(fragments.iter().cloned());
        lines.extend(self.mode.postlude());
        Some(lines.join(&self.separator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{AMD_FOOTER, AMD_HEADER};
    use crate::options::{Namespace, Options};

    #[test]
    fn test_groups_keep_insertion_order() {
        let mut groups = DestinationGroups::new();
        groups.push("b.html", "1".to_string());
        groups.push("a.html", "2".to_string());
        groups.push("b.html", "3".to_string());

        let collected: Vec<_> = groups.iter().collect();
        assert_eq!(
            collected,
            vec![
                ("b.html", &["1".to_string(), "3".to_string()][..]),
                ("a.html", &["2".to_string()][..]),
            ]
        );
    }

    #[test]
    fn test_normalize_lf() {
        assert_eq!(normalize_lf("a\r\nb\nc"), format!("a{LINEFEED}b{LINEFEED}c"));
    }

    #[test]
    fn test_empty_fragments_are_not_assembled() {
        let mode = OutputMode::from_options(&Options::default());
        assert_eq!(Assembler::new(&mode, "\n").assemble(&[]), None);
    }

    #[test]
    fn test_plain_concatenation() {
        let mode = OutputMode::from_options(&Options::default());
        let text = Assembler::new(&mode, "|").assemble(&["a".to_string(), "b".to_string()]);
        assert_eq!(text.as_deref(), Some("a|b"));
    }

    #[test]
    fn test_amd_without_namespace() {
        let options = Options { client: true, amd: true, namespace: Namespace::Disabled, ..Options::default() };
        let mode = OutputMode::from_options(&options);
        let text = Assembler::new(&mode, "\n").assemble(&["return fn".to_string()]).unwrap();
        assert_eq!(text, [AMD_HEADER, "return fn", AMD_FOOTER].join(LINEFEED));
    }
}
