//! Extension policy: which files are never harvested.
//!
//! The taxonomy maps category names to extension tokens. A run resolves the
//! caller's selected categories plus any ad-hoc tokens into one
//! [`ExclusionSet`] that stays fixed for the whole walk.

mod groups;

pub use groups::{EXTENSION_GROUPS, ExtensionGroup};

use clap::ValueEnum;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

/// Built-in extension categories, as a closed set for the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum Category {
    Media,
    Office,
    System,
    Executables,
    Archive,
    Audio,
    Video,
    Database,
    Font,
    Temporary,
    CompiledCode,
    Certificate,
    Configuration,
    VirtualEnv,
    NodeModules,
    PythonBytecode,
    PackageLocks,
    LogFiles,
    CacheFiles,
}

impl Category {
    pub const ALL: [Category; 19] = [
        Category::Media,
        Category::Office,
        Category::System,
        Category::Executables,
        Category::Archive,
        Category::Audio,
        Category::Video,
        Category::Database,
        Category::Font,
        Category::Temporary,
        Category::CompiledCode,
        Category::Certificate,
        Category::Configuration,
        Category::VirtualEnv,
        Category::NodeModules,
        Category::PythonBytecode,
        Category::PackageLocks,
        Category::LogFiles,
        Category::CacheFiles,
    ];

    /// Name of the matching group in [`EXTENSION_GROUPS`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Media => "media",
            Category::Office => "office",
            Category::System => "system",
            Category::Executables => "executables",
            Category::Archive => "archive",
            Category::Audio => "audio",
            Category::Video => "video",
            Category::Database => "database",
            Category::Font => "font",
            Category::Temporary => "temporary",
            Category::CompiledCode => "compiled-code",
            Category::Certificate => "certificate",
            Category::Configuration => "configuration",
            Category::VirtualEnv => "virtual-env",
            Category::NodeModules => "node-modules",
            Category::PythonBytecode => "python-bytecode",
            Category::PackageLocks => "package-locks",
            Category::LogFiles => "log-files",
            Category::CacheFiles => "cache-files",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extension tokens excluded for one harvesting run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    tokens: HashSet<String>,
}

impl ExclusionSet {
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Category name to extension tokens. Immutable once built.
#[derive(Debug, Clone)]
pub struct ExtensionTaxonomy {
    groups: BTreeMap<String, BTreeSet<String>>,
}

impl Default for ExtensionTaxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ExtensionTaxonomy {
    /// Taxonomy made of [`EXTENSION_GROUPS`].
    pub fn builtin() -> Self {
        let groups = EXTENSION_GROUPS
            .iter()
            .map(|g| {
                (
                    g.name.to_string(),
                    g.tokens.iter().map(|t| t.to_string()).collect(),
                )
            })
            .collect();
        Self { groups }
    }

    /// Add tokens to a category, creating it if it does not exist.
    pub fn with_group<I, S>(mut self, name: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups
            .entry(name.into())
            .or_default()
            .extend(tokens.into_iter().map(Into::into));
        self
    }

    pub fn group(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.groups.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Union of the tokens of every selected category plus the ad-hoc tokens.
    ///
    /// Unknown category names contribute nothing. Ad-hoc tokens are taken
    /// verbatim, so `""` matches names with a trailing dot such as `notes.`.
    pub fn resolve_exclusions<C, A>(&self, selected: C, ad_hoc: A) -> ExclusionSet
    where
        C: IntoIterator,
        C::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        let mut tokens = HashSet::new();
        for name in selected {
            if let Some(group) = self.groups.get(name.as_ref()) {
                tokens.extend(group.iter().cloned());
            }
        }
        tokens.extend(ad_hoc.into_iter().map(|t| t.as_ref().to_string()));
        ExclusionSet { tokens }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_every_category_has_a_builtin_group() {
        let taxonomy = ExtensionTaxonomy::builtin();
        for category in Category::ALL {
            assert!(
                taxonomy.group(category.as_str()).is_some(),
                "missing group for {}",
                category
            );
        }
        assert_eq!(taxonomy.names().count(), Category::ALL.len());
    }

    #[test]
    fn test_category_names_match_value_enum() {
        for category in Category::ALL {
            let value = category.to_possible_value().unwrap();
            assert_eq!(value.get_name(), category.as_str());
        }
    }

    #[test]
    fn test_resolve_nothing_selected() {
        let taxonomy = ExtensionTaxonomy::builtin();
        assert!(taxonomy.resolve_exclusions(NONE, NONE).is_empty());
    }

    #[test]
    fn test_resolve_single_category() {
        let taxonomy = ExtensionTaxonomy::builtin();
        let set = taxonomy.resolve_exclusions(["media"], NONE);
        assert!(set.contains("png"));
        assert!(set.contains("svg"));
        assert!(!set.contains("py"));
        assert_eq!(set.len(), taxonomy.group("media").unwrap().len());
    }

    #[test]
    fn test_resolve_unions_categories_and_ad_hoc() {
        let taxonomy = ExtensionTaxonomy::builtin();
        let set = taxonomy.resolve_exclusions(["media", "audio"], ["md", "Makefile"]);
        assert!(set.contains("png"));
        assert!(set.contains("mp3"));
        assert!(set.contains("md"));
        assert!(set.contains("Makefile"));
    }

    #[test]
    fn test_resolve_ignores_unknown_names() {
        let taxonomy = ExtensionTaxonomy::builtin();
        let set = taxonomy.resolve_exclusions(["no-such-group"], NONE);
        assert!(set.is_empty());
    }

    #[test]
    fn test_resolve_keeps_ad_hoc_tokens_verbatim() {
        let taxonomy = ExtensionTaxonomy::builtin();
        let set = taxonomy.resolve_exclusions(NONE, ["", "bin"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("bin"));
        assert!(set.contains(""));
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        let taxonomy = ExtensionTaxonomy::builtin();
        let set = taxonomy.resolve_exclusions(["media"], NONE);
        assert!(!set.contains("PNG"));
    }

    #[test]
    fn test_with_group_extends_taxonomy() {
        let taxonomy = ExtensionTaxonomy::builtin()
            .with_group("notebooks", ["ipynb"])
            .with_group("media", ["avif"]);
        let set = taxonomy.resolve_exclusions(["notebooks", "media"], NONE);
        assert!(set.contains("ipynb"));
        assert!(set.contains("avif"));
        assert!(set.contains("png"));
    }
}
