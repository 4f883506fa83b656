//! Lexical comment removal.
//!
//! Each extension token maps to one regular expression describing the
//! language's comment syntax. Matches are deleted without any awareness of
//! string literals, so `"http://example.com"` in a `.js` file loses its tail.
//! That is the accepted behavior of this stripper.

use crate::config::ConfigError;
use regex::Regex;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Pattern table shipped with the binary.
pub const BUILTIN_PATTERNS: &str = include_str!("../../patterns/comment_patterns.yaml");

/// Extension token to compiled comment pattern.
#[derive(Debug, Clone)]
pub struct CommentPatternTable {
    patterns: HashMap<String, Regex>,
}

impl CommentPatternTable {
    /// Table compiled from [`BUILTIN_PATTERNS`].
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_yaml_str(BUILTIN_PATTERNS, "<builtin>")
    }

    /// Load a replacement table from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml_str(&content, &path.display().to_string())
    }

    /// Parse a YAML mapping of extension token to pattern. `origin` names the
    /// source in error messages.
    pub fn from_yaml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, String> =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseYaml {
                path: origin.to_string(),
                source: e,
            })?;
        Self::from_map(raw)
    }

    /// Compile a table from raw pattern strings.
    pub fn from_map<I>(raw: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut patterns = HashMap::new();
        for (token, pattern) in raw {
            let regex = Regex::new(&pattern).map_err(|e| ConfigError::InvalidPattern {
                token: token.clone(),
                source: e,
            })?;
            patterns.insert(token, regex);
        }
        Ok(Self { patterns })
    }

    pub fn get(&self, token: &str) -> Option<&Regex> {
        self.patterns.get(token)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Remove every comment match from `content`.
    ///
    /// Content with an unknown token is returned untouched.
    pub fn strip_comments<'a>(&self, content: &'a str, token: &str) -> Cow<'a, str> {
        match self.patterns.get(token) {
            Some(regex) => regex.replace_all(content, ""),
            None => Cow::Borrowed(content),
        }
    }
}
