//! Mention detection configuration.
//!
//! ```toml
//! language = "en"
//! liberal = false
//! remove_nested_mentions = true
//! mention_label_pattern = "^(?:NP|PN|PRP)"
//! ```

use crate::{Error, Language, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Constituent labels that denote mention candidates by default:
/// noun phrases, Chinese proper nouns and pronouns.
pub const DEFAULT_MENTION_LABEL_PATTERN: &str = "^(?:NP|PN|PRP)";

/// Settings that select extractors and the filter variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MentionConfig {
    /// Document language.
    pub language: Language,
    /// Liberal mention detection: more extractors, lighter filtering.
    pub liberal: bool,
    /// Resolve nested mentions sharing a head (Chinese strict mode only;
    /// English strict mode always resolves them).
    pub remove_nested_mentions: bool,
    /// Regex over constituent labels for the default matcher.
    pub mention_label_pattern: String,
}

impl Default for MentionConfig {
    fn default() -> Self {
        Self {
            language: Language::English,
            liberal: false,
            remove_nested_mentions: true,
            mention_label_pattern: DEFAULT_MENTION_LABEL_PATTERN.to_string(),
        }
    }
}

impl MentionConfig {
    /// Config for a language with every other setting at its default.
    #[must_use]
    pub fn for_language(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    /// Enable or disable liberal mode.
    #[must_use]
    pub fn with_liberal(mut self, liberal: bool) -> Self {
        self.liberal = liberal;
        self
    }

    /// Enable or disable nested-mention resolution.
    #[must_use]
    pub fn with_remove_nested_mentions(mut self, remove: bool) -> Self {
        self.remove_nested_mentions = remove;
        self
    }

    /// Parse from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        Ok(config)
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("cannot read config {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::config(e.to_string()))
    }
}
