//! Constituent matching.
//!
//! The syntactic extractor asks a [`ConstituentMatcher`] for the
//! constituents that denote mentions. The default [`LabelPatternMatcher`]
//! selects every non-leaf node whose label matches a regular expression;
//! richer grammars plug in behind the same trait.

use crate::config::DEFAULT_MENTION_LABEL_PATTERN;
use crate::{NodeId, ParseTree, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static DEFAULT_LABELS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(DEFAULT_MENTION_LABEL_PATTERN).expect("default label pattern is valid")
});

/// Finds mention constituents in a parse tree.
pub trait ConstituentMatcher: Send + Sync {
    /// Matching constituents in pre-order.
    fn match_constituents(&self, tree: &ParseTree) -> Vec<NodeId>;
}

/// Matches constituents by label.
#[derive(Debug, Clone)]
pub struct LabelPatternMatcher {
    labels: Regex,
}

impl Default for LabelPatternMatcher {
    fn default() -> Self {
        Self {
            labels: DEFAULT_LABELS.clone(),
        }
    }
}

impl LabelPatternMatcher {
    /// Compile a matcher; a bad pattern is a configuration error.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            labels: Regex::new(pattern)?,
        })
    }

    /// The label pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.labels.as_str()
    }
}

impl ConstituentMatcher for LabelPatternMatcher {
    fn match_constituents(&self, tree: &ParseTree) -> Vec<NodeId> {
        tree.preorder()
            .filter(|&id| !tree.is_leaf(id) && self.labels.is_match(tree.label(id)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const TREE: &str =
        "(ROOT (S (NP (NP (PRP$ His) (NN dog)) (PP (IN in) (NP (NNP Paris)))) (VP (VBD barked))))";

    #[test]
    fn test_default_matches_np_and_pronouns_in_preorder() {
        let tree = ParseTree::parse(TREE).unwrap();
        let matched = LabelPatternMatcher::default().match_constituents(&tree);
        let labels: Vec<&str> = matched.iter().map(|&id| tree.label(id)).collect();
        assert_eq!(labels, vec!["NP", "NP", "PRP$", "NP"]);
        let spans: Vec<_> = matched.iter().filter_map(|&id| tree.leaf_span(id)).collect();
        assert_eq!(spans[0].range(), 0..4);
        assert_eq!(spans[3].range(), 3..4);
    }

    #[test]
    fn test_leaves_never_match() {
        // A word that happens to look like a label.
        let tree = ParseTree::parse("(ROOT (NP (NN NP)))").unwrap();
        let matched = LabelPatternMatcher::default().match_constituents(&tree);
        assert_eq!(matched.len(), 1);
        assert_eq!(tree.label(matched[0]), "NP");
    }

    #[test]
    fn test_bad_pattern_is_config_error() {
        assert!(matches!(LabelPatternMatcher::new("(NP"), Err(Error::Config(_))));
        assert_eq!(LabelPatternMatcher::new("^NP").unwrap().pattern(), "^NP");
    }
}
