//! Head assignment.
//!
//! Every mention gets exactly one head token before tagging and filtering.
//! [`DependencyHeadFinder`] reads the head off the sentence's basic
//! dependency graph: the head of a span is the token whose governor lies
//! outside it. When the graph gives no answer the finder falls back to a
//! surface rule.

use crate::{Mention, Result, Sentence, Span, Token};

/// Sets the head word of each mention in place.
pub trait HeadFinder: Send + Sync {
    /// Assign heads for every mention of `sentence`.
    fn find_heads(&self, sentence: &Sentence, mentions: &mut [Mention]) -> Result<()>;
}

/// Head finder over the basic dependency graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyHeadFinder;

impl DependencyHeadFinder {
    /// Create a head finder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Sentence position of the head of `span`.
    #[must_use]
    pub fn head_of(&self, sentence: &Sentence, span: Span) -> usize {
        if let Some(graph) = sentence.basic_dependencies() {
            // Leftmost token attached to something outside the span.
            for position in span.range() {
                let Some(governor) = graph.governor_of(position + 1) else {
                    continue;
                };
                if governor == 0 || !span.contains_index(governor - 1) {
                    return position;
                }
            }
        }
        span.start() + surface_head(&sentence.tokens()[span.range()])
    }
}

impl HeadFinder for DependencyHeadFinder {
    fn find_heads(&self, sentence: &Sentence, mentions: &mut [Mention]) -> Result<()> {
        for mention in mentions.iter_mut() {
            let head = self.head_of(sentence, mention.span());
            mention.set_head(head)?;
        }
        Ok(())
    }
}

fn is_nominal(pos: &str) -> bool {
    pos.starts_with("NN") || pos.starts_with("PRP") || matches!(pos, "NR" | "NT" | "PN")
}

fn is_post_modifier_boundary(token: &Token) -> bool {
    matches!(token.pos.as_str(), "IN" | "TO" | "WDT" | "WP" | "WRB" | ",") || token.pos.starts_with("VB")
}

/// Offset of the last nominal before the first post-modifier boundary
/// ("the head [of] the department"), else the last non-clitic token.
fn surface_head(tokens: &[Token]) -> usize {
    let mut last_nominal = None;
    for (i, token) in tokens.iter().enumerate() {
        if last_nominal.is_some() && is_post_modifier_boundary(token) {
            break;
        }
        if is_nominal(&token.pos) {
            last_nominal = Some(i);
        }
    }
    last_nominal.unwrap_or_else(|| {
        tokens
            .iter()
            .rposition(|t| !t.is_possessive_clitic())
            .unwrap_or(tokens.len().saturating_sub(1))
    })
}
