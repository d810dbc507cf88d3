//! Removal events emitted by the filters.
//!
//! Observers see every decision the filter makes without taking part in
//! it. [`LogObserver`] writes one debug record per removal; a
//! `Vec<RemovalEvent>` collects them for later inspection.

use crate::filter::FilterRule;
use crate::{Mention, Span};
use serde::{Deserialize, Serialize};

/// One mention removed by one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalEvent {
    /// Rule that matched.
    pub rule: FilterRule,
    /// Sentence position.
    pub sentence: usize,
    /// Span of the removed mention.
    pub span: Span,
    /// Surface text of the removed mention.
    pub text: String,
    /// For nested removals, the span of the mention that was kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kept: Option<Span>,
}

impl RemovalEvent {
    /// Event for `mention` removed by `rule`.
    #[must_use]
    pub fn new(rule: FilterRule, mention: &Mention) -> Self {
        Self {
            rule,
            sentence: mention.sentence_index(),
            span: mention.span(),
            text: mention.span_text(),
            kept: None,
        }
    }

    /// Record the mention kept in place of this one.
    #[must_use]
    pub fn keeping(mut self, outer: &Mention) -> Self {
        self.kept = Some(outer.span());
        self
    }
}

/// Receives removal events.
pub trait FilterObserver {
    /// Called once per (rule, mention) match.
    fn on_removal(&mut self, event: RemovalEvent);
}

/// Logs each removal at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl FilterObserver for LogObserver {
    fn on_removal(&mut self, event: RemovalEvent) {
        match event.kept {
            Some(kept) => log::debug!(
                "[{}] sentence {} {} \"{}\" (kept {})",
                event.rule,
                event.sentence,
                event.span,
                event.text,
                kept
            ),
            None => log::debug!(
                "[{}] sentence {} {} \"{}\"",
                event.rule,
                event.sentence,
                event.span,
                event.text
            ),
        }
    }
}

impl FilterObserver for Vec<RemovalEvent> {
    fn on_removal(&mut self, event: RemovalEvent) {
        self.push(event);
    }
}
