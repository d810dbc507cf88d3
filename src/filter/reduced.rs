//! The reduced filter used for Chinese.

use super::FilterRule;
use crate::observe::{FilterObserver, RemovalEvent};
use crate::Mention;

/// Full-width `quot`, left behind when upstream normalization mangles `&quot;`.
pub const PLACEHOLDER_QUOTE: &str = "ｑｕｏｔ";

/// Mark single cardinal numbers and mentions containing [`PLACEHOLDER_QUOTE`].
pub fn reduced_removals(mentions: &[Mention], observer: &mut dyn FilterObserver) -> Vec<bool> {
    mentions
        .iter()
        .map(|mention| {
            let mut removed = false;
            if mention.len() == 1 && mention.head_pos() == Some("CD") {
                observer.on_removal(RemovalEvent::new(FilterRule::CardinalNumber, mention));
                removed = true;
            }
            if mention.span_text().contains(PLACEHOLDER_QUOTE) {
                observer.on_removal(RemovalEvent::new(FilterRule::PlaceholderQuote, mention));
                removed = true;
            }
            removed
        })
        .collect()
}
