//! Bare-plural tagging.

use crate::Mention;

/// Mark single-token mentions headed by a plural common noun as generic.
///
/// Heads must already be assigned. Nothing is removed.
pub fn tag_bare_plurals(mentions: &mut [Mention]) {
    for mention in mentions.iter_mut() {
        if mention.len() == 1 && mention.head_pos() == Some("NNS") {
            mention.mark_generic();
        }
    }
}
