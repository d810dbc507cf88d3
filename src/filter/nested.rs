//! Nested-mention resolution.
//!
//! Two surviving mentions with the same head token, one strictly inside the
//! other, are usually one referent parsed twice ("[the [president]]"): the
//! inner one goes. Apposition and enumeration are the exception: when the
//! inner mention is followed by a comma or a conjunction ("[[Paris], the
//! capital]"), both stay.

use super::FilterRule;
use crate::observe::{FilterObserver, RemovalEvent};
use crate::{Mention, Token};

/// Chinese commas are tagged `PU` rather than `,`.
const COMMA_WORDS: &[&str] = &[",", "，", "、"];

fn separates(token: &Token) -> bool {
    match token.pos.as_str() {
        "," | "CC" => true,
        "PU" => COMMA_WORDS.contains(&token.word.as_str()),
        _ => false,
    }
}

/// Mark inner mentions of same-head pairs in `remove`.
///
/// Pairs where either side is already marked are skipped, so marks made
/// earlier in the pass shield their own nested mentions.
pub fn resolve_nested(
    mentions: &[Mention],
    tokens: &[Token],
    remove: &mut [bool],
    observer: &mut dyn FilterObserver,
) {
    for (i, outer) in mentions.iter().enumerate() {
        for (j, inner) in mentions.iter().enumerate() {
            if i == j || remove[i] || remove[j] {
                continue;
            }
            if !outer.shares_head_with(inner) || !inner.span().is_strictly_within(&outer.span()) {
                continue;
            }
            if tokens.get(inner.end()).map_or(false, separates) {
                continue;
            }
            remove[j] = true;
            observer.on_removal(RemovalEvent::new(FilterRule::Nested, inner).keeping(outer));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corefmd_core::token::tokens_from_tags;
    use corefmd_core::{Sentence, Span};

    fn mentions(s: &Sentence, spans: &[(usize, usize, usize)]) -> Vec<Mention> {
        spans
            .iter()
            .map(|&(start, end, head)| {
                let mut m = Mention::new(s, Span::new(start, end).unwrap()).unwrap();
                m.set_head(head).unwrap();
                m
            })
            .collect()
    }

    #[test]
    fn test_inner_removed_and_event_recorded() {
        let s = Sentence::new(
            0,
            tokens_from_tags(
                &["the", "president", "spoke"],
                &["DT", "NN", "VBD"],
                &["O", "O", "O"],
            ),
        );
        let list = mentions(&s, &[(0, 2, 1), (1, 2, 1)]);
        let mut remove = vec![false; 2];
        let mut events = Vec::new();
        resolve_nested(&list, s.tokens(), &mut remove, &mut events);
        assert_eq!(remove, vec![false, true]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].rule, FilterRule::Nested);
        assert_eq!(events[0].kept, Span::new(0, 2));
    }

    #[test]
    fn test_apposition_keeps_both() {
        let s = Sentence::new(
            0,
            tokens_from_tags(
                &["Paris", ",", "the", "capital"],
                &["NNP", ",", "DT", "NN"],
                &["CITY", "O", "O", "O"],
            ),
        );
        let list = mentions(&s, &[(0, 4, 0), (0, 1, 0)]);
        let mut remove = vec![false; 2];
        resolve_nested(&list, s.tokens(), &mut remove, &mut Vec::new());
        assert_eq!(remove, vec![false, false]);
    }

    #[test]
    fn test_chinese_comma_separates() {
        let s = Sentence::new(
            0,
            tokens_from_tags(&["北京", "，", "首都"], &["NR", "PU", "NN"], &["GPE", "O", "O"]),
        );
        let list = mentions(&s, &[(0, 3, 0), (0, 1, 0)]);
        let mut remove = vec![false; 2];
        resolve_nested(&list, s.tokens(), &mut remove, &mut Vec::new());
        assert_eq!(remove, vec![false, false]);
    }

    #[test]
    fn test_different_heads_untouched() {
        let s = Sentence::new(
            0,
            tokens_from_tags(&["his", "dog"], &["PRP$", "NN"], &["O", "O"]),
        );
        let list = mentions(&s, &[(0, 2, 1), (0, 1, 0)]);
        let mut remove = vec![false; 2];
        resolve_nested(&list, s.tokens(), &mut remove, &mut Vec::new());
        assert_eq!(remove, vec![false, false]);
    }

    #[test]
    fn test_marked_outer_shields_inner() {
        let s = Sentence::new(
            0,
            tokens_from_tags(&["the", "president"], &["DT", "NN"], &["O", "O"]),
        );
        let list = mentions(&s, &[(0, 2, 1), (1, 2, 1)]);
        let mut remove = vec![true, false];
        resolve_nested(&list, s.tokens(), &mut remove, &mut Vec::new());
        assert_eq!(remove, vec![true, false]);
    }
}
