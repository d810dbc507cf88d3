//! Pleonastic "it" detection.
//!
//! Non-referential "it" appears in extraposition: the real subject is a
//! clause pushed to the end of the sentence.
//!
//! ```text
//! It is clear that he left.      (copula + ADJP + clause)
//! It was said that he left.      (copula + VBN + clause)
//! It is a pity that he left.     (copula + NP + clause)
//! It seems that he left.         (raising verb + clause)
//! It turned out that he left.    (turn + particle + clause)
//! It may be true that he left.   (modal + be/become + the copula cases)
//! ```

use crate::{Mention, NodeId, ParseTree};

/// Decides whether a mention is a non-referential "it".
pub trait PleonasticDetector: Send + Sync {
    /// True when `mention` is pleonastic in `tree`.
    fn is_pleonastic(&self, mention: &Mention, tree: &ParseTree) -> bool;
}

const COPULAS: &[&str] = &["is", "was", "be", "becomes", "become", "became"];
/// Copulas accepted after a modal ("it may be clear that ...").
const MODAL_COPULAS: &[&str] = &["be", "become"];
const RAISING_VERBS: &[&str] = &["seems", "appears", "means", "follows"];
const TURN_VERBS: &[&str] = &["turns", "turned"];

/// Tree-based extraposition detector.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtrapositionDetector;

impl ExtrapositionDetector {
    /// Create a detector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PleonasticDetector for ExtrapositionDetector {
    fn is_pleonastic(&self, mention: &Mention, tree: &ParseTree) -> bool {
        if mention.len() != 1 || !mention.span_text().eq_ignore_ascii_case("it") {
            return false;
        }
        let Some(pronoun) = tree.preterminal_of_leaf(mention.start() + 1) else {
            return false;
        };
        if tree.base_label(pronoun) != "PRP" {
            return false;
        }
        let Some(subject) = tree.parent(pronoun).filter(|&np| tree.base_label(np) == "NP") else {
            return false;
        };
        tree.right_siblings(subject)
            .iter()
            .any(|&vp| tree.base_label(vp) == "VP" && extraposing_vp(tree, vp))
    }
}

fn is_clause(tree: &ParseTree, id: NodeId) -> bool {
    matches!(tree.base_label(id), "S" | "SBAR")
}

/// Lowercased word under a verb preterminal.
fn verb_word(tree: &ParseTree, id: NodeId) -> Option<String> {
    if !tree.base_label(id).starts_with('V') {
        return None;
    }
    tree.word_of(id).map(str::to_lowercase)
}

/// A clause somewhere among `nodes`.
fn has_clause(tree: &ParseTree, nodes: &[NodeId]) -> bool {
    nodes.iter().any(|&n| is_clause(tree, n))
}

/// `VP < (VERB $.. complement)` for each verb child of `vp` in `verbs`.
fn verb_then(
    tree: &ParseTree,
    vp: NodeId,
    verbs: &[&str],
    complement: impl Fn(&[NodeId]) -> bool,
) -> bool {
    let children = tree.children(vp);
    children.iter().enumerate().any(|(k, &c)| {
        verb_word(tree, c).map_or(false, |w| verbs.contains(&w.as_str()))
            && complement(&children[k + 1..])
    })
}

/// What may follow a copula: `VP < (VBN $.. S|SBAR)`, `ADJP $.. S|SBAR`,
/// `ADJP < S|SBAR`, or `NP < /^NN/ $.. S|SBAR`.
fn copula_complement(tree: &ParseTree, after: &[NodeId]) -> bool {
    after.iter().enumerate().any(|(j, &c)| {
        let rest = &after[j + 1..];
        match tree.base_label(c) {
            "VP" => passive_with_clause(tree, c),
            "ADJP" => has_clause(tree, tree.children(c)) || has_clause(tree, rest),
            "NP" => {
                tree.children(c)
                    .iter()
                    .any(|&n| tree.label(n).starts_with("NN"))
                    && has_clause(tree, rest)
            }
            _ => false,
        }
    })
}

fn extraposing_vp(tree: &ParseTree, vp: NodeId) -> bool {
    if verb_then(tree, vp, COPULAS, |after| copula_complement(tree, after)) {
        return true;
    }
    if verb_then(tree, vp, RAISING_VERBS, |after| has_clause(tree, after)) {
        return true;
    }
    let turned = verb_then(tree, vp, TURN_VERBS, |after| {
        after
            .iter()
            .position(|&c| tree.base_label(c) == "PRT")
            .map_or(false, |j| has_clause(tree, &after[j + 1..]))
    });
    if turned {
        return true;
    }
    // `MD $ (VP < (be|become $.. complement))`, one level only.
    let children = tree.children(vp);
    children.iter().any(|&c| tree.base_label(c) == "MD")
        && children.iter().any(|&c| {
            tree.base_label(c) == "VP"
                && verb_then(tree, c, MODAL_COPULAS, |after| copula_complement(tree, after))
        })
}

/// `VP < (VBN $.. S|SBAR)`
fn passive_with_clause(tree: &ParseTree, vp: NodeId) -> bool {
    let children = tree.children(vp);
    children
        .iter()
        .position(|&c| tree.base_label(c) == "VBN")
        .map_or(false, |j| has_clause(tree, &children[j + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use corefmd_core::{Sentence, Span, Token};

    fn check(parse: &str) -> bool {
        let tree = ParseTree::parse(parse).unwrap();
        let tokens: Vec<Token> = tree
            .words()
            .enumerate()
            .map(|(i, w)| Token::new(i + 1, w, "X", "O"))
            .collect();
        let sentence = Sentence::new(0, tokens);
        let position = tree
            .words()
            .position(|w| w.eq_ignore_ascii_case("it"))
            .unwrap();
        let mention = Mention::new(&sentence, Span::single(position)).unwrap();
        ExtrapositionDetector::new().is_pleonastic(&mention, &tree)
    }

    #[test]
    fn test_copula_adjective_clause() {
        assert!(check(
            "(ROOT (S (NP (PRP It)) (VP (VBZ is) (ADJP (JJ clear)) (SBAR (IN that) (S (NP (PRP he)) (VP (VBD left)))))))"
        ));
    }

    #[test]
    fn test_copula_passive_clause() {
        assert!(check(
            "(ROOT (S (NP (PRP It)) (VP (VBD was) (VP (VBN said) (SBAR (IN that) (S (NP (PRP he)) (VP (VBD left))))))))"
        ));
    }

    #[test]
    fn test_raising_and_turn_verbs() {
        assert!(check(
            "(ROOT (S (NP (PRP It)) (VP (VBZ seems) (SBAR (IN that) (S (NP (PRP he)) (VP (VBD left)))))))"
        ));
        assert!(check(
            "(ROOT (S (NP (PRP It)) (VP (VBD turned) (PRT (RP out)) (SBAR (IN that) (S (NP (PRP he)) (VP (VBD left)))))))"
        ));
    }

    #[test]
    fn test_modal_recurses() {
        assert!(check(
            "(ROOT (S (NP (PRP It)) (VP (MD may) (VP (VB be) (ADJP (JJ true) (SBAR (IN that) (S (NP (PRP he)) (VP (VBD left)))))))))"
        ));
    }

    #[test]
    fn test_copula_noun_then_clause() {
        assert!(check(
            "(ROOT (S (NP (PRP It)) (VP (VBZ is) (NP (DT a) (NN pity)) (SBAR (IN that) (S (NP (PRP he)) (VP (VBD left)))))))"
        ));
    }

    #[test]
    fn test_relative_clause_inside_noun_phrase_is_referential() {
        assert!(!check(
            "(ROOT (S (NP (PRP It)) (VP (VBZ is) (NP (NP (DT a) (NN dog)) (SBAR (WHNP (WDT that)) (S (VP (VBZ barks))))))))"
        ));
    }

    #[test]
    fn test_noun_phrase_without_noun_child() {
        assert!(!check(
            "(ROOT (S (NP (PRP It)) (VP (VBZ is) (NP (PRP mine)) (SBAR (IN because) (S (NP (PRP I)) (VP (VBD won)))))))"
        ));
    }

    #[test]
    fn test_auxiliary_have_does_not_recurse() {
        assert!(!check(
            "(ROOT (S (NP (PRP It)) (VP (VBZ has) (VP (VBN been) (VP (VBN said) (SBAR (IN that) (S (NP (PRP he)) (VP (VBD left)))))))))"
        ));
    }

    #[test]
    fn test_modal_needs_be_or_become() {
        assert!(!check(
            "(ROOT (S (NP (PRP It)) (VP (MD may) (VP (VB seem) (ADJP (JJ true) (SBAR (IN that) (S (NP (PRP he)) (VP (VBD left)))))))))"
        ));
    }

    #[test]
    fn test_referential_it() {
        assert!(!check(
            "(ROOT (S (NP (PRP It)) (VP (VBZ is) (NP (DT a) (NN dog)))))"
        ));
        assert!(!check(
            "(ROOT (S (NP (PRP I)) (VP (VBD saw) (NP (PRP it)))))"
        ));
    }
}
