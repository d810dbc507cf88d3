//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use corefmd::{Dependency, DependencyGraph, Document, Mention, ParseTree, Sentence, Token};

/// Build a fully annotated sentence.
///
/// Words and POS tags come from the tree's preterminals; `ner` gives one tag
/// per token and `deps` lists `(governor, dependent)` pairs, 1-based with
/// governor 0 for the root.
pub fn sentence(index: usize, parse: &str, ner: &[&str], deps: &[(usize, usize)]) -> Sentence {
    let tree = ParseTree::parse(parse).expect("fixture tree parses");
    let tokens = tagged_tokens(&tree, ner);
    assert_eq!(tokens.len(), ner.len(), "one NER tag per leaf");
    let graph: DependencyGraph = deps
        .iter()
        .map(|&(gov, dep)| Dependency::new(gov, dep, if gov == 0 { "root" } else { "dep" }))
        .collect();
    Sentence::new(index, tokens)
        .with_tree(tree)
        .with_basic_dependencies(graph)
}

fn tagged_tokens(tree: &ParseTree, ner: &[&str]) -> Vec<Token> {
    (1..=tree.num_leaves())
        .filter_map(|n| {
            let pre = tree.preterminal_of_leaf(n)?;
            let word = tree.word_of(pre)?;
            let tag = ner.get(n - 1).copied().unwrap_or("O");
            Some(Token::new(n, word, tree.label(pre), tag))
        })
        .collect()
}

/// A single-sentence document.
pub fn document(parse: &str, ner: &[&str], deps: &[(usize, usize)]) -> Document {
    Document::new("test", vec![sentence(0, parse, ner, deps)])
}

/// `(start, end)` of each mention, in list order.
pub fn spans(mentions: &[Mention]) -> Vec<(usize, usize)> {
    mentions.iter().map(|m| (m.start(), m.end())).collect()
}

/// "The American policy was criticized"
pub const AMERICAN_POLICY: &str =
    "(ROOT (S (DT The) (NP (JJ American) (NN policy)) (VP (VBD was) (VP (VBN criticized)))))";
pub const AMERICAN_POLICY_DEPS: &[(usize, usize)] = &[(3, 1), (3, 2), (5, 3), (5, 4), (0, 5)];

/// "Obama 's dog barked"
pub const POSSESSIVE: &str =
    "(ROOT (S (NP (NP (NNP Obama) (POS 's)) (NN dog)) (VP (VBD barked))))";
pub const POSSESSIVE_DEPS: &[(usize, usize)] = &[(3, 1), (1, 2), (4, 3), (0, 4)];

/// "the president of France spoke"
pub const PRESIDENT: &str = "(ROOT (S (NP (NP (DT the) (NN president)) (PP (IN of) (NP (NNP France)))) (VP (VBD spoke))))";
pub const PRESIDENT_DEPS: &[(usize, usize)] = &[(2, 1), (5, 2), (4, 3), (2, 4), (0, 5)];

/// "Paris , the capital grew"
pub const APPOSITION: &str =
    "(ROOT (S (NP (NP (NNP Paris)) (, ,) (NP (DT the) (NN capital))) (VP (VBD grew))))";
pub const APPOSITION_DEPS: &[(usize, usize)] = &[(5, 1), (1, 2), (4, 3), (1, 4), (0, 5)];

/// "cats and dogs slept"
pub const COORDINATION: &str =
    "(ROOT (S (NP (NP (NNS cats)) (CC and) (NP (NNS dogs))) (VP (VBD slept))))";
pub const COORDINATION_DEPS: &[(usize, usize)] = &[(4, 1), (3, 2), (1, 3), (0, 4)];

/// "It is clear that he left"
pub const EXTRAPOSED: &str = "(ROOT (S (NP (PRP It)) (VP (VBZ is) (ADJP (JJ clear)) (SBAR (IN that) (S (NP (PRP he)) (VP (VBD left)))))))";
pub const EXTRAPOSED_DEPS: &[(usize, usize)] = &[(3, 1), (3, 2), (0, 3), (6, 4), (6, 5), (3, 6)];

/// "Bank of America fell"
pub const BANK: &str =
    "(ROOT (S (NP (NP (NNP Bank)) (PP (IN of) (NP (NNP America)))) (VP (VBD fell))))";
pub const BANK_DEPS: &[(usize, usize)] = &[(4, 1), (3, 2), (1, 3), (0, 4)];
