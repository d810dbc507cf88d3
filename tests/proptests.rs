//! Property tests over randomly tagged sentences.

use corefmd::extract::{is_excluded_entity_tag, NamedEntityExtractor};
use corefmd::filter::FilterResources;
use corefmd::pleonastic::ExtrapositionDetector;
use corefmd::{
    Dependency, DependencyGraph, Dictionaries, Document, FilterStrategy, MentionConfig,
    MentionFinder, ParseTree, RemovalEvent, Sentence, Token,
};
use proptest::prelude::*;
use std::collections::HashSet;

const WORDS: &[&str] = &[
    "it", "the", "%", "of", "some", "dogs", "year", "American", "hmm", "there", "Paris", "'s",
    ",", "and", "policy",
];
const POS: &[&str] = &["NN", "NNS", "NNP", "JJ", "DT", "PRP", "CD", "IN", ",", "CC", "POS"];
const NER: &[&str] = &["O", "PERSON", "LOCATION", "DATE", "PERCENT", "MONEY", "CARDINAL"];

fn token_strategy() -> impl Strategy<Value = (usize, usize, usize)> {
    (0..WORDS.len(), 0..POS.len(), 0..NER.len())
}

/// Right-branching noun phrases over the tokens, every token governed by
/// its right neighbour.
fn build_sentence(index: usize, picks: &[(usize, usize, usize)]) -> Sentence {
    let mut parse = String::from("(ROOT ");
    for &(w, p, _) in picks {
        parse.push_str(&format!("(NP ({} {}) ", POS[p], WORDS[w]));
    }
    parse.push_str(&")".repeat(picks.len() + 1));
    let tree = ParseTree::parse(&parse).unwrap();

    let tokens: Vec<Token> = picks
        .iter()
        .enumerate()
        .map(|(i, &(w, p, n))| Token::new(i + 1, WORDS[w], POS[p], NER[n]))
        .collect();
    let n = tokens.len();
    let graph: DependencyGraph = (1..=n)
        .map(|d| Dependency::new(if d == n { 0 } else { d + 1 }, d, "dep"))
        .collect();
    Sentence::new(index, tokens)
        .with_tree(tree)
        .with_basic_dependencies(graph)
}

fn document_strategy() -> impl Strategy<Value = Document> {
    prop::collection::vec(prop::collection::vec(token_strategy(), 1..8), 1..4).prop_map(
        |sentences| {
            let sentences = sentences
                .iter()
                .enumerate()
                .map(|(i, picks)| build_sentence(i, picks))
                .collect();
            Document::new("prop", sentences)
        },
    )
}

proptest! {
    #[test]
    fn mentions_are_unique_and_numbered(doc in document_strategy()) {
        let finder = MentionFinder::new(MentionConfig::default()).unwrap();
        let mentions = finder.find_mentions(&doc).unwrap();
        prop_assert_eq!(mentions.len(), doc.len());

        let mut next = 0;
        for (sentence, list) in doc.sentences().iter().zip(&mentions) {
            let mut seen = HashSet::new();
            for m in list {
                prop_assert!(seen.insert(m.span()), "duplicate span {}", m.span());
                prop_assert!(m.span().fits(sentence.len()));
                prop_assert_eq!(m.id(), Some(next));
                let head = m.head_index().unwrap();
                prop_assert!(m.span().contains_index(head));
                next += 1;
            }
        }
    }

    #[test]
    fn primary_filter_is_idempotent(doc in document_strategy()) {
        let finder = MentionFinder::new(MentionConfig::default()).unwrap();
        let mut mentions = finder.find_mentions(&doc).unwrap();
        let before: Vec<usize> = mentions.iter().map(Vec::len).collect();

        let dictionary = Dictionaries::english();
        let pleonastic = ExtrapositionDetector::new();
        let resources = FilterResources { dictionary: &dictionary, pleonastic: &pleonastic };
        let mut events: Vec<RemovalEvent> = Vec::new();
        FilterStrategy::Primary
            .apply(&doc, &mut mentions, resources, &mut events)
            .unwrap();

        prop_assert!(events.is_empty(), "second pass removed {:?}", events);
        let after: Vec<usize> = mentions.iter().map(Vec::len).collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn entity_runs_skip_excluded_tags(picks in prop::collection::vec(token_strategy(), 0..12)) {
        let tokens: Vec<Token> = picks
            .iter()
            .enumerate()
            .map(|(i, &(w, p, n))| Token::new(i + 1, WORDS[w], POS[p], NER[n]))
            .collect();
        for span in NamedEntityExtractor::runs(&tokens) {
            prop_assert!(!span.is_empty());
            let tag = tokens[span.start()].ner.as_str();
            prop_assert!(!is_excluded_entity_tag(tag));
            for (offset, token) in tokens[span.range()].iter().enumerate() {
                let last = offset + 1 == span.len();
                prop_assert!(
                    token.ner == tag || (last && token.is_possessive_clitic()),
                    "token {} breaks run {}", token.word, span
                );
            }
        }
    }

    #[test]
    fn liberal_english_filters_nothing(doc in document_strategy()) {
        let strict = MentionFinder::new(MentionConfig::default()).unwrap();
        let liberal = MentionFinder::new(MentionConfig::default().with_liberal(true)).unwrap();
        let candidates = strict.extract_candidates(&doc).unwrap();
        let kept = strict.find_mentions(&doc).unwrap();
        let all = liberal.find_mentions(&doc).unwrap();
        for (c, (k, a)) in candidates.iter().zip(kept.iter().zip(&all)) {
            prop_assert!(k.len() <= c.len());
            prop_assert!(a.len() >= c.len());
        }
    }
}
