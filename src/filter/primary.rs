//! The nine English exclusion rules.

use super::{FilterResources, FilterRule};
use crate::observe::{FilterObserver, RemovalEvent};
use crate::{Mention, ParseTree};

const NEGATIVE_QUANTIFIERS: &[&str] = &["none", "no", "nothing", "not"];

/// Rules matched by one mention, in evaluation order.
pub(crate) fn matching_rules(
    mention: &Mention,
    tree: &ParseTree,
    resources: FilterResources<'_>,
) -> Vec<FilterRule> {
    let dict = resources.dictionary;
    let head = mention.head_string();
    let head_pos = mention.head_pos().unwrap_or_default();
    let head_ner = mention.head_ner().unwrap_or_default();
    let first = mention.original_span().first();
    let mut rules = Vec::new();

    if resources.pleonastic.is_pleonastic(mention, tree) {
        rules.push(FilterRule::Pleonastic);
    }
    if dict.is_non_word(head) {
        rules.push(FilterRule::NonWord);
    }
    if let Some(first) = first {
        if NEGATIVE_QUANTIFIERS.contains(&first.word.to_lowercase().as_str()) {
            rules.push(FilterRule::NegativeQuantifier);
        }
    }
    if dict.is_partitive(mention) {
        rules.push(FilterRule::Partitive);
    }
    if let Some(first) = first {
        if head_pos == "NN"
            && !dict.is_temporal(head)
            && (mention.len() == 1 || first.pos == "JJ")
        {
            rules.push(FilterRule::BareNounPhrase);
        }
    }
    if head == "%" {
        rules.push(FilterRule::PercentSymbol);
    }
    if head_ner == "PERCENT" || head_ner == "MONEY" {
        rules.push(FilterRule::PercentOrMoney);
    }
    if dict.is_adjectival_demonym(&mention.span_text()) {
        rules.push(FilterRule::AdjectivalDemonym);
    }
    if dict.is_stoplisted(mention) {
        rules.push(FilterRule::StopList);
    }
    rules
}

/// Evaluate every rule on every mention of one sentence.
///
/// Returns a removal mark per mention. All rules run on all mentions; each
/// match is reported to `observer`.
pub fn primary_removals(
    mentions: &[Mention],
    tree: &ParseTree,
    resources: FilterResources<'_>,
    observer: &mut dyn FilterObserver,
) -> Vec<bool> {
    mentions
        .iter()
        .map(|mention| {
            let rules = matching_rules(mention, tree, resources);
            for &rule in &rules {
                observer.on_removal(RemovalEvent::new(rule, mention));
            }
            !rules.is_empty()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionaries;
    use crate::pleonastic::ExtrapositionDetector;
    use corefmd_core::{Sentence, Span, Token};

    struct Fixture {
        sentence: Sentence,
        tree: ParseTree,
    }

    fn fixture(parse: &str, ner: &[&str]) -> Fixture {
        let tree = ParseTree::parse(parse).unwrap();
        let tokens: Vec<Token> = tree
            .leaves()
            .iter()
            .enumerate()
            .map(|(i, &leaf)| {
                let pos = tree.label(tree.parent(leaf).unwrap());
                Token::new(i + 1, tree.label(leaf), pos, ner[i])
            })
            .collect();
        Fixture {
            sentence: Sentence::new(0, tokens),
            tree,
        }
    }

    fn rules_for(f: &Fixture, span: (usize, usize), head: usize) -> Vec<FilterRule> {
        let mut m = Mention::new(&f.sentence, Span::new(span.0, span.1).unwrap()).unwrap();
        m.set_head(head).unwrap();
        let dict = Dictionaries::english();
        let resources = FilterResources {
            dictionary: &dict,
            pleonastic: &ExtrapositionDetector,
        };
        matching_rules(&m, &f.tree, resources)
    }

    #[test]
    fn test_bare_noun_and_demonym() {
        let f = fixture(
            "(ROOT (S (NP (DT The) (JJ American) (NN policy)) (VP (VBD was) (VP (VBN criticized)))))",
            &["O", "NATIONALITY", "O", "O", "O"],
        );
        assert_eq!(rules_for(&f, (1, 3), 2), vec![FilterRule::BareNounPhrase]);
        assert!(rules_for(&f, (0, 3), 2).is_empty());
        assert_eq!(rules_for(&f, (1, 2), 1), vec![FilterRule::AdjectivalDemonym]);
    }

    #[test]
    fn test_temporal_head_is_not_bare() {
        let f = fixture(
            "(ROOT (S (NP (JJ last) (NN year)) (VP (VBD ended))))",
            &["DATE", "DATE", "O"],
        );
        assert!(rules_for(&f, (0, 2), 1).is_empty());
    }

    #[test]
    fn test_negative_quantifier_and_percent() {
        let f = fixture(
            "(ROOT (S (NP (DT No) (NNS dogs)) (VP (VBD rose) (NP (CD 5) (NN %)))))",
            &["O", "O", "O", "PERCENT", "PERCENT"],
        );
        assert_eq!(rules_for(&f, (0, 2), 1), vec![FilterRule::NegativeQuantifier]);
        let percent = rules_for(&f, (4, 5), 4);
        assert!(percent.contains(&FilterRule::PercentSymbol));
        assert!(percent.contains(&FilterRule::PercentOrMoney));
        assert!(percent.contains(&FilterRule::BareNounPhrase));
    }

    #[test]
    fn test_pleonastic_and_stoplist() {
        let f = fixture(
            "(ROOT (S (NP (PRP It)) (VP (VBZ is) (ADJP (JJ clear)) (SBAR (IN that) (S (NP (EX there)) (VP (VBZ is) (NP (NN time))))))))",
            &["O", "O", "O", "O", "O", "O", "O"],
        );
        assert_eq!(rules_for(&f, (0, 1), 0), vec![FilterRule::Pleonastic]);
        assert_eq!(rules_for(&f, (4, 5), 4), vec![FilterRule::StopList]);
    }

    #[test]
    fn test_rules_without_head_do_not_fire() {
        let f = fixture("(ROOT (NP (NN policy)))", &["O"]);
        let m = Mention::new(&f.sentence, Span::single(0)).unwrap();
        let dict = Dictionaries::english();
        let resources = FilterResources {
            dictionary: &dict,
            pleonastic: &ExtrapositionDetector,
        };
        assert!(matching_rules(&m, &f.tree, resources).is_empty());
    }
}
