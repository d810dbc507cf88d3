//! CoreNLP JSON ingestion.
//!
//! Reads the document shape the CoreNLP server emits with the
//! `tokenize,ssplit,pos,lemma,ner,parse,depparse,coref` annotators:
//!
//! ```json
//! { "docId": "wsj_0001",
//!   "sentences": [ { "parse": "(ROOT ...)",
//!                    "basicDependencies": [ {"dep": "ROOT", "governor": 0, "dependent": 2} ],
//!                    "tokens": [ {"index": 1, "word": "It", "pos": "PRP", "ner": "O"} ] } ],
//!   "corefs": { "3": [ {"sentNum": 1, "startIndex": 1, "endIndex": 2} ] } }
//! ```
//!
//! `corefs` indices are 1-based and `endIndex` is exclusive. They become
//! [`GoldMention`]s with 0-based sentence positions and token spans.

use crate::finder::DocumentMentions;
use crate::{
    Dependency, DependencyGraph, Document, Error, Mention, ParseTree, Result, Sentence, Span,
    SpanSet, Token, OUTSIDE,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Document id used when the JSON has no `docId` and no file name applies.
pub const DEFAULT_DOCUMENT_ID: &str = "document";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    #[serde(default)]
    doc_id: Option<String>,
    sentences: Vec<RawSentence>,
    #[serde(default)]
    corefs: BTreeMap<String, Vec<RawCorefMention>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSentence {
    #[serde(default)]
    tokens: Vec<RawToken>,
    #[serde(default)]
    parse: Option<String>,
    #[serde(default)]
    basic_dependencies: Option<Vec<RawDependency>>,
    #[serde(default)]
    enhanced_dependencies: Option<Vec<RawDependency>>,
    #[serde(default)]
    enhanced_plus_plus_dependencies: Option<Vec<RawDependency>>,
}

#[derive(Debug, Deserialize)]
struct RawToken {
    index: usize,
    word: String,
    pos: String,
    #[serde(default = "outside")]
    ner: String,
    #[serde(default)]
    lemma: Option<String>,
    #[serde(default)]
    speaker: Option<String>,
}

fn outside() -> String {
    OUTSIDE.to_string()
}

#[derive(Debug, Deserialize)]
struct RawDependency {
    dep: String,
    governor: usize,
    dependent: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCorefMention {
    sent_num: usize,
    start_index: usize,
    end_index: usize,
}

/// A gold mention from the `corefs` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldMention {
    /// Cluster id as written in the JSON.
    pub cluster: String,
    /// 0-based sentence position.
    pub sentence: usize,
    /// 0-based token span.
    pub span: Span,
}

/// A parsed CoreNLP document with its gold mentions, if any.
#[derive(Debug, Clone)]
pub struct CoreNlpInput {
    /// The annotated document.
    pub document: Document,
    /// Gold mentions in cluster order, then input order.
    pub gold: Vec<GoldMention>,
}

impl CoreNlpInput {
    /// True when the JSON carried a `corefs` section with at least one mention.
    #[must_use]
    pub fn has_gold(&self) -> bool {
        !self.gold.is_empty()
    }

    /// Distinct gold spans per sentence. A span listed in several
    /// clusters appears once.
    #[must_use]
    pub fn gold_spans(&self) -> Vec<SpanSet> {
        let mut sets = vec![SpanSet::new(); self.document.len()];
        for gold in &self.gold {
            if let Some(set) = sets.get_mut(gold.sentence) {
                set.insert(gold.span);
            }
        }
        sets
    }

    /// Gold spans as unfiltered mentions, sorted within each sentence.
    pub fn gold_mention_lists(&self) -> Result<DocumentMentions> {
        self.document
            .sentences()
            .iter()
            .zip(self.gold_spans())
            .map(|(sentence, spans)| {
                spans
                    .sorted()
                    .into_iter()
                    .map(|span| Mention::new(sentence, span).map_err(Error::from))
                    .collect::<Result<Vec<_>>>()
            })
            .collect()
    }
}

/// Parse CoreNLP JSON text.
///
/// A missing `docId` becomes [`DEFAULT_DOCUMENT_ID`].
pub fn parse_corenlp_json(text: &str) -> Result<CoreNlpInput> {
    let raw: RawDocument = serde_json::from_str(text)?;
    build(raw, DEFAULT_DOCUMENT_ID)
}

/// Read and parse a CoreNLP JSON file.
///
/// A missing `docId` becomes the file stem.
pub fn load_corenlp_json(path: impl AsRef<Path>) -> Result<CoreNlpInput> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let raw: RawDocument = serde_json::from_str(&text)
        .map_err(|e| Error::parse(format!("{}: {}", path.display(), e)))?;
    let fallback = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(DEFAULT_DOCUMENT_ID);
    build(raw, fallback)
}

fn build(raw: RawDocument, fallback_id: &str) -> Result<CoreNlpInput> {
    let id = raw.doc_id.unwrap_or_else(|| fallback_id.to_string());
    let sentences = raw
        .sentences
        .into_iter()
        .enumerate()
        .map(|(index, sentence)| build_sentence(index, sentence))
        .collect::<Result<Vec<_>>>()?;
    let document = Document::new(id, sentences);

    let mut gold = Vec::new();
    for (cluster, mentions) in raw.corefs {
        for m in mentions {
            gold.push(gold_mention(&document, &cluster, &m)?);
        }
    }
    log::debug!(
        "loaded document '{}': {} sentences, {} gold mentions",
        document.id,
        document.len(),
        gold.len()
    );
    Ok(CoreNlpInput { document, gold })
}

fn build_sentence(index: usize, raw: RawSentence) -> Result<Sentence> {
    let tokens: Vec<Token> = raw
        .tokens
        .into_iter()
        .map(|t| {
            let mut token = Token::new(t.index, t.word, t.pos, t.ner);
            token.lemma = t.lemma;
            token.speaker = t.speaker;
            token
        })
        .collect();
    let token_count = tokens.len();
    let mut sentence = Sentence::new(index, tokens);

    if let Some(parse) = raw.parse {
        let tree = ParseTree::parse(&parse)?;
        if tree.num_leaves() != token_count {
            return Err(Error::invalid_input(format!(
                "sentence {}: parse has {} leaves for {} tokens",
                index,
                tree.num_leaves(),
                token_count
            )));
        }
        sentence = sentence.with_tree(tree);
    }
    if let Some(edges) = raw.basic_dependencies {
        sentence = sentence.with_basic_dependencies(graph(edges));
    }
    if let Some(edges) = raw
        .enhanced_plus_plus_dependencies
        .or(raw.enhanced_dependencies)
    {
        sentence = sentence.with_enhanced_dependencies(graph(edges));
    }
    Ok(sentence)
}

fn graph(edges: Vec<RawDependency>) -> DependencyGraph {
    DependencyGraph::new(
        edges
            .into_iter()
            .map(|d| Dependency::new(d.governor, d.dependent, d.dep))
            .collect(),
    )
}

fn gold_mention(document: &Document, cluster: &str, raw: &RawCorefMention) -> Result<GoldMention> {
    let invalid = || {
        Error::invalid_input(format!(
            "gold mention of cluster {} at sentNum {} [{}, {}) is out of range",
            cluster, raw.sent_num, raw.start_index, raw.end_index
        ))
    };
    let sentence = raw.sent_num.checked_sub(1).ok_or_else(invalid)?;
    let start = raw.start_index.checked_sub(1).ok_or_else(invalid)?;
    let end = raw.end_index.checked_sub(1).ok_or_else(invalid)?;
    let span = Span::new(start, end).ok_or_else(invalid)?;
    let fits = document
        .sentences()
        .get(sentence)
        .map_or(false, |s| span.fits(s.len()));
    if !fits {
        return Err(invalid());
    }
    Ok(GoldMention {
        cluster: cluster.to_string(),
        sentence,
        span,
    })
}
