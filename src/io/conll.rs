//! CoNLL-2012 output, and reading of the coreference and parse-bit columns.
//!
//! Twelve tab-separated columns per token:
//!
//! ```text
//! doc  part  n  word  POS  parse-bit  lemma  frameset  sense  speaker  NER  coref
//! d1   0     0  John  NNP  (ROOT(S(NP*)  -   -         -      -        (PERSON)  (0)
//! ```
//!
//! Documents are wrapped in `#begin document (<id>); part 000` and
//! `#end document`; a blank line follows every sentence. The coreference
//! column joins `(id` openings, `(id)` single-token mentions and `id)`
//! closings with `|`, or holds `-`.

use super::corenlp::GoldMention;
use crate::{Document, Error, Mention, Result, Sentence, Span, Token, OUTSIDE};
use std::collections::HashMap;
use std::fmt::Write as _;

/// One bracketed mention in the coreference column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConllMention {
    /// 0-based sentence position.
    pub sentence: usize,
    /// Token span.
    pub span: Span,
    /// Entity (cluster) id written in the column.
    pub entity: String,
}

impl ConllMention {
    /// Create a mention.
    #[must_use]
    pub fn new(sentence: usize, span: Span, entity: impl Into<String>) -> Self {
        Self {
            sentence,
            span,
            entity: entity.into(),
        }
    }
}

/// Detected mentions, each its own entity named after its id.
///
/// Mentions without an id are numbered after the highest assigned id.
#[must_use]
pub fn mentions_from_detected(mentions: &[Vec<Mention>]) -> Vec<ConllMention> {
    let mut next = mentions
        .iter()
        .flatten()
        .filter_map(Mention::id)
        .max()
        .map_or(0, |id| id + 1);
    let mut out = Vec::new();
    for m in mentions.iter().flatten() {
        let id = match m.id() {
            Some(id) => id,
            None => {
                next += 1;
                next - 1
            }
        };
        out.push(ConllMention::new(m.sentence_index(), m.span(), id.to_string()));
    }
    out
}

/// Gold mentions keyed by their cluster ids.
#[must_use]
pub fn mentions_from_gold(gold: &[GoldMention]) -> Vec<ConllMention> {
    gold.iter()
        .map(|g| ConllMention::new(g.sentence, g.span, g.cluster.clone()))
        .collect()
}

/// Render one document.
///
/// Sentences without a parse tree get `-` parse bits. A mention outside
/// the document is an error.
pub fn render_document(document: &Document, mentions: &[ConllMention], part: u32) -> Result<String> {
    let mut per_sentence: Vec<Vec<&ConllMention>> = vec![Vec::new(); document.len()];
    for m in mentions {
        let fits = document
            .sentences()
            .get(m.sentence)
            .map_or(false, |s| m.span.fits(s.len()));
        if !fits {
            return Err(Error::invalid_input(format!(
                "mention {} of entity {} lies outside sentence {}",
                m.span, m.entity, m.sentence
            )));
        }
        per_sentence[m.sentence].push(m);
    }

    let mut out = String::new();
    let _ = writeln!(out, "#begin document ({}); part {:03}", document.id, part);
    for (sentence, mentions) in document.sentences().iter().zip(&per_sentence) {
        render_sentence(&mut out, &document.id, part, sentence, mentions);
        out.push('\n');
    }
    out.push_str("#end document\n");
    Ok(out)
}

fn render_sentence(
    out: &mut String,
    doc_id: &str,
    part: u32,
    sentence: &Sentence,
    mentions: &[&ConllMention],
) {
    let tokens = sentence.tokens();
    let parse_bits = sentence.tree().map(|t| t.parse_bits());
    let ner = ner_column(tokens);

    for (position, token) in tokens.iter().enumerate() {
        let parse_bit = parse_bits
            .as_ref()
            .and_then(|bits| bits.get(position))
            .map_or("-", String::as_str);
        let lemma = match token.lemma.as_deref() {
            Some(lemma) if !lemma.is_empty() && lemma != token.word => lemma,
            _ => "-",
        };
        let part = part.to_string();
        let number = position.to_string();
        let coref = coref_cell(mentions, position);
        let columns: [&str; 12] = [
            doc_id,
            &part,
            &number,
            or_dash(&token.word),
            or_dash(&token.pos),
            parse_bit,
            lemma,
            "-",
            "-",
            token.speaker.as_deref().map_or("-", or_dash),
            &ner[position],
            &coref,
        ];
        out.push_str(&columns.join("\t"));
        out.push('\n');
    }
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

/// Bracketed NER column: `(TYPE*` opens a run, `*)` closes it, `(TYPE)`
/// is a one-token run, `*` is everything else.
fn ner_column(tokens: &[Token]) -> Vec<String> {
    let mut column: Vec<String> = Vec::with_capacity(tokens.len());
    let mut previous = OUTSIDE;
    for token in tokens {
        if token.ner == previous {
            column.push("*".to_string());
            continue;
        }
        if previous != OUTSIDE {
            close_ner(&mut column);
        }
        previous = token.ner.as_str();
        if previous == OUTSIDE {
            column.push("*".to_string());
        } else {
            column.push(format!("({previous}*"));
        }
    }
    if previous != OUTSIDE {
        close_ner(&mut column);
    }
    column
}

fn close_ner(column: &mut [String]) {
    if let Some(last) = column.last_mut() {
        if last.starts_with('(') {
            last.pop();
        }
        last.push(')');
    }
}

fn coref_cell(mentions: &[&ConllMention], position: usize) -> String {
    let mut opening: Vec<&ConllMention> = mentions
        .iter()
        .copied()
        .filter(|m| m.span.start() == position && m.span.len() > 1)
        .collect();
    opening.sort_by(|a, b| b.span.end().cmp(&a.span.end()).then(a.entity.cmp(&b.entity)));

    let mut closing: Vec<&ConllMention> = mentions
        .iter()
        .copied()
        .filter(|m| m.span.end() == position + 1 && m.span.len() > 1)
        .collect();
    closing.sort_by(|a, b| b.span.start().cmp(&a.span.start()).then(a.entity.cmp(&b.entity)));

    let mut parts: Vec<String> = opening.iter().map(|m| format!("({}", m.entity)).collect();
    parts.extend(
        mentions
            .iter()
            .filter(|m| m.span.start() == position && m.span.len() == 1)
            .map(|m| format!("({})", m.entity)),
    );
    parts.extend(closing.iter().map(|m| format!("{})", m.entity)));

    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join("|")
    }
}

/// A document read back from CoNLL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConllDocument {
    /// Id from the `#begin document` line.
    pub id: String,
    /// Part number, as written.
    pub part: String,
    /// Tokens per sentence.
    pub sentence_lengths: Vec<usize>,
    /// Mentions in closing order.
    pub mentions: Vec<ConllMention>,
    /// Parse-bit cell of every token, per sentence. `-` when the row has
    /// no parse column.
    pub parse_bits: Vec<Vec<String>>,
}

impl ConllDocument {
    /// `(id, part)`, the key documents are matched on when scoring.
    #[must_use]
    pub fn key(&self) -> (&str, &str) {
        (&self.id, &self.part)
    }
}

const PARSE_COLUMN: usize = 5;

struct DocumentReader {
    document: ConllDocument,
    position: usize,
    open: HashMap<String, Vec<usize>>,
    bits: Vec<String>,
}

impl DocumentReader {
    fn new(id: String, part: String) -> Self {
        Self {
            document: ConllDocument {
                id,
                part,
                sentence_lengths: Vec::new(),
                mentions: Vec::new(),
                parse_bits: Vec::new(),
            },
            position: 0,
            open: HashMap::new(),
            bits: Vec::new(),
        }
    }

    fn row(&mut self, cell: &str, parse_bit: &str, line: usize) -> Result<()> {
        self.bits.push(parse_bit.to_string());
        let sentence = self.document.sentence_lengths.len();
        if cell != "-" {
            for part in cell.split('|') {
                let opens = part.starts_with('(');
                let closes = part.ends_with(')');
                let entity = part.trim_start_matches('(').trim_end_matches(')');
                if entity.is_empty() {
                    return Err(Error::parse(format!("line {line}: bad coreference cell '{cell}'")));
                }
                match (opens, closes) {
                    (true, true) => self.document.mentions.push(ConllMention::new(
                        sentence,
                        Span::single(self.position),
                        entity,
                    )),
                    (true, false) => self
                        .open
                        .entry(entity.to_string())
                        .or_default()
                        .push(self.position),
                    (false, true) => {
                        let start = self
                            .open
                            .get_mut(entity)
                            .and_then(Vec::pop)
                            .ok_or_else(|| {
                                Error::parse(format!(
                                    "line {line}: entity {entity} closed but never opened"
                                ))
                            })?;
                        let span = Span::new(start, self.position + 1).ok_or_else(|| {
                            Error::parse(format!("line {line}: empty mention of entity {entity}"))
                        })?;
                        self.document
                            .mentions
                            .push(ConllMention::new(sentence, span, entity));
                    }
                    (false, false) => {
                        return Err(Error::parse(format!(
                            "line {line}: bad coreference cell '{cell}'"
                        )))
                    }
                }
            }
        }
        self.position += 1;
        Ok(())
    }

    fn end_sentence(&mut self, line: usize) -> Result<()> {
        if self.position == 0 {
            return Ok(());
        }
        if let Some((entity, _)) = self.open.iter().find(|(_, starts)| !starts.is_empty()) {
            return Err(Error::parse(format!(
                "line {line}: mention of entity {entity} crosses a sentence boundary"
            )));
        }
        self.open.clear();
        self.document.sentence_lengths.push(self.position);
        self.document.parse_bits.push(std::mem::take(&mut self.bits));
        self.position = 0;
        Ok(())
    }
}

/// Parse CoNLL text into documents, reading the parse-bit column and the
/// last (coreference) column of each token row.
pub fn parse_conll(text: &str) -> Result<Vec<ConllDocument>> {
    let mut documents = Vec::new();
    let mut current: Option<DocumentReader> = None;

    for (number, line) in text.lines().enumerate() {
        let number = number + 1;
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("#begin document") {
            if current.is_some() {
                return Err(Error::parse(format!(
                    "line {number}: document begins before the previous one ended"
                )));
            }
            let (id, part) = parse_begin(rest);
            current = Some(DocumentReader::new(id, part));
            continue;
        }
        if line.starts_with("#end document") {
            let mut reader = current.take().ok_or_else(|| {
                Error::parse(format!("line {number}: #end document without #begin"))
            })?;
            reader.end_sentence(number)?;
            documents.push(reader.document);
            continue;
        }
        if line.starts_with('#') {
            continue;
        }
        let Some(reader) = current.as_mut() else {
            if line.is_empty() {
                continue;
            }
            return Err(Error::parse(format!(
                "line {number}: token row outside a document"
            )));
        };
        if line.is_empty() {
            reader.end_sentence(number)?;
            continue;
        }
        let columns: Vec<&str> = line.split_whitespace().collect();
        let cell = columns
            .last()
            .ok_or_else(|| Error::parse(format!("line {number}: empty row")))?;
        let parse_bit = columns.get(PARSE_COLUMN).copied().unwrap_or("-");
        reader.row(cell, parse_bit, number)?;
    }

    if let Some(reader) = current {
        return Err(Error::parse(format!(
            "document '{}' has no #end document line",
            reader.document.id
        )));
    }
    Ok(documents)
}

fn parse_begin(rest: &str) -> (String, String) {
    let rest = rest.trim();
    let (id, tail) = match (rest.find('('), rest.rfind(')')) {
        (Some(open), Some(close)) if open < close => (&rest[open + 1..close], &rest[close + 1..]),
        _ => (rest, ""),
    };
    let part = tail
        .split("part")
        .nth(1)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or("000");
    (id.to_string(), part.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseTree;

    fn document() -> Document {
        let tree =
            ParseTree::parse("(ROOT (S (NP (NNP Barack) (NNP Obama)) (VP (VBD spoke))))").unwrap();
        let tokens = vec![
            Token::new(1, "Barack", "NNP", "PERSON"),
            Token::new(2, "Obama", "NNP", "PERSON"),
            Token::new(3, "spoke", "VBD", "O").with_lemma("speak"),
        ];
        Document::new("d1", vec![Sentence::new(0, tokens).with_tree(tree)])
    }

    #[test]
    fn test_render_columns() {
        let mentions = vec![
            ConllMention::new(0, Span::new(0, 2).unwrap(), "0"),
            ConllMention::new(0, Span::single(1), "1"),
        ];
        let text = render_document(&document(), &mentions, 0).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "#begin document (d1); part 000");
        assert_eq!(
            lines[1],
            "d1\t0\t0\tBarack\tNNP\t(ROOT(S(NP*\t-\t-\t-\t-\t(PERSON*\t(0"
        );
        assert_eq!(lines[2], "d1\t0\t1\tObama\tNNP\t*)\t-\t-\t-\t-\t*)\t(1)|0)");
        assert_eq!(lines[3], "d1\t0\t2\tspoke\tVBD\t(VP*)))\tspeak\t-\t-\t-\t*\t-");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "#end document");
    }

    #[test]
    fn test_single_token_entity() {
        let tokens = vec![
            Token::new(1, "IBM", "NNP", "ORGANIZATION"),
            Token::new(2, "rose", "VBD", "O"),
        ];
        assert_eq!(ner_column(&tokens), vec!["(ORGANIZATION)", "*"]);
    }

    #[test]
    fn test_nested_openings_longest_first() {
        let a = ConllMention::new(0, Span::new(0, 3).unwrap(), "a");
        let b = ConllMention::new(0, Span::new(0, 2).unwrap(), "b");
        assert_eq!(coref_cell(&[&b, &a], 0), "(a|(b");
        assert_eq!(coref_cell(&[&b, &a], 1), "b)");
        assert_eq!(coref_cell(&[&b, &a], 2), "a)");
    }

    #[test]
    fn test_read_back() {
        let mentions = vec![
            ConllMention::new(0, Span::new(0, 2).unwrap(), "0"),
            ConllMention::new(0, Span::single(1), "1"),
            ConllMention::new(0, Span::single(2), "0"),
        ];
        let text = render_document(&document(), &mentions, 0).unwrap();
        let docs = parse_conll(&text).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].key(), ("d1", "000"));
        assert_eq!(docs[0].sentence_lengths, vec![3]);
        assert_eq!(docs[0].parse_bits.len(), 1);
        assert_eq!(docs[0].parse_bits[0].len(), 3);
        assert!(docs[0].parse_bits[0][0].starts_with('('));
        let mut read = docs[0].mentions.clone();
        read.sort();
        let mut expected = mentions;
        expected.sort();
        assert_eq!(read, expected);
    }

    #[test]
    fn test_short_rows_have_no_parse_bit() {
        let text = "#begin document (x); part 000\nx 0 0 a -\n\n#end document\n";
        let docs = parse_conll(text).unwrap();
        assert_eq!(docs[0].parse_bits, vec![vec!["-".to_string()]]);
    }

    #[test]
    fn test_unmatched_close() {
        let text = "#begin document (x); part 000\nx 0 0 a NN * - - - - * 3)\n\n#end document\n";
        assert!(matches!(parse_conll(text), Err(Error::Parse(_))));
    }

    #[test]
    fn test_open_across_sentences() {
        let text =
            "#begin document (x); part 000\nx 0 0 a NN * - - - - * (3\n\nx 0 0 b NN * - - - - * 3)\n\n#end document\n";
        assert!(matches!(parse_conll(text), Err(Error::Parse(_))));
    }

    #[test]
    fn test_mention_outside_document() {
        let bad = vec![ConllMention::new(1, Span::single(0), "0")];
        assert!(render_document(&document(), &bad, 0).is_err());
    }
}
