//! Document input and output.
//!
//! - [`corenlp`]: CoreNLP JSON documents (with optional gold `corefs`)
//! - [`conll`]: CoNLL-2012 rendering, coreference and parse-bit reading

pub mod conll;
pub mod corenlp;

pub use conll::{
    mentions_from_detected, mentions_from_gold, parse_conll, render_document, ConllDocument,
    ConllMention,
};
pub use corenlp::{
    load_corenlp_json, parse_corenlp_json, CoreNlpInput, GoldMention, DEFAULT_DOCUMENT_ID,
};

use crate::Result;
use std::path::{Path, PathBuf};

/// JSON files under `path`, sorted by path.
///
/// A file path is returned as is; a directory is walked recursively.
pub fn json_inputs(path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let path = path.as_ref();
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut found = Vec::new();
    collect_json(path, &mut found)?;
    found.sort();
    Ok(found)
}

fn collect_json(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_json(&path, found)?;
        } else if path.extension().map_or(false, |e| e == "json") {
            found.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_inputs_walks_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        for name in ["b.json", "a.json", "notes.txt", "sub/c.json"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }
        let names: Vec<String> = json_inputs(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json", "sub/c.json"]);
    }

    #[test]
    fn test_json_inputs_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("x.json");
        std::fs::write(&file, "{}").unwrap();
        assert_eq!(json_inputs(&file).unwrap(), vec![file]);
    }
}
