use crate::tokenizer::{tokenize_lines, Token};
use anyhow::{ensure, Result};
use serde::Serialize;
use std::collections::BTreeMap;

pub type DocId = u32;
pub type Position = u32;

/// Per-document positions of one term, keyed by document id.
pub type Occurrences = BTreeMap<DocId, Vec<Position>>;

static NO_OCCURRENCES: Occurrences = BTreeMap::new();

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub lines: Vec<String>,
}

impl Document {
    pub fn new(id: DocId, title: impl Into<String>, lines: Vec<String>) -> Self {
        Self { id, title: title.into(), lines }
    }

    /// Document from newline-separated text, titled after its id.
    pub fn from_text(id: DocId, text: &str) -> Self {
        Self::new(id, format!("Document {id}"), text.lines().map(str::to_string).collect())
    }
}

/// Term -> document -> positions. Built once, read-only afterwards.
///
/// Each document's token sequence is retained next to the postings so that
/// positions can be translated back to line offsets without re-tokenizing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PositionalIndex {
    postings: BTreeMap<String, Occurrences>,
    tokens: BTreeMap<DocId, Vec<Token>>,
}

impl PositionalIndex {
    /// Index every document exactly once. Document ids must be positive and
    /// strictly increasing; otherwise nothing is returned.
    pub fn build(documents: &[Document]) -> Result<Self> {
        let mut index = Self::default();
        let mut last: DocId = 0;
        for doc in documents {
            ensure!(
                doc.id > last,
                "malformed corpus: document id {} follows {} (ids must be positive and strictly increasing)",
                doc.id,
                last
            );
            last = doc.id;

            let tokens = tokenize_lines(&doc.lines);
            for token in &tokens {
                index
                    .postings
                    .entry(token.term.clone())
                    .or_default()
                    .entry(doc.id)
                    .or_default()
                    .push(token.position);
            }
            index.tokens.insert(doc.id, tokens);
        }
        tracing::debug!(num_docs = index.num_docs(), num_terms = index.num_terms(), "positional index built");
        Ok(index)
    }

    /// All documents and positions for `term`; empty for an unindexed term.
    pub fn occurrences(&self, term: &str) -> &Occurrences {
        self.postings.get(term).unwrap_or(&NO_OCCURRENCES)
    }

    pub fn positions(&self, term: &str, doc_id: DocId) -> &[Position] {
        self.occurrences(term).get(&doc_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn doc_count(&self, term: &str, doc_id: DocId) -> u32 {
        self.positions(term, doc_id).len() as u32
    }

    pub fn total_occurrences(&self, term: &str) -> u64 {
        self.occurrences(term).values().map(|p| p.len() as u64).sum()
    }

    /// Token sequence of a document; empty for an unknown id.
    pub fn tokens(&self, doc_id: DocId) -> &[Token] {
        self.tokens.get(&doc_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.postings.keys().map(String::as_str)
    }

    pub fn num_docs(&self) -> usize {
        self.tokens.len()
    }

    pub fn num_terms(&self) -> usize {
        self.postings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<Document> {
        vec![
            Document::from_text(1, "Love is not love\nWhich alters when it alteration finds,"),
            Document::from_text(2, "Time flies"),
        ]
    }

    #[test]
    fn positions_are_recorded_per_document() {
        let idx = PositionalIndex::build(&corpus()).unwrap();
        assert_eq!(idx.positions("love", 1), &[0, 3]);
        assert_eq!(idx.doc_count("love", 1), 2);
        assert_eq!(idx.doc_count("love", 2), 0);
        assert_eq!(idx.positions("finds", 1), &[9]);
        assert_eq!(idx.positions("time", 2), &[0]);
    }

    #[test]
    fn absent_term_has_no_entry() {
        let idx = PositionalIndex::build(&corpus()).unwrap();
        assert!(idx.occurrences("rose").is_empty());
        assert!(!idx.occurrences("love").contains_key(&2));
        assert_eq!(idx.total_occurrences("rose"), 0);
    }

    #[test]
    fn rejects_unordered_ids() {
        let docs = vec![Document::from_text(2, "a"), Document::from_text(1, "b")];
        assert!(PositionalIndex::build(&docs).is_err());
        let docs = vec![Document::from_text(0, "a")];
        assert!(PositionalIndex::build(&docs).is_err());
        let docs = vec![Document::from_text(3, "a"), Document::from_text(3, "b")];
        assert!(PositionalIndex::build(&docs).is_err());
    }

    #[test]
    fn empty_corpus_builds_empty_index() {
        let idx = PositionalIndex::build(&[]).unwrap();
        assert_eq!(idx.num_docs(), 0);
        assert_eq!(idx.num_terms(), 0);
        assert!(idx.tokens(1).is_empty());
    }
}
