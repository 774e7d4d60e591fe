use crate::config::SearchMode;
use crate::highlight::{highlight_spans, Span};
use crate::index::{DocId, Document, PositionalIndex};
use crate::tokenizer::query_terms;
use anyhow::Result;
use std::sync::Arc;

/// Outcome of a query for one document.
///
/// `matches` is the summed occurrence count of all query terms when the
/// document satisfies the mode, and 0 otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<'a> {
    pub document: &'a Document,
    pub matches: u32,
    pub terms: Arc<[String]>,
}

impl SearchResult<'_> {
    pub fn doc_id(&self) -> DocId {
        self.document.id
    }

    pub fn is_match(&self) -> bool {
        self.matches > 0
    }
}

/// Documents plus their positional index.
#[derive(Debug, Clone)]
pub struct Searcher {
    documents: Vec<Document>,
    index: PositionalIndex,
}

impl Searcher {
    pub fn new(documents: Vec<Document>) -> Result<Self> {
        let index = PositionalIndex::build(&documents)?;
        Ok(Self { documents, index })
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn document(&self, id: DocId) -> Option<&Document> {
        self.documents.binary_search_by_key(&id, |d| d.id).ok().map(|i| &self.documents[i])
    }

    pub fn index(&self) -> &PositionalIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// One result per document, in document-id order.
    pub fn search(&self, raw_query: &str, mode: SearchMode) -> Vec<SearchResult<'_>> {
        let terms: Arc<[String]> = query_terms(raw_query).into();
        tracing::trace!(query = raw_query, ?terms, %mode, "evaluating query");
        self.documents
            .iter()
            .map(|document| SearchResult {
                document,
                matches: match_count(&self.index, document.id, &terms, mode),
                terms: Arc::clone(&terms),
            })
            .collect()
    }

    /// Spans to mark for a result, recomputed from the index positions.
    pub fn spans(&self, result: &SearchResult<'_>) -> Vec<Span> {
        highlight_spans(&self.index, result.doc_id(), &result.terms)
    }
}

/// Summed occurrences of `terms` in `doc_id` if the mode's presence test
/// passes, else 0. No terms means no match.
pub fn match_count(index: &PositionalIndex, doc_id: DocId, terms: &[String], mode: SearchMode) -> u32 {
    if terms.is_empty() {
        return 0;
    }
    let mut total = 0u32;
    let mut present = 0usize;
    for term in terms {
        let n = index.doc_count(term, doc_id);
        if n > 0 {
            present += 1;
            total += n;
        }
    }
    let satisfied = match mode {
        SearchMode::And => present == terms.len(),
        SearchMode::Or => present > 0,
    };
    if satisfied {
        total
    } else {
        0
    }
}

pub fn count_matching(results: &[SearchResult<'_>]) -> usize {
    results.iter().filter(|r| r.is_match()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn searcher() -> Searcher {
        Searcher::new(vec![Document::from_text(1, "Love is not love"), Document::from_text(2, "Time flies")]).unwrap()
    }

    fn counts(results: &[SearchResult<'_>]) -> Vec<u32> {
        results.iter().map(|r| r.matches).collect()
    }

    #[test]
    fn or_single_term() {
        let s = searcher();
        let r = s.search("love", SearchMode::Or);
        assert_eq!(counts(&r), vec![2, 0]);
        assert_eq!(count_matching(&r), 1);
    }

    #[test]
    fn and_requires_every_term() {
        let s = searcher();
        let r = s.search("love time", SearchMode::And);
        assert_eq!(counts(&r), vec![0, 0]);
        assert_eq!(count_matching(&r), 0);
    }

    #[test]
    fn or_sums_present_terms() {
        let s = searcher();
        let r = s.search("love time", SearchMode::Or);
        assert_eq!(counts(&r), vec![2, 1]);
        assert_eq!(count_matching(&r), 2);
    }

    #[test]
    fn and_counts_total_occurrences() {
        let s = searcher();
        let r = s.search("love not", SearchMode::And);
        assert_eq!(counts(&r), vec![3, 0]);
    }

    #[test]
    fn duplicate_terms_count_once() {
        let s = searcher();
        assert_eq!(counts(&s.search("love love LOVE", SearchMode::Or)), vec![2, 0]);
        assert_eq!(counts(&s.search("love love", SearchMode::And)), vec![2, 0]);
        assert_eq!(&*s.search("love love", SearchMode::And)[0].terms, &["love".to_string()]);
    }

    #[test]
    fn empty_query_matches_nothing() {
        let s = searcher();
        for q in ["", "   ", "?!"] {
            let r = s.search(q, SearchMode::Or);
            assert_eq!(r.len(), 2);
            assert_eq!(count_matching(&r), 0);
        }
    }

    #[test]
    fn results_keep_document_order() {
        let s = searcher();
        let ids: Vec<DocId> = s.search("flies", SearchMode::Or).iter().map(|r| r.doc_id()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(s.document(2).map(|d| d.title.as_str()), Some("Document 2"));
        assert!(s.document(3).is_none());
    }
}
