use crate::index::{DocId, PositionalIndex};
use serde::Serialize;

/// A word to mark: byte range `start..end` of line `line`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub line: u32,
    pub start: usize,
    pub end: usize,
    pub term: String,
}

/// Spans for every indexed position of `terms` in `doc_id`, sorted by
/// line then offset. Tokens never overlap, so neither do the spans.
pub fn highlight_spans(index: &PositionalIndex, doc_id: DocId, terms: &[String]) -> Vec<Span> {
    let tokens = index.tokens(doc_id);
    let mut spans: Vec<Span> = Vec::new();
    for term in terms {
        for &pos in index.positions(term, doc_id) {
            // positions are dense, so the token at slot `pos` is the one indexed
            if let Some(token) = tokens.get(pos as usize) {
                spans.push(Span { line: token.line, start: token.start, end: token.end, term: term.clone() });
            }
        }
    }
    spans.sort_by_key(|s| (s.line, s.start));
    spans.dedup_by_key(|s| (s.line, s.start));
    spans
}

/// Wrap each span of `line_no` in `open`/`close`. Spans on other lines are ignored.
pub fn mark_line(line: &str, line_no: u32, spans: &[Span], open: &str, close: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut cursor = 0;
    for span in spans.iter().filter(|s| s.line == line_no) {
        if span.start < cursor || span.end > line.len() {
            continue;
        }
        out.push_str(&line[cursor..span.start]);
        out.push_str(open);
        out.push_str(&line[span.start..span.end]);
        out.push_str(close);
        cursor = span.end;
    }
    out.push_str(&line[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Document;

    fn index() -> PositionalIndex {
        PositionalIndex::build(&[
            Document::from_text(1, "Love is not love\nWhich alters when it alteration finds,"),
            Document::from_text(2, "Time flies"),
        ])
        .unwrap()
    }

    #[test]
    fn spans_follow_index_positions() {
        let idx = index();
        let spans = highlight_spans(&idx, 1, &["love".into(), "finds".into()]);
        let ranges: Vec<(u32, usize, usize)> = spans.iter().map(|s| (s.line, s.start, s.end)).collect();
        assert_eq!(ranges, vec![(0, 0, 4), (0, 12, 16), (1, 32, 37)]);
    }

    #[test]
    fn no_spans_for_absent_terms() {
        let idx = index();
        assert!(highlight_spans(&idx, 2, &["love".into()]).is_empty());
        assert!(highlight_spans(&idx, 9, &["love".into()]).is_empty());
    }

    #[test]
    fn duplicate_terms_do_not_duplicate_spans() {
        let idx = index();
        let spans = highlight_spans(&idx, 1, &["love".into(), "love".into()]);
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn marks_only_the_word_core() {
        let line = "Which alters when it alteration finds,";
        let spans = vec![Span { line: 0, start: 32, end: 37, term: "finds".into() }];
        assert_eq!(mark_line(line, 0, &spans, "[", "]"), "Which alters when it alteration [finds],");
        assert_eq!(mark_line(line, 1, &spans, "[", "]"), line);
    }
}
