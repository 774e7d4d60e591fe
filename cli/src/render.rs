use sonnet_core::highlight::mark_line;
use sonnet_core::{count_matching, HighlightMode, SearchResult, Searcher};
use std::io::{self, Write};

pub const BANNER: &str = r"
 ____                        _
/ ___|  ___  _ __  _ __   ___| |_ ___
\___ \ / _ \| '_ \| '_ \ / _ \ __/ __|
 ___) | (_) | | | | | | |  __/ |_\__ \
|____/ \___/|_| |_|_| |_|\___|\__|___/

Search Shakespeare's sonnets. Type :help for commands.";

const RESET: &str = "\x1b[0m";

fn style(mode: HighlightMode) -> &'static str {
    match mode {
        HighlightMode::Default => "\x1b[30;43m",
        HighlightMode::Green => "\x1b[30;42m",
    }
}

pub fn report_line(query: &str, matched: usize, total: usize, elapsed_ms: Option<f64>) -> String {
    let mut line = format!("{matched} out of {total} sonnets contain \"{query}\".");
    if let Some(ms) = elapsed_ms {
        line.push_str(&format!(" Your query took {ms:.2}ms."));
    }
    line
}

/// Report line, then one block per matched sonnet in id order.
pub fn write_results<W: Write>(
    out: &mut W,
    searcher: &Searcher,
    query: &str,
    results: &[SearchResult<'_>],
    highlight: Option<HighlightMode>,
    elapsed_ms: Option<f64>,
) -> io::Result<()> {
    let total = results.len();
    writeln!(out, "{}", report_line(query, count_matching(results), total, elapsed_ms))?;

    for (idx, result) in results.iter().filter(|r| r.is_match()).enumerate() {
        let doc = result.document;
        writeln!(out)?;
        let noun = if result.matches == 1 { "match" } else { "matches" };
        writeln!(out, "[{}/{}] {} ({} {noun})", idx + 1, total, doc.title, result.matches)?;
        match highlight {
            Some(mode) => {
                let spans = searcher.spans(result);
                for (line_no, line) in doc.lines.iter().enumerate() {
                    writeln!(out, "  {}", mark_line(line, line_no as u32, &spans, style(mode), RESET))?;
                }
            }
            None => {
                for line in &doc.lines {
                    writeln!(out, "  {line}")?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonnet_core::{Document, SearchMode};

    fn searcher() -> Searcher {
        Searcher::new(vec![Document::from_text(1, "Love is not love"), Document::from_text(2, "Time flies")]).unwrap()
    }

    fn render(searcher: &Searcher, query: &str, mode: SearchMode, highlight: Option<HighlightMode>) -> String {
        let results = searcher.search(query, mode);
        let mut buf = Vec::new();
        write_results(&mut buf, searcher, query, &results, highlight, None).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn report_lines() {
        assert_eq!(report_line("love", 1, 2, None), "1 out of 2 sonnets contain \"love\".");
        assert_eq!(
            report_line("love time", 0, 2, Some(0.1234)),
            "0 out of 2 sonnets contain \"love time\". Your query took 0.12ms."
        );
    }

    #[test]
    fn lists_only_matched_sonnets() {
        let s = searcher();
        let text = render(&s, "love time", SearchMode::Or, None);
        assert!(text.starts_with("2 out of 2 sonnets contain \"love time\"."));
        assert!(text.contains("[1/2] Document 1 (2 matches)"));
        assert!(text.contains("[2/2] Document 2 (1 match)"));

        let text = render(&s, "love", SearchMode::Or, None);
        assert!(text.starts_with("1 out of 2 sonnets contain \"love\"."));
        assert!(!text.contains("Time flies"));
    }

    #[test]
    fn highlights_with_the_selected_style() {
        let s = searcher();
        let text = render(&s, "love", SearchMode::And, Some(HighlightMode::Green));
        assert!(text.contains("  \x1b[30;42mLove\x1b[0m is not \x1b[30;42mlove\x1b[0m"));
        let text = render(&s, "love", SearchMode::And, Some(HighlightMode::Default));
        assert!(text.contains("\x1b[30;43mLove\x1b[0m"));
        let plain = render(&s, "love", SearchMode::And, None);
        assert!(!plain.contains('\x1b'));
    }
}
