use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref FRAGMENT: Regex = Regex::new(r"\S+").expect("valid regex");
}

/// A retained word of a document.
///
/// `position` counts retained tokens only, so pure-punctuation fragments never
/// take a slot. `start..end` is the byte range of the normalized core of the
/// word inside line `line` (surrounding punctuation excluded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub term: String,
    pub position: u32,
    pub line: u32,
    pub start: usize,
    pub end: usize,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// Byte range of `fragment` left after stripping leading and trailing
/// punctuation, or `None` when nothing is left.
fn word_core(fragment: &str) -> Option<(usize, usize)> {
    let start = fragment.len() - fragment.trim_start_matches(|c: char| !is_word_char(c)).len();
    let end = fragment.trim_end_matches(|c: char| !is_word_char(c)).len();
    (start < end).then_some((start, end))
}

/// Normalize a single word: strip surrounding punctuation and lowercase.
pub fn normalize(word: &str) -> Option<String> {
    word_core(word).map(|(s, e)| word[s..e].to_lowercase())
}

/// Tokenize a document given as lines, in reading order (line then word).
pub fn tokenize_lines<S: AsRef<str>>(lines: &[S]) -> Vec<Token> {
    let mut tokens = Vec::new();
    for (line_no, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        for mat in FRAGMENT.find_iter(line) {
            let Some((s, e)) = word_core(mat.as_str()) else {
                continue;
            };
            tokens.push(Token {
                term: mat.as_str()[s..e].to_lowercase(),
                position: tokens.len() as u32,
                line: line_no as u32,
                start: mat.start() + s,
                end: mat.start() + e,
            });
        }
    }
    tokens
}

/// Tokenize free text, splitting it into lines first.
pub fn tokenize(text: &str) -> Vec<Token> {
    let lines: Vec<&str> = text.lines().collect();
    tokenize_lines(&lines)
}

/// Terms of a raw query: same normalization as indexing, first occurrence
/// of each term kept, order preserved.
pub fn query_terms(raw: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for token in tokenize(raw) {
        if !terms.contains(&token.term) {
            terms.push(token.term);
        }
    }
    terms
}
