//! Positional index and query evaluation over a small, static poem corpus.

pub mod config;
pub mod highlight;
pub mod index;
pub mod persist;
pub mod query;
pub mod tokenizer;

pub use config::{Configuration, HighlightMode, SearchMode};
pub use highlight::Span;
pub use index::{DocId, Document, PositionalIndex, Position};
pub use persist::Sonnet;
pub use query::{count_matching, SearchResult, Searcher};
