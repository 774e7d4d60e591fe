use anyhow::{bail, Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How multi-term queries combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SearchMode {
    /// every term must occur
    #[default]
    And,
    /// at least one term must occur
    Or,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchMode::And => "AND",
            SearchMode::Or => "OR",
        })
    }
}

impl FromStr for SearchMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "AND" => Ok(SearchMode::And),
            "OR" => Ok(SearchMode::Or),
            other => bail!("unknown search mode {other:?} (expected AND or OR)"),
        }
    }
}

/// Highlight style; `Green` is the alternate color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HighlightMode {
    #[default]
    Default,
    Green,
}

impl fmt::Display for HighlightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HighlightMode::Default => "DEFAULT",
            HighlightMode::Green => "GREEN",
        })
    }
}

impl FromStr for HighlightMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEFAULT" => Ok(HighlightMode::Default),
            "GREEN" => Ok(HighlightMode::Green),
            other => bail!("unknown highlight mode {other:?} (expected DEFAULT or GREEN)"),
        }
    }
}

/// User settings. Persisted as JSON by [`crate::persist`]; the core only reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub highlight: bool,
    pub search_mode: SearchMode,
    pub hl_mode: HighlightMode,
}

impl Default for Configuration {
    fn default() -> Self {
        Self { highlight: true, search_mode: SearchMode::And, hl_mode: HighlightMode::Default }
    }
}

impl Configuration {
    /// Highlight style to render with, or `None` when highlighting is off.
    pub fn active_highlight(&self) -> Option<HighlightMode> {
        self.highlight.then_some(self.hl_mode)
    }
}
