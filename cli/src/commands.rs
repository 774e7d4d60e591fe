use sonnet_core::{Configuration, HighlightMode, SearchMode};

pub const HELP: &str = "Commands:
  :help                         show this message
  :quit                         exit
  :highlight on|off             mark matching words in results
  :search-mode AND|OR           require all terms (AND) or any term (OR)
  :hl-mode DEFAULT|GREEN        highlight color
Anything else is a query.";

/// A validated change to one configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    Highlight(bool),
    SearchMode(SearchMode),
    HlMode(HighlightMode),
}

impl Setting {
    pub fn apply(self, config: &mut Configuration) {
        match self {
            Setting::Highlight(on) => config.highlight = on,
            Setting::SearchMode(mode) => config.search_mode = mode,
            Setting::HlMode(mode) => config.hl_mode = mode,
        }
    }

    /// Confirmation shown after the change.
    pub fn describe(self) -> String {
        match self {
            Setting::Highlight(on) => format!("Highlight set to {}", if on { "ON" } else { "OFF" }),
            Setting::SearchMode(mode) => format!("Search Mode set to {mode}"),
            Setting::HlMode(mode) => format!("Hl Mode set to {mode}"),
        }
    }
}

/// One row of the dispatch table.
pub struct SettingHandler {
    pub command: &'static str,
    pub values: &'static str,
    pub parse: fn(&str) -> Option<Setting>,
}

impl SettingHandler {
    pub fn usage(&self) -> String {
        format!("Usage: {} {}", self.command, self.values)
    }
}

fn parse_highlight(value: &str) -> Option<Setting> {
    match value.to_ascii_lowercase().as_str() {
        "on" => Some(Setting::Highlight(true)),
        "off" => Some(Setting::Highlight(false)),
        _ => None,
    }
}

fn parse_search_mode(value: &str) -> Option<Setting> {
    value.parse().ok().map(Setting::SearchMode)
}

fn parse_hl_mode(value: &str) -> Option<Setting> {
    value.parse().ok().map(Setting::HlMode)
}

pub static SETTINGS: &[SettingHandler] = &[
    SettingHandler { command: ":highlight", values: "on|off", parse: parse_highlight },
    SettingHandler { command: ":search-mode", values: "AND|OR", parse: parse_search_mode },
    SettingHandler { command: ":hl-mode", values: "DEFAULT|GREEN", parse: parse_hl_mode },
];

#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Quit,
    Help,
    Set(Setting),
    Usage(String),
    Unknown,
    Query(&'a str),
}

/// Classify one trimmed input line. `None` for blank input.
pub fn parse_line(line: &str) -> Option<Command<'_>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if !line.starts_with(':') {
        return Some(Command::Query(line));
    }
    match line {
        ":quit" => return Some(Command::Quit),
        ":help" => return Some(Command::Help),
        _ => {}
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(handler) = SETTINGS.iter().find(|h| h.command == parts[0]) else {
        return Some(Command::Unknown);
    };
    let setting = match parts.as_slice() {
        [_, value] => (handler.parse)(value),
        _ => None,
    };
    Some(match setting {
        Some(s) => Command::Set(s),
        None => Command::Usage(handler.usage()),
    })
}
