//! Read-eval-print loop. Line handling lives in [`Session`] so it can be
//! driven without a terminal.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use sonnet_core::persist::save_config;
use sonnet_core::{Configuration, Searcher};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use crate::commands::{parse_line, Command, HELP};
use crate::render::write_results;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    searcher: Searcher,
    config: Configuration,
    config_path: PathBuf,
}

impl Session {
    pub fn new(searcher: Searcher, config: Configuration, config_path: PathBuf) -> Self {
        Self { searcher, config, config_path }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn handle<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        let Some(command) = parse_line(line) else {
            return Ok(Flow::Continue);
        };
        match command {
            Command::Quit => {
                writeln!(out, "Bye.")?;
                return Ok(Flow::Quit);
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Set(setting) => {
                setting.apply(&mut self.config);
                writeln!(out, "{}", setting.describe())?;
                if let Err(e) = save_config(&self.config_path, &self.config) {
                    tracing::warn!(error = %e, path = %self.config_path.display(), "failed to save config");
                }
            }
            Command::Usage(usage) => writeln!(out, "{usage}")?,
            Command::Unknown => writeln!(out, "Unknown command. Type :help for commands.")?,
            Command::Query(query) => {
                let start = Instant::now();
                let results = self.searcher.search(query, self.config.search_mode);
                let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
                write_results(out, &self.searcher, query, &results, self.config.active_highlight(), Some(elapsed_ms))?;
            }
        }
        Ok(Flow::Continue)
    }
}

/// Run the interactive loop until `:quit`, Ctrl-C or Ctrl-D.
pub fn run(session: &mut Session) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let stdout = io::stdout();
    loop {
        match rl.readline("> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.trim());
                }
                let mut out = stdout.lock();
                if session.handle(&line, &mut out)? == Flow::Quit {
                    break;
                }
                out.flush()?;
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!("\nBye.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}
