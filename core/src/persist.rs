use crate::config::Configuration;
use crate::index::{DocId, Document};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

/// A sonnet as served by PoetryDB and stored in the cache file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sonnet {
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub lines: Vec<String>,
}

/// Assign ids 1..N in corpus order.
pub fn into_documents(sonnets: Vec<Sonnet>) -> Vec<Document> {
    sonnets
        .into_iter()
        .zip(1..)
        .map(|(s, id): (Sonnet, DocId)| Document::new(id, s.title, s.lines))
        .collect()
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    Ok(())
}

pub fn save_sonnet_cache(path: &Path, sonnets: &[Sonnet]) -> Result<()> {
    ensure_parent(path)?;
    let mut f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let json = serde_json::to_string_pretty(sonnets)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_sonnet_cache(path: &Path) -> Result<Vec<Sonnet>> {
    let mut f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let sonnets: Vec<Sonnet> =
        serde_json::from_str(&buf).with_context(|| format!("parsing sonnet cache {}", path.display()))?;
    Ok(sonnets)
}

pub fn save_config(path: &Path, config: &Configuration) -> Result<()> {
    ensure_parent(path)?;
    let mut f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let json = serde_json::to_string_pretty(config)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

/// Load the configuration; a missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<Configuration> {
    let mut f = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Configuration::default());
        }
        Err(e) => return Err(e).with_context(|| format!("opening {}", path.display())),
    };
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let config: Configuration =
        serde_json::from_str(&buf).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}
