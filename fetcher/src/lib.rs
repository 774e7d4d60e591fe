//! Corpus acquisition: read the local cache, or download from PoetryDB and
//! write the cache.

use anyhow::{anyhow, bail, Context, Result};
use reqwest::{header, Client};
use sonnet_core::persist::{load_sonnet_cache, save_sonnet_cache};
use sonnet_core::Sonnet;
use std::path::Path;
use std::time::Duration;

pub const SONNETS_URL: &str = "https://poetrydb.org/author,title/Shakespeare;Sonnet";
pub const DEFAULT_USER_AGENT: &str = "sonnets-search/0.1";

pub fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client> {
    let client = Client::builder()
        .user_agent(user_agent)
        .redirect(reqwest::redirect::Policy::limited(5))
        .timeout(Duration::from_secs(timeout_secs))
        .build()?;
    Ok(client)
}

/// Number from a title like `"Sonnet 18: Shall I compare thee..."`.
pub fn sonnet_number(title: &str) -> Option<u32> {
    let rest = title.trim_start().strip_prefix("Sonnet")?.trim_start();
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Parse a PoetryDB response body. The API answers lookups it cannot
/// satisfy with an object such as `{"status": 404, "reason": "Not found"}`
/// instead of an array.
pub fn parse_poetrydb(body: &str) -> Result<Vec<Sonnet>> {
    let value: serde_json::Value = serde_json::from_str(body).context("PoetryDB response is not JSON")?;
    if let Some(obj) = value.as_object() {
        let reason = obj.get("reason").and_then(|r| r.as_str()).unwrap_or("unknown reason");
        bail!("PoetryDB returned no poems: {reason}");
    }
    if !value.is_array() {
        bail!("unexpected PoetryDB response");
    }
    let mut sonnets: Vec<Sonnet> = serde_json::from_value(value).context("unexpected PoetryDB record shape")?;
    if sonnets.is_empty() {
        bail!("PoetryDB returned an empty corpus");
    }
    // stable: titles without a number keep their relative order at the end
    sonnets.sort_by_key(|s| sonnet_number(&s.title).unwrap_or(u32::MAX));
    Ok(sonnets)
}

pub async fn fetch_sonnets(client: &Client, url: &str) -> Result<Vec<Sonnet>> {
    let resp = client
        .get(url)
        .header(header::ACCEPT, "application/json")
        .send()
        .await
        .with_context(|| format!("requesting {url}"))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(anyhow!("fetching {url}: HTTP {status}"));
    }
    let body = resp.text().await?;
    parse_poetrydb(&body)
}

/// Download the corpus and replace the cache file.
pub async fn refresh_cache(client: &Client, cache: &Path, url: &str) -> Result<Vec<Sonnet>> {
    let sonnets = fetch_sonnets(client, url).await?;
    save_sonnet_cache(cache, &sonnets)?;
    tracing::info!(count = sonnets.len(), cache = %cache.display(), "sonnet cache written");
    Ok(sonnets)
}

/// Cached corpus if present, otherwise a fresh download that is then cached.
pub async fn load_sonnets(cache: &Path, url: &str) -> Result<Vec<Sonnet>> {
    if cache.is_file() {
        let sonnets = load_sonnet_cache(cache)?;
        tracing::debug!(count = sonnets.len(), cache = %cache.display(), "loaded sonnets from cache");
        return Ok(sonnets);
    }
    tracing::info!(url, "no sonnet cache, downloading");
    let client = build_client(30, DEFAULT_USER_AGENT)?;
    refresh_cache(&client, cache, url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_from_titles() {
        assert_eq!(sonnet_number("Sonnet 18: Shall I compare thee to a summer's day?"), Some(18));
        assert_eq!(sonnet_number("Sonnet 154"), Some(154));
        assert_eq!(sonnet_number("A Lover's Complaint"), None);
    }

    #[test]
    fn parses_and_orders_records() {
        let body = r#"[
            {"title":"Sonnet 10: For shame deny that thou bear'st love to any","author":"William Shakespeare","lines":["For shame deny"],"linecount":"1"},
            {"title":"Sonnet 2: When forty winters shall besiege thy brow","author":"William Shakespeare","lines":["When forty winters"],"linecount":"1"}
        ]"#;
        let sonnets = parse_poetrydb(body).unwrap();
        assert_eq!(sonnet_number(&sonnets[0].title), Some(2));
        assert_eq!(sonnet_number(&sonnets[1].title), Some(10));
    }

    #[test]
    fn not_found_object_is_an_error() {
        let err = parse_poetrydb(r#"{"status":404,"reason":"Not found"}"#).unwrap_err();
        assert!(err.to_string().contains("Not found"));
        assert!(parse_poetrydb("[]").is_err());
        assert!(parse_poetrydb("<html>").is_err());
    }

    #[tokio::test]
    async fn cache_hit_skips_network() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("sonnets.json");
        let sonnets = vec![Sonnet { title: "Sonnet 1".into(), author: String::new(), lines: vec!["From fairest creatures".into()] }];
        save_sonnet_cache(&cache, &sonnets).unwrap();
        // unroutable URL: a cache miss would fail
        let loaded = load_sonnets(&cache, "http://127.0.0.1:9/never").await.unwrap();
        assert_eq!(loaded, sonnets);
    }
}
