use std::env;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::state::{MatchDetail, MatchSummary};

const DEFAULT_BASE_URL: &str = "https://api.cricapi.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 10;

static CLIENT: OnceCell<Client> = OnceCell::new();

fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")
    })
}

/// Endpoint base and access key, resolved from the environment once per
/// provider start. The key is never baked into the binary.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let base_url = env::var("CRICAPI_BASE_URL")
            .ok()
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_key = env::var("CRICAPI_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        Self { base_url, api_key }
    }

    fn key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .context("CRICAPI_KEY is not set")
    }
}

// Every response wraps its payload in a `data` field next to quota metadata
// we do not consume.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    data: Option<T>,
}

pub fn fetch_all_matches(config: &ApiConfig) -> Result<Vec<MatchSummary>> {
    let url = format!(
        "{}/matches?apikey={}&offset=0",
        config.base_url,
        config.key()?
    );
    let body = get_text(&url).context("matches request failed")?;
    parse_matches_json(&body)
}

pub fn fetch_current_matches(config: &ApiConfig) -> Result<Vec<MatchSummary>> {
    let url = format!(
        "{}/currentMatches?apikey={}&offset=0",
        config.base_url,
        config.key()?
    );
    let body = get_text(&url).context("currentMatches request failed")?;
    parse_matches_json(&body)
}

pub fn fetch_match_detail(config: &ApiConfig, match_id: &str) -> Result<MatchDetail> {
    let url = format!(
        "{}/match_info?apikey={}&id={}",
        config.base_url,
        config.key()?,
        match_id
    );
    let body = get_text(&url).context("match_info request failed")?;
    parse_match_detail_json(&body)
}

fn get_text(url: &str) -> Result<String> {
    let client = http_client()?;
    let response = client.get(url).send().context("transport error")?;
    let status = response.status();
    if !status.is_success() {
        bail!("unexpected status {status}");
    }
    response.text().context("failed to read response body")
}

/// A missing or null `data` field is an empty listing, matching the consumer
/// contract for the two list endpoints.
pub fn parse_matches_json(raw: &str) -> Result<Vec<MatchSummary>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let envelope: Envelope<Vec<MatchSummary>> =
        serde_json::from_str(trimmed).context("invalid matches json")?;
    Ok(envelope.data.unwrap_or_default())
}

/// Unlike the listings, a detail response without `data` carries nothing to
/// render and counts as a failure.
pub fn parse_match_detail_json(raw: &str) -> Result<MatchDetail> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        bail!("empty match_info response");
    }
    let envelope: Envelope<MatchDetail> =
        serde_json::from_str(trimmed).context("invalid match_info json")?;
    envelope.data.context("match_info response has no data")
}
