//! Remote data client for the slug, detail, and extraction endpoints.
//!
//! Every GET carries a `_=<unix seconds>` parameter so intermediary caches
//! never serve a stale slug list. Requests share one timeout.

use crate::config::HttpConfig;
use crate::error::{FetchError, FetchResult};
use serde::Serialize;
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

/// Name of the cache-busting query parameter
pub const CACHE_BUSTER_PARAM: &str = "_";

/// Source of JSON documents, keyed by URL.
///
/// The coordinator only depends on this trait, so runs can be driven by an
/// in-memory source in tests.
#[allow(async_fn_in_trait)]
pub trait JsonFetcher {
    /// GET `url` with extra query parameters and parse the body as JSON
    async fn get_json(&self, url: &str, params: &[(&str, &str)]) -> FetchResult<Value>;
}

/// reqwest-backed HTTP client
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: reqwest::Client,
}

impl RemoteClient {
    /// Build a client with the configured timeout and user agent
    pub fn new(http: &HttpConfig) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(http.timeout())
            .user_agent(http.user_agent.clone())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }

    /// GET a page body as text (no cache-buster; used for scraping)
    pub async fn get_text(&self, url: &str) -> FetchResult<String> {
        let parsed = parse_url(url)?;
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| request_error(url, e))?;

        let response = check_status(url, response)?;
        response.text().await.map_err(|e| request_error(url, e))
    }

    /// POST a JSON body with bearer authentication and parse the JSON reply
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        bearer: &str,
        body: &B,
    ) -> FetchResult<Value> {
        let parsed = parse_url(url)?;
        let response = self
            .client
            .post(parsed)
            .bearer_auth(bearer)
            .json(body)
            .send()
            .await
            .map_err(|e| request_error(url, e))?;

        decode_json(url, check_status(url, response)?).await
    }
}

impl JsonFetcher for RemoteClient {
    async fn get_json(&self, url: &str, params: &[(&str, &str)]) -> FetchResult<Value> {
        let parsed = parse_url(url)?;
        let buster = cache_buster();

        tracing::debug!(url, "GET json");
        let response = self
            .client
            .get(parsed)
            .query(params)
            .query(&[(CACHE_BUSTER_PARAM, buster.as_str())])
            .send()
            .await
            .map_err(|e| request_error(url, e))?;

        decode_json(url, check_status(url, response)?).await
    }
}

fn parse_url(url: &str) -> FetchResult<reqwest::Url> {
    reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

fn request_error(url: &str, source: reqwest::Error) -> FetchError {
    FetchError::Request {
        url: url.to_string(),
        source,
    }
}

fn check_status(url: &str, response: reqwest::Response) -> FetchResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FetchError::Status {
            url: url.to_string(),
            status,
        })
    }
}

async fn decode_json(url: &str, response: reqwest::Response) -> FetchResult<Value> {
    let body = response.bytes().await.map_err(|e| request_error(url, e))?;
    serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// Current time in whole seconds
fn cache_buster() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
        .to_string()
}
