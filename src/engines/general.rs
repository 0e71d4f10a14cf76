//! General search adapter for the Google Custom Search JSON API
//!
//! Requests carry the API key (`key`) and engine ID (`cx`) as query
//! parameters. The API returns at most 10 items per request and never
//! serves results past position 100.

use crate::config::{GeneralCredentials, GeneralEngineConfig};
use crate::engines::{normalize_entry, parse_json, send_search_request, SearchProvider};
use crate::model::{LinkResult, SourceEngine};
use crate::AdapterResult;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Largest `num` the API accepts per request
const PAGE_SIZE: u32 = 10;

/// Highest result position the API will serve
const LAST_POSITION: u32 = 100;

/// Google Custom Search adapter
pub struct GeneralSearchAdapter {
    client: Client,
    endpoint: String,
    credentials: GeneralCredentials,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct CseResponse {
    items: Option<Vec<CseItem>>,
    queries: Option<CseQueries>,
}

#[derive(Debug, Deserialize)]
struct CseItem {
    title: Option<String>,
    link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CseQueries {
    #[serde(rename = "nextPage", default)]
    next_page: Vec<CseQuery>,
}

#[derive(Debug, Deserialize)]
struct CseQuery {
    #[serde(rename = "startIndex")]
    start_index: Option<u32>,
}

/// One page of normalized results
#[derive(Debug)]
struct GeneralPage {
    results: Vec<LinkResult>,
    next_start: Option<u32>,
}

impl GeneralSearchAdapter {
    /// Creates an adapter from the engine settings and credentials
    pub fn new(
        client: Client,
        config: &GeneralEngineConfig,
        credentials: GeneralCredentials,
    ) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            credentials,
            max_results: config.max_results,
        }
    }

    async fn fetch_page(&self, query: &str, start: u32, num: u32) -> AdapterResult<GeneralPage> {
        tracing::debug!(start, num, "Google search page request");

        let start = start.to_string();
        let num = num.to_string();
        let request = self.client.get(&self.endpoint).query(&[
            ("key", self.credentials.api_key.as_str()),
            ("cx", self.credentials.engine_id.as_str()),
            ("q", query),
            ("start", start.as_str()),
            ("num", num.as_str()),
        ]);

        let body = send_search_request(SourceEngine::General, request).await?;
        parse_general_page(&body)
    }
}

#[async_trait]
impl SearchProvider for GeneralSearchAdapter {
    fn engine(&self) -> SourceEngine {
        SourceEngine::General
    }

    async fn fetch(&self, query: &str) -> AdapterResult<Vec<LinkResult>> {
        let max = self.max_results.min(LAST_POSITION) as usize;
        let mut results: Vec<LinkResult> = Vec::new();
        let mut start: u32 = 1;

        while results.len() < max && start <= LAST_POSITION {
            let remaining = (max - results.len()) as u32;
            // start + num - 1 may not pass the last servable position
            let num = remaining
                .min(PAGE_SIZE)
                .min(LAST_POSITION - start + 1);

            let page = self.fetch_page(query, start, num).await?;

            if page.results.is_empty() {
                break;
            }
            results.extend(page.results);

            match page.next_start {
                Some(next) if next > start => start = next,
                _ => break,
            }
        }

        results.truncate(max);
        tracing::debug!(count = results.len(), "Google search complete");
        Ok(results)
    }
}

/// Parses one Custom Search response body
///
/// A response without `items` means there are no (more) results.
fn parse_general_page(body: &str) -> AdapterResult<GeneralPage> {
    let response: CseResponse = parse_json(SourceEngine::General, body)?;

    let results = response
        .items
        .unwrap_or_default()
        .into_iter()
        .map(|item| normalize_entry(SourceEngine::General, item.title, item.link))
        .collect::<AdapterResult<Vec<_>>>()?;

    let next_start = response
        .queries
        .and_then(|q| q.next_page.into_iter().next())
        .and_then(|next| next.start_index);

    Ok(GeneralPage {
        results,
        next_start,
    })
}
