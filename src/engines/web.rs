//! Web-search adapter for the Bing Web Search v7 API
//!
//! Requests are authenticated with the `Ocp-Apim-Subscription-Key` header
//! and paged with `count`/`offset`. Links come from `webPages.value[]`.

use crate::config::{WebCredentials, WebEngineConfig};
use crate::engines::{normalize_entry, parse_json, send_search_request, SearchProvider};
use crate::model::{LinkResult, SourceEngine};
use crate::AdapterResult;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Header carrying the subscription key
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Largest `count` the API accepts per request
const PAGE_SIZE: u32 = 50;

/// Bing Web Search adapter
pub struct WebSearchAdapter {
    client: Client,
    endpoint: String,
    credentials: WebCredentials,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct BingResponse {
    #[serde(rename = "webPages")]
    web_pages: Option<BingWebPages>,
}

#[derive(Debug, Deserialize)]
struct BingWebPages {
    #[serde(rename = "totalEstimatedMatches")]
    total_estimated_matches: Option<u64>,
    #[serde(default)]
    value: Vec<BingWebPage>,
}

#[derive(Debug, Deserialize)]
struct BingWebPage {
    name: Option<String>,
    url: Option<String>,
}

/// One page of normalized results
#[derive(Debug)]
struct WebPage {
    results: Vec<LinkResult>,
    total_estimated_matches: Option<u64>,
}

impl WebSearchAdapter {
    /// Creates an adapter from the engine settings and credentials
    pub fn new(client: Client, config: &WebEngineConfig, credentials: WebCredentials) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            credentials,
            max_results: config.max_results,
        }
    }

    async fn fetch_page(&self, query: &str, count: u32, offset: u32) -> AdapterResult<WebPage> {
        tracing::debug!(count, offset, "Bing search page request");

        let count = count.to_string();
        let offset = offset.to_string();
        let request = self
            .client
            .get(&self.endpoint)
            .header(SUBSCRIPTION_KEY_HEADER, &self.credentials.subscription_key)
            .query(&[
                ("q", query),
                ("count", count.as_str()),
                ("offset", offset.as_str()),
            ]);

        let body = send_search_request(SourceEngine::Web, request).await?;
        parse_web_page(&body)
    }
}

#[async_trait]
impl SearchProvider for WebSearchAdapter {
    fn engine(&self) -> SourceEngine {
        SourceEngine::Web
    }

    async fn fetch(&self, query: &str) -> AdapterResult<Vec<LinkResult>> {
        let max = self.max_results as usize;
        let mut results: Vec<LinkResult> = Vec::new();
        let mut offset: u32 = 0;

        while results.len() < max {
            let remaining = (max - results.len()) as u32;
            let page = self
                .fetch_page(query, remaining.min(PAGE_SIZE), offset)
                .await?;

            if page.results.is_empty() {
                break;
            }

            offset += page.results.len() as u32;
            results.extend(page.results);

            if let Some(total) = page.total_estimated_matches {
                if u64::from(offset) >= total {
                    break;
                }
            }
        }

        results.truncate(max);
        tracing::debug!(count = results.len(), "Bing search complete");
        Ok(results)
    }
}

/// Parses one Bing response body
///
/// A response without `webPages` means the query matched nothing.
fn parse_web_page(body: &str) -> AdapterResult<WebPage> {
    let response: BingResponse = parse_json(SourceEngine::Web, body)?;

    let Some(web_pages) = response.web_pages else {
        return Ok(WebPage {
            results: Vec::new(),
            total_estimated_matches: Some(0),
        });
    };

    let results = web_pages
        .value
        .into_iter()
        .map(|page| normalize_entry(SourceEngine::Web, page.name, page.url))
        .collect::<AdapterResult<Vec<_>>>()?;

    Ok(WebPage {
        results,
        total_estimated_matches: web_pages.total_estimated_matches,
    })
}
