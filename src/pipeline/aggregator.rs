//! Result aggregation - main search orchestration logic
//!
//! This module runs the eligible search adapters one after another,
//! concatenates their links in invocation order and probes each link.
//! An adapter failure is logged and the run continues with the rest;
//! only a run in which every adapter fails is an error.

use crate::config::SearchConfig;
use crate::engines::{GeneralSearchAdapter, SearchProvider, WebSearchAdapter};
use crate::model::{LinkResult, SourceEngine};
use crate::pipeline::fetcher::{build_probe_client, build_search_client};
use crate::pipeline::verifier::LinkVerifier;
use crate::{AdapterError, FossickError};

/// Outcome of a successful aggregation
#[derive(Debug)]
pub struct AggregateReport {
    /// Verified links, in adapter order then provider order
    pub results: Vec<LinkResult>,

    /// Adapters that failed; one entry per failed adapter
    pub warnings: Vec<AdapterError>,
}

/// Runs adapters and verification for one query
pub struct ResultAggregator {
    providers: Vec<Box<dyn SearchProvider>>,
    verifier: LinkVerifier,
}

impl ResultAggregator {
    /// Creates an aggregator over explicit providers
    ///
    /// Providers are invoked in the order given.
    pub fn new(providers: Vec<Box<dyn SearchProvider>>, verifier: LinkVerifier) -> Self {
        Self {
            providers,
            verifier,
        }
    }

    /// Creates an aggregator with one adapter per eligible engine
    ///
    /// # Returns
    ///
    /// * `Ok(ResultAggregator)` - Adapters for every engine with credentials
    /// * `Err(FossickError)` - An HTTP client could not be built
    pub fn from_config(config: &SearchConfig) -> Result<Self, FossickError> {
        let settings = config.settings();
        let search_client = build_search_client(&settings.http)?;
        let verifier = LinkVerifier::new(build_probe_client(&settings.http)?);

        let mut providers: Vec<Box<dyn SearchProvider>> = Vec::new();
        for engine in config.eligible_engines() {
            match engine {
                SourceEngine::Web => {
                    if let Some(credentials) = config.web_credentials() {
                        providers.push(Box::new(WebSearchAdapter::new(
                            search_client.clone(),
                            &settings.web,
                            credentials.clone(),
                        )));
                    }
                }
                SourceEngine::General => {
                    if let Some(credentials) = config.general_credentials() {
                        providers.push(Box::new(GeneralSearchAdapter::new(
                            search_client.clone(),
                            &settings.general,
                            credentials.clone(),
                        )));
                    }
                }
            }
        }

        Ok(Self::new(providers, verifier))
    }

    /// Returns the engines this aggregator will query, in order
    pub fn engines(&self) -> Vec<SourceEngine> {
        self.providers.iter().map(|p| p.engine()).collect()
    }

    /// Runs every adapter, then probes every collected link
    ///
    /// # Returns
    ///
    /// * `Ok(AggregateReport)` - At least one adapter succeeded
    /// * `Err(FossickError::NoResults)` - Every adapter failed, or none was configured
    pub async fn run(&self, query: &str) -> Result<AggregateReport, FossickError> {
        if self.providers.is_empty() {
            return Err(FossickError::NoResults(
                "no search engine configured".to_string(),
            ));
        }

        let mut collected: Vec<LinkResult> = Vec::new();
        let mut warnings: Vec<AdapterError> = Vec::new();

        for provider in &self.providers {
            let engine = provider.engine();
            tracing::info!("Querying {} for '{}'", engine, query);

            match provider.fetch(query).await {
                Ok(links) => {
                    tracing::info!("{} returned {} links", engine, links.len());
                    collected.extend(links);
                }
                Err(e) => {
                    tracing::warn!("[!] {} search failed, continuing without it: {}", engine, e);
                    warnings.push(e);
                }
            }
        }

        if warnings.len() == self.providers.len() {
            let reasons = warnings
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(FossickError::NoResults(reasons));
        }

        tracing::info!("Checking status of {} links", collected.len());

        let total = collected.len();
        let mut results = Vec::with_capacity(total);
        for (index, link) in collected.into_iter().enumerate() {
            tracing::debug!("[{}/{}] Probing {}", index + 1, total, link.url());
            results.push(self.verifier.verify(link).await);
        }

        Ok(AggregateReport { results, warnings })
    }
}
