/// Link records produced by search engine adapters
use crate::model::status::HttpStatusOutcome;
use std::fmt;

/// Identifies which search engine adapter produced a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceEngine {
    /// Web-search provider (Bing Web Search)
    Web,

    /// General search provider (Google Custom Search)
    General,
}

impl SourceEngine {
    /// Returns the provider name shown to users
    pub fn name(&self) -> &'static str {
        match self {
            Self::Web => "Bing",
            Self::General => "Google",
        }
    }

    /// Returns all engines in invocation order
    pub fn all() -> &'static [SourceEngine] {
        &[Self::Web, Self::General]
    }
}

impl fmt::Display for SourceEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One discovered link and, once probed, its status outcome
///
/// Fields are private: `status` is absent when an adapter creates the
/// record and can only be set by consuming the record with
/// [`LinkResult::into_verified`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkResult {
    title: String,
    url: String,
    source_engine: SourceEngine,
    status: Option<HttpStatusOutcome>,
}

impl LinkResult {
    /// Creates an unverified link record
    pub fn new(title: impl Into<String>, url: impl Into<String>, source_engine: SourceEngine) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            source_engine,
            status: None,
        }
    }

    /// Returns the result title as reported by the provider
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the absolute URL of the link
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the engine that produced this link
    pub fn source_engine(&self) -> SourceEngine {
        self.source_engine
    }

    /// Returns the probe outcome, if the link has been verified
    pub fn status(&self) -> Option<&HttpStatusOutcome> {
        self.status.as_ref()
    }

    /// Returns true if the link has been probed
    pub fn is_verified(&self) -> bool {
        self.status.is_some()
    }

    /// Consumes the record and returns it with the probe outcome attached
    pub fn into_verified(self, outcome: HttpStatusOutcome) -> Self {
        Self {
            status: Some(outcome),
            ..self
        }
    }
}
