//! Data model for discovered links
//!
//! # Components
//!
//! - `LinkResult`: One link returned by a search engine, plus its probe outcome
//! - `SourceEngine`: Which search engine adapter produced a link
//! - `HttpStatusOutcome`: The result of probing a link (status code or unreachable marker)

mod link_result;
mod status;

// Re-export main types
pub use link_result::{LinkResult, SourceEngine};
pub use status::{HttpStatusOutcome, ProbeFailure, StatusClass};
