/// Link probe outcomes
///
/// This module defines what a link probe can conclude about a URL.
use std::fmt;

/// Why a link could not be probed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeFailure {
    /// The request did not complete within the probe timeout
    Timeout,

    /// The host name could not be resolved
    Dns,

    /// The remote host refused or dropped the connection
    ConnectionRefused,

    /// The URL could not be parsed or has an unsupported scheme
    MalformedUrl,

    /// Any other transport failure (TLS, protocol, body errors)
    Other,
}

impl ProbeFailure {
    /// Short label used in console and CSV output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Dns => "dns",
            Self::ConnectionRefused => "connection_refused",
            Self::MalformedUrl => "malformed_url",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of probing a link's liveness
///
/// Exactly one of the two variants holds: either the server answered with
/// a status code (any code, success or not), or no answer was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpStatusOutcome {
    /// The server answered with this HTTP status code
    Status(u16),

    /// No HTTP response could be obtained
    Unreachable {
        /// Failure category
        cause: ProbeFailure,
        /// Underlying error description
        detail: String,
    },
}

/// Coarse grouping of outcomes used for run summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusClass {
    Informational,
    Success,
    Redirection,
    ClientError,
    ServerError,
    Unreachable,
}

impl StatusClass {
    /// Returns the label shown in summaries
    pub fn label(&self) -> &'static str {
        match self {
            Self::Informational => "1xx",
            Self::Success => "2xx",
            Self::Redirection => "3xx",
            Self::ClientError => "4xx",
            Self::ServerError => "5xx",
            Self::Unreachable => "unreachable",
        }
    }
}

impl HttpStatusOutcome {
    /// Creates an unreachable outcome
    pub fn unreachable(cause: ProbeFailure, detail: impl Into<String>) -> Self {
        Self::Unreachable {
            cause,
            detail: detail.into(),
        }
    }

    /// Returns the numeric status code, if the server answered
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            Self::Unreachable { .. } => None,
        }
    }

    /// Returns true if the server answered with a 2xx code
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Status(code) if (200..300).contains(code))
    }

    /// Returns true if no response was obtained
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }

    /// Groups this outcome into a status class
    pub fn status_class(&self) -> StatusClass {
        match self {
            Self::Status(code) => match code {
                100..=199 => StatusClass::Informational,
                200..=299 => StatusClass::Success,
                300..=399 => StatusClass::Redirection,
                400..=499 => StatusClass::ClientError,
                _ => StatusClass::ServerError,
            },
            Self::Unreachable { .. } => StatusClass::Unreachable,
        }
    }
}

impl fmt::Display for HttpStatusOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code) => write!(f, "{}", code),
            Self::Unreachable { cause, detail } => write!(f, "unreachable ({}: {})", cause, detail),
        }
    }
}
