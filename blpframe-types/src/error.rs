use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A provider-side error envelope (`responseError` / `securityError`).
///
/// The provider reports failures in-band: the request itself was delivered,
/// but the response (or one security inside it) could not be served.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResponseError {
    /// Provider error category, e.g. `BAD_SEC` or `LIMIT`.
    pub category: String,
    /// Human-readable provider message.
    pub message: String,
    /// Security the error is attached to, when it came from a per-security envelope.
    pub security: Option<String>,
}

impl ResponseError {
    /// Build an envelope that applies to the whole response.
    pub fn new(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            message: message.into(),
            security: None,
        }
    }

    /// Attach the security this envelope was reported for.
    #[must_use]
    pub fn for_security(mut self, security: impl Into<String>) -> Self {
        self.security = Some(security.into());
        self
    }
}

impl core::fmt::Display for ResponseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.security {
            Some(sec) => write!(f, "{sec}: {} ({})", self.category, self.message),
            None => write!(f, "{} ({})", self.category, self.message),
        }
    }
}

fn join_envelopes(errors: &[ResponseError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Unified error type for the blpframe workspace.
///
/// Covers argument validation, session acquisition failures, provider-reported
/// envelopes, malformed messages, and request-level deadlines.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BlpError {
    /// Invalid input argument; raised before any session is created.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The underlying session could not be started.
    #[error("failed to start session")]
    SessionStart,

    /// The required provider service could not be opened.
    #[error("failed to open service {service}")]
    ServiceUnavailable {
        /// Service name, e.g. `//blp/refdata`.
        service: String,
    },

    /// One or more response messages carried a provider error envelope.
    #[error("request failed: {}", join_envelopes(.0))]
    ProviderResponse(Vec<ResponseError>),

    /// A message did not have the shape its request kind requires.
    #[error("data issue: {0}")]
    Data(String),

    /// The transport refused or failed to deliver the request.
    #[error("transport failure: {msg}")]
    Transport {
        /// Human-readable error message.
        msg: String,
    },

    /// The session terminated before the final response arrived.
    #[error("session terminated before the final response")]
    SessionTerminated,

    /// The request did not complete within the configured deadline.
    #[error("request timed out: {kind}")]
    RequestTimeout {
        /// Request kind label for which the request timed out.
        kind: String,
    },

    /// A per-ticker sub-request of a fan-out failed; the batch was aborted.
    #[error("request for {ticker} failed: {error}")]
    Ticker {
        /// Ticker whose sub-request failed.
        ticker: String,
        /// The underlying failure.
        error: Box<BlpError>,
    },
}

impl BlpError {
    /// Helper: build an `InvalidArg` error.
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }

    /// Helper: build a `ServiceUnavailable` error for a service name.
    pub fn service_unavailable(service: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            service: service.into(),
        }
    }

    /// Helper: build a `Transport` error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport { msg: msg.into() }
    }

    /// Helper: build a `RequestTimeout` error.
    pub fn request_timeout(kind: impl Into<String>) -> Self {
        Self::RequestTimeout { kind: kind.into() }
    }

    /// Helper: wrap an error with the ticker whose sub-request produced it.
    pub fn ticker(ticker: impl Into<String>, error: Self) -> Self {
        Self::Ticker {
            ticker: ticker.into(),
            error: Box::new(error),
        }
    }

    /// Returns true if the provider itself reported the failure.
    ///
    /// Looks through `Ticker` wrappers.
    #[must_use]
    pub fn is_provider_error(&self) -> bool {
        match self {
            Self::ProviderResponse(_) => true,
            Self::Ticker { error, .. } => error.is_provider_error(),
            _ => false,
        }
    }

    /// Returns the ticker context and the innermost error.
    #[must_use]
    pub fn ticker_context(&self) -> (Option<&str>, &Self) {
        match self {
            Self::Ticker { ticker, error } => (Some(ticker.as_str()), error.as_ref()),
            other => (None, other),
        }
    }

    /// Provider envelopes carried by this error, if any.
    #[must_use]
    pub fn response_errors(&self) -> &[ResponseError] {
        match self {
            Self::ProviderResponse(list) => list,
            Self::Ticker { error, .. } => error.response_errors(),
            _ => &[],
        }
    }
}
