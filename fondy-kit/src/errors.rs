use std::fmt::Display;

use fondy_core::{
    request::Request,
    transport::{Endpoint, KeyKind, TransportError},
};
use url::Url;

/// Errors raised by [`FondyClient`](crate::client::FondyClient) while executing one call.
///
/// Every per-call variant carries the request id sent as `X-Request-ID`, so a
/// failure can be matched against gateway-side logs.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("[{request_id}] Invalid URL for endpoint {endpoint}: {source}")]
    Url {
        request_id: String,
        endpoint: Endpoint,
        #[source]
        source: url::ParseError,
    },

    #[error("[{request_id}] Failed to sign request for {url} with {key:?} key: {source}")]
    Signing {
        request_id: String,
        url: Url,
        key: KeyKind,
        #[source]
        source: fondy_core::errors::Error,
    },

    #[error("[{request_id}] Failed to serialize request for {url}: {source}")]
    Serialization {
        request_id: String,
        url: Url,
        #[source]
        source: fondy_core::errors::Error,
    },

    #[error("[{request_id}] HTTP request to {url} failed: {source}")]
    Request {
        request_id: String,
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("[{request_id}] Failed to read response body from {url}: {source}")]
    Body {
        request_id: String,
        url: Url,
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    /// Whether the call gave up because a deadline elapsed.
    pub fn is_timeout(&self) -> bool {
        match self {
            ClientError::Request { source, .. } | ClientError::Body { source, .. } => {
                source.is_timeout()
            }
            _ => false,
        }
    }
}

impl TransportError for ClientError {
    fn request_id(&self) -> Option<&str> {
        match self {
            ClientError::Build(_) => None,
            ClientError::Url { request_id, .. }
            | ClientError::Signing { request_id, .. }
            | ClientError::Serialization { request_id, .. }
            | ClientError::Request { request_id, .. }
            | ClientError::Body { request_id, .. } => Some(request_id.as_str()),
        }
    }
}

/// Classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The call did not complete: signing, dial, TLS, timeout, body read.
    Transport,
    /// The reply is not the JSON the operation expects.
    Decode,
    /// The reply decoded but lacks the operation's payload.
    MissingData,
    /// The gateway rejected the call.
    Gateway,
}

impl ErrorCode {
    pub fn code(&self) -> u16 {
        match self {
            ErrorCode::Transport => 800,
            ErrorCode::Decode => 801,
            ErrorCode::MissingData => 802,
            ErrorCode::Gateway => 803,
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The error returned by every [`Gateway`](crate::gateway::Gateway) operation.
///
/// Carries the signed request as it was sent and, when the gateway answered,
/// the raw reply.
#[derive(Debug, thiserror::Error)]
#[error("{message} (code {code})")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    /// Correlation id of the call, when one was generated.
    pub request_id: Option<String>,
    pub request: Box<Request>,
    pub response: Option<Vec<u8>>,
}

impl ApiError {
    /// Raw reply as text, for logs.
    pub fn response_text(&self) -> Option<String> {
        self.response
            .as_deref()
            .map(|body| String::from_utf8_lossy(body).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorCode::Transport.code(), 800);
        assert_eq!(ErrorCode::Decode.code(), 801);
        assert_eq!(ErrorCode::MissingData.code(), 802);
        assert_eq!(ErrorCode::Gateway.to_string(), "803");
    }

    #[test]
    fn test_api_error_display_and_source() {
        let cause = ClientError::Signing {
            request_id: "req-1".into(),
            url: Url::parse("https://pay.fondy.eu/api/p2pcredit/").unwrap(),
            key: KeyKind::Credit,
            source: fondy_core::errors::Error::MissingSigningKey,
        };
        let error = ApiError {
            code: ErrorCode::Transport,
            message: "transport failure".into(),
            source: Some(Box::new(cause)),
            request_id: Some("req-1".into()),
            request: Box::default(),
            response: None,
        };

        assert_eq!(error.to_string(), "transport failure (code 800)");
        let cause = error.source().unwrap().to_string();
        assert!(cause.contains("Signing key is empty"));
        assert!(cause.contains("https://pay.fondy.eu/api/p2pcredit/"));
        assert!(error.response_text().is_none());
    }

    #[test]
    fn test_client_error_request_id() {
        let error = ClientError::Url {
            request_id: "req-2".into(),
            endpoint: Endpoint::Recurring,
            source: url::ParseError::EmptyHost,
        };
        assert_eq!(error.request_id(), Some("req-2"));
        assert!(!error.is_timeout());
        assert!(error.to_string().starts_with("[req-2]"));
    }
}
