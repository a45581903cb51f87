//! Classification of call outcomes into [`ApiError`]s.

use fondy_core::{
    request::Request,
    response::{Response, ResponseBody},
    transport::{RawResponse, TransportError},
};

use crate::errors::{ApiError, ErrorCode};

/// A reply that decoded and was not rejected by the gateway, kept together with
/// the call context needed to report a missing payload.
#[derive(Debug)]
pub struct Decoded {
    pub body: ResponseBody,
    pub request_id: String,
    request: Request,
    raw: Vec<u8>,
}

impl Decoded {
    /// Extract the operation's payload; [`ErrorCode::MissingData`] if `extract` finds nothing.
    pub fn require<T>(
        self,
        field: &'static str,
        extract: impl FnOnce(&ResponseBody) -> Option<T>,
    ) -> Result<T, ApiError> {
        match extract(&self.body) {
            Some(value) => Ok(value),
            None => Err(self.missing(field)),
        }
    }

    /// Like [`Decoded::require`], for payloads that are parsed further.
    /// A parse failure is an [`ErrorCode::Decode`] error.
    pub fn try_require<T, E>(
        self,
        field: &'static str,
        extract: impl FnOnce(&ResponseBody) -> Option<Result<T, E>>,
    ) -> Result<T, ApiError>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match extract(&self.body) {
            Some(Ok(value)) => Ok(value),
            Some(Err(err)) => Err(failure(
                ErrorCode::Decode,
                format!("Invalid `{field}` in gateway response"),
                Some(Box::new(err)),
                Some(self.request_id),
                self.request,
                Some(self.raw),
            )),
            None => Err(self.missing(field)),
        }
    }

    fn missing(self, field: &'static str) -> ApiError {
        failure(
            ErrorCode::MissingData,
            format!("Gateway response has no `{field}`"),
            None,
            Some(self.request_id),
            self.request,
            Some(self.raw),
        )
    }
}

/// Classify the outcome of one transport call.
///
/// Transport errors become [`ErrorCode::Transport`], undecodable replies
/// [`ErrorCode::Decode`] and rejected calls [`ErrorCode::Gateway`].
pub fn decode<E: TransportError>(
    request: Request,
    outcome: Result<RawResponse, E>,
) -> Result<Decoded, ApiError> {
    let raw = match outcome {
        Ok(raw) => raw,
        Err(err) => {
            let request_id = err.request_id().map(str::to_owned);
            return Err(failure(
                ErrorCode::Transport,
                "Gateway call failed".to_owned(),
                Some(Box::new(err)),
                request_id,
                request,
                None,
            ));
        }
    };

    let body = match Response::from_slice(&raw.body) {
        Ok(response) => response.response,
        Err(err) => {
            return Err(failure(
                ErrorCode::Decode,
                format!("Failed to decode gateway response (HTTP {})", raw.status),
                Some(Box::new(err)),
                Some(raw.request_id),
                request,
                Some(raw.body),
            ));
        }
    };

    if let Some(rejection) = body.failure() {
        return Err(failure(
            ErrorCode::Gateway,
            format!("Gateway rejected the call: {rejection}"),
            None,
            Some(raw.request_id),
            request,
            Some(raw.body),
        ));
    }

    Ok(Decoded {
        body,
        request_id: raw.request_id,
        request,
        raw: raw.body,
    })
}

fn failure(
    code: ErrorCode,
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    request_id: Option<String>,
    request: Request,
    response: Option<Vec<u8>>,
) -> ApiError {
    #[cfg(feature = "tracing")]
    tracing::warn!(
        "[{}] {message} (code {code})",
        request_id.as_deref().unwrap_or("-")
    );

    ApiError {
        code,
        message,
        source,
        request_id,
        request: Box::new(request),
        response,
    }
}

#[cfg(test)]
mod tests {
    use fondy_core::transport::{Endpoint, TransportError};

    use super::*;
    use crate::errors::ClientError;

    fn request() -> Request {
        Request::builder().order_id("abc-123").build()
    }

    fn raw(body: &str) -> Result<RawResponse, ClientError> {
        Ok(RawResponse {
            request_id: "req-1".into(),
            status: 200,
            body: body.as_bytes().to_vec(),
        })
    }

    #[test]
    fn test_transport_failure_is_800() {
        let outcome: Result<RawResponse, ClientError> = Err(ClientError::Url {
            request_id: "req-0".into(),
            endpoint: Endpoint::Recurring,
            source: url::ParseError::EmptyHost,
        });
        let err = decode(request(), outcome).unwrap_err();

        assert_eq!(err.code.code(), 800);
        assert_eq!(err.request_id.as_deref(), Some("req-0"));
        assert_eq!(err.request.order_id.as_deref(), Some("abc-123"));
        assert!(err.response.is_none());
        assert!(err.source.is_some());
    }

    #[test]
    fn test_malformed_body_is_801() {
        let err = decode(request(), raw("not json")).unwrap_err();

        assert_eq!(err.code, ErrorCode::Decode);
        assert_eq!(err.response_text().as_deref(), Some("not json"));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_rejection_is_803() {
        let err = decode(
            request(),
            raw(r#"{"response":{"response_status":"failure","error_code":1014,"error_message":"Invalid signature"}}"#),
        )
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::Gateway);
        assert!(err.message.contains("Invalid signature"));
        assert!(err.message.contains("1014"));
    }

    #[test]
    fn test_missing_payload_is_802() {
        let decoded = decode(request(), raw(r#"{"response":{"response_status":"success"}}"#)).unwrap();
        let err = decoded
            .require("checkout_url", |body| body.checkout_url.clone())
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::MissingData);
        assert!(err.source.is_none());
        assert!(err.response.is_some());
    }

    #[test]
    fn test_unparsable_payload_is_801() {
        let decoded = decode(
            request(),
            raw(r#"{"response":{"response_status":"success","checkout_url":"not a url"}}"#),
        )
        .unwrap();
        let err = decoded
            .try_require("checkout_url", |body| {
                body.checkout_url.as_deref().map(url::Url::parse)
            })
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Decode);
    }

    #[test]
    fn test_payload_is_extracted() {
        let decoded = decode(
            request(),
            raw(r#"{"response":{"response_status":"success","checkout_url":"https://pay.fondy.eu/merchants/x"}}"#),
        )
        .unwrap();
        assert_eq!(decoded.request_id, "req-1");

        let url = decoded
            .try_require("checkout_url", |body| {
                body.checkout_url.as_deref().map(url::Url::parse)
            })
            .unwrap();
        assert_eq!(url.host_str(), Some("pay.fondy.eu"));
    }

    #[test]
    fn test_client_error_keeps_request_id() {
        let err = ClientError::Url {
            request_id: "req-9".into(),
            endpoint: Endpoint::Capture,
            source: url::ParseError::EmptyHost,
        };
        assert_eq!(TransportError::request_id(&err), Some("req-9"));
    }
}
