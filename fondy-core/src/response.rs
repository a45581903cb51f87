//! Gateway response model.
//!
//! The gateway answers every call with a `{"response": {...}}` envelope. Which
//! attributes are populated depends on the operation, so they are all optional
//! here; the typed payloads ([`Transaction`], [`Capture`]) are extracted from the
//! envelope once the operation knows what it expects.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    errors::Result,
    types::{AnyJson, Record, string_or_number},
};

/// `response_status` value of a rejected call.
pub const STATUS_FAILURE: &str = "failure";

/// Decoded gateway reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub response: ResponseBody,
}

impl Response {
    pub fn from_slice(raw: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(raw)?)
    }
}

/// Attributes of a gateway reply.
///
/// Numeric attributes arrive either as JSON numbers or as strings and are kept as
/// strings. Attributes not listed here are kept in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseBody {
    #[serde(default)]
    pub response_status: Option<String>,
    #[serde(default)]
    pub checkout_url: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub payment_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub order_id: Option<String>,
    #[serde(default)]
    pub order_status: Option<String>,
    #[serde(default)]
    pub rectoken: Option<String>,
    #[serde(default)]
    pub masked_card: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub amount: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub capture_status: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub capture_amount: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub response_code: Option<String>,
    #[serde(default)]
    pub response_description: Option<String>,
    #[serde(default)]
    pub merchant_data: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(flatten)]
    pub extra: Record<AnyJson>,
}

impl ResponseBody {
    /// Whether the gateway rejected the call.
    pub fn is_failure(&self) -> bool {
        self.response_status.as_deref() == Some(STATUS_FAILURE)
    }

    /// Gateway-side failure details, if the call was rejected.
    pub fn failure(&self) -> Option<GatewayFailure> {
        self.is_failure().then(|| GatewayFailure {
            error_code: self.error_code.clone(),
            error_message: self.error_message.clone(),
            request_id: self.request_id.clone(),
        })
    }
}

/// The reason the gateway gave for rejecting a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayFailure {
    pub error_code: Option<String>,
    pub error_message: Option<String>,
    pub request_id: Option<String>,
}

impl Display for GatewayFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (code {}, gateway request {})",
            self.error_message.as_deref().unwrap_or("unknown error"),
            self.error_code.as_deref().unwrap_or("-"),
            self.request_id.as_deref().unwrap_or("-"),
        )
    }
}

/// Order state reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Created,
    Processing,
    Declined,
    Approved,
    Expired,
    Reversed,
    /// A status this client does not know about, kept verbatim.
    Other(String),
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        match value {
            "created" => OrderStatus::Created,
            "processing" => OrderStatus::Processing,
            "declined" => OrderStatus::Declined,
            "approved" => OrderStatus::Approved,
            "expired" => OrderStatus::Expired,
            "reversed" => OrderStatus::Reversed,
            other => OrderStatus::Other(other.to_owned()),
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Created => write!(f, "created"),
            OrderStatus::Processing => write!(f, "processing"),
            OrderStatus::Declined => write!(f, "declined"),
            OrderStatus::Approved => write!(f, "approved"),
            OrderStatus::Expired => write!(f, "expired"),
            OrderStatus::Reversed => write!(f, "reversed"),
            OrderStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Outcome of a payment or withdrawal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub status: OrderStatus,
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    pub amount: Option<String>,
    pub currency: Option<String>,
    pub rectoken: Option<String>,
    pub masked_card: Option<String>,
    pub response_code: Option<String>,
    pub response_description: Option<String>,
}

impl Transaction {
    /// Extract a transaction; `None` if the reply carries no `order_status`.
    pub fn from_body(body: &ResponseBody) -> Option<Self> {
        let status = body.order_status.as_deref()?;

        Some(Transaction {
            status: status.into(),
            order_id: body.order_id.clone(),
            payment_id: body.payment_id.clone(),
            amount: body.amount.clone(),
            currency: body.currency.clone(),
            rectoken: body.rectoken.clone(),
            masked_card: body.masked_card.clone(),
            response_code: body.response_code.clone(),
            response_description: body.response_description.clone(),
        })
    }

    pub fn is_approved(&self) -> bool {
        self.status == OrderStatus::Approved
    }
}

/// Outcome of a capture (finalization) of a pre-authorized order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub capture_status: String,
    pub order_id: Option<String>,
    pub capture_amount: Option<String>,
}

impl Capture {
    /// Extract a capture result; `None` if the reply carries no `capture_status`.
    pub fn from_body(body: &ResponseBody) -> Option<Self> {
        Some(Capture {
            capture_status: body.capture_status.clone()?,
            order_id: body.order_id.clone(),
            capture_amount: body.capture_amount.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_checkout_reply() {
        let raw = br#"{"response":{"response_status":"success","checkout_url":"https://pay.fondy.eu/merchants/5ad6b888f4becb0c33d543d54e57d86c/default/index.html?token=abc","payment_id":"1234567"}}"#;
        let response = Response::from_slice(raw).unwrap();

        assert!(!response.response.is_failure());
        assert_eq!(response.response.payment_id.as_deref(), Some("1234567"));
        assert!(response.response.checkout_url.is_some());
    }

    #[test]
    fn test_decode_numeric_attributes() {
        let raw = br#"{"response":{"response_status":"success","order_status":"approved","payment_id":802390001,"amount":100,"actual_amount":"100"}}"#;
        let body = Response::from_slice(raw).unwrap().response;

        assert_eq!(body.payment_id.as_deref(), Some("802390001"));
        assert_eq!(body.amount.as_deref(), Some("100"));
        assert_eq!(body.extra.get("actual_amount"), Some(&AnyJson::from("100")));
    }

    #[test]
    fn test_decode_failure_reply() {
        let raw = br#"{"response":{"response_status":"failure","error_message":"Invalid signature","error_code":1014,"request_id":"vCyEsmm4Fd5tH"}}"#;
        let body = Response::from_slice(raw).unwrap().response;
        let failure = body.failure().unwrap();

        assert_eq!(failure.error_code.as_deref(), Some("1014"));
        assert_eq!(
            failure.to_string(),
            "Invalid signature (code 1014, gateway request vCyEsmm4Fd5tH)"
        );
    }

    #[test]
    fn test_missing_envelope_is_an_error() {
        assert!(Response::from_slice(br#"{"checkout_url":"x"}"#).is_err());
        assert!(Response::from_slice(b"<html>502 Bad Gateway</html>").is_err());
    }

    #[test]
    fn test_transaction_requires_order_status() {
        let body = ResponseBody {
            payment_id: Some("1".into()),
            ..Default::default()
        };
        assert!(Transaction::from_body(&body).is_none());

        let body = ResponseBody {
            order_status: Some("approved".into()),
            ..body
        };
        let transaction = Transaction::from_body(&body).unwrap();
        assert!(transaction.is_approved());
        assert_eq!(transaction.payment_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_unknown_order_status_is_kept() {
        assert_eq!(
            OrderStatus::from("on_hold"),
            OrderStatus::Other("on_hold".into())
        );
        assert_eq!(OrderStatus::from("reversed").to_string(), "reversed");
    }

    #[test]
    fn test_capture_requires_capture_status() {
        assert!(Capture::from_body(&ResponseBody::default()).is_none());

        let body = ResponseBody {
            capture_status: Some("captured".into()),
            capture_amount: Some("100".into()),
            ..Default::default()
        };
        let capture = Capture::from_body(&body).unwrap();
        assert_eq!(capture.capture_status, "captured");
    }
}
