//! Transport seam between the gateway operations and the network.

use std::fmt::Display;

use crate::{merchant::MerchantAccount, request::Request};

/// Gateway API endpoints, relative to the gateway base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Hosted checkout page; also used for card verification links.
    CheckoutUrl,
    /// Charge by a previously issued card token.
    Recurring,
    /// Credit (withdraw) funds to a card token.
    P2pCredit,
    /// Capture a pre-authorized order.
    Capture,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::CheckoutUrl => "api/checkout/url/",
            Endpoint::Recurring => "api/recurring/",
            Endpoint::P2pCredit => "api/p2pcredit/",
            Endpoint::Capture => "api/capture/order_id/",
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Which merchant secret signs a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// Regular key: payments, verifications, finalizations.
    Merchant,
    /// Credit key: withdrawals.
    Credit,
}

/// Raw gateway reply, as read off the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// Correlation id sent as `X-Request-ID`.
    pub request_id: String,
    /// HTTP status code.
    pub status: u16,
    pub body: Vec<u8>,
}

/// Errors raised by a [`Transport`].
pub trait TransportError: std::error::Error + Send + Sync + 'static {
    /// Correlation id of the failed call, if one was generated before failing.
    fn request_id(&self) -> Option<&str>;
}

/// Sends one signed request to the gateway and returns the raw reply.
///
/// Implementations stamp the merchant onto the request, sign it with the key
/// selected by `key` and post it. Failures are returned as the implementation's
/// most specific error; classification into API error codes happens above this
/// layer.
pub trait Transport {
    type Error: TransportError;

    /// Sign and dispatch `request`.
    ///
    /// `merchant_id` is always taken from `merchant`. When `add_order_description`
    /// is set, `order_desc` is overwritten with the merchant display string.
    fn send(
        &self,
        endpoint: Endpoint,
        request: &mut Request,
        key: KeyKind,
        merchant: &MerchantAccount,
        add_order_description: bool,
    ) -> impl Future<Output = Result<RawResponse, Self::Error>> + Send;

    /// Verification link: regular key, caller's order description is kept.
    fn verify(
        &self,
        endpoint: Endpoint,
        request: &mut Request,
        merchant: &MerchantAccount,
    ) -> impl Future<Output = Result<RawResponse, Self::Error>> + Send {
        self.send(endpoint, request, KeyKind::Merchant, merchant, false)
    }

    /// Payment: regular key, merchant display string as order description.
    fn payment(
        &self,
        endpoint: Endpoint,
        request: &mut Request,
        merchant: &MerchantAccount,
    ) -> impl Future<Output = Result<RawResponse, Self::Error>> + Send {
        self.send(endpoint, request, KeyKind::Merchant, merchant, true)
    }

    /// Withdrawal: credit key, merchant display string as order description.
    fn withdraw(
        &self,
        endpoint: Endpoint,
        request: &mut Request,
        merchant: &MerchantAccount,
    ) -> impl Future<Output = Result<RawResponse, Self::Error>> + Send {
        self.send(endpoint, request, KeyKind::Credit, merchant, true)
    }

    /// Finalization: regular key, order description untouched.
    fn finalize(
        &self,
        endpoint: Endpoint,
        request: &mut Request,
        merchant: &MerchantAccount,
    ) -> impl Future<Output = Result<RawResponse, Self::Error>> + Send {
        self.send(endpoint, request, KeyKind::Merchant, merchant, false)
    }
}

/// Stamp the merchant onto `request` and sign it, as every [`Transport`] does before posting.
pub fn prepare(
    request: &mut Request,
    key: KeyKind,
    merchant: &MerchantAccount,
    add_order_description: bool,
) -> crate::errors::Result<()> {
    request.merchant_id.set(merchant.merchant_id.as_str());
    if add_order_description {
        request.order_desc.set(merchant.merchant_string.as_str());
    }
    request.sign(merchant.signing_key(key))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merchant() -> MerchantAccount {
        MerchantAccount::builder()
            .merchant_id("1396424")
            .merchant_key("testkey")
            .credit_key("creditkey")
            .merchant_string("Test shop")
            .design_id("1")
            .build()
    }

    fn request() -> Request {
        Request::builder()
            .order_id("abc-123")
            .amount("100")
            .currency("UAH")
            .verification("Y")
            .build()
    }

    #[test]
    fn test_prepare_with_merchant_key() {
        let mut request = request();
        prepare(&mut request, KeyKind::Merchant, &merchant(), false).unwrap();

        assert_eq!(request.merchant_id.as_deref(), Some("1396424"));
        assert!(request.order_desc.is_absent());
        assert_eq!(
            request.signature().as_deref(),
            Some("67c7f4ce38b1c0e21c1f26cb86b95cfc5126f2e4")
        );
    }

    #[test]
    fn test_prepare_with_credit_key() {
        let mut request = request();
        prepare(&mut request, KeyKind::Credit, &merchant(), false).unwrap();

        assert_eq!(
            request.signature().as_deref(),
            Some("5cf19c441cce752f99cf799f99dddc52a94b66b7")
        );
    }

    #[test]
    fn test_prepare_adds_order_description() {
        let mut request = request();
        request.order_desc.set("caller description");
        prepare(&mut request, KeyKind::Merchant, &merchant(), true).unwrap();

        assert_eq!(request.order_desc.as_deref(), Some("Test shop"));
    }

    #[test]
    fn test_prepare_keeps_order_description() {
        let mut request = request();
        request.order_desc.set("Verification Test");
        prepare(&mut request, KeyKind::Merchant, &merchant(), false).unwrap();

        assert_eq!(request.order_desc.as_deref(), Some("Verification Test"));
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::CheckoutUrl.path(), "api/checkout/url/");
        assert_eq!(Endpoint::P2pCredit.to_string(), "api/p2pcredit/");
    }
}
