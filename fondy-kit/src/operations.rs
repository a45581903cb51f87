//! Per-operation request builders.
//!
//! Each builder collects the business attributes of one operation and turns
//! them into an unsigned [`Request`]. Signing, and the merchant order
//! description of payment-class calls, are left to the transport.

use bon::Builder;
use fondy_core::{merchant::MerchantAccount, request::Request, types::Currency};
use uuid::Uuid;

use crate::config::Options;

/// Suffix appended to the caller's note in `merchant_data` of a verification.
pub const VERIFICATION_NOTE_SUFFIX: &str = "/card verification";

const YES: &str = "Y";

/// Hosted card verification: the customer enters a card, a small amount is
/// held and refunded, and the gateway returns a reusable card token.
///
/// ```
/// use fondy_core::{merchant::MerchantAccount, types::Currency};
/// use fondy_kit::{config::Options, operations::VerificationRequest};
/// use uuid::Uuid;
///
/// let merchant = MerchantAccount::builder()
///     .merchant_id("1396424")
///     .merchant_key("test")
///     .credit_key("testcredit")
///     .merchant_string("Test shop")
///     .design_id("1")
///     .build();
///
/// let request = VerificationRequest::builder()
///     .invoice_id(Uuid::nil())
///     .note("customer 42")
///     .currency(Currency::Uah)
///     .build()
///     .to_request(&Options::default(), &merchant);
///
/// assert_eq!(request.amount.as_deref(), Some("100"));
/// assert_eq!(request.merchant_data.as_deref(), Some("customer 42/card verification"));
/// ```
#[derive(Builder, Debug, Clone)]
pub struct VerificationRequest {
    /// Becomes the gateway `order_id`.
    pub invoice_id: Uuid,
    /// Customer email, prefilled on the hosted page.
    #[builder(into)]
    pub email: Option<String>,
    #[builder(into, default)]
    pub note: String,
    pub currency: Currency,
}

impl VerificationRequest {
    pub fn to_request(&self, options: &Options, merchant: &MerchantAccount) -> Request {
        Request::builder()
            .order_id(self.invoice_id.to_string())
            .merchant_id(merchant.merchant_id.as_str())
            .order_desc(options.verification_description.as_str())
            .amount(options.verification_amount_minor().to_string())
            .currency(self.currency.code())
            .design_id(merchant.design_id.as_str())
            .sender_email(self.email.clone())
            .server_callback_url(options.callback_url())
            .lifetime(options.verification_lifetime_secs())
            .verification(YES)
            .required_rectoken(YES)
            .merchant_data(format!("{}{VERIFICATION_NOTE_SUFFIX}", self.note))
            .build()
    }
}

/// Charge a previously verified card by its token.
#[derive(Builder, Debug, Clone)]
pub struct PaymentRequest {
    #[builder(into)]
    pub order_id: String,
    /// Minor currency units.
    pub amount: u64,
    pub currency: Currency,
    #[builder(into)]
    pub rectoken: String,
    #[builder(into)]
    pub server_callback_url: Option<String>,
    #[builder(into)]
    pub merchant_data: Option<String>,
    /// Hold the funds until a capture instead of charging right away.
    #[builder(default)]
    pub preauth: bool,
    #[builder(into)]
    pub lang: Option<String>,
    #[builder(into)]
    pub product_id: Option<String>,
}

impl PaymentRequest {
    pub fn to_request(&self, merchant: &MerchantAccount) -> Request {
        Request::builder()
            .order_id(self.order_id.as_str())
            .merchant_id(merchant.merchant_id.as_str())
            .amount(self.amount.to_string())
            .currency(self.currency.code())
            .rectoken(self.rectoken.as_str())
            .server_callback_url(self.server_callback_url.clone())
            .merchant_data(self.merchant_data.clone())
            .preauth(self.preauth.then_some(YES))
            .lang(self.lang.clone())
            .product_id(self.product_id.clone())
            .build()
    }
}

/// Credit funds to a card token.
#[derive(Builder, Debug, Clone)]
pub struct WithdrawalRequest {
    #[builder(into)]
    pub order_id: String,
    /// Minor currency units.
    pub amount: u64,
    pub currency: Currency,
    #[builder(into)]
    pub receiver_rectoken: String,
    #[builder(into)]
    pub server_callback_url: Option<String>,
    #[builder(into)]
    pub merchant_data: Option<String>,
}

impl WithdrawalRequest {
    pub fn to_request(&self, merchant: &MerchantAccount) -> Request {
        Request::builder()
            .order_id(self.order_id.as_str())
            .merchant_id(merchant.merchant_id.as_str())
            .amount(self.amount.to_string())
            .currency(self.currency.code())
            .receiver_rectoken(self.receiver_rectoken.as_str())
            .server_callback_url(self.server_callback_url.clone())
            .merchant_data(self.merchant_data.clone())
            .build()
    }
}

/// Capture a pre-authorized order, in full or in part.
#[derive(Builder, Debug, Clone)]
pub struct CaptureRequest {
    #[builder(into)]
    pub order_id: String,
    /// Minor currency units.
    pub amount: u64,
    pub currency: Currency,
}

impl CaptureRequest {
    pub fn to_request(&self, merchant: &MerchantAccount) -> Request {
        Request::builder()
            .order_id(self.order_id.as_str())
            .merchant_id(merchant.merchant_id.as_str())
            .amount(self.amount.to_string())
            .currency(self.currency.code())
            .build()
    }
}
