use std::time::Duration;

use fondy_core::{
    merchant::MerchantAccount,
    response::{Capture, Transaction},
    transport::{Endpoint, Transport},
};
use url::Url;

use crate::{
    client::FondyClient,
    config::{HttpConfig, Options},
    errors::{ApiError, ClientError},
    mapper,
    operations::{CaptureRequest, PaymentRequest, VerificationRequest, WithdrawalRequest},
};

/// Gateway operations, each a single signed round trip.
///
/// Every failure is reported as an [`ApiError`] carrying the signed request; a
/// failed call is never retried.
///
/// ```no_run
/// use fondy_core::{merchant::MerchantAccount, types::Currency};
/// use fondy_kit::{
///     config::{HttpConfig, Options},
///     gateway::Gateway,
///     operations::VerificationRequest,
/// };
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let gateway = Gateway::from_config(&HttpConfig::default(), Options::default())?;
/// let merchant = MerchantAccount::builder()
///     .merchant_id("1396424")
///     .merchant_key("test")
///     .credit_key("testcredit")
///     .merchant_string("Test shop")
///     .design_id("1")
///     .build();
///
/// let link = gateway
///     .verification_link(
///         &merchant,
///         &VerificationRequest::builder()
///             .invoice_id(Uuid::new_v4())
///             .currency(Currency::Uah)
///             .build(),
///     )
///     .await?;
/// println!("{link}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Gateway<T: Transport = FondyClient> {
    transport: T,
    options: Options,
}

impl Gateway<FondyClient> {
    /// A gateway over a fresh [`FondyClient`].
    pub fn from_config(config: &HttpConfig, options: Options) -> Result<Self, ClientError> {
        Ok(Gateway::new(FondyClient::new(config)?, options))
    }

    /// A gateway on the same connection pool whose calls give up after `timeout`.
    ///
    /// An elapsed deadline is reported as a transport error (code 800) that still
    /// carries the signed request.
    ///
    /// ```no_run
    /// # use std::time::Duration;
    /// # use fondy_core::merchant::MerchantAccount;
    /// # use fondy_kit::{gateway::Gateway, operations::PaymentRequest};
    /// # async fn example(gateway: &Gateway, merchant: &MerchantAccount, payment: &PaymentRequest) {
    /// let result = gateway
    ///     .with_timeout(Duration::from_secs(5))
    ///     .payment(merchant, payment)
    ///     .await;
    /// # }
    /// ```
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Gateway {
            transport: self.transport.with_timeout(timeout),
            options: self.options.clone(),
        }
    }
}

impl<T: Transport> Gateway<T> {
    pub fn new(transport: T, options: Options) -> Self {
        Gateway { transport, options }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Create a hosted card verification page and return its URL.
    pub async fn verification_link(
        &self,
        merchant: &MerchantAccount,
        verification: &VerificationRequest,
    ) -> Result<Url, ApiError> {
        let mut request = verification.to_request(&self.options, merchant);
        let outcome = self
            .transport
            .verify(Endpoint::CheckoutUrl, &mut request, merchant)
            .await;

        mapper::decode(request, outcome)?.try_require("checkout_url", |body| {
            body.checkout_url.as_deref().map(Url::parse)
        })
    }

    /// Charge a card token.
    ///
    /// A declined payment is not an error: check [`Transaction::status`].
    pub async fn payment(
        &self,
        merchant: &MerchantAccount,
        payment: &PaymentRequest,
    ) -> Result<Transaction, ApiError> {
        let mut request = payment.to_request(merchant);
        let outcome = self
            .transport
            .payment(Endpoint::Recurring, &mut request, merchant)
            .await;

        mapper::decode(request, outcome)?.require("order_status", Transaction::from_body)
    }

    /// Credit funds to a card token, signed with the merchant's credit key.
    pub async fn withdraw(
        &self,
        merchant: &MerchantAccount,
        withdrawal: &WithdrawalRequest,
    ) -> Result<Transaction, ApiError> {
        let mut request = withdrawal.to_request(merchant);
        let outcome = self
            .transport
            .withdraw(Endpoint::P2pCredit, &mut request, merchant)
            .await;

        mapper::decode(request, outcome)?.require("order_status", Transaction::from_body)
    }

    /// Capture a pre-authorized payment.
    pub async fn capture(
        &self,
        merchant: &MerchantAccount,
        capture: &CaptureRequest,
    ) -> Result<Capture, ApiError> {
        let mut request = capture.to_request(merchant);
        let outcome = self
            .transport
            .finalize(Endpoint::Capture, &mut request, merchant)
            .await;

        mapper::decode(request, outcome)?.require("capture_status", Capture::from_body)
    }
}
