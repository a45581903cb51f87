//! Merchant accounts.

use std::fmt::Debug;

use bon::Builder;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::transport::KeyKind;

/// A merchant as known to the gateway.
///
/// Holds two secrets: the regular key signs payments, verifications and
/// finalizations, the credit key signs withdrawals. Picking the wrong one is not
/// detected locally; the gateway rejects the signature.
///
/// ```
/// use fondy_core::{merchant::MerchantAccount, transport::KeyKind};
///
/// let merchant = MerchantAccount::builder()
///     .merchant_id("1396424")
///     .merchant_key("test")
///     .credit_key("testcredit")
///     .merchant_string("Test shop")
///     .design_id("1")
///     .build();
///
/// assert_eq!(merchant.signing_key(KeyKind::Credit), "testcredit");
/// ```
#[derive(Builder, Clone, Serialize, Deserialize)]
pub struct MerchantAccount {
    #[builder(into)]
    pub merchant_id: String,
    #[builder(into)]
    pub merchant_key: String,
    #[builder(into)]
    pub credit_key: String,
    /// Display string, sent as the order description of payment-class requests.
    #[builder(into)]
    pub merchant_string: String,
    /// Hosted page design.
    #[builder(into)]
    pub design_id: String,

    /// Local account identifier.
    pub uuid: Option<Uuid>,
    #[builder(into)]
    pub name: Option<String>,
    /// Short tag appended to descriptions by the account owner.
    #[builder(into)]
    pub added_description: Option<String>,
    pub flow_type: Option<MerchantFlowType>,
}

impl MerchantAccount {
    /// The key used to sign requests of the given kind.
    pub fn signing_key(&self, kind: KeyKind) -> &str {
        match kind {
            KeyKind::Merchant => &self.merchant_key,
            KeyKind::Credit => &self.credit_key,
        }
    }
}

impl Debug for MerchantAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerchantAccount")
            .field("merchant_id", &self.merchant_id)
            .field("merchant_key", &"<redacted>")
            .field("credit_key", &"<redacted>")
            .field("merchant_string", &self.merchant_string)
            .field("design_id", &self.design_id)
            .field("uuid", &self.uuid)
            .field("name", &self.name)
            .field("added_description", &self.added_description)
            .field("flow_type", &self.flow_type)
            .finish()
    }
}

/// What a merchant account is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MerchantFlowType {
    Payment,
    Withdrawal,
    Verification,
}
