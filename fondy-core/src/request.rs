//! Gateway request model.

use bon::Builder;
use serde::Serialize;

use crate::types::Field;

/// Number of attributes in a [`Request`], signature included.
pub const FIELD_COUNT: usize = 18;

/// Attributes of a gateway request.
///
/// Every attribute is a [`Field`]: absent attributes are skipped on the wire and
/// take no part in signing. `receiver_rectoken` is the one exception on the wire,
/// the gateway contract expects it on every request, so it is emitted as `""`
/// when absent.
///
/// The signature is never supplied by the caller; it is computed by
/// [`Request::sign`] once all business attributes are set.
///
/// Requests are write-only: the wire form cannot tell an absent
/// `receiver_rectoken` from an empty one, so reading it back would change
/// what gets signed.
///
/// ```
/// use fondy_core::request::Request;
///
/// let request = Request::builder()
///     .order_id("abc-123")
///     .amount("100")
///     .currency("UAH")
///     .build();
///
/// let json = serde_json::to_value(&request).unwrap();
/// assert_eq!(json["order_id"], "abc-123");
/// assert!(json.get("lang").is_none());
/// assert_eq!(json["receiver_rectoken"], "");
/// ```
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[builder(on(Field, into))]
pub struct Request {
    #[builder(default)]
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub order_id: Field,
    #[builder(default)]
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub merchant_id: Field,
    #[builder(skip)]
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub(crate) signature: Field,

    #[builder(default)]
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub order_desc: Field,
    /// Amount in minor currency units.
    #[builder(default)]
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub amount: Field,
    #[builder(default)]
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub currency: Field,
    #[builder(default)]
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub preauth: Field,
    #[builder(default)]
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub design_id: Field,
    #[builder(default)]
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub rectoken: Field,
    #[builder(default)]
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub product_id: Field,
    #[builder(default)]
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub lang: Field,
    #[builder(default)]
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub sender_email: Field,
    #[builder(default)]
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub server_callback_url: Field,
    /// Lifetime of the hosted page in seconds, two decimal places.
    #[builder(default)]
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub lifetime: Field,
    #[builder(default)]
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub verification: Field,
    #[builder(default)]
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub required_rectoken: Field,
    #[builder(default)]
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub merchant_data: Field,
    // Always emitted. The gateway documentation does not say why; keep it until it does.
    #[builder(default)]
    #[serde(serialize_with = "Field::serialize_or_empty")]
    pub receiver_rectoken: Field,
}

impl Request {
    /// Wire name of the signature attribute.
    pub const SIGNATURE: &'static str = "signature";

    /// The computed signature, absent until the request is signed.
    pub fn signature(&self) -> &Field {
        &self.signature
    }

    /// Every attribute as a `(wire name, value)` pair, in declaration order.
    ///
    /// Signing enumerates attributes through this table, so a new attribute must be
    /// added here as well as to the struct.
    pub fn fields(&self) -> [(&'static str, &Field); FIELD_COUNT] {
        [
            ("order_id", &self.order_id),
            ("merchant_id", &self.merchant_id),
            (Self::SIGNATURE, &self.signature),
            ("order_desc", &self.order_desc),
            ("amount", &self.amount),
            ("currency", &self.currency),
            ("preauth", &self.preauth),
            ("design_id", &self.design_id),
            ("rectoken", &self.rectoken),
            ("product_id", &self.product_id),
            ("lang", &self.lang),
            ("sender_email", &self.sender_email),
            ("server_callback_url", &self.server_callback_url),
            ("lifetime", &self.lifetime),
            ("verification", &self.verification),
            ("required_rectoken", &self.required_rectoken),
            ("merchant_data", &self.merchant_data),
            ("receiver_rectoken", &self.receiver_rectoken),
        ]
    }

    /// Present attributes as `(wire name, value)` pairs, in declaration order.
    pub fn present_fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields()
            .into_iter()
            .filter_map(|(name, field)| field.as_deref().map(|v| (name, v)))
    }
}

/// The JSON body posted to the gateway: `{"request": {...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<'a> {
    pub request: &'a Request,
}

impl<'a> Envelope<'a> {
    pub fn new(request: &'a Request) -> Self {
        Envelope { request }
    }

    pub fn to_vec(&self) -> crate::errors::Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}
