//! Request signing.
//!
//! The gateway authenticates a request by recomputing a SHA-1 over the merchant
//! key and the request's present attributes, so the canonical form below has to
//! match the gateway byte for byte:
//!
//! ```text
//! key|value_1|value_2|...|value_n
//! ```
//!
//! where `value_i` are the values of the present attributes (the signature itself
//! excluded), ordered by attribute wire name.

use sha1::{Digest, Sha1};

use crate::{
    errors::{Error, Result},
    request::Request,
};

const SEPARATOR: &str = "|";

impl Request {
    /// Build the string that is hashed to produce the signature.
    pub fn canonical_string(&self, key: &str) -> String {
        let mut present: Vec<(&'static str, &str)> = self
            .present_fields()
            .filter(|(name, _)| *name != Request::SIGNATURE)
            .collect();
        present.sort_unstable_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));

        let values: Vec<&str> = present.into_iter().map(|(_, value)| value).collect();

        format!("{key}{SEPARATOR}{}", values.join(SEPARATOR))
    }

    /// Sign the request with `key`, writing the signature in place.
    ///
    /// The previous signature, if any, is ignored and replaced.
    pub fn sign(&mut self, key: &str) -> Result<&str> {
        if key.is_empty() {
            return Err(Error::MissingSigningKey);
        }

        let digest = Sha1::digest(self.canonical_string(key).as_bytes());
        self.signature.set(hex::encode(digest));

        self.signature.value(Request::SIGNATURE)
    }

    /// Consume the request and return it signed with `key`.
    pub fn signed(mut self, key: &str) -> Result<Self> {
        self.sign(key)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Request {
        Request::builder()
            .order_id("abc-123")
            .amount("100")
            .currency("UAH")
            .verification("Y")
            .build()
    }

    #[test]
    fn test_canonical_string_is_sorted_by_name() {
        assert_eq!(
            sample().canonical_string("testkey"),
            "testkey|100|UAH|abc-123|Y"
        );
    }

    #[test]
    fn test_known_signature() {
        let mut request = sample();
        let signature = request.sign("testkey").unwrap().to_owned();

        // sha1("testkey|100|UAH|abc-123|Y")
        assert_eq!(signature, "458057a9e1910a32f3468231ae1a41ba392e89b3");
        assert_eq!(request.signature().as_deref(), Some(signature.as_str()));
    }

    #[test]
    fn test_known_signature_with_merchant() {
        let mut request = sample();
        request.merchant_id.set("1396424");

        assert_eq!(
            request.canonical_string("testkey"),
            "testkey|100|UAH|1396424|abc-123|Y"
        );
        assert_eq!(
            request.sign("testkey").unwrap(),
            "67c7f4ce38b1c0e21c1f26cb86b95cfc5126f2e4"
        );
    }

    #[test]
    fn test_signing_is_deterministic() {
        let first = sample().signed("testkey").unwrap();
        let second = sample().signed("testkey").unwrap();
        assert_eq!(first.signature(), second.signature());
    }

    #[test]
    fn test_assignment_order_does_not_matter() {
        let mut forward = Request::default();
        forward.order_id.set("abc-123");
        forward.amount.set("100");
        forward.currency.set("UAH");
        forward.merchant_data.set("note");

        let mut backward = Request::default();
        backward.merchant_data.set("note");
        backward.currency.set("UAH");
        backward.amount.set("100");
        backward.order_id.set("abc-123");

        assert_eq!(
            forward.sign("testkey").unwrap(),
            backward.sign("testkey").unwrap()
        );
    }

    #[test]
    fn test_absent_fields_are_excluded() {
        let mut with_absent = sample();
        with_absent.lang.clear();
        with_absent.rectoken = None::<String>.into();

        assert_eq!(
            with_absent.sign("testkey").unwrap(),
            sample().sign("testkey").unwrap()
        );
    }

    #[test]
    fn test_empty_field_changes_signature() {
        let mut with_empty = sample();
        with_empty.lang.set("");

        assert_eq!(
            with_empty.canonical_string("testkey"),
            "testkey|100|UAH||abc-123|Y"
        );
        assert_ne!(
            with_empty.sign("testkey").unwrap(),
            sample().sign("testkey").unwrap()
        );
    }

    #[test]
    fn test_previous_signature_is_ignored() {
        let mut request = sample();
        let first = request.sign("testkey").unwrap().to_owned();
        let second = request.sign("testkey").unwrap().to_owned();
        assert_eq!(first, second);
    }

    #[test]
    fn test_keys_produce_different_signatures() {
        let mut request = sample();
        request.merchant_id.set("1396424");

        let regular = request.clone().signed("testkey").unwrap();
        let credit = request.signed("creditkey").unwrap();

        assert_eq!(
            credit.signature().as_deref(),
            Some("5cf19c441cce752f99cf799f99dddc52a94b66b7")
        );
        assert_ne!(regular.signature(), credit.signature());
    }

    #[test]
    fn test_empty_request_signs_key_only() {
        let mut request = Request::default();
        assert_eq!(request.canonical_string("testkey"), "testkey|");
        assert_eq!(
            request.sign("testkey").unwrap(),
            "e0cedeb961dabd8adef34aa2906fadeecc75c28d"
        );
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let mut request = sample();
        assert!(matches!(request.sign(""), Err(Error::MissingSigningKey)));
        assert!(request.signature().is_absent());
    }
}
