//! Miscellaneous common types used throughout the Fondy codebase.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Represents an key-value pair in a gateway message. The key is a `String`.
pub type Record<V> = std::collections::HashMap<String, V>;

/// Represents any JSON value. Used for serializing/deserializing arbitrary JSON data.
pub type AnyJson = serde_json::Value;

/// ISO 4217 currency codes accepted by the gateway.
///
/// ```
/// use fondy_core::types::Currency;
///
/// assert_eq!(Currency::Uah.to_string(), "UAH");
/// assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Uah,
    Usd,
    Eur,
    Gbp,
    Pln,
    Czk,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Uah => "UAH",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Pln => "PLN",
            Currency::Czk => "CZK",
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown currency code: {0}")]
pub struct UnknownCurrency(pub String);

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "UAH" => Ok(Currency::Uah),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "PLN" => Ok(Currency::Pln),
            "CZK" => Ok(Currency::Czk),
            _ => Err(UnknownCurrency(s.to_owned())),
        }
    }
}

/// Deserialize an optional attribute the gateway sends either as a JSON string or as a number.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<AnyJson>::deserialize(deserializer)? {
        None | Some(AnyJson::Null) => Ok(None),
        Some(AnyJson::String(s)) => Ok(Some(s)),
        Some(AnyJson::Number(n)) => Ok(Some(n.to_string())),
        Some(AnyJson::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "Expected string or number, got {other}"
        ))),
    }
}
