use std::time::Duration;

use bon::Builder;
use serde::Deserialize;
use url::Url;

/// Production gateway.
pub const DEFAULT_BASE_URL: &str = "https://pay.fondy.eu/";

/// Default `User-Agent`: `fondy-kit/<version>`.
pub const DEFAULT_USER_AGENT: &str = concat!("fondy-kit/", env!("CARGO_PKG_VERSION"));

/// Connection settings shared by every call issued through one client.
///
/// Durations are read from config files as seconds (fractions allowed).
///
/// ```
/// use std::time::Duration;
/// use fondy_kit::config::HttpConfig;
///
/// let config = HttpConfig::builder()
///     .connect_timeout(Duration::from_secs(10))
///     .log_payloads(true)
///     .build();
///
/// assert_eq!(config.base_url.as_str(), "https://pay.fondy.eu/");
/// assert_eq!(config.idle_timeout, Duration::from_secs(20));
/// ```
#[derive(Builder, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Gateway base URL; endpoint paths are joined onto it.
    #[builder(default = default_base_url())]
    pub base_url: Url,
    #[builder(into, default = DEFAULT_USER_AGENT.to_owned())]
    pub user_agent: String,
    /// Dial timeout.
    #[builder(default = Duration::from_secs(30))]
    #[serde(deserialize_with = "secs::deserialize")]
    pub connect_timeout: Duration,
    /// TCP keep-alive interval of pooled connections.
    #[builder(default = Duration::from_secs(30))]
    #[serde(deserialize_with = "secs::deserialize")]
    pub keep_alive: Duration,
    /// Idle pooled connections are closed after this long.
    #[builder(default = Duration::from_secs(20))]
    #[serde(deserialize_with = "secs::deserialize")]
    pub idle_timeout: Duration,
    /// Deadline for a whole call, from connect to the last body byte.
    #[serde(deserialize_with = "secs::deserialize_option")]
    pub request_timeout: Option<Duration>,
    /// Log request and response bodies at debug level.
    #[builder(default)]
    pub log_payloads: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig::builder().build()
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}

/// Settings of the gateway operations.
///
/// ```
/// use fondy_kit::config::Options;
///
/// let options: Options = serde_json::from_value(serde_json::json!({
///     "verification_amount": 2,
///     "verification_lifetime": 600,
///     "callback_base_url": "https://shop.example.com",
///     "callback_path": "/fondy/verification",
/// })).unwrap();
///
/// assert_eq!(options.callback_url(), "https://shop.example.com/fondy/verification");
/// ```
#[derive(Builder, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Amount charged (and refunded) to verify a card, in major currency units.
    #[builder(default = 1)]
    pub verification_amount: u32,
    /// Order description shown on the verification page.
    #[builder(into, default = "Card verification".to_owned())]
    pub verification_description: String,
    /// Lifetime of the verification page.
    #[builder(default = Duration::from_secs(600))]
    #[serde(deserialize_with = "secs::deserialize")]
    pub verification_lifetime: Duration,
    /// Prefix of the server callback URL, e.g. `https://shop.example.com`.
    #[builder(into, default)]
    pub callback_base_url: String,
    /// Path appended to `callback_base_url`.
    #[builder(into, default)]
    pub callback_path: String,
}

impl Default for Options {
    fn default() -> Self {
        Options::builder().build()
    }
}

impl Options {
    /// Server callback URL: base and path concatenated as-is.
    pub fn callback_url(&self) -> String {
        format!("{}{}", self.callback_base_url, self.callback_path)
    }

    /// Verification amount in minor currency units.
    pub fn verification_amount_minor(&self) -> u64 {
        u64::from(self.verification_amount) * 100
    }

    /// Verification page lifetime in seconds, always two decimal places.
    pub fn verification_lifetime_secs(&self) -> String {
        format!("{:.2}", self.verification_lifetime.as_secs_f64())
    }
}

mod secs {
    use std::time::Duration;

    use serde::Deserialize;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Option::<f64>::deserialize(deserializer)?
            .map(|secs| Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom))
            .transpose()
    }
}
