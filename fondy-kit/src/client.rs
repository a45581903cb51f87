use std::time::Duration;

use fondy_core::{
    merchant::MerchantAccount,
    request::{Envelope, Request},
    transport::{Endpoint, KeyKind, RawResponse, Transport, prepare},
};
use http::{
    HeaderMap, HeaderName, HeaderValue,
    header::{ACCEPT, CONTENT_TYPE},
};
use url::Url;
use uuid::Uuid;

use crate::{config::HttpConfig, errors::ClientError};

/// Correlation header, one fresh UUID v4 per call.
pub const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

const APPLICATION_JSON: &str = "application/json";

/// HTTP transport to the gateway.
///
/// Wraps a pooled [`reqwest::Client`]; clones share the pool, so one instance
/// (or its clones) serves any number of concurrent calls. Each call is a single
/// POST, no retries. Dropping the returned future aborts the call.
///
/// [`HttpConfig::request_timeout`] bounds every call of the client;
/// [`FondyClient::with_timeout`] gives a handle on the same pool whose calls
/// carry their own deadline.
///
/// ```no_run
/// use fondy_kit::{client::FondyClient, config::HttpConfig};
///
/// let client = FondyClient::new(&HttpConfig::default()).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FondyClient {
    pub base_url: Url,
    pub client: reqwest::Client,
    /// Sent with every call in addition to the fixed headers.
    pub headers: HeaderMap,
    pub log_payloads: bool,
    /// Deadline of each call, from connect to the last body byte. Overrides
    /// the client-wide request timeout.
    pub timeout: Option<Duration>,
}

impl FondyClient {
    pub fn new(config: &HttpConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.connect_timeout)
            .tcp_keepalive(config.keep_alive)
            .pool_idle_timeout(config.idle_timeout)
            .no_gzip()
            .no_brotli()
            .no_deflate()
            .no_zstd();

        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(FondyClient {
            base_url: config.base_url.clone(),
            client: builder.build().map_err(ClientError::Build)?,
            headers: HeaderMap::new(),
            log_payloads: config.log_payloads,
            timeout: None,
        })
    }

    pub fn header(mut self, key: &HeaderName, value: &HeaderValue) -> Self {
        self.headers.insert(key, value.to_owned());
        self
    }

    /// A handle sharing this client's pool whose calls give up after `timeout`.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        FondyClient {
            timeout: Some(timeout),
            ..self.clone()
        }
    }

    pub fn url(&self, endpoint: Endpoint) -> Result<Url, url::ParseError> {
        self.base_url.join(endpoint.path())
    }
}

impl Transport for FondyClient {
    type Error = ClientError;

    async fn send(
        &self,
        endpoint: Endpoint,
        request: &mut Request,
        key: KeyKind,
        merchant: &MerchantAccount,
        add_order_description: bool,
    ) -> Result<RawResponse, Self::Error> {
        let request_id = Uuid::new_v4().to_string();

        let url = self.url(endpoint).map_err(|source| ClientError::Url {
            request_id: request_id.clone(),
            endpoint,
            source,
        })?;

        prepare(request, key, merchant, add_order_description).map_err(|source| {
            ClientError::Signing {
                request_id: request_id.clone(),
                url: url.clone(),
                key,
                source,
            }
        })?;

        let body = Envelope::new(request)
            .to_vec()
            .map_err(|source| ClientError::Serialization {
                request_id: request_id.clone(),
                url: url.clone(),
                source,
            })?;

        #[cfg(feature = "tracing")]
        {
            tracing::debug!("[{request_id}] POST {url}");
            if self.log_payloads {
                tracing::debug!("[{request_id}] request: {}", String::from_utf8_lossy(&body));
            }
        }

        let mut builder = self
            .client
            .post(url.clone())
            .headers(self.headers.clone())
            .header(ACCEPT, APPLICATION_JSON)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .header(REQUEST_ID, request_id.as_str())
            .body(body);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|source| ClientError::Request {
                request_id: request_id.clone(),
                url: url.clone(),
                source,
            })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|source| ClientError::Body {
                request_id: request_id.clone(),
                url: url.clone(),
                source,
            })?
            .to_vec();

        #[cfg(feature = "tracing")]
        {
            tracing::debug!("[{request_id}] {url} answered {status}, {} bytes", body.len());
            if self.log_payloads {
                tracing::debug!("[{request_id}] response: {}", String::from_utf8_lossy(&body));
            }
        }

        Ok(RawResponse {
            request_id,
            status,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let client = FondyClient::new(&HttpConfig::default()).unwrap();

        assert_eq!(
            client.url(Endpoint::CheckoutUrl).unwrap().as_str(),
            "https://pay.fondy.eu/api/checkout/url/"
        );
        assert_eq!(
            client.url(Endpoint::Capture).unwrap().as_str(),
            "https://pay.fondy.eu/api/capture/order_id/"
        );
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let config = HttpConfig::builder()
            .base_url(Url::parse("http://localhost:8080/gateway/").unwrap())
            .build();
        let client = FondyClient::new(&config).unwrap();

        assert_eq!(
            client.url(Endpoint::P2pCredit).unwrap().as_str(),
            "http://localhost:8080/gateway/api/p2pcredit/"
        );
    }

    #[test]
    fn test_extra_headers() {
        let client = FondyClient::new(&HttpConfig::default())
            .unwrap()
            .header(
                &HeaderName::from_static("x-shop"),
                &HeaderValue::from_static("demo"),
            );

        assert_eq!(client.headers.get("x-shop").unwrap(), "demo");
    }

    #[test]
    fn test_with_timeout_keeps_settings() {
        let client = FondyClient::new(&HttpConfig::builder().log_payloads(true).build())
            .unwrap()
            .header(
                &HeaderName::from_static("x-shop"),
                &HeaderValue::from_static("demo"),
            );
        let bounded = client.with_timeout(Duration::from_secs(5));

        assert_eq!(client.timeout, None);
        assert_eq!(bounded.timeout, Some(Duration::from_secs(5)));
        assert_eq!(bounded.base_url, client.base_url);
        assert_eq!(bounded.headers, client.headers);
        assert!(bounded.log_payloads);
    }
}
