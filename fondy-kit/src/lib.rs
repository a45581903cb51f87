//! # Fondy Kit
//!
//! Async client for the Fondy hosted card-payment gateway. Every call is one
//! signed JSON POST; the reply is decoded into a typed result or an
//! [`ApiError`](errors::ApiError) carrying the request as sent.
//!
//! ## Components
//!
//! - **[`gateway`]**: the [`Gateway`](gateway::Gateway) facade: verification links, payments,
//!   withdrawals and captures.
//! - **[`operations`]**: builders for the business attributes of each operation.
//! - **[`client`]**: [`FondyClient`](client::FondyClient), the reqwest transport.
//! - **[`mapper`]**: classification of call outcomes into error codes.
//! - **[`config`]**: connection and operation settings.
//! - **[`errors`]**: transport and API errors.
//!
//! The protocol types live in [`fondy_core`], re-exported here.
//!
//! ## Error codes
//!
//! | code | meaning                                               |
//! |------|-------------------------------------------------------|
//! | 800  | the call did not complete                             |
//! | 801  | the reply could not be decoded                        |
//! | 802  | the reply lacks the operation's payload               |
//! | 803  | the gateway rejected the call (`response_status = failure`) |
//!
//! ## Custom transports
//!
//! [`Gateway`](gateway::Gateway) is generic over [`Transport`](fondy_core::transport::Transport),
//! so tests or proxies can replace the HTTP client:
//!
//! ```
//! use fondy_core::{
//!     merchant::MerchantAccount,
//!     request::Request,
//!     transport::{Endpoint, KeyKind, RawResponse, Transport, prepare},
//! };
//! use fondy_kit::{config::Options, errors::ClientError, gateway::Gateway};
//!
//! struct Canned;
//!
//! impl Transport for Canned {
//!     type Error = ClientError;
//!
//!     async fn send(
//!         &self,
//!         _endpoint: Endpoint,
//!         request: &mut Request,
//!         key: KeyKind,
//!         merchant: &MerchantAccount,
//!         add_order_description: bool,
//!     ) -> Result<RawResponse, Self::Error> {
//!         prepare(request, key, merchant, add_order_description).ok();
//!         Ok(RawResponse {
//!             request_id: "canned".into(),
//!             status: 200,
//!             body: br#"{"response":{"response_status":"success","order_status":"approved"}}"#.to_vec(),
//!         })
//!     }
//! }
//!
//! let gateway = Gateway::new(Canned, Options::default());
//! ```

pub mod client;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod mapper;
pub mod operations;

pub use fondy_core;
