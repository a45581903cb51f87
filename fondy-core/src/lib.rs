//! Fondy core library.
//!
//! This library provides the request model, signing and response types of the
//! Fondy payment gateway protocol, independent of any HTTP stack.
//!
//! - [`request`]: the optional-attribute [`Request`](request::Request) and its wire envelope.
//! - [`signature`]: canonicalization and SHA-1 signing of requests.
//! - [`response`]: decoded replies and typed payloads.
//! - [`merchant`]: merchant accounts and their signing keys.
//! - [`transport`]: the [`Transport`](transport::Transport) trait implemented by HTTP clients.

pub mod errors;
pub mod merchant;
pub mod request;
pub mod response;
pub mod signature;
pub mod transport;
pub mod types;
