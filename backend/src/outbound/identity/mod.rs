//! Hosted authentication adapters.
//!
//! [`HostedIdentityProvider`] speaks the GoTrue-style REST API exposed by the
//! hosted backend. The fixture provider in `domain::ports` covers development
//! runs without one.

mod dto;
mod http_provider;

pub use http_provider::{HostedIdentityConfig, HostedIdentityProvider};
