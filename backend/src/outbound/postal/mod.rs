//! Postal-code lookup adapters.
//!
//! This module provides a thin HTTP implementation of the
//! `PostalCodeSource` port against a Zippopotam-compatible API.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_POSTAL_LOOKUP_BASE_URL, PostalHttpSource};
