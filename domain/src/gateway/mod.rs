//! HTTP clients for external services.

pub mod oauth;
