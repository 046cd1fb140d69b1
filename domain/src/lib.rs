//! Core login-flow logic: provider clients, flow functions and the domain
//! error tree.
//!
//! The `web` crate consumes this crate and should not reach around it to the
//! HTTP stack directly; the re-exports below are the supported surface.

pub use gateway::oauth::{
    decode, ClientOptions, OauthClient, ProviderKind, ProviderUrls, TokenResponse, UserInfo,
};

pub mod error;
pub mod login;

pub mod gateway;
