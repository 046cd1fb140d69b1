//! Session-gating OAuth login for axum applications.
//!
//! The host application builds its own `Router`, implements [`AuthHooks`]
//! and hands both to [`router::mount`]; every non-skipped route is then
//! gated behind a provider-validated session.

use axum::http::HeaderMap;
use domain::OauthClient;
use service::config::Config;
use std::sync::Arc;

pub mod controller;
pub mod error;
pub mod extractors;
pub mod hooks;
pub mod middleware;
pub mod router;

pub use error::{Error, Result};
pub use extractors::authenticated_user::AuthenticatedUser;
pub use hooks::AuthHooks;
pub use router::mount;

/// Session key holding the raw access-token string. Its presence is the
/// "is logged in" signal; the value is re-sent to the provider's info
/// endpoint on every protected request.
pub const SESSION_AUTH_KEY: &str = "auth";

/// Route paths owned by the gate, plus the paths exempt from the session
/// pre-check.
#[derive(Clone, Debug)]
pub struct GatePaths {
    /// Host-owned login page the gate redirects to. Not created here.
    pub login: String,
    /// Provider redirect-callback route.
    pub redirect: String,
    /// Session-clearing route.
    pub logout: String,
    /// Paths exempt from the session pre-check. Defaults to the login and
    /// redirect paths; everything else (the logout path included) is gated.
    pub skip: Vec<String>,
}

impl GatePaths {
    fn from_config(config: &Config) -> Self {
        let login = config.login_path().to_string();
        let redirect = config.redirect_path().to_string();
        Self {
            skip: vec![login.clone(), redirect.clone()],
            logout: config.logout_path().to_string(),
            login,
            redirect,
        }
    }
}

/// Shared state for the gate's middleware and controllers.
///
/// Needs to implement Clone to be able to be passed into Router as State.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub client: Arc<OauthClient>,
    pub hooks: Arc<dyn AuthHooks>,
    pub paths: GatePaths,
}

impl AppState {
    pub fn new(config: Config, client: Arc<OauthClient>, hooks: Arc<dyn AuthHooks>) -> Self {
        let paths = GatePaths::from_config(&config);
        Self {
            config,
            client,
            hooks,
            paths,
        }
    }

    /// Replace the default skip list (login and redirect paths).
    pub fn with_skip(mut self, skip: Vec<String>) -> Self {
        self.paths.skip = skip;
        self
    }

    /// The redirect URI registered with the provider, reconstructed from the
    /// incoming request's headers.
    pub fn redirect_uri(&self, headers: &HeaderMap) -> String {
        format!(
            "{}{}",
            controller::request_base_url(headers),
            self.paths.redirect
        )
    }

    /// A ready-to-use provider authorization link for the incoming request.
    /// Host login pages render this.
    pub fn login_link(&self, headers: &HeaderMap) -> String {
        self.client.login_link(&self.redirect_uri(headers), None, None)
    }
}
