//! Controller for the gate's own routes: the provider redirect callback and
//! logout.
//!
//! Note: these endpoints are reached via browser redirects, which cannot set
//! custom headers; everything they need arrives in query parameters and the
//! session cookie.

use crate::hooks::authorized_ident;
use crate::{AppState, SESSION_AUTH_KEY};

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use log::*;
use serde::Deserialize;
use tower_sessions::Session;

/// Query parameters the provider sends back to the redirect route.
#[derive(Debug, Deserialize)]
pub struct OAuthCallback {
    #[serde(default)]
    pub code: String,
    pub state: Option<String>,
}

/// GET the configured redirect path (default `/redirect`).
///
/// Exchanges the authorization code, runs the application's authorization
/// predicate and, when accepted, stores the access token in the session and
/// answers with the application's login hook.
#[utoipa::path(
    get,
    path = "/redirect",
    params(
        ("code" = String, Query, description = "Authorization code from the provider"),
        ("state" = Option<String>, Query, description = "CSRF state echoed by the provider"),
    ),
    responses(
        (status = 200, description = "Login hook response, or a plain-text notice when no code was provided"),
        (status = 303, description = "Authorization failed; redirected to the login path"),
    )
)]
pub async fn redirect(
    State(app_state): State<AppState>,
    Query(params): Query<OAuthCallback>,
    headers: HeaderMap,
    session: Session,
) -> Response {
    if params.code.is_empty() {
        // Deliberate soft-fail: a bare visit to the redirect path answers
        // with a readable notice instead of an error status, so a
        // misconfigured provider redirect is visible in the browser.
        return "No code provided!".into_response();
    }

    let redirect_uri = app_state.redirect_uri(&headers);
    debug!("Handling provider redirect via {redirect_uri}");

    let exchanged = app_state
        .client
        .exchange_and_fetch_info(&params.code, &redirect_uri)
        .await;
    let (tokens, info) = match exchanged {
        Ok(exchanged) => exchanged,
        Err(e) => {
            // Error details stay in the logs; the browser only sees the
            // login page again.
            warn!("Authorization-code exchange failed: {e:?}");
            return Redirect::to(&app_state.paths.login).into_response();
        }
    };

    if authorized_ident(&app_state, &info).is_none() {
        info!("Login via {} rejected", app_state.client.kind());
        return Redirect::to(&app_state.paths.login).into_response();
    }

    if let Err(e) = session.insert(SESSION_AUTH_KEY, tokens.access_token).await {
        warn!("Failed to store access token in session: {e:?}");
        return Redirect::to(&app_state.paths.login).into_response();
    }

    info!("Login via {} accepted", app_state.client.kind());
    app_state.hooks.login(info, params.state).await
}

/// GET the configured logout path (default `/logout`).
///
/// Clears the session's auth key and answers with the application's logout
/// hook (by default a 303 back to the login path).
#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 303, description = "Session cleared; redirected per the logout hook"),
    )
)]
pub async fn logout(State(app_state): State<AppState>, session: Session) -> Response {
    trace!("OauthController::logout()");
    if let Err(e) = session.remove::<String>(SESSION_AUTH_KEY).await {
        warn!("Failed to clear auth key from session: {e:?}");
    }
    app_state.hooks.logout(&session, &app_state.paths.login).await
}
