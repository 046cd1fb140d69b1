use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use log::*;
use tower_sessions::Session;

use crate::hooks::authorized_ident;
use crate::{AppState, SESSION_AUTH_KEY};

/// Session-gating middleware run on every request.
///
/// Skip-listed paths (by default the login and redirect paths) pass straight
/// through. Everything else requires a session-held access token that still
/// passes a live info fetch and the application's authorization predicate;
/// otherwise the request is answered with a 303 redirect to the login page.
/// On success the fetched user info rides along in request extensions for
/// handlers and the [`crate::AuthenticatedUser`] extractor.
pub async fn require_auth(
    State(app_state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if app_state.paths.skip.iter().any(|skip| skip == &path) {
        return next.run(request).await;
    }

    let auth = match session.get::<String>(SESSION_AUTH_KEY).await {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to read auth key from session: {e:?}");
            None
        }
    };
    let Some(token) = auth.filter(|token| !token.is_empty()) else {
        return Redirect::to(&app_state.paths.login).into_response();
    };

    // The stored token is re-validated against the provider on every
    // gated request; a token the provider no longer honors logs the
    // session out implicitly.
    let info = match app_state.client.get_info(&token).await {
        Ok(info) => info,
        Err(e) => {
            warn!("Session token failed live user-info fetch: {e:?}");
            return Redirect::to(&app_state.paths.login).into_response();
        }
    };

    if authorized_ident(&app_state, &info).is_none() {
        debug!("Session identity rejected on {path}");
        return Redirect::to(&app_state.paths.login).into_response();
    }

    request.extensions_mut().insert(info);
    next.run(request).await
}
