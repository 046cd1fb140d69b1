use crate::{controller::oauth_controller, middleware::auth::require_auth, AppState};
use axum::{
    middleware::from_fn_with_state,
    routing::get,
    Router,
};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Social Login API"
        ),
        paths(
            oauth_controller::redirect,
            oauth_controller::logout,
        ),
        tags(
            (name = "social_login", description = "Multi-provider OAuth2 login & session gating")
        )
    )]
struct ApiDoc;

/// Mount the login gate onto a host application's router.
///
/// The gate's redirect and logout routes are merged in and every route is
/// wrapped with the session-gating middleware (skip-listed paths pass
/// through). The caller layers a tower-sessions `SessionManagerLayer`
/// outside the returned router so the session is available to both the
/// middleware and the controllers.
pub fn mount(app: Router<AppState>, app_state: AppState) -> Router {
    app.merge(oauth_routes(&app_state))
        .with_state(app_state.clone())
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        .layer(from_fn_with_state(app_state, require_auth))
}

fn oauth_routes(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .route(&app_state.paths.redirect, get(oauth_controller::redirect))
        .route(&app_state.paths.logout, get(oauth_controller::logout))
}
