use async_trait::async_trait;
use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, Method},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use domain::{login, UserInfo};
use log::{error, info};
use serde_json::Value;
use service::{config::Config, logging::Logger};
use std::sync::Arc;
use time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use web::{AppState, AuthHooks, AuthenticatedUser};

/// Demo host application: admits any authenticated identity and lands users
/// on the index after login. Real deployments implement their own hooks.
struct DemoHooks;

#[async_trait]
impl AuthHooks for DemoHooks {
    fn chk_auth(&self, _info: &UserInfo, ident: &Value) -> bool {
        info!("Authorizing identity {ident}");
        true
    }

    async fn login(&self, _info: UserInfo, _state: Option<String>) -> Response {
        Redirect::to("/").into_response()
    }
}

async fn index(AuthenticatedUser(info): AuthenticatedUser) -> Json<UserInfo> {
    Json(info)
}

async fn login_page(State(app_state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let link = app_state.login_link(&headers);
    Html(format!(
        r#"<p><a href="{link}">Log in with {}</a></p>"#,
        app_state.client.kind()
    ))
}

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config as &Config);

    let client = match login::client_from_config(&config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to configure login client: {e}");
            std::process::exit(1);
        }
    };

    let app_state = AppState::new(config.clone(), client, Arc::new(DemoHooks));

    let host_routes = Router::new()
        .route("/", get(index))
        .route(&app_state.paths.login, get(login_page));

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.is_production())
        .with_expiry(Expiry::OnInactivity(Duration::days(1)));

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors_layer = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_credentials(true);

    let app = web::mount(host_routes, app_state)
        .layer(session_layer)
        .layer(cors_layer);

    let interface = config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{interface}:{}", config.port);
    info!("Listening for login traffic on {addr}");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}
