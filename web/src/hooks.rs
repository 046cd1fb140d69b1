//! Host-application extension points for the login gate.

use async_trait::async_trait;
use axum::response::{IntoResponse, Redirect, Response};
use domain::UserInfo;
use serde_json::Value;
use tower_sessions::Session;

use crate::AppState;

/// Capabilities the embedding application supplies at gate construction.
///
/// Implementations decide who may log in and what a successful login or
/// logout answers with. Only `logout` carries a default (redirect back to
/// the login page); the other two are required, so an application that
/// forgets one fails to compile rather than failing at runtime.
#[async_trait]
pub trait AuthHooks: Send + Sync {
    /// Authorization predicate: may the subject identified by `ident` use
    /// this application? `info` is the full provider payload for richer
    /// checks (org membership, email domain, ...).
    fn chk_auth(&self, info: &UserInfo, ident: &Value) -> bool;

    /// Called after a successful redirect-callback exchange, with the
    /// session already holding the access token. `state` is the CSRF state
    /// the provider echoed back, when present.
    async fn login(&self, info: UserInfo, state: Option<String>) -> Response;

    /// Called after the gate has cleared the session's auth key.
    async fn logout(&self, _session: &Session, login_path: &str) -> Response {
        Redirect::to(login_path).into_response()
    }
}

/// A JSON value that reads as "no identity": null, false, zero or the empty
/// string.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// Extract the identity and run the application predicate over it.
///
/// Returns `None` (treat the session as unauthenticated) when the identity
/// field is absent or falsy, without consulting the predicate.
pub(crate) fn authorized_ident(app_state: &AppState, info: &UserInfo) -> Option<Value> {
    let ident = info.get(app_state.client.id_key())?.clone();
    if is_falsy(&ident) {
        return None;
    }
    app_state.hooks.chk_auth(info, &ident).then_some(ident)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_falsy_identity_values() {
        assert!(is_falsy(&Value::Null));
        assert!(is_falsy(&json!(false)));
        assert!(is_falsy(&json!("")));
        assert!(is_falsy(&json!(0)));
        assert!(is_falsy(&json!(0.0)));

        assert!(!is_falsy(&json!(true)));
        assert!(!is_falsy(&json!("user-1")));
        assert!(!is_falsy(&json!(12345)));
        assert!(!is_falsy(&json!({"nested": true})));
    }
}
