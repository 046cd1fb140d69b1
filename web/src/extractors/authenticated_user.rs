use crate::extractors::RejectionType;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use domain::UserInfo;

/// The provider user info the session-gating middleware fetched for this
/// request.
pub struct AuthenticatedUser(pub UserInfo);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = RejectionType;

    // The middleware attaches the fetched UserInfo to request extensions on
    // every gated request that passed the authorization check; this extractor
    // hands it to handlers. A missing extension means the route was reached
    // without the gate (e.g. a skip-listed path), which handlers treat as
    // unauthenticated.
    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserInfo>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()))
    }
}
