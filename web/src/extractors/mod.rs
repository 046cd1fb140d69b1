pub mod authenticated_user;

use axum::http::StatusCode;

type RejectionType = (StatusCode, String);
