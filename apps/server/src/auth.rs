//! Request identity.
//!
//! Authentication happens upstream; the gateway forwards the authenticated
//! user's id in the `X-User-Id` header and every record handler scopes its
//! work to it.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

const MAX_USER_ID_LEN: usize = 128;

/// Id of the user the request acts for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for UserId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| ApiError::Unauthorized("Missing X-User-Id header".to_string()))?
            .to_str()
            .map_err(|_| ApiError::Unauthorized("Invalid X-User-Id header".to_string()))?;

        let user_id = raw.trim();
        if user_id.is_empty() {
            return Err(ApiError::Unauthorized(
                "Missing X-User-Id header".to_string(),
            ));
        }
        if user_id.len() > MAX_USER_ID_LEN {
            return Err(ApiError::Unauthorized("Invalid X-User-Id header".to_string()));
        }
        Ok(UserId(user_id.to_string()))
    }
}
