use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{bearer_token, AuthError};
use crate::error::ApiError;
use crate::state::AppState;

/// Verified caller context extracted from the bearer token. Extraction
/// runs before any handler body, so a failed verification rejects the
/// request with 401 without touching storage.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub subject: String,
    pub permissions: Vec<String>,
}

impl AuthUser {
    /// Permission gate: handlers call this with the scope they need before
    /// doing any work. A token without the scope gets 403.
    pub fn require(&self, permission: &str) -> Result<(), ApiError> {
        if self.permissions.iter().any(|p| p == permission) {
            Ok(())
        } else {
            Err(AuthError::PermissionDenied(permission.to_string()).into())
        }
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let claims = state.verifier.verify(token).await?;

        Ok(AuthUser {
            subject: claims.sub.clone(),
            permissions: claims.permissions(&state.config.auth.permissions_claim),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(permissions: &[&str]) -> AuthUser {
        AuthUser {
            subject: "auth0|tester".to_string(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_granted_permission_passes() {
        assert!(user(&["post:drinks", "get:drink-details"])
            .require("post:drinks")
            .is_ok());
    }

    #[test]
    fn test_missing_permission_is_forbidden() {
        let err = user(&["get:drink-details"]).require("delete:drinks").unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn test_empty_permission_list_always_denies() {
        let err = user(&[]).require("get:drink-details").unwrap_err();
        assert_eq!(err.status_code(), 403);
    }
}
