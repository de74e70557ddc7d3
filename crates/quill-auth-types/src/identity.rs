//! Bearer-token identity extractors.

use axum::Json;
use axum::extract::FromRequestParts;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use http::header::AUTHORIZATION;
use http::request::Parts;

use quill_domain::user::UserRole;

use crate::token::{AuthError, TokenInfo, TokenScope, validate_token};

/// Router state that knows the HMAC secret tokens are signed with.
pub trait TokenSecret {
    fn token_secret(&self) -> &str;
}

/// Caller identity from a `session`-scoped bearer token.
///
/// Reads `Authorization: Bearer <jwt>`; a bare `<jwt>` is accepted too.
/// Returns 401 if the header is absent, the token fails validation, or the
/// token is a password-reset token. Role enforcement (403) is done by handlers.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i64,
    pub email: String,
    pub role: UserRole,
}

/// Caller identity for the update-password route: accepts either token scope.
#[derive(Debug, Clone)]
pub struct PasswordChangeIdentity {
    pub user_id: i64,
    pub scope: TokenScope,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityRejection {
    #[error("authorization header is not provided")]
    Missing,
    #[error(transparent)]
    Invalid(#[from] AuthError),
    #[error("token cannot be used for this route")]
    WrongScope,
}

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "kind": "INVALID_TOKEN",
            "message": self.to_string(),
        });
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let raw = parts.headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    (!token.is_empty()).then_some(token)
}

fn authenticate(parts: &Parts, secret: &str) -> Result<TokenInfo, IdentityRejection> {
    let token = bearer_token(parts).ok_or(IdentityRejection::Missing)?;
    validate_token(token, secret).map_err(|e| {
        tracing::debug!(error = %e, "bearer token rejected");
        IdentityRejection::Invalid(e)
    })
}

impl<S> FromRequestParts<S> for Identity
where
    S: TokenSecret + Send + Sync,
{
    type Rejection = IdentityRejection;

    // Validate synchronously so the returned future borrows nothing from `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = authenticate(parts, state.token_secret());

        async move {
            let info = result?;
            if info.scope != TokenScope::Session {
                return Err(IdentityRejection::WrongScope);
            }
            Ok(Self {
                user_id: info.user_id,
                email: info.email,
                role: info.role,
            })
        }
    }
}

impl<S> FromRequestParts<S> for PasswordChangeIdentity
where
    S: TokenSecret + Send + Sync,
{
    type Rejection = IdentityRejection;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = authenticate(parts, state.token_secret());

        async move {
            let info = result?;
            Ok(Self {
                user_id: info.user_id,
                scope: info.scope,
            })
        }
    }
}
