use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};

use quill_auth_types::token::{JwtClaims, TokenScope};

use crate::domain::types::{PASSWORD_RESET_TOKEN_TTL, SESSION_TOKEN_TTL, User};
use crate::error::BlogServiceError;

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: u64,
    pub expires_at: u64,
}

fn now_secs() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or_default()
}

pub fn issue_token(
    user: &User,
    scope: TokenScope,
    ttl: Duration,
    secret: &str,
) -> Result<IssuedToken, BlogServiceError> {
    let iat = now_secs();
    let exp = iat + ttl.as_secs();
    let claims = JwtClaims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        role: user.role,
        scope,
        iat,
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| BlogServiceError::Internal(e.into()))?;
    Ok(IssuedToken {
        token,
        issued_at: iat,
        expires_at: exp,
    })
}

/// 24 h token accepted by every protected route.
pub fn issue_session_token(user: &User, secret: &str) -> Result<IssuedToken, BlogServiceError> {
    issue_token(user, TokenScope::Session, SESSION_TOKEN_TTL, secret)
}

/// 30 min token accepted only by update-password.
pub fn issue_password_reset_token(
    user: &User,
    secret: &str,
) -> Result<IssuedToken, BlogServiceError> {
    issue_token(
        user,
        TokenScope::PasswordReset,
        PASSWORD_RESET_TOKEN_TTL,
        secret,
    )
}
