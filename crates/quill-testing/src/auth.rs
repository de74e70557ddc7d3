//! Mock auth helpers for integration tests.
//!
//! Protected routes read a signed bearer token from `Authorization`. `MockAuth`
//! signs one with the test secret so router tests need no login round trip.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use jsonwebtoken::{EncodingKey, Header, encode};

use quill_auth_types::token::{JwtClaims, TokenScope};
use quill_domain::user::UserRole;

/// Configurable identity minted into test requests.
pub struct MockAuth {
    pub user_id: i64,
    pub email: String,
    pub role: UserRole,
    pub scope: TokenScope,
    /// Seconds until expiry; negative values mint an already-expired token.
    pub ttl_secs: i64,
}

impl MockAuth {
    pub fn session(user_id: i64, role: UserRole) -> Self {
        Self {
            user_id,
            email: format!("user{user_id}@example.com"),
            role,
            scope: TokenScope::Session,
            ttl_secs: 3600,
        }
    }

    pub fn password_reset(user_id: i64) -> Self {
        Self {
            scope: TokenScope::PasswordReset,
            ttl_secs: 1800,
            ..Self::session(user_id, UserRole::User)
        }
    }

    pub fn expired(mut self) -> Self {
        self.ttl_secs = -3600;
        self
    }

    /// Sign the claims with `secret`.
    pub fn token(&self, secret: &str) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let claims = JwtClaims {
            sub: self.user_id.to_string(),
            email: self.email.clone(),
            role: self.role,
            scope: self.scope,
            iat: now,
            exp: now.saturating_add_signed(self.ttl_secs),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    /// `Authorization: Bearer <token>` header value.
    pub fn header_value(&self, secret: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", self.token(secret))).unwrap()
    }

    /// Headers as a logged-in client would send them.
    pub fn headers(&self, secret: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, self.header_value(secret));
        map
    }
}
