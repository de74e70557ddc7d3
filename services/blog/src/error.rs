use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Blog service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum BlogServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("email already exists")]
    EmailExists,
    #[error("username already exists")]
    UsernameExists,
    #[error("wrong email or password")]
    WrongEmailOrPassword,
    #[error("user not verified")]
    UserNotVerified,
    #[error("incorrect verification code")]
    IncorrectCode,
    #[error("verification code has been expired")]
    CodeExpired,
    #[error("forbidden")]
    Forbidden,
    #[error("invalid token")]
    InvalidToken,
    #[error("user not found")]
    UserNotFound,
    #[error("category not found")]
    CategoryNotFound,
    #[error("category still has posts")]
    CategoryInUse,
    #[error("post not found")]
    PostNotFound,
    #[error("like not found")]
    LikeNotFound,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl BlogServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::EmailExists => "EMAIL_EXISTS",
            Self::UsernameExists => "USERNAME_EXISTS",
            Self::WrongEmailOrPassword => "WRONG_EMAIL_OR_PASSWORD",
            Self::UserNotVerified => "USER_NOT_VERIFIED",
            Self::IncorrectCode => "INCORRECT_CODE",
            Self::CodeExpired => "CODE_EXPIRED",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::CategoryNotFound => "CATEGORY_NOT_FOUND",
            Self::CategoryInUse => "CATEGORY_IN_USE",
            Self::PostNotFound => "POST_NOT_FOUND",
            Self::LikeNotFound => "LIKE_NOT_FOUND",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }
}

impl IntoResponse for BlogServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::EmailExists | Self::UsernameExists | Self::CategoryInUse => {
                StatusCode::CONFLICT
            }
            Self::WrongEmailOrPassword
            | Self::UserNotVerified
            | Self::IncorrectCode
            | Self::CodeExpired
            | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::UserNotFound
            | Self::CategoryNotFound
            | Self::PostNotFound
            | Self::LikeNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // TraceLayer already records every response status; only 500s carry a cause worth logging.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
