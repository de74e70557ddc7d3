use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use quill_auth_types::identity::PasswordChangeIdentity;

use crate::error::BlogServiceError;
use crate::handlers::MessageResponse;
use crate::state::AppState;
use crate::usecase::auth::{
    AuthOutput, ForgotPasswordUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
    UpdatePasswordUseCase, VerifyForgotPasswordUseCase, VerifyInput, VerifyRegistrationUseCase,
};

/// User fields plus the issued bearer token.
#[derive(Serialize)]
pub struct AuthResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: Option<String>,
    #[serde(rename = "type")]
    pub role: &'static str,
    #[serde(serialize_with = "quill_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub access_token: String,
}

impl From<AuthOutput> for AuthResponse {
    fn from(out: AuthOutput) -> Self {
        Self {
            id: out.user.id,
            first_name: out.user.first_name,
            last_name: out.user.last_name,
            email: out.user.email,
            username: out.user.username,
            role: out.user.role.as_str(),
            created_at: out.user.created_at,
            access_token: out.token.token,
        }
    }
}

// ── POST /auth/register ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), BlogServiceError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        codes: state.code_store(),
        hasher: state.hasher(),
        dispatcher: state.dispatcher(),
    };
    usecase
        .execute(RegisterInput {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Verification code has been sent!")),
    ))
}

// ── POST /auth/verify ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub email: String,
    pub code: String,
}

pub async fn verify(
    State(state): State<AppState>,
    Json(body): Json<VerifyRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BlogServiceError> {
    let usecase = VerifyRegistrationUseCase {
        users: state.user_repo(),
        codes: state.code_store(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(VerifyInput {
            email: body.email,
            code: body.code,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(out.into())))
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, BlogServiceError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        hasher: state.hasher(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(out.into()))
}

// ── POST /auth/forgot-password ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), BlogServiceError> {
    let usecase = ForgotPasswordUseCase {
        users: state.user_repo(),
        dispatcher: state.dispatcher(),
    };
    usecase.execute(body.email).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Verification code has been sent!")),
    ))
}

// ── POST /auth/verify-forgot-password ────────────────────────────────────────

pub async fn verify_forgot_password(
    State(state): State<AppState>,
    Json(body): Json<VerifyRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BlogServiceError> {
    let usecase = VerifyForgotPasswordUseCase {
        users: state.user_repo(),
        codes: state.code_store(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(VerifyInput {
            email: body.email,
            code: body.code,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(out.into())))
}

// ── POST /auth/update-password ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdatePasswordRequest {
    pub password: String,
}

pub async fn update_password(
    identity: PasswordChangeIdentity,
    State(state): State<AppState>,
    Json(body): Json<UpdatePasswordRequest>,
) -> Result<Json<MessageResponse>, BlogServiceError> {
    let usecase = UpdatePasswordUseCase {
        users: state.user_repo(),
        hasher: state.hasher(),
    };
    usecase.execute(identity.user_id, &body.password).await?;
    Ok(Json(MessageResponse::new("Password has been updated!")))
}
