use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use quill_auth_types::identity::Identity;
use quill_domain::pagination::PageRequest;
use quill_domain::user::UserRole;

use crate::domain::types::User;
use crate::error::BlogServiceError;
use crate::handlers::require_superadmin;
use crate::state::AppState;
use crate::usecase::user::{CreateUserInput, CreateUserUseCase, GetUserUseCase, ListUsersUseCase};

#[derive(Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub email: String,
    pub gender: Option<String>,
    pub username: Option<String>,
    pub profile_image_url: Option<String>,
    #[serde(rename = "type")]
    pub role: &'static str,
    #[serde(serialize_with = "quill_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            email: user.email,
            gender: user.gender,
            username: user.username,
            profile_image_url: user.profile_image_url,
            role: user.role.as_str(),
            created_at: user.created_at,
        }
    }
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub email: String,
    pub gender: Option<String>,
    pub username: Option<String>,
    pub profile_image_url: Option<String>,
    #[serde(rename = "type")]
    pub role: UserRole,
    pub password: String,
}

pub async fn create_user(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), BlogServiceError> {
    require_superadmin(&identity)?;
    let usecase = CreateUserUseCase {
        users: state.user_repo(),
        hasher: state.hasher(),
    };
    let user = usecase
        .execute(CreateUserInput {
            first_name: body.first_name,
            last_name: body.last_name,
            phone_number: body.phone_number,
            email: body.email,
            gender: body.gender,
            username: body.username,
            profile_image_url: body.profile_image_url,
            role: body.role,
            password: body.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /users/me ────────────────────────────────────────────────────────────

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, BlogServiceError> {
    let usecase = GetUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(user.into()))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, BlogServiceError> {
    let usecase = GetUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(id).await?;
    Ok(Json(user.into()))
}

// ── GET /users ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListUsersQuery {
    pub search: Option<String>,
}

#[derive(Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserResponse>,
    pub count: u64,
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<ListUsersResponse>, BlogServiceError> {
    let usecase = ListUsersUseCase {
        users: state.user_repo(),
    };
    let page = usecase.execute(query.search, page).await?;
    Ok(Json(ListUsersResponse {
        users: page.items.into_iter().map(Into::into).collect(),
        count: page.count,
    }))
}
