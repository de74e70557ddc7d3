use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use quill_auth_types::identity::Identity;
use quill_domain::like::LikeOutcome;

use crate::error::BlogServiceError;
use crate::state::AppState;
use crate::usecase::like::{GetLikeUseCase, ToggleLikeInput, ToggleLikeUseCase};

// ── POST /likes ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ToggleLikeRequest {
    pub post_id: i64,
    /// `true` = like, `false` = dislike.
    pub status: bool,
}

#[derive(Serialize)]
pub struct ToggleLikeResponse {
    pub outcome: LikeOutcome,
}

pub async fn toggle_like(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<ToggleLikeRequest>,
) -> Result<Json<ToggleLikeResponse>, BlogServiceError> {
    let usecase = ToggleLikeUseCase {
        likes: state.like_repo(),
        posts: state.post_repo(),
    };
    let outcome = usecase
        .execute(ToggleLikeInput {
            user_id: identity.user_id,
            post_id: body.post_id,
            status: body.status,
        })
        .await?;
    Ok(Json(ToggleLikeResponse { outcome }))
}

// ── GET /likes/user-post ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct GetLikeQuery {
    pub post_id: i64,
}

#[derive(Serialize)]
pub struct LikeResponse {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub status: bool,
}

pub async fn get_like(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<GetLikeQuery>,
) -> Result<Json<LikeResponse>, BlogServiceError> {
    let usecase = GetLikeUseCase {
        likes: state.like_repo(),
    };
    let like = usecase.execute(identity.user_id, query.post_id).await?;
    Ok(Json(LikeResponse {
        id: like.id,
        post_id: like.post_id,
        user_id: like.user_id,
        status: like.status,
    }))
}
