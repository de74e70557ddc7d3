use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use quill_auth_types::identity::Identity;
use quill_domain::pagination::PageRequest;

use crate::domain::types::{Comment, CommentAuthor, CommentFilter, NewComment};
use crate::error::BlogServiceError;
use crate::state::AppState;
use crate::usecase::comment::{CreateCommentUseCase, ListCommentsUseCase};

#[derive(Serialize)]
pub struct CommentAuthorResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile_image_url: Option<String>,
}

impl From<CommentAuthor> for CommentAuthorResponse {
    fn from(author: CommentAuthor) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name,
            last_name: author.last_name,
            email: author.email,
            profile_image_url: author.profile_image_url,
        }
    }
}

#[derive(Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub description: String,
    #[serde(serialize_with = "quill_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "quill_core::serde::opt_to_rfc3339_ms")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub user: Option<CommentAuthorResponse>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            user_id: comment.user_id,
            post_id: comment.post_id,
            description: comment.description,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            user: comment.author.map(Into::into),
        }
    }
}

// ── POST /comments ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub description: String,
    pub post_id: i64,
}

pub async fn create_comment(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), BlogServiceError> {
    let usecase = CreateCommentUseCase {
        comments: state.comment_repo(),
        posts: state.post_repo(),
    };
    let comment = usecase
        .execute(NewComment {
            user_id: identity.user_id,
            post_id: body.post_id,
            description: body.description,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

// ── GET /comments ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListCommentsQuery {
    pub user_id: Option<i64>,
    pub post_id: Option<i64>,
}

#[derive(Serialize)]
pub struct ListCommentsResponse {
    pub comments: Vec<CommentResponse>,
    pub count: u64,
}

pub async fn list_comments(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
    Query(query): Query<ListCommentsQuery>,
) -> Result<Json<ListCommentsResponse>, BlogServiceError> {
    let usecase = ListCommentsUseCase {
        comments: state.comment_repo(),
    };
    let filter = CommentFilter {
        user_id: query.user_id,
        post_id: query.post_id,
    };
    let page = usecase.execute(filter, page).await?;
    Ok(Json(ListCommentsResponse {
        comments: page.items.into_iter().map(Into::into).collect(),
        count: page.count,
    }))
}
