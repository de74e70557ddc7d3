use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use quill_auth_types::identity::Identity;
use quill_domain::pagination::{PageRequest, Sort};

use crate::domain::types::{LikeCounts, NewPost, Post, PostFilter};
use crate::error::BlogServiceError;
use crate::state::AppState;
use crate::usecase::post::{CreatePostUseCase, GetPostUseCase, ListPostsUseCase};

#[derive(Serialize)]
pub struct LikeInfoResponse {
    pub likes_count: i64,
    pub dislikes_count: i64,
}

impl From<LikeCounts> for LikeInfoResponse {
    fn from(counts: LikeCounts) -> Self {
        Self {
            likes_count: counts.likes,
            dislikes_count: counts.dislikes,
        }
    }
}

#[derive(Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub user_id: i64,
    pub category_id: i64,
    pub views_count: i32,
    #[serde(serialize_with = "quill_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "quill_core::serde::opt_to_rfc3339_ms")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Only present on single-post reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub like_info: Option<LikeInfoResponse>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            description: post.description,
            image_url: post.image_url,
            user_id: post.user_id,
            category_id: post.category_id,
            views_count: post.views_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
            like_info: None,
        }
    }
}

// ── POST /posts ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub category_id: i64,
}

pub async fn create_post(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), BlogServiceError> {
    let usecase = CreatePostUseCase {
        posts: state.post_repo(),
        categories: state.category_repo(),
    };
    let post = usecase
        .execute(NewPost {
            title: body.title,
            description: body.description,
            image_url: body.image_url,
            user_id: identity.user_id,
            category_id: body.category_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

// ── GET /posts/{id} ──────────────────────────────────────────────────────────

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PostResponse>, BlogServiceError> {
    let usecase = GetPostUseCase {
        posts: state.post_repo(),
        likes: state.like_repo(),
    };
    let found = usecase.execute(id).await?;
    let mut response = PostResponse::from(found.post);
    response.like_info = Some(found.likes.into());
    Ok(Json(response))
}

// ── GET /posts ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListPostsQuery {
    pub search: Option<String>,
    pub user_id: Option<i64>,
    pub category_id: Option<i64>,
    pub sort_by_date: Option<String>,
}

#[derive(Serialize)]
pub struct ListPostsResponse {
    pub posts: Vec<PostResponse>,
    pub count: u64,
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<ListPostsResponse>, BlogServiceError> {
    let usecase = ListPostsUseCase {
        posts: state.post_repo(),
    };
    let filter = PostFilter {
        search: query.search,
        user_id: query.user_id,
        category_id: query.category_id,
        sort_by_date: Sort::from_query(query.sort_by_date.as_deref()),
    };
    let page = usecase.execute(filter, page).await?;
    Ok(Json(ListPostsResponse {
        posts: page.items.into_iter().map(Into::into).collect(),
        count: page.count,
    }))
}
