use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use quill_auth_types::identity::Identity;
use quill_domain::pagination::PageRequest;

use crate::domain::types::Category;
use crate::error::BlogServiceError;
use crate::handlers::require_superadmin;
use crate::state::AppState;
use crate::usecase::category::{
    CreateCategoryUseCase, DeleteCategoryUseCase, GetCategoryUseCase, ListCategoriesUseCase,
    UpdateCategoryUseCase,
};

#[derive(Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub title: String,
    #[serde(serialize_with = "quill_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            title: category.title,
            created_at: category.created_at,
        }
    }
}

#[derive(Deserialize)]
pub struct CategoryRequest {
    pub title: String,
}

// ── POST /categories ─────────────────────────────────────────────────────────

pub async fn create_category(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), BlogServiceError> {
    require_superadmin(&identity)?;
    let usecase = CreateCategoryUseCase {
        categories: state.category_repo(),
    };
    let category = usecase.execute(&body.title).await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

// ── GET /categories/{id} ─────────────────────────────────────────────────────

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CategoryResponse>, BlogServiceError> {
    let usecase = GetCategoryUseCase {
        categories: state.category_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── GET /categories ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListCategoriesQuery {
    pub search: Option<String>,
}

#[derive(Serialize)]
pub struct ListCategoriesResponse {
    pub categories: Vec<CategoryResponse>,
    pub count: u64,
}

pub async fn list_categories(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
    Query(query): Query<ListCategoriesQuery>,
) -> Result<Json<ListCategoriesResponse>, BlogServiceError> {
    let usecase = ListCategoriesUseCase {
        categories: state.category_repo(),
    };
    let page = usecase.execute(query.search, page).await?;
    Ok(Json(ListCategoriesResponse {
        categories: page.items.into_iter().map(Into::into).collect(),
        count: page.count,
    }))
}

// ── PUT /categories/{id} ─────────────────────────────────────────────────────

pub async fn update_category(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<CategoryRequest>,
) -> Result<Json<CategoryResponse>, BlogServiceError> {
    require_superadmin(&identity)?;
    let usecase = UpdateCategoryUseCase {
        categories: state.category_repo(),
    };
    Ok(Json(usecase.execute(id, &body.title).await?.into()))
}

// ── DELETE /categories/{id} ──────────────────────────────────────────────────

pub async fn delete_category(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, BlogServiceError> {
    require_superadmin(&identity)?;
    let usecase = DeleteCategoryUseCase {
        categories: state.category_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
