use quill_domain::pagination::{Page, PageRequest};

use crate::domain::repository::CategoryRepository;
use crate::domain::types::{CATEGORY_TITLE_MAX_LEN, Category};
use crate::error::BlogServiceError;

fn check_title(title: &str) -> Result<&str, BlogServiceError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > CATEGORY_TITLE_MAX_LEN {
        return Err(BlogServiceError::validation(
            "title must be 1-100 characters",
        ));
    }
    Ok(title)
}

pub struct CreateCategoryUseCase<R: CategoryRepository> {
    pub categories: R,
}

impl<R: CategoryRepository> CreateCategoryUseCase<R> {
    pub async fn execute(&self, title: &str) -> Result<Category, BlogServiceError> {
        self.categories.create(check_title(title)?).await
    }
}

pub struct GetCategoryUseCase<R: CategoryRepository> {
    pub categories: R,
}

impl<R: CategoryRepository> GetCategoryUseCase<R> {
    pub async fn execute(&self, id: i64) -> Result<Category, BlogServiceError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or(BlogServiceError::CategoryNotFound)
    }
}

pub struct ListCategoriesUseCase<R: CategoryRepository> {
    pub categories: R,
}

impl<R: CategoryRepository> ListCategoriesUseCase<R> {
    pub async fn execute(
        &self,
        search: Option<String>,
        page: PageRequest,
    ) -> Result<Page<Category>, BlogServiceError> {
        let search = search.filter(|s| !s.trim().is_empty());
        self.categories
            .list(search.as_deref(), page.clamped())
            .await
    }
}

pub struct UpdateCategoryUseCase<R: CategoryRepository> {
    pub categories: R,
}

impl<R: CategoryRepository> UpdateCategoryUseCase<R> {
    pub async fn execute(&self, id: i64, title: &str) -> Result<Category, BlogServiceError> {
        self.categories
            .update(id, check_title(title)?)
            .await?
            .ok_or(BlogServiceError::CategoryNotFound)
    }
}

pub struct DeleteCategoryUseCase<R: CategoryRepository> {
    pub categories: R,
}

impl<R: CategoryRepository> DeleteCategoryUseCase<R> {
    pub async fn execute(&self, id: i64) -> Result<(), BlogServiceError> {
        if !self.categories.delete(id).await? {
            return Err(BlogServiceError::CategoryNotFound);
        }
        Ok(())
    }
}
