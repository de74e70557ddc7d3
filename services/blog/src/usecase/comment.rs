use quill_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{CommentRepository, PostRepository};
use crate::domain::types::{Comment, CommentFilter, NewComment};
use crate::error::BlogServiceError;

pub struct CreateCommentUseCase<C: CommentRepository, P: PostRepository> {
    pub comments: C,
    pub posts: P,
}

impl<C: CommentRepository, P: PostRepository> CreateCommentUseCase<C, P> {
    pub async fn execute(&self, comment: NewComment) -> Result<Comment, BlogServiceError> {
        if comment.description.trim().is_empty() {
            return Err(BlogServiceError::validation("description is required"));
        }
        self.posts
            .find_by_id(comment.post_id)
            .await?
            .ok_or(BlogServiceError::PostNotFound)?;
        self.comments.create(&comment).await
    }
}

pub struct ListCommentsUseCase<C: CommentRepository> {
    pub comments: C,
}

impl<C: CommentRepository> ListCommentsUseCase<C> {
    pub async fn execute(
        &self,
        filter: CommentFilter,
        page: PageRequest,
    ) -> Result<Page<Comment>, BlogServiceError> {
        self.comments.list(filter, page.clamped()).await
    }
}
