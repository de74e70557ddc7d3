use tracing::debug;

use quill_domain::like::LikeOutcome;

use crate::domain::repository::{LikeRepository, PostRepository};
use crate::domain::types::Like;
use crate::error::BlogServiceError;

pub struct ToggleLikeInput {
    pub user_id: i64,
    pub post_id: i64,
    /// `true` = like, `false` = dislike.
    pub status: bool,
}

pub struct ToggleLikeUseCase<L: LikeRepository, P: PostRepository> {
    pub likes: L,
    pub posts: P,
}

impl<L: LikeRepository, P: PostRepository> ToggleLikeUseCase<L, P> {
    pub async fn execute(&self, input: ToggleLikeInput) -> Result<LikeOutcome, BlogServiceError> {
        self.posts
            .find_by_id(input.post_id)
            .await?
            .ok_or(BlogServiceError::PostNotFound)?;

        let outcome = self
            .likes
            .toggle(input.user_id, input.post_id, input.status)
            .await?;
        debug!(
            user_id = input.user_id,
            post_id = input.post_id,
            ?outcome,
            "like toggled"
        );
        Ok(outcome)
    }
}

pub struct GetLikeUseCase<L: LikeRepository> {
    pub likes: L,
}

impl<L: LikeRepository> GetLikeUseCase<L> {
    pub async fn execute(&self, user_id: i64, post_id: i64) -> Result<Like, BlogServiceError> {
        self.likes
            .find(user_id, post_id)
            .await?
            .ok_or(BlogServiceError::LikeNotFound)
    }
}
