use quill_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{CategoryRepository, LikeRepository, PostRepository};
use crate::domain::types::{LikeCounts, NewPost, Post, PostFilter};
use crate::error::BlogServiceError;

pub struct CreatePostUseCase<P: PostRepository, C: CategoryRepository> {
    pub posts: P,
    pub categories: C,
}

impl<P: PostRepository, C: CategoryRepository> CreatePostUseCase<P, C> {
    pub async fn execute(&self, post: NewPost) -> Result<Post, BlogServiceError> {
        if post.title.trim().is_empty() || post.description.trim().is_empty() {
            return Err(BlogServiceError::validation(
                "title and description are required",
            ));
        }
        self.categories
            .find_by_id(post.category_id)
            .await?
            .ok_or(BlogServiceError::CategoryNotFound)?;
        self.posts.create(&post).await
    }
}

/// A post together with its reaction tally.
#[derive(Debug)]
pub struct PostWithLikes {
    pub post: Post,
    pub likes: LikeCounts,
}

/// Reading a post counts as a view.
pub struct GetPostUseCase<P: PostRepository, L: LikeRepository> {
    pub posts: P,
    pub likes: L,
}

impl<P: PostRepository, L: LikeRepository> GetPostUseCase<P, L> {
    pub async fn execute(&self, id: i64) -> Result<PostWithLikes, BlogServiceError> {
        let post = self
            .posts
            .view(id)
            .await?
            .ok_or(BlogServiceError::PostNotFound)?;
        let likes = self.likes.count_for_post(post.id).await?;
        Ok(PostWithLikes { post, likes })
    }
}

pub struct ListPostsUseCase<P: PostRepository> {
    pub posts: P,
}

impl<P: PostRepository> ListPostsUseCase<P> {
    pub async fn execute(
        &self,
        mut filter: PostFilter,
        page: PageRequest,
    ) -> Result<Page<Post>, BlogServiceError> {
        filter.search = filter.search.filter(|s| !s.trim().is_empty());
        self.posts.list(&filter, page.clamped()).await
    }
}
