#![allow(async_fn_in_trait)]

use std::time::Duration;

use quill_domain::like::LikeOutcome;
use quill_domain::pagination::{Page, PageRequest};

use crate::domain::types::{
    Category, CodeDelivery, Comment, CommentFilter, Like, LikeCounts, NewComment, NewPost,
    NewUser, OutgoingMail, Post, PostFilter, User,
};
use crate::error::BlogServiceError;

/// Repository for persisted accounts.
pub trait UserRepository: Send + Sync {
    /// Insert a user. A duplicate email yields [`BlogServiceError::EmailExists`].
    async fn create(&self, user: &NewUser) -> Result<User, BlogServiceError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, BlogServiceError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, BlogServiceError>;

    /// Newest first. `search` matches names, email and username case-insensitively.
    async fn list(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<User>, BlogServiceError>;

    /// Returns `false` if no user has this id.
    async fn update_password(&self, id: i64, password_hash: &str)
    -> Result<bool, BlogServiceError>;

    /// Mark an inactive user active with a fresh password hash.
    async fn activate(&self, id: i64, password_hash: &str) -> Result<User, BlogServiceError>;
}

pub trait CategoryRepository: Send + Sync {
    async fn create(&self, title: &str) -> Result<Category, BlogServiceError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, BlogServiceError>;

    async fn list(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Category>, BlogServiceError>;

    /// Returns `None` if no category has this id.
    async fn update(&self, id: i64, title: &str) -> Result<Option<Category>, BlogServiceError>;

    /// Returns `false` if no category has this id.
    async fn delete(&self, id: i64) -> Result<bool, BlogServiceError>;
}

pub trait PostRepository: Send + Sync {
    async fn create(&self, post: &NewPost) -> Result<Post, BlogServiceError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, BlogServiceError>;

    /// Atomically bump `views_count` and return the updated post.
    async fn view(&self, id: i64) -> Result<Option<Post>, BlogServiceError>;

    async fn list(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Page<Post>, BlogServiceError>;
}

pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: &NewComment) -> Result<Comment, BlogServiceError>;

    /// Newest first, each with its author.
    async fn list(
        &self,
        filter: CommentFilter,
        page: PageRequest,
    ) -> Result<Page<Comment>, BlogServiceError>;
}

pub trait LikeRepository: Send + Sync {
    /// Apply a like/dislike toggle for (user, post) atomically.
    async fn toggle(
        &self,
        user_id: i64,
        post_id: i64,
        status: bool,
    ) -> Result<LikeOutcome, BlogServiceError>;

    async fn find(&self, user_id: i64, post_id: i64) -> Result<Option<Like>, BlogServiceError>;

    async fn count_for_post(&self, post_id: i64) -> Result<LikeCounts, BlogServiceError>;
}

/// Key-value store with per-key expiry for codes and pending registrations.
pub trait CodeStore: Send + Sync {
    /// Overwrites any existing value and resets its TTL.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), BlogServiceError>;

    /// `None` once the key has expired or was never set.
    async fn get(&self, key: &str) -> Result<Option<String>, BlogServiceError>;

    async fn delete(&self, key: &str) -> Result<(), BlogServiceError>;
}

/// One-way salted password hashing.
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, BlogServiceError>;

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, BlogServiceError>;
}

pub trait CodeGenerator: Send + Sync {
    fn generate(&self, len: usize) -> String;
}

pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), BlogServiceError>;
}

/// Hands a code delivery off to the background. Never blocks the caller.
pub trait CodeDispatcher: Send + Sync {
    fn dispatch(&self, job: CodeDelivery);
}
