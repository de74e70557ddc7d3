use std::path::PathBuf;

use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use quill_auth_types::identity::TokenSecret;

use crate::infra::cache::RedisCodeStore;
use crate::infra::db::{
    DbCategoryRepository, DbCommentRepository, DbLikeRepository, DbPostRepository,
    DbUserRepository,
};
use crate::infra::hash::Argon2Hasher;
use crate::infra::mail_queue::MailQueue;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub jwt_secret: String,
    pub media_dir: PathBuf,
    pub mail_queue: MailQueue,
}

impl TokenSecret for AppState {
    fn token_secret(&self) -> &str {
        &self.jwt_secret
    }
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn category_repo(&self) -> DbCategoryRepository {
        DbCategoryRepository {
            db: self.db.clone(),
        }
    }

    pub fn post_repo(&self) -> DbPostRepository {
        DbPostRepository {
            db: self.db.clone(),
        }
    }

    pub fn comment_repo(&self) -> DbCommentRepository {
        DbCommentRepository {
            db: self.db.clone(),
        }
    }

    pub fn like_repo(&self) -> DbLikeRepository {
        DbLikeRepository {
            db: self.db.clone(),
        }
    }

    pub fn code_store(&self) -> RedisCodeStore {
        RedisCodeStore {
            pool: self.redis.clone(),
        }
    }

    pub fn hasher(&self) -> Argon2Hasher {
        Argon2Hasher
    }

    pub fn dispatcher(&self) -> MailQueue {
        self.mail_queue.clone()
    }
}
