use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quill_domain::pagination::Sort;
use quill_domain::user::UserRole;

/// Persisted account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub email: String,
    pub gender: Option<String>,
    pub password_hash: String,
    pub username: Option<String>,
    pub profile_image_url: Option<String>,
    pub role: UserRole,
    /// Only active users can log in.
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for [`User`]; the store allocates `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub email: String,
    pub gender: Option<String>,
    pub password_hash: String,
    pub username: Option<String>,
    pub profile_image_url: Option<String>,
    pub role: UserRole,
    pub active: bool,
}

/// Registration waiting for its email code, kept as JSON under [`pending_registration_key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

impl PendingRegistration {
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            first_name: self.first_name,
            last_name: self.last_name,
            phone_number: None,
            email: self.email,
            gender: None,
            password_hash: self.password_hash,
            username: None,
            profile_image_url: None,
            role: self.role,
            active: true,
        }
    }
}

/// What an emailed code unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePurpose {
    Register,
    ForgotPassword,
}

impl CodePurpose {
    /// Ephemeral-store key holding the active code for `email`.
    pub fn code_key(self, email: &str) -> String {
        match self {
            Self::Register => format!("register_code_{email}"),
            Self::ForgotPassword => format!("forgot_password_code_{email}"),
        }
    }
}

pub fn pending_registration_key(email: &str) -> String {
    format!("user_{email}")
}

/// Job handed to the delivery queue: generate, store and mail a code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeDelivery {
    pub purpose: CodePurpose,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

#[derive(Debug, Clone)]
pub struct Category {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub user_id: i64,
    pub category_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub views_count: i32,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub user_id: i64,
    pub category_id: i64,
}

#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
    pub user_id: Option<i64>,
    pub category_id: Option<i64>,
    pub sort_by_date: Sort,
}

/// Public author fields shown next to a comment.
#[derive(Debug, Clone)]
pub struct CommentAuthor {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Comment {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub author: Option<CommentAuthor>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub user_id: i64,
    pub post_id: i64,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CommentFilter {
    pub user_id: Option<i64>,
    pub post_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    /// `true` = like, `false` = dislike.
    pub status: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LikeCounts {
    pub likes: i64,
    pub dislikes: i64,
}

/// Pending registration lifetime in the ephemeral store.
pub const PENDING_REGISTRATION_TTL: Duration = Duration::from_secs(10 * 60);

/// Verification code lifetime (register and forgot-password).
pub const VERIFICATION_CODE_TTL: Duration = Duration::from_secs(60);

/// Lifetime of tokens issued by verify and login.
pub const SESSION_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Lifetime of tokens issued by verify-forgot-password.
pub const PASSWORD_RESET_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// Verification code length in digits.
pub const VERIFICATION_CODE_LEN: usize = 6;

pub const NAME_LEN: std::ops::RangeInclusive<usize> = 2..=30;
pub const PASSWORD_LEN: std::ops::RangeInclusive<usize> = 6..=16;
pub const CATEGORY_TITLE_MAX_LEN: usize = 100;
pub const USERNAME_MAX_LEN: usize = 30;
pub const PHONE_NUMBER_MAX_LEN: usize = 20;
pub const PROFILE_IMAGE_URL_MAX_LEN: usize = 255;

/// Loose structural check: one `@`, non-empty local part, dotted domain, no whitespace.
pub fn validate_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

pub fn validate_password(password: &str) -> bool {
    PASSWORD_LEN.contains(&password.chars().count())
}

pub fn validate_name(name: &str) -> bool {
    NAME_LEN.contains(&name.trim().chars().count())
}
