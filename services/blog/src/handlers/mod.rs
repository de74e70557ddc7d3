use serde::Serialize;

use quill_auth_types::identity::Identity;

use crate::error::BlogServiceError;

pub mod auth;
pub mod category;
pub mod comment;
pub mod health;
pub mod like;
pub mod post;
pub mod upload;
pub mod user;

/// Plain acknowledgment body.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

pub(crate) fn require_superadmin(identity: &Identity) -> Result<(), BlogServiceError> {
    if identity.role.is_superadmin() {
        Ok(())
    } else {
        Err(BlogServiceError::Forbidden)
    }
}
