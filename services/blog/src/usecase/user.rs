use quill_domain::pagination::{Page, PageRequest};
use quill_domain::user::UserRole;

use crate::domain::repository::{CredentialHasher, UserRepository};
use crate::domain::types::{
    NewUser, PHONE_NUMBER_MAX_LEN, PROFILE_IMAGE_URL_MAX_LEN, USERNAME_MAX_LEN, User,
};
use crate::error::BlogServiceError;
use crate::usecase::auth::{check_email, check_names, check_password};

/// Optional text fields must be non-blank and fit their column.
fn check_optional(field: &str, value: Option<&str>, max: usize) -> Result<(), BlogServiceError> {
    match value {
        Some(v) if v.trim().is_empty() || v.chars().count() > max => Err(
            BlogServiceError::validation(format!("{field} must be 1-{max} characters")),
        ),
        _ => Ok(()),
    }
}

// ── CreateUser (superadmin) ──────────────────────────────────────────────────

pub struct CreateUserInput {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub email: String,
    pub gender: Option<String>,
    pub username: Option<String>,
    pub profile_image_url: Option<String>,
    pub role: UserRole,
    pub password: String,
}

pub struct CreateUserUseCase<U: UserRepository, H: CredentialHasher> {
    pub users: U,
    pub hasher: H,
}

impl<U: UserRepository, H: CredentialHasher> CreateUserUseCase<U, H> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, BlogServiceError> {
        check_names(&input.first_name, &input.last_name)?;
        check_email(&input.email)?;
        check_password(&input.password)?;
        check_optional("username", input.username.as_deref(), USERNAME_MAX_LEN)?;
        check_optional("phone_number", input.phone_number.as_deref(), PHONE_NUMBER_MAX_LEN)?;
        check_optional(
            "profile_image_url",
            input.profile_image_url.as_deref(),
            PROFILE_IMAGE_URL_MAX_LEN,
        )?;
        if let Some(gender) = input.gender.as_deref() {
            if gender != "male" && gender != "female" {
                return Err(BlogServiceError::validation(
                    "gender must be male or female",
                ));
            }
        }

        let user = NewUser {
            first_name: input.first_name.trim().to_owned(),
            last_name: input.last_name.trim().to_owned(),
            phone_number: input.phone_number,
            email: input.email,
            gender: input.gender,
            password_hash: self.hasher.hash(&input.password).await?,
            username: input.username,
            profile_image_url: input.profile_image_url,
            role: input.role,
            active: true,
        };
        self.users.create(&user).await
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetUserUseCase<U> {
    pub async fn execute(&self, id: i64) -> Result<User, BlogServiceError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(BlogServiceError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListUsersUseCase<U> {
    pub async fn execute(
        &self,
        search: Option<String>,
        page: PageRequest,
    ) -> Result<Page<User>, BlogServiceError> {
        let search = search.filter(|s| !s.trim().is_empty());
        self.users.list(search.as_deref(), page.clamped()).await
    }
}
