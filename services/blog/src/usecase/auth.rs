use anyhow::Context as _;
use tracing::{info, warn};

use quill_domain::user::UserRole;

use crate::domain::repository::{CodeDispatcher, CodeStore, CredentialHasher, UserRepository};
use crate::domain::types::{
    CodeDelivery, CodePurpose, PENDING_REGISTRATION_TTL, PendingRegistration, User,
    pending_registration_key, validate_email, validate_name, validate_password,
};
use crate::error::BlogServiceError;
use crate::usecase::token::{IssuedToken, issue_password_reset_token, issue_session_token};

/// User plus the bearer token issued for them.
#[derive(Debug)]
pub struct AuthOutput {
    pub user: User,
    pub token: IssuedToken,
}

pub(crate) fn check_password(password: &str) -> Result<(), BlogServiceError> {
    if validate_password(password) {
        Ok(())
    } else {
        Err(BlogServiceError::validation(
            "password must be 6-16 characters",
        ))
    }
}

pub(crate) fn check_email(email: &str) -> Result<(), BlogServiceError> {
    if validate_email(email) {
        Ok(())
    } else {
        Err(BlogServiceError::validation("email is not valid"))
    }
}

pub(crate) fn check_names(first_name: &str, last_name: &str) -> Result<(), BlogServiceError> {
    if validate_name(first_name) && validate_name(last_name) {
        Ok(())
    } else {
        Err(BlogServiceError::validation(
            "first and last name must be 2-30 characters",
        ))
    }
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterUseCase<U: UserRepository, C: CodeStore, H: CredentialHasher, D: CodeDispatcher>
{
    pub users: U,
    pub codes: C,
    pub hasher: H,
    pub dispatcher: D,
}

impl<U, C, H, D> RegisterUseCase<U, C, H, D>
where
    U: UserRepository,
    C: CodeStore,
    H: CredentialHasher,
    D: CodeDispatcher,
{
    pub async fn execute(&self, input: RegisterInput) -> Result<(), BlogServiceError> {
        check_names(&input.first_name, &input.last_name)?;
        check_email(&input.email)?;
        check_password(&input.password)?;

        if let Some(existing) = self.users.find_by_email(&input.email).await? {
            if existing.active {
                return Err(BlogServiceError::EmailExists);
            }
        }

        let pending = PendingRegistration {
            first_name: input.first_name.trim().to_owned(),
            last_name: input.last_name.trim().to_owned(),
            email: input.email,
            password_hash: self.hasher.hash(&input.password).await?,
            role: UserRole::User,
        };
        let json = serde_json::to_string(&pending).context("serialize pending registration")?;
        self.codes
            .set(
                &pending_registration_key(&pending.email),
                &json,
                PENDING_REGISTRATION_TTL,
            )
            .await?;

        self.dispatcher.dispatch(CodeDelivery {
            purpose: CodePurpose::Register,
            email: pending.email,
        });
        Ok(())
    }
}

// ── Verify registration ──────────────────────────────────────────────────────

pub struct VerifyInput {
    pub email: String,
    pub code: String,
}

/// Read the active code for `(purpose, email)` and compare it with `submitted`.
async fn check_code<C: CodeStore>(
    codes: &C,
    purpose: CodePurpose,
    email: &str,
    submitted: &str,
) -> Result<(), BlogServiceError> {
    let stored = codes
        .get(&purpose.code_key(email))
        .await?
        .ok_or(BlogServiceError::CodeExpired)?;
    if stored != submitted.trim() {
        return Err(BlogServiceError::IncorrectCode);
    }
    Ok(())
}

pub struct VerifyRegistrationUseCase<U: UserRepository, C: CodeStore> {
    pub users: U,
    pub codes: C,
    pub jwt_secret: String,
}

impl<U: UserRepository, C: CodeStore> VerifyRegistrationUseCase<U, C> {
    pub async fn execute(&self, input: VerifyInput) -> Result<AuthOutput, BlogServiceError> {
        let pending_key = pending_registration_key(&input.email);
        let raw = self
            .codes
            .get(&pending_key)
            .await?
            .ok_or(BlogServiceError::CodeExpired)?;
        let pending: PendingRegistration =
            serde_json::from_str(&raw).context("decode pending registration")?;

        check_code(&self.codes, CodePurpose::Register, &pending.email, &input.code).await?;

        let user = match self.users.find_by_email(&pending.email).await? {
            Some(existing) if existing.active => return Err(BlogServiceError::EmailExists),
            Some(inactive) => {
                self.users
                    .activate(inactive.id, &pending.password_hash)
                    .await?
            }
            None => self.users.create(&pending.clone().into_new_user()).await?,
        };

        // The account exists now; leftover keys lapse on their own TTL.
        for key in [pending_key, CodePurpose::Register.code_key(&pending.email)] {
            if let Err(error) = self.codes.delete(&key).await {
                warn!(%error, key = %key, "failed to clear registration key");
            }
        }

        info!(user_id = user.id, "user verified");
        let token = issue_session_token(&user, &self.jwt_secret)?;
        Ok(AuthOutput { user, token })
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<U: UserRepository, H: CredentialHasher> {
    pub users: U,
    pub hasher: H,
    pub jwt_secret: String,
}

impl<U: UserRepository, H: CredentialHasher> LoginUseCase<U, H> {
    pub async fn execute(&self, input: LoginInput) -> Result<AuthOutput, BlogServiceError> {
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(BlogServiceError::WrongEmailOrPassword)?;

        if !user.active {
            return Err(BlogServiceError::UserNotVerified);
        }
        if !self.hasher.verify(&input.password, &user.password_hash).await? {
            return Err(BlogServiceError::WrongEmailOrPassword);
        }

        let token = issue_session_token(&user, &self.jwt_secret)?;
        Ok(AuthOutput { user, token })
    }
}

// ── Forgot password ──────────────────────────────────────────────────────────

pub struct ForgotPasswordUseCase<U: UserRepository, D: CodeDispatcher> {
    pub users: U,
    pub dispatcher: D,
}

impl<U: UserRepository, D: CodeDispatcher> ForgotPasswordUseCase<U, D> {
    pub async fn execute(&self, email: String) -> Result<(), BlogServiceError> {
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(BlogServiceError::UserNotFound)?;

        self.dispatcher.dispatch(CodeDelivery {
            purpose: CodePurpose::ForgotPassword,
            email: user.email,
        });
        Ok(())
    }
}

// ── Verify forgot password ───────────────────────────────────────────────────

pub struct VerifyForgotPasswordUseCase<U: UserRepository, C: CodeStore> {
    pub users: U,
    pub codes: C,
    pub jwt_secret: String,
}

impl<U: UserRepository, C: CodeStore> VerifyForgotPasswordUseCase<U, C> {
    pub async fn execute(&self, input: VerifyInput) -> Result<AuthOutput, BlogServiceError> {
        check_code(
            &self.codes,
            CodePurpose::ForgotPassword,
            &input.email,
            &input.code,
        )
        .await?;

        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(BlogServiceError::UserNotFound)?;

        // A reset code is single-use.
        self.codes
            .delete(&CodePurpose::ForgotPassword.code_key(&input.email))
            .await?;

        let token = issue_password_reset_token(&user, &self.jwt_secret)?;
        Ok(AuthOutput { user, token })
    }
}

// ── Update password ──────────────────────────────────────────────────────────

pub struct UpdatePasswordUseCase<U: UserRepository, H: CredentialHasher> {
    pub users: U,
    pub hasher: H,
}

impl<U: UserRepository, H: CredentialHasher> UpdatePasswordUseCase<U, H> {
    pub async fn execute(&self, user_id: i64, password: &str) -> Result<(), BlogServiceError> {
        check_password(password)?;
        let hash = self.hasher.hash(password).await?;
        if !self.users.update_password(user_id, &hash).await? {
            return Err(BlogServiceError::UserNotFound);
        }
        info!(user_id, "password updated");
        Ok(())
    }
}
