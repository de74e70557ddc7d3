use std::time::Duration;

use quill_auth_types::token::{TokenScope, validate_token};
use quill_blog::domain::types::CodePurpose;
use quill_blog::error::BlogServiceError;
use quill_blog::usecase::auth::{
    ForgotPasswordUseCase, LoginInput, LoginUseCase, UpdatePasswordUseCase,
    VerifyForgotPasswordUseCase, VerifyInput,
};

use crate::helpers::{
    MockCodeStore, MockUserRepo, PlainHasher, RecordingDispatcher, TEST_CODE, TEST_JWT_SECRET,
    deliver_all, test_user,
};

fn verify_forgot(
    users: &MockUserRepo,
    codes: &MockCodeStore,
) -> VerifyForgotPasswordUseCase<MockUserRepo, MockCodeStore> {
    VerifyForgotPasswordUseCase {
        users: users.clone(),
        codes: codes.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
}

fn code_input(email: &str, code: &str) -> VerifyInput {
    VerifyInput {
        email: email.to_owned(),
        code: code.to_owned(),
    }
}

// ── ForgotPassword ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_enqueue_reset_code_for_known_user() {
    let user = test_user();
    let dispatcher = RecordingDispatcher::default();
    let uc = ForgotPasswordUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        dispatcher: dispatcher.clone(),
    };

    uc.execute(user.email.clone()).await.unwrap();

    let jobs = dispatcher.jobs_handle();
    let jobs = jobs.lock().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].purpose, CodePurpose::ForgotPassword);
    assert_eq!(jobs[0].email, user.email);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_email() {
    let dispatcher = RecordingDispatcher::default();
    let uc = ForgotPasswordUseCase {
        users: MockUserRepo::empty(),
        dispatcher: dispatcher.clone(),
    };

    let result = uc.execute("nobody@example.com".to_owned()).await;
    assert!(
        matches!(result, Err(BlogServiceError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
    assert!(dispatcher.jobs_handle().lock().unwrap().is_empty());
}

// ── VerifyForgotPassword ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_reset_scoped_token_and_consume_code() {
    let user = test_user();
    let users = MockUserRepo::new(vec![user.clone()]);
    let codes = MockCodeStore::empty();
    let dispatcher = RecordingDispatcher::default();

    ForgotPasswordUseCase {
        users: users.clone(),
        dispatcher: dispatcher.clone(),
    }
    .execute(user.email.clone())
    .await
    .unwrap();
    let mailer = deliver_all(&dispatcher, &codes).await;

    let key = CodePurpose::ForgotPassword.code_key(&user.email);
    assert_eq!(codes.ttl(&key), Some(Duration::from_secs(60)));
    assert_eq!(mailer.sent_handle().lock().unwrap()[0].subject, "Reset your password");

    let out = verify_forgot(&users, &codes)
        .execute(code_input(&user.email, TEST_CODE))
        .await
        .unwrap();
    assert_eq!(out.token.expires_at - out.token.issued_at, 30 * 60);

    let info = validate_token(&out.token.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.scope, TokenScope::PasswordReset);
    assert_eq!(info.user_id, user.id);

    // Single use.
    assert!(codes.value(&key).is_none());
    let again = verify_forgot(&users, &codes)
        .execute(code_input(&user.email, TEST_CODE))
        .await;
    assert!(
        matches!(again, Err(BlogServiceError::CodeExpired)),
        "expected CodeExpired, got {again:?}"
    );
}

#[tokio::test]
async fn should_reject_wrong_reset_code() {
    let user = test_user();
    let users = MockUserRepo::new(vec![user.clone()]);
    let codes = MockCodeStore::empty();
    let dispatcher = RecordingDispatcher::default();
    ForgotPasswordUseCase {
        users: users.clone(),
        dispatcher: dispatcher.clone(),
    }
    .execute(user.email.clone())
    .await
    .unwrap();
    deliver_all(&dispatcher, &codes).await;

    let result = verify_forgot(&users, &codes)
        .execute(code_input(&user.email, "000000"))
        .await;
    assert!(
        matches!(result, Err(BlogServiceError::IncorrectCode)),
        "expected IncorrectCode, got {result:?}"
    );
    assert!(
        codes
            .value(&CodePurpose::ForgotPassword.code_key(&user.email))
            .is_some(),
        "a wrong guess does not burn the code"
    );
}

// ── UpdatePassword ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_persist_new_password_hash() {
    let user = test_user();
    let users = MockUserRepo::new(vec![user.clone()]);

    UpdatePasswordUseCase {
        users: users.clone(),
        hasher: PlainHasher,
    }
    .execute(user.id, "brand-new")
    .await
    .unwrap();

    let login = LoginUseCase {
        users: users.clone(),
        hasher: PlainHasher,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    login
        .execute(LoginInput {
            email: user.email.clone(),
            password: "brand-new".to_owned(),
        })
        .await
        .unwrap();
    let old = login
        .execute(LoginInput {
            email: user.email.clone(),
            password: "secret1".to_owned(),
        })
        .await;
    assert!(
        matches!(old, Err(BlogServiceError::WrongEmailOrPassword)),
        "expected WrongEmailOrPassword, got {old:?}"
    );
}

#[tokio::test]
async fn should_validate_new_password_length() {
    let user = test_user();
    let uc = UpdatePasswordUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        hasher: PlainHasher,
    };

    let result = uc.execute(user.id, "short").await;
    assert!(
        matches!(result, Err(BlogServiceError::Validation(_))),
        "expected Validation, got {result:?}"
    );
}

#[tokio::test]
async fn should_return_not_found_when_user_vanished() {
    let uc = UpdatePasswordUseCase {
        users: MockUserRepo::empty(),
        hasher: PlainHasher,
    };

    let result = uc.execute(42, "brand-new").await;
    assert!(
        matches!(result, Err(BlogServiceError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}
