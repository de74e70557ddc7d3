use quill_auth_types::token::{TokenScope, validate_token};
use quill_blog::error::BlogServiceError;
use quill_blog::usecase::auth::{LoginInput, LoginUseCase};

use crate::helpers::{MockUserRepo, PlainHasher, TEST_JWT_SECRET, test_user};

fn login(users: MockUserRepo) -> LoginUseCase<MockUserRepo, PlainHasher> {
    LoginUseCase {
        users,
        hasher: PlainHasher,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
}

fn input(email: &str, password: &str) -> LoginInput {
    LoginInput {
        email: email.to_owned(),
        password: password.to_owned(),
    }
}

#[tokio::test]
async fn should_issue_day_long_session_token() {
    let user = test_user();
    let uc = login(MockUserRepo::new(vec![user.clone()]));

    let out = uc.execute(input(&user.email, "secret1")).await.unwrap();
    assert_eq!(out.user.id, user.id);
    assert_eq!(out.token.expires_at - out.token.issued_at, 24 * 60 * 60);

    let info = validate_token(&out.token.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, user.id);
    assert_eq!(info.email, user.email);
    assert_eq!(info.scope, TokenScope::Session);
    assert_eq!(info.exp, out.token.expires_at);
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let user = test_user();
    let uc = login(MockUserRepo::new(vec![user.clone()]));

    let result = uc.execute(input(&user.email, "secret2")).await;
    assert!(
        matches!(result, Err(BlogServiceError::WrongEmailOrPassword)),
        "expected WrongEmailOrPassword, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_unknown_email_like_wrong_password() {
    let uc = login(MockUserRepo::empty());

    let result = uc.execute(input("nobody@example.com", "secret1")).await;
    assert!(
        matches!(result, Err(BlogServiceError::WrongEmailOrPassword)),
        "expected WrongEmailOrPassword, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_unverified_user_even_with_right_password() {
    let mut user = test_user();
    user.active = false;
    let uc = login(MockUserRepo::new(vec![user.clone()]));

    let result = uc.execute(input(&user.email, "secret1")).await;
    assert!(
        matches!(result, Err(BlogServiceError::UserNotVerified)),
        "expected UserNotVerified, got {result:?}"
    );
}
