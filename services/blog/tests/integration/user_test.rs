use quill_blog::error::BlogServiceError;
use quill_blog::usecase::user::{CreateUserInput, CreateUserUseCase};
use quill_domain::user::UserRole;

use crate::helpers::{MockUserRepo, PlainHasher, test_user};

fn create_input(email: &str, username: Option<&str>) -> CreateUserInput {
    CreateUserInput {
        first_name: "Grace".to_owned(),
        last_name: "Hopper".to_owned(),
        phone_number: None,
        email: email.to_owned(),
        gender: None,
        username: username.map(str::to_owned),
        profile_image_url: None,
        role: UserRole::Superadmin,
        password: "secret1".to_owned(),
    }
}

fn usecase(users: &MockUserRepo) -> CreateUserUseCase<MockUserRepo, PlainHasher> {
    CreateUserUseCase {
        users: users.clone(),
        hasher: PlainHasher,
    }
}

fn existing_with_username(username: &str) -> MockUserRepo {
    let mut user = test_user();
    user.username = Some(username.to_owned());
    MockUserRepo::new(vec![user])
}

#[tokio::test]
async fn should_create_active_user_with_hashed_password() {
    let users = MockUserRepo::empty();

    let user = usecase(&users)
        .execute(create_input("grace@example.com", Some("grace")))
        .await
        .unwrap();
    assert!(user.active);
    assert_eq!(user.role, UserRole::Superadmin);
    assert_eq!(user.password_hash, "plain:secret1");
}

#[tokio::test]
async fn should_report_taken_username_separately_from_email() {
    let users = existing_with_username("ada");

    let result = usecase(&users)
        .execute(create_input("grace@example.com", Some("ada")))
        .await;
    assert!(
        matches!(result, Err(BlogServiceError::UsernameExists)),
        "expected UsernameExists, got {result:?}"
    );

    let result = usecase(&users)
        .execute(create_input("ada@example.com", Some("grace")))
        .await;
    assert!(
        matches!(result, Err(BlogServiceError::EmailExists)),
        "expected EmailExists, got {result:?}"
    );
    assert_eq!(users.users_handle().lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_overlong_username_before_storage() {
    let users = MockUserRepo::empty();
    let long = "u".repeat(31);

    let result = usecase(&users)
        .execute(create_input("grace@example.com", Some(&long)))
        .await;
    assert!(
        matches!(result, Err(BlogServiceError::Validation(ref reason)) if reason.contains("username")),
        "expected Validation, got {result:?}"
    );
    assert!(users.users_handle().lock().unwrap().is_empty());

    let at_limit = "u".repeat(30);
    usecase(&users)
        .execute(create_input("grace@example.com", Some(&at_limit)))
        .await
        .unwrap();
}

#[tokio::test]
async fn should_reject_overlong_optional_fields() {
    let users = MockUserRepo::empty();

    let mut phone = create_input("grace@example.com", None);
    phone.phone_number = Some("1".repeat(21));
    let result = usecase(&users).execute(phone).await;
    assert!(
        matches!(result, Err(BlogServiceError::Validation(_))),
        "expected Validation, got {result:?}"
    );

    let mut image = create_input("grace@example.com", None);
    image.profile_image_url = Some(format!("/media/{}", "x".repeat(256)));
    let result = usecase(&users).execute(image).await;
    assert!(
        matches!(result, Err(BlogServiceError::Validation(_))),
        "expected Validation, got {result:?}"
    );

    let blank = create_input("grace@example.com", Some("   "));
    let result = usecase(&users).execute(blank).await;
    assert!(
        matches!(result, Err(BlogServiceError::Validation(_))),
        "expected Validation, got {result:?}"
    );
}
