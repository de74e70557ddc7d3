use std::time::Duration;

use quill_auth_types::token::{TokenScope, validate_token};
use quill_blog::domain::types::{CodePurpose, pending_registration_key};
use quill_blog::error::BlogServiceError;
use quill_blog::usecase::auth::{
    RegisterInput, RegisterUseCase, VerifyInput, VerifyRegistrationUseCase,
};
use quill_domain::user::UserRole;

use crate::helpers::{
    MockCodeStore, MockUserRepo, PlainHasher, RecordingDispatcher, TEST_CODE, TEST_JWT_SECRET,
    deliver_all, test_user,
};

const EMAIL: &str = "a@example.com";

fn register_input(email: &str) -> RegisterInput {
    RegisterInput {
        first_name: "Alan".to_owned(),
        last_name: "Turing".to_owned(),
        email: email.to_owned(),
        password: "secret1".to_owned(),
    }
}

fn verify_input(code: &str) -> VerifyInput {
    VerifyInput {
        email: EMAIL.to_owned(),
        code: code.to_owned(),
    }
}

struct Flow {
    users: MockUserRepo,
    codes: MockCodeStore,
    dispatcher: RecordingDispatcher,
}

impl Flow {
    fn new(users: MockUserRepo) -> Self {
        Self {
            users,
            codes: MockCodeStore::empty(),
            dispatcher: RecordingDispatcher::default(),
        }
    }

    async fn register(&self, input: RegisterInput) -> Result<(), BlogServiceError> {
        RegisterUseCase {
            users: self.users.clone(),
            codes: self.codes.clone(),
            hasher: PlainHasher,
            dispatcher: self.dispatcher.clone(),
        }
        .execute(input)
        .await
    }

    fn verifier(&self) -> VerifyRegistrationUseCase<MockUserRepo, MockCodeStore> {
        VerifyRegistrationUseCase {
            users: self.users.clone(),
            codes: self.codes.clone(),
            jwt_secret: TEST_JWT_SECRET.to_owned(),
        }
    }
}

// ── Register ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_store_pending_registration_and_enqueue_code() {
    let flow = Flow::new(MockUserRepo::empty());
    flow.register(register_input(EMAIL)).await.unwrap();

    let key = pending_registration_key(EMAIL);
    assert_eq!(flow.codes.ttl(&key), Some(Duration::from_secs(600)));
    let pending: serde_json::Value =
        serde_json::from_str(&flow.codes.value(&key).unwrap()).unwrap();
    assert_eq!(pending["email"], EMAIL);
    assert_eq!(pending["password_hash"], "plain:secret1");
    assert_eq!(pending["role"], "user");

    let jobs = flow.dispatcher.jobs_handle();
    let jobs = jobs.lock().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].purpose, CodePurpose::Register);
    assert_eq!(jobs[0].email, EMAIL);

    // Nothing is persisted before verification.
    assert!(flow.users.users_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_registration_for_active_email() {
    let mut existing = test_user();
    existing.email = EMAIL.to_owned();
    let flow = Flow::new(MockUserRepo::new(vec![existing]));

    let result = flow.register(register_input(EMAIL)).await;
    assert!(
        matches!(result, Err(BlogServiceError::EmailExists)),
        "expected EmailExists, got {result:?}"
    );
    assert!(flow.dispatcher.jobs_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_invalid_registration_input() {
    let flow = Flow::new(MockUserRepo::empty());

    let mut short_password = register_input(EMAIL);
    short_password.password = "12345".to_owned();
    let bad_email = register_input("not-an-email");
    let mut short_name = register_input(EMAIL);
    short_name.first_name = "A".to_owned();

    for input in [short_password, bad_email, short_name] {
        let result = flow.register(input).await;
        assert!(
            matches!(result, Err(BlogServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
    }
    assert!(flow.codes.entries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_overwrite_pending_registration_on_repeat() {
    let flow = Flow::new(MockUserRepo::empty());
    flow.register(register_input(EMAIL)).await.unwrap();

    let mut again = register_input(EMAIL);
    again.password = "another1".to_owned();
    flow.register(again).await.unwrap();

    let raw = flow.codes.value(&pending_registration_key(EMAIL)).unwrap();
    assert!(raw.contains("plain:another1"));
}

// ── Verify ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_persist_user_and_issue_token_after_verify() {
    let flow = Flow::new(MockUserRepo::empty());
    flow.register(register_input(EMAIL)).await.unwrap();
    let mailer = deliver_all(&flow.dispatcher, &flow.codes).await;

    let sent = mailer.sent_handle();
    assert_eq!(sent.lock().unwrap().len(), 1);
    assert!(sent.lock().unwrap()[0].html_body.contains(TEST_CODE));

    let out = flow.verifier().execute(verify_input(TEST_CODE)).await.unwrap();
    assert!(out.user.active);
    assert_eq!(out.user.email, EMAIL);
    assert_eq!(out.user.role, UserRole::User);

    let info = validate_token(&out.token.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.email, EMAIL);
    assert_eq!(info.role, UserRole::User);
    assert_eq!(info.user_id, out.user.id);
    assert_eq!(info.scope, TokenScope::Session);
    assert_eq!(out.token.expires_at - out.token.issued_at, 86_400);

    let users = flow.users.users_handle();
    assert_eq!(users.lock().unwrap().len(), 1);

    // Both ephemeral keys are gone.
    assert!(flow.codes.value(&pending_registration_key(EMAIL)).is_none());
    assert!(flow.codes.value(&CodePurpose::Register.code_key(EMAIL)).is_none());
}

#[tokio::test]
async fn should_reject_wrong_code_and_persist_nothing() {
    let flow = Flow::new(MockUserRepo::empty());
    flow.register(register_input(EMAIL)).await.unwrap();
    deliver_all(&flow.dispatcher, &flow.codes).await;

    let result = flow.verifier().execute(verify_input("654321")).await;
    assert!(
        matches!(result, Err(BlogServiceError::IncorrectCode)),
        "expected IncorrectCode, got {result:?}"
    );
    assert!(flow.users.users_handle().lock().unwrap().is_empty());

    // The right code still works afterwards.
    flow.verifier().execute(verify_input(TEST_CODE)).await.unwrap();
}

#[tokio::test]
async fn should_report_expired_when_pending_registration_lapsed() {
    let flow = Flow::new(MockUserRepo::empty());
    flow.register(register_input(EMAIL)).await.unwrap();
    deliver_all(&flow.dispatcher, &flow.codes).await;
    flow.codes.expire(&pending_registration_key(EMAIL));

    let result = flow.verifier().execute(verify_input(TEST_CODE)).await;
    assert!(
        matches!(result, Err(BlogServiceError::CodeExpired)),
        "expected CodeExpired, got {result:?}"
    );
    assert!(flow.users.users_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_report_expired_when_code_lapsed() {
    let flow = Flow::new(MockUserRepo::empty());
    flow.register(register_input(EMAIL)).await.unwrap();
    deliver_all(&flow.dispatcher, &flow.codes).await;
    flow.codes.expire(&CodePurpose::Register.code_key(EMAIL));

    let result = flow.verifier().execute(verify_input(TEST_CODE)).await;
    assert!(
        matches!(result, Err(BlogServiceError::CodeExpired)),
        "expected CodeExpired, got {result:?}"
    );
    assert!(flow.users.users_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_report_expired_when_code_never_delivered() {
    let flow = Flow::new(MockUserRepo::empty());
    flow.register(register_input(EMAIL)).await.unwrap();

    let result = flow.verifier().execute(verify_input(TEST_CODE)).await;
    assert!(
        matches!(result, Err(BlogServiceError::CodeExpired)),
        "expected CodeExpired, got {result:?}"
    );
}

#[tokio::test]
async fn should_activate_existing_inactive_user_on_verify() {
    let mut inactive = test_user();
    inactive.id = 7;
    inactive.email = EMAIL.to_owned();
    inactive.active = false;
    inactive.password_hash = "plain:old-password".to_owned();

    let flow = Flow::new(MockUserRepo::new(vec![inactive]));
    flow.register(register_input(EMAIL)).await.unwrap();
    deliver_all(&flow.dispatcher, &flow.codes).await;

    let out = flow.verifier().execute(verify_input(TEST_CODE)).await.unwrap();
    assert_eq!(out.user.id, 7);
    assert!(out.user.active);

    let users = flow.users.users_handle();
    let users = users.lock().unwrap();
    assert_eq!(users.len(), 1, "no duplicate row for the same email");
    assert_eq!(users[0].password_hash, "plain:secret1");
}

#[tokio::test]
async fn should_let_only_one_verify_win() {
    let flow = Flow::new(MockUserRepo::empty());
    flow.register(register_input(EMAIL)).await.unwrap();
    deliver_all(&flow.dispatcher, &flow.codes).await;

    // Both requests read the pending record before either one persists.
    let snapshot = flow.codes.entries.lock().unwrap().clone();
    flow.verifier().execute(verify_input(TEST_CODE)).await.unwrap();
    *flow.codes.entries.lock().unwrap() = snapshot;

    let result = flow.verifier().execute(verify_input(TEST_CODE)).await;
    assert!(
        matches!(result, Err(BlogServiceError::EmailExists)),
        "expected EmailExists, got {result:?}"
    );
    assert_eq!(flow.users.users_handle().lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_finish_verify_when_key_cleanup_fails() {
    let flow = Flow::new(MockUserRepo::empty());
    flow.register(register_input(EMAIL)).await.unwrap();
    deliver_all(&flow.dispatcher, &flow.codes).await;
    flow.codes.fail_deletes();

    let out = flow.verifier().execute(verify_input(TEST_CODE)).await.unwrap();
    assert!(out.user.active);
    assert_eq!(flow.users.users_handle().lock().unwrap().len(), 1);

    // Keys are left to their TTL.
    assert!(flow.codes.value(&pending_registration_key(EMAIL)).is_some());
}
