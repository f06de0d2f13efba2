//! Authentication service tests: login plus the password reset flow.

mod common;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use givehub::config::Config;
use givehub::domain::{Password, PasswordResetToken, User, UserRole};
use givehub::errors::{AppError, AppResult};
use givehub::infra::repositories::NewUser;
use givehub::infra::{EmailQueue, PasswordResetTokenRepository, UserRepository};
use givehub::jobs::EmailJob;
use givehub::services::{AuthService, Authenticator};

use common::TestUnitOfWork;

/// Single-user repository fake
struct StubUserRepository {
    user: User,
    password_updates: Mutex<Vec<String>>,
}

impl StubUserRepository {
    fn new(user: User) -> Self {
        Self {
            user,
            password_updates: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl UserRepository for StubUserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok((self.user.id == id).then(|| self.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok((self.user.email == email).then(|| self.user.clone()))
    }

    async fn find_by_email_with_deleted(&self, email: &str) -> AppResult<Option<User>> {
        self.find_by_email(email).await
    }

    async fn create(&self, _user: NewUser) -> AppResult<User> {
        unimplemented!("not used by these tests")
    }

    async fn update_full_name(&self, _id: Uuid, _full_name: String) -> AppResult<User> {
        unimplemented!("not used by these tests")
    }

    async fn update_password(&self, _id: Uuid, password_hash: String) -> AppResult<()> {
        self.password_updates.lock().unwrap().push(password_hash);
        Ok(())
    }

    async fn soft_delete(&self, _id: Uuid) -> AppResult<()> {
        unimplemented!("not used by these tests")
    }
}

/// In-memory reset token store
#[derive(Default)]
struct InMemoryResetTokenRepository {
    tokens: Mutex<Vec<PasswordResetToken>>,
}

impl InMemoryResetTokenRepository {
    fn insert(&self, user_id: Uuid, token: &str, expires_at: DateTime<Utc>) {
        self.tokens.lock().unwrap().push(PasswordResetToken {
            id: Uuid::new_v4(),
            user_id,
            token: token.to_string(),
            expires_at,
            created_at: Utc::now(),
        });
    }

    fn stored(&self) -> Vec<PasswordResetToken> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl PasswordResetTokenRepository for InMemoryResetTokenRepository {
    async fn find_by_token(&self, token: &str) -> AppResult<Option<PasswordResetToken>> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.token == token)
            .cloned())
    }

    async fn create(
        &self,
        user_id: Uuid,
        token: String,
        expires_at: DateTime<Utc>,
    ) -> AppResult<PasswordResetToken> {
        let stored = PasswordResetToken {
            id: Uuid::new_v4(),
            user_id,
            token,
            expires_at,
            created_at: Utc::now(),
        };
        self.tokens.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> AppResult<u64> {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|t| t.user_id != user_id);
        Ok((before - tokens.len()) as u64)
    }
}

/// Queue fake that records enqueued jobs
#[derive(Default)]
struct RecordingEmailQueue {
    jobs: Mutex<Vec<EmailJob>>,
}

impl RecordingEmailQueue {
    fn sent(&self) -> Vec<EmailJob> {
        self.jobs.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailQueue for RecordingEmailQueue {
    async fn enqueue(&self, job: EmailJob) -> AppResult<()> {
        self.jobs.lock().unwrap().push(job);
        Ok(())
    }
}

fn test_user(password: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        full_name: "Maria Silva".to_string(),
        email: "maria@example.com".to_string(),
        password_hash: Password::new(password).unwrap().into_string(),
        role: UserRole::Donor,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

struct Harness {
    service: Authenticator<TestUnitOfWork>,
    users: Arc<StubUserRepository>,
    tokens: Arc<InMemoryResetTokenRepository>,
    queue: Arc<RecordingEmailQueue>,
}

fn harness(user: User) -> Harness {
    let users = Arc::new(StubUserRepository::new(user));
    let tokens = Arc::new(InMemoryResetTokenRepository::default());
    let queue = Arc::new(RecordingEmailQueue::default());

    let uow = TestUnitOfWork::new()
        .with_users(users.clone())
        .with_reset_tokens(tokens.clone());

    let service = Authenticator::new(Arc::new(uow), queue.clone(), Config::from_env());

    Harness {
        service,
        users,
        tokens,
        queue,
    }
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn login_with_valid_credentials_returns_a_verifiable_token() {
    let user = test_user("CorrectHorse1!");
    let user_id = user.id;
    let h = harness(user);

    let token = h
        .service
        .login("maria@example.com".to_string(), "CorrectHorse1!".to_string())
        .await
        .unwrap();

    assert_eq!(token.token_type, "Bearer");

    let claims = h.service.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.role, "donor");
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let h = harness(test_user("CorrectHorse1!"));

    let result = h
        .service
        .login("maria@example.com".to_string(), "WrongHorse1!".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn login_with_unknown_email_is_rejected() {
    let h = harness(test_user("CorrectHorse1!"));

    let result = h
        .service
        .login("nobody@example.com".to_string(), "CorrectHorse1!".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

// =============================================================================
// Send reset code
// =============================================================================

#[tokio::test]
async fn send_reset_token_persists_a_six_char_uppercase_code_and_queues_mail() {
    let h = harness(test_user("CorrectHorse1!"));

    h.service
        .send_password_reset_token("maria@example.com".to_string())
        .await
        .unwrap();

    let stored = h.tokens.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].token.len(), 6);
    assert!(stored[0]
        .token
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    assert!(stored[0].expires_at > Utc::now());

    let sent = h.queue.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "maria@example.com");
    assert!(sent[0].body.contains(&stored[0].token));
}

#[tokio::test]
async fn send_reset_token_replaces_previous_tokens() {
    let user = test_user("CorrectHorse1!");
    let user_id = user.id;
    let h = harness(user);

    h.tokens
        .insert(user_id, "OLD111", Utc::now() + Duration::minutes(10));

    h.service
        .send_password_reset_token("maria@example.com".to_string())
        .await
        .unwrap();

    let stored = h.tokens.stored();
    assert_eq!(stored.len(), 1);
    assert_ne!(stored[0].token, "OLD111");
}

#[tokio::test]
async fn send_reset_token_for_unknown_email_is_not_found() {
    let h = harness(test_user("CorrectHorse1!"));

    let result = h
        .service
        .send_password_reset_token("nobody@example.com".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

// =============================================================================
// Verify code
// =============================================================================

#[tokio::test]
async fn verify_code_rejects_a_code_that_was_never_issued() {
    let h = harness(test_user("CorrectHorse1!"));

    let result = h
        .service
        .verify_code("maria@example.com".to_string(), "ABC123".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
}

#[tokio::test]
async fn verify_code_rejects_another_users_code() {
    let h = harness(test_user("CorrectHorse1!"));

    // Code exists but belongs to a different user
    h.tokens
        .insert(Uuid::new_v4(), "XYZ789", Utc::now() + Duration::minutes(10));

    let result = h
        .service
        .verify_code("maria@example.com".to_string(), "XYZ789".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
}

#[tokio::test]
async fn verify_code_rejects_an_expired_code() {
    let user = test_user("CorrectHorse1!");
    let user_id = user.id;
    let h = harness(user);

    h.tokens
        .insert(user_id, "EXP000", Utc::now() - Duration::minutes(1));

    let result = h
        .service
        .verify_code("maria@example.com".to_string(), "EXP000".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
}

#[tokio::test]
async fn verify_code_accepts_a_valid_matching_code() {
    let user = test_user("CorrectHorse1!");
    let user_id = user.id;
    let h = harness(user);

    h.tokens
        .insert(user_id, "GOOD42", Utc::now() + Duration::minutes(10));

    let result = h
        .service
        .verify_code("maria@example.com".to_string(), "GOOD42".to_string())
        .await;

    assert!(result.is_ok());
}

// =============================================================================
// Reset password
// =============================================================================

#[tokio::test]
async fn reset_password_stores_a_new_hash_and_consumes_the_code() {
    let user = test_user("CorrectHorse1!");
    let user_id = user.id;
    let h = harness(user);

    h.tokens
        .insert(user_id, "GOOD42", Utc::now() + Duration::minutes(10));

    h.service
        .reset_password(
            "maria@example.com".to_string(),
            "GOOD42".to_string(),
            "BrandNewPass1!".to_string(),
        )
        .await
        .unwrap();

    let updates = h.users.password_updates.lock().unwrap().clone();
    assert_eq!(updates.len(), 1);
    assert!(Password::from_hash(updates[0].clone()).verify("BrandNewPass1!"));

    // The whole batch is gone, the code cannot be replayed
    assert!(h.tokens.stored().is_empty());
}

#[tokio::test]
async fn reset_password_rejects_a_short_replacement_password() {
    let user = test_user("CorrectHorse1!");
    let user_id = user.id;
    let h = harness(user);

    h.tokens
        .insert(user_id, "GOOD42", Utc::now() + Duration::minutes(10));

    let result = h
        .service
        .reset_password(
            "maria@example.com".to_string(),
            "GOOD42".to_string(),
            "short".to_string(),
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}
