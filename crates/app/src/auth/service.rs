//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use crate::{
    auth::{
        AuthServiceError, CurrentUser, IssuedSession, Registration, SessionSettings,
        SessionTokenVersion, SessionUuid, format_session_token, generate_session_secret,
        parse_session_token,
        password::{hash_password, verify_dummy, verify_password},
        repository::PgAuthRepository,
        session_token_hash,
    },
    database::Db,
    domain::users::{
        models::{ProfileIssue, Role, User, UserUuid, check_profile, normalize_email},
        repository::{PgUsersRepository, UserRow},
    },
};

impl From<ProfileIssue> for AuthServiceError {
    fn from(issue: ProfileIssue) -> Self {
        match issue {
            ProfileIssue::Missing => Self::MissingRequiredData,
            ProfileIssue::InvalidEmail => Self::InvalidData,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
    users_repository: PgUsersRepository,
    ttl_hours: i32,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, settings: SessionSettings) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
            users_repository: PgUsersRepository::new(),
            ttl_hours: i32::try_from(settings.ttl_hours).unwrap_or(i32::MAX),
        }
    }

    async fn issue_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: User,
    ) -> Result<IssuedSession, AuthServiceError> {
        let session_uuid = SessionUuid::new();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_secret();

        let token = format_session_token(session_uuid.into_uuid(), version, &secret);
        let token_hash = session_token_hash(&session_uuid.into_uuid(), version, &secret);

        let session = self
            .repository
            .create_session(tx, session_uuid, user.uuid, &token_hash, self.ttl_hours)
            .await?;

        Ok(IssuedSession {
            token,
            session,
            user,
        })
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(&self, registration: Registration) -> Result<IssuedSession, AuthServiceError> {
        let email = normalize_email(&registration.email);

        check_profile(
            &registration.first_name,
            &registration.last_name,
            &email,
            Some(&registration.password),
        )?;

        let password_hash = hash_password(registration.password.clone()).await?;

        let mut tx = self.db.begin_transaction().await?;

        let user = self
            .users_repository
            .create_user(
                &mut tx,
                &UserRow {
                    uuid: UserUuid::new(),
                    first_name: registration.first_name.trim(),
                    last_name: registration.last_name.trim(),
                    email: &email,
                    password_hash: Some(&password_hash),
                    role: Some(Role::User),
                },
            )
            .await?;

        let issued = self.issue_session(&mut tx, user).await?;

        tx.commit().await?;

        info!(user = %issued.user.uuid, session = %issued.session.uuid, "user registered");

        Ok(issued)
    }

    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthServiceError> {
        let email = normalize_email(email);

        let mut tx = self.db.begin_transaction().await?;

        let Some(credentials) = self
            .users_repository
            .find_user_by_email(&mut tx, &email)
            .await?
        else {
            verify_dummy(password.to_string()).await?;

            return Err(AuthServiceError::InvalidCredentials);
        };

        if !verify_password(password.to_string(), credentials.password_hash).await? {
            warn!(user = %credentials.user.uuid, "login rejected");

            return Err(AuthServiceError::InvalidCredentials);
        }

        let pruned = self
            .repository
            .delete_stale_sessions(&mut tx, credentials.user.uuid)
            .await?;

        let issued = self.issue_session(&mut tx, credentials.user).await?;

        tx.commit().await?;

        info!(
            user = %issued.user.uuid,
            session = %issued.session.uuid,
            pruned,
            "session started"
        );

        Ok(issued)
    }

    async fn logout(&self, session: SessionUuid) -> Result<(), AuthServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.revoke_session(&mut tx, session).await?;

        if rows_affected == 0 {
            return Err(AuthServiceError::NotFound);
        }

        tx.commit().await?;

        info!(session = %session, "session revoked");

        Ok(())
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<CurrentUser, AuthServiceError> {
        let parsed = parse_session_token(bearer_token)?;

        let session_uuid = SessionUuid::from_uuid(parsed.session_uuid);

        let session = self
            .repository
            .find_active_session(self.db.pool(), session_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let presented = session_token_hash(&parsed.session_uuid, parsed.version, &parsed.secret);

        if !bool::from(presented.as_bytes().ct_eq(session.token_hash.as_bytes())) {
            return Err(AuthServiceError::NotFound);
        }

        Ok(CurrentUser {
            session_uuid: session.uuid,
            user_uuid: session.user_uuid,
            email: session.email,
            role: session.role,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Creates a regular user and signs them in.
    async fn register(&self, registration: Registration) -> Result<IssuedSession, AuthServiceError>;

    /// Verifies credentials and starts a new session, deleting the user's
    /// expired and revoked ones.
    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthServiceError>;

    /// Revokes a session. Revoked or unknown sessions return `NotFound`.
    async fn logout(&self, session: SessionUuid) -> Result<(), AuthServiceError>;

    /// Resolves a bearer token to its user, reading the role from storage.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<CurrentUser, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::users::{UsersService, models::UserUpdate},
        test::{TestContext, helpers::new_user},
    };

    use super::*;

    fn registration(email: &str) -> Registration {
        Registration {
            first_name: "Carla".to_string(),
            last_name: "Mendez".to_string(),
            email: email.to_string(),
            password: "s3cret-pass".to_string(),
        }
    }

    #[tokio::test]
    async fn register_creates_user_role_and_valid_token() -> TestResult {
        let ctx = TestContext::new().await;

        let issued = ctx.auth.register(registration("Carla@Example.com")).await?;

        assert_eq!(issued.user.role, Role::User);
        assert_eq!(issued.user.email, "carla@example.com");
        assert!(issued.session.expires_at > issued.session.created_at);

        let current = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(current.user_uuid, issued.user.uuid);
        assert_eq!(current.session_uuid, issued.session.uuid);
        assert!(!current.is_admin());

        Ok(())
    }

    #[tokio::test]
    async fn register_duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.auth.register(registration("taken@example.com")).await?;

        let result = ctx.auth.register(registration("taken@example.com")).await;

        assert!(
            matches!(result, Err(AuthServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_with_wrong_password_returns_invalid_credentials() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.auth.register(registration("login@example.com")).await?;

        let result = ctx.auth.login("login@example.com", "wrong").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );

        let result = ctx.auth.login("nobody@example.com", "s3cret-pass").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn role_is_read_from_storage_on_each_request() -> TestResult {
        let ctx = TestContext::new().await;

        let admin = ctx
            .users
            .create_user(new_user("boss@example.com", Role::Admin))
            .await?;

        let issued = ctx.auth.login("boss@example.com", "password123").await?;

        assert!(ctx.auth.authenticate_bearer(&issued.token).await?.is_admin());

        ctx.users
            .update_user(
                admin.uuid,
                UserUpdate {
                    first_name: admin.first_name.clone(),
                    last_name: admin.last_name.clone(),
                    email: admin.email.clone(),
                    password: None,
                    role: Some(Role::User),
                },
            )
            .await?;

        assert!(!ctx.auth.authenticate_bearer(&issued.token).await?.is_admin());

        Ok(())
    }

    #[tokio::test]
    async fn logout_revokes_the_session() -> TestResult {
        let ctx = TestContext::new().await;

        let issued = ctx.auth.register(registration("bye@example.com")).await?;

        ctx.auth.logout(issued.session.uuid).await?;

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let result = ctx.auth.logout(issued.session.uuid).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_prunes_revoked_and_expired_sessions() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx.auth.register(registration("prune@example.com")).await?;
        let second = ctx.auth.login("prune@example.com", "s3cret-pass").await?;

        ctx.auth.logout(first.session.uuid).await?;

        sqlx::query("UPDATE sessions SET expires_at = now() - interval '1 hour' WHERE uuid = $1")
            .bind(second.session.uuid.into_uuid())
            .execute(ctx.db.pool())
            .await?;

        let third = ctx.auth.login("prune@example.com", "s3cret-pass").await?;

        let remaining: Vec<uuid::Uuid> =
            sqlx::query_scalar("SELECT uuid FROM sessions WHERE user_uuid = $1")
                .bind(third.user.uuid.into_uuid())
                .fetch_all(ctx.db.pool())
                .await?;

        assert_eq!(remaining, vec![third.session.uuid.into_uuid()]);

        Ok(())
    }

    #[tokio::test]
    async fn tampered_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let issued = ctx.auth.register(registration("tamper@example.com")).await?;

        let (id, _secret) = issued
            .token
            .split_once('.')
            .ok_or("token should contain a secret segment")?;

        let forged = format!("{id}.{}", "0".repeat(64));

        let result = ctx.auth.authenticate_bearer(&forged).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let result = ctx.auth.authenticate_bearer("not-a-token").await;

        assert!(
            matches!(result, Err(AuthServiceError::Token(_))),
            "expected Token error, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn deleted_user_sessions_stop_authenticating() -> TestResult {
        let ctx = TestContext::new().await;

        let issued = ctx.auth.register(registration("gone@example.com")).await?;

        ctx.users.delete_user(issued.user.uuid).await?;

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
