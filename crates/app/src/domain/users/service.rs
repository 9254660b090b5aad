//! Users service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::hash_password,
    database::Db,
    domain::users::{
        errors::UsersServiceError,
        models::{NewUser, ProfileIssue, User, UserUpdate, UserUuid, check_profile, normalize_email},
        repository::{PgUsersRepository, UserRow},
    },
};

impl From<ProfileIssue> for UsersServiceError {
    fn from(issue: ProfileIssue) -> Self {
        match issue {
            ProfileIssue::Missing => Self::MissingRequiredData,
            ProfileIssue::InvalidEmail => Self::InvalidData,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn list_users(&self) -> Result<Vec<User>, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let users = self.repository.list_users(&mut tx).await?;

        tx.commit().await?;

        Ok(users)
    }

    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError> {
        let email = normalize_email(&user.email);

        check_profile(&user.first_name, &user.last_name, &email, Some(&user.password))?;

        let password_hash = hash_password(user.password.clone()).await?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_user(
                &mut tx,
                &UserRow {
                    uuid: user.uuid,
                    first_name: user.first_name.trim(),
                    last_name: user.last_name.trim(),
                    email: &email,
                    password_hash: Some(&password_hash),
                    role: Some(user.role),
                },
            )
            .await?;

        tx.commit().await?;

        info!(user = %created.uuid, role = %created.role, "user created");

        Ok(created)
    }

    async fn update_user(
        &self,
        user: UserUuid,
        update: UserUpdate,
    ) -> Result<User, UsersServiceError> {
        let email = normalize_email(&update.email);

        check_profile(
            &update.first_name,
            &update.last_name,
            &email,
            update.password.as_deref(),
        )?;

        let password_hash = match update.password.clone() {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };

        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_user(
                &mut tx,
                &UserRow {
                    uuid: user,
                    first_name: update.first_name.trim(),
                    last_name: update.last_name.trim(),
                    email: &email,
                    password_hash: password_hash.as_deref(),
                    role: update.role,
                },
            )
            .await?;

        tx.commit().await?;

        info!(user = %updated.uuid, "user updated");

        Ok(updated)
    }

    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_user(&mut tx, user).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        info!(user = %user, "user deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Retrieves all users, oldest first.
    async fn list_users(&self) -> Result<Vec<User>, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError>;

    /// Creates a user, hashing the given password.
    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError>;

    /// Replaces a user's profile; password and role change only when given.
    async fn update_user(&self, user: UserUuid, update: UserUpdate)
    -> Result<User, UsersServiceError>;

    /// Deletes a user and every session they own.
    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError>;
}
