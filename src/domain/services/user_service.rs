use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{
    models::{
        batch::BatchItemResult,
        user::{NewUser, PasswordDigest, User, UserChanges, UserInsert, UserReplacement, UserUpdate},
    },
    ports::{CredentialHasher, UserRepository},
};
use crate::error::AppError;

/// Pre-conditions and password hashing around [`UserRepository`].
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { repo, hasher }
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        self.repo.list_all().await
    }

    pub async fn get(&self, user_id: i64) -> Result<Option<User>, AppError> {
        self.repo.find_by_id(user_id).await
    }

    pub async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let password = self
            .prepare_password(Some(user.password))?
            .ok_or_else(|| AppError::Validation("Password is required".into()))?;

        let insert = UserInsert {
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone_number: user.phone_number,
            user_type: user.user_type,
            password,
        };

        let created = self.repo.create(&insert).await?.ok_or_else(|| {
            AppError::NoRowsAffected(format!("Failed to create user {}", insert.email))
        })?;

        info!("Created user {}", created.user_id);
        Ok(created)
    }

    /// Merges `changes` into the stored profile. A supplied password is
    /// hashed; an absent one leaves the stored digest untouched.
    pub async fn update(&self, user_id: i64, changes: UserChanges) -> Result<User, AppError> {
        let current = self.repo.find_by_id(user_id).await?
            .ok_or_else(|| not_found(user_id))?;

        let update = UserUpdate {
            first_name: changes.first_name.unwrap_or(current.first_name),
            last_name: changes.last_name.unwrap_or(current.last_name),
            email: changes.email.unwrap_or(current.email),
            phone_number: changes.phone_number.unwrap_or(current.phone_number),
            user_type: changes.user_type,
            password: self.prepare_password(changes.password)?,
        };

        let updated = self.repo.update(user_id, &update).await?
            .ok_or_else(|| AppError::NoRowsAffected(format!("Failed to update user {}", user_id)))?;

        info!("Updated user {}", user_id);
        Ok(updated)
    }

    /// Replaces each listed profile in order, with no existence checks.
    /// A record whose password cannot be prepared fails on its own and is
    /// never sent to the store.
    pub async fn update_bulk(&self, replacements: Vec<UserReplacement>) -> Vec<BatchItemResult<User>> {
        let mut slots = Vec::with_capacity(replacements.len());
        let mut writes = Vec::with_capacity(replacements.len());

        for replacement in replacements {
            let user_id = replacement.user_id;
            match self.prepare_password(replacement.password) {
                Ok(password) => {
                    writes.push((user_id, UserUpdate {
                        first_name: replacement.first_name,
                        last_name: replacement.last_name,
                        email: replacement.email,
                        phone_number: replacement.phone_number,
                        user_type: None,
                        password,
                    }));
                    slots.push(Ok(user_id));
                }
                Err(e) => slots.push(Err((user_id, e))),
            }
        }

        let mut written = self.repo.update_bulk(&writes).await.into_iter();
        let outcomes: Vec<_> = slots
            .into_iter()
            .map(|slot| match slot {
                Ok(user_id) => BatchItemResult::from_write(user_id, written.next().unwrap_or(Ok(None))),
                Err((user_id, e)) => BatchItemResult::from_write(user_id, Err(e)),
            })
            .collect();

        info!(
            "Bulk user update: {} of {} records updated",
            outcomes.iter().filter(|o| o.is_updated()).count(),
            outcomes.len()
        );
        outcomes
    }

    /// Grants `user_type` to an existing user. Only reachable by admins.
    pub async fn set_role(&self, user_id: i64, user_type: String) -> Result<User, AppError> {
        let updated = self
            .update(user_id, UserChanges { user_type: Some(user_type), ..Default::default() })
            .await?;
        info!("User {} now has role {}", user_id, updated.role());
        Ok(updated)
    }

    pub async fn delete(&self, user_id: i64) -> Result<(), AppError> {
        if self.repo.find_by_id(user_id).await?.is_none() {
            return Err(not_found(user_id));
        }

        if !self.repo.delete(user_id).await? {
            return Err(AppError::NoRowsAffected(format!("Failed to delete user {}", user_id)));
        }

        info!("Deleted user {}", user_id);
        Ok(())
    }

    /// Checks a login attempt. Unknown email and wrong password look the same.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self.repo.find_by_email(email).await?
            .ok_or(AppError::Unauthorized)?;

        if !self.hasher.verify(password, &user.password) {
            warn!("Rejected login for user {}", user.user_id);
            return Err(AppError::Unauthorized);
        }
        Ok(user)
    }

    // An explicitly empty password is an error, never hashed into a digest.
    fn prepare_password(&self, password: Option<String>) -> Result<Option<PasswordDigest>, AppError> {
        match password {
            None => Ok(None),
            Some(p) if p.is_empty() => Err(AppError::Validation("Password must not be empty".into())),
            Some(p) => self.hasher.hash(&p).map(Some),
        }
    }
}

fn not_found(user_id: i64) -> AppError {
    AppError::NotFound(format!("User {} not found", user_id))
}
