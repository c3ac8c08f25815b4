use serde::Serialize;
use sqlx::FromRow;
use std::fmt;

/// One-way hashed password as stored in `users.password`.
///
/// Only a [`CredentialHasher`](crate::domain::ports::CredentialHasher) mints
/// new digests, so repository inputs can never carry plaintext.
#[derive(Clone, PartialEq, Eq, sqlx::Type)]
#[sqlx(transparent)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub(crate) fn new(encoded: String) -> Self {
        Self(encoded)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

#[derive(Debug, Serialize, FromRow, Clone)]
pub struct User {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub user_type: Option<String>,
    #[serde(skip_serializing)]
    pub password: PasswordDigest,
}

impl User {
    pub fn role(&self) -> &str {
        self.user_type.as_deref().unwrap_or("user")
    }
}

/// Caller input for registering a user; the password is still plaintext here.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub user_type: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub user_type: Option<String>,
    pub password: Option<String>,
}

/// One element of a bulk update: a complete profile, password optional.
/// The stored role is always kept.
#[derive(Debug, Clone)]
pub struct UserReplacement {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UserInsert {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub user_type: Option<String>,
    pub password: PasswordDigest,
}

/// Full-row write. `None` in `user_type` or `password` keeps the stored value.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub user_type: Option<String>,
    pub password: Option<PasswordDigest>,
}
