//! User domain entity and related types.

use serde::{Deserialize, Serialize};

/// Stable numeric identifier, assigned by the store at creation.
pub type UserId = i64;

/// Persisted user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Opaque credential, never exposed through `UserView`
    #[serde(skip_serializing)]
    pub password: String,
}

impl User {
    /// Overwrite the mutable fields from a candidate record.
    ///
    /// The id is immutable after creation and stays untouched.
    pub fn apply(&mut self, input: UserInput) {
        self.name = input.name;
        self.email = input.email;
        self.password = input.password;
    }
}

/// Candidate user data for create and update operations.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInput {
    /// User display name
    pub name: String,
    /// User email address, unique across all persisted users
    pub email: String,
    /// User password
    pub password: String,
}

/// User response (safe to return to clients).
///
/// A stateless projection of a `User`, reconstructed on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    /// Unique user identifier
    pub id: UserId,
    /// User display name
    pub name: String,
    /// User email address
    pub email: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}
