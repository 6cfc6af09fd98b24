//! Authenticated user profile.

use serde::{Deserialize, Serialize};

/// The profile returned by `/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
}
