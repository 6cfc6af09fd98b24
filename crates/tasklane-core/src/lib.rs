//! tasklane-core - Core types and traits for the tasklane API client.
//!
//! Everything here is transport-agnostic: validated input types, the task
//! model, session tokens, the [`TokenStore`] contract and the unified
//! [`Error`] type shared by the other crates.

pub mod credentials;
pub mod error;
pub mod events;
pub mod model;
pub mod store;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::{Credentials, Registration};
pub use error::Error;
pub use events::SessionEvent;
pub use model::{Task, TaskFilter, User};
pub use store::MemoryTokenStore;
pub use tokens::{AccessToken, RefreshToken, Session, TokenKind};
pub use traits::TokenStore;
pub use types::{ApiUrl, TaskId};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
