//! tasklane-http - HTTP client for the tasklane task API.
//!
//! All calls go through a [`Pipeline`], which attaches the stored access
//! token, and on a 401 "expired" response renews it once via the refresh
//! token before retrying. [`TaskClient`] binds the individual endpoints and
//! [`TaskBoard`] keeps a local task list with optimistic updates.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tasklane_core::{ApiUrl, Credentials, MemoryTokenStore};
//! use tasklane_http::{ClientConfig, TaskClient};
//!
//! # async fn example() -> Result<(), tasklane_core::Error> {
//! let config = ClientConfig::new(ApiUrl::new("https://tasks.example.com")?);
//! let client = TaskClient::new(config, Arc::new(MemoryTokenStore::new()))?;
//!
//! client.login(Credentials::new("alice@example.com", "hunter2")).await?;
//! for task in client.list_tasks().await? {
//!     println!("[{}] {}", if task.completed { "x" } else { " " }, task.title);
//! }
//! # Ok(())
//! # }
//! ```

mod board;
mod client;
mod config;
mod endpoints;
mod pipeline;
mod request;
mod transport;

pub use board::TaskBoard;
pub use client::TaskClient;
pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use pipeline::Pipeline;
pub use request::ApiRequest;
