//! API data model.

mod task;
mod user;

pub use task::{Task, TaskFilter};
pub use user::User;
