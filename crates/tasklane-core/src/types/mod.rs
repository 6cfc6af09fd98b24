//! Validated input types.
//!
//! These types enforce their invariants at construction time, so a value
//! that exists is always safe to put into a request.

mod api_url;
mod task_id;

pub use api_url::ApiUrl;
pub use task_id::TaskId;
