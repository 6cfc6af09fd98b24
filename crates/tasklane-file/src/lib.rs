//! tasklane-file - Durable, file-backed token store.

mod store;

pub use store::FileTokenStore;
