//! Location of the persisted session.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use tasklane_file::FileTokenStore;

/// Default session file: `<data dir>/tasklane/session.json`.
fn default_session_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "tasklane").context("Could not determine data directory")?;

    Ok(dirs.data_dir().join("session.json"))
}

/// Open the token store at `path`, or at the default location.
pub fn open_store(path: Option<&Path>) -> Result<FileTokenStore> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_session_path()?,
    };

    Ok(FileTokenStore::new(path))
}
