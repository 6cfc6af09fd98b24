//! JSON-file token store.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use tasklane_core::error::StoreError;
use tasklane_core::{AccessToken, RefreshToken, Result, Session, TokenKind, TokenStore};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

/// On-disk layout of the session file.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTokens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

impl StoredTokens {
    fn slot_mut(&mut self, kind: TokenKind) -> &mut Option<String> {
        match kind {
            TokenKind::Access => &mut self.access_token,
            TokenKind::Refresh => &mut self.refresh_token,
        }
    }

    fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

fn map_io(path: &Path, err: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

/// A token store persisted as a single JSON file.
///
/// Every write replaces the whole file (temp file + rename) while holding an
/// exclusive lock on a sibling `.lock` file, so concurrent writers serialize
/// and readers only ever see a complete file or no file. `clear` deletes the
/// file, which removes both tokens in one step.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store backed by the file at `path`. Nothing is touched on disk
    /// until the first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the session file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }

    fn read(&self) -> Result<StoredTokens> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(StoredTokens::default()),
            Err(err) => return Err(map_io(&self.path, err).into()),
        };

        serde_json::from_str(&content).map_err(|e| {
            StoreError::Format {
                message: e.to_string(),
            }
            .into()
        })
    }

    fn write(&self, tokens: &StoredTokens) -> Result<()> {
        if tokens.is_empty() {
            return self.remove();
        }

        let json = serde_json::to_string_pretty(tokens).map_err(|e| StoreError::Format {
            message: e.to_string(),
        })?;

        let temp = self.temp_path();
        let mut file = create_private(&temp).map_err(|e| map_io(&temp, e))?;
        file.write_all(json.as_bytes())
            .and_then(|_| file.sync_data())
            .map_err(|e| map_io(&temp, e))?;

        fs::rename(&temp, &self.path).map_err(|e| map_io(&self.path, e))?;
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(map_io(&self.path, err).into()),
        }
    }

    /// Run `f` while holding the exclusive store lock.
    fn locked<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| map_io(parent, e))?;
        }

        let lock_path = self.lock_path();
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| map_io(&lock_path, e))?;

        lock_file
            .lock_exclusive()
            .map_err(|e| map_io(&lock_path, e))?;

        let result = f();

        lock_file.unlock().map_err(|e| map_io(&lock_path, e))?;

        result
    }

    /// Read-modify-write of a single slot under the store lock.
    fn update(&self, f: impl FnOnce(&mut StoredTokens)) -> Result<()> {
        self.locked(|| {
            let mut tokens = self.read()?;
            f(&mut tokens);
            self.write(&tokens)
        })
    }
}

/// Create (or truncate) a file readable only by the current user.
fn create_private(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).write(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);
    options.open(path)
}

impl TokenStore for FileTokenStore {
    fn get(&self, kind: TokenKind) -> Result<Option<String>> {
        let mut tokens = self.read()?;
        Ok(tokens.slot_mut(kind).take())
    }

    #[instrument(skip(self, token), fields(path = %self.path.display()))]
    fn set(&self, kind: TokenKind, token: &str) -> Result<()> {
        debug!(%kind, "Writing token");
        self.update(|tokens| *tokens.slot_mut(kind) = Some(token.to_string()))
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn clear(&self) -> Result<()> {
        debug!("Clearing stored session");
        // Whatever is on disk goes, readable or not.
        self.locked(|| self.remove())
    }

    #[instrument(skip(self, session), fields(path = %self.path.display()))]
    fn store_session(&self, session: &Session) -> Result<()> {
        debug!("Writing session");
        let tokens = StoredTokens {
            access_token: Some(session.access_token.as_str().to_string()),
            refresh_token: Some(session.refresh_token.as_str().to_string()),
        };
        self.locked(|| self.write(&tokens))
    }

    fn session(&self) -> Result<Option<Session>> {
        let tokens = self.read()?;
        match (tokens.access_token, tokens.refresh_token) {
            (Some(access), Some(refresh)) => Ok(Some(Session::new(
                AccessToken::new(access),
                RefreshToken::new(refresh),
            ))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileTokenStore {
        FileTokenStore::new(dir.path().join("nested").join("session.json"))
    }

    fn session(access: &str, refresh: &str) -> Session {
        Session::new(AccessToken::new(access), RefreshToken::new(refresh))
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get(TokenKind::Access).unwrap(), None);
        assert!(store.session().unwrap().is_none());
    }

    #[test]
    fn session_survives_reopening() {
        let dir = TempDir::new().unwrap();
        store_in(&dir).store_session(&session("A1", "R1")).unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.session().unwrap(), Some(session("A1", "R1")));
    }

    #[test]
    fn set_access_keeps_refresh() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.store_session(&session("A1", "R1")).unwrap();
        store.set(TokenKind::Access, "A2").unwrap();

        assert_eq!(store.session().unwrap(), Some(session("A2", "R1")));
    }

    #[test]
    fn clear_removes_file_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.store_session(&session("A1", "R1")).unwrap();

        store.clear().unwrap();
        assert!(!store.path().exists());
        store.clear().unwrap();

        assert_eq!(store.get(TokenKind::Access).unwrap(), None);
        assert_eq!(store.get(TokenKind::Refresh).unwrap(), None);
    }

    #[test]
    fn file_uses_camel_case_keys() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.store_session(&session("A1", "R1")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["accessToken"], "A1");
        assert_eq!(raw["refreshToken"], "R1");
    }

    #[test]
    fn corrupt_file_is_a_store_error() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join("session.json"));
        fs::write(store.path(), "not json").unwrap();

        let err = store.get(TokenKind::Access).unwrap_err();
        assert!(matches!(err, tasklane_core::Error::Store(StoreError::Format { .. })));
    }

    #[test]
    fn corrupt_file_can_be_cleared() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join("session.json"));
        fs::write(store.path(), "{\"accessToken\": ").unwrap();

        store.clear().unwrap();

        assert!(!store.path().exists());
        assert!(store.session().unwrap().is_none());
    }

    #[test]
    fn corrupt_file_is_replaced_by_new_session() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join("session.json"));
        fs::write(store.path(), "{\"accessToken\": ").unwrap();

        store.store_session(&session("A1", "R1")).unwrap();

        assert_eq!(store.session().unwrap(), Some(session("A1", "R1")));
    }

    #[test]
    fn session_is_read_from_one_snapshot() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set(TokenKind::Access, "A1").unwrap();
        assert!(store.session().unwrap().is_none());

        store.set(TokenKind::Refresh, "R1").unwrap();
        assert_eq!(store.session().unwrap(), Some(session("A1", "R1")));
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.store_session(&session("A1", "R1")).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
