//! Token store trait.

use crate::tokens::{AccessToken, RefreshToken, Session, TokenKind};
use crate::Result;

/// Synchronous storage for the session's two credentials.
///
/// Implementations hold the access and refresh tokens as opaque strings and
/// never validate them. `clear` must remove both in one step: no reader may
/// ever observe one slot emptied while the other is still populated.
pub trait TokenStore: Send + Sync {
    /// Returns the credential in the given slot, if any.
    fn get(&self, kind: TokenKind) -> Result<Option<String>>;

    /// Overwrites the credential in the given slot.
    fn set(&self, kind: TokenKind, token: &str) -> Result<()>;

    /// Removes both credentials. Clearing an empty store is a no-op.
    fn clear(&self) -> Result<()>;

    /// Writes both credentials as one update.
    ///
    /// The default writes the slots one after the other; stores that can
    /// update both together should override it.
    fn store_session(&self, session: &Session) -> Result<()> {
        self.set(TokenKind::Refresh, session.refresh_token.as_str())?;
        self.set(TokenKind::Access, session.access_token.as_str())
    }

    fn access_token(&self) -> Result<Option<AccessToken>> {
        Ok(self.get(TokenKind::Access)?.map(AccessToken::new))
    }

    fn refresh_token(&self) -> Result<Option<RefreshToken>> {
        Ok(self.get(TokenKind::Refresh)?.map(RefreshToken::new))
    }

    /// Returns the stored session only if both credentials are present.
    fn session(&self) -> Result<Option<Session>> {
        match (self.access_token()?, self.refresh_token()?) {
            (Some(access), Some(refresh)) => Ok(Some(Session::new(access, refresh))),
            _ => Ok(None),
        }
    }
}
