//! In-memory token store.

use std::sync::{PoisonError, RwLock};

use crate::Result;
use crate::tokens::{Session, TokenKind};
use crate::traits::TokenStore;

#[derive(Debug, Default)]
struct Slots {
    access: Option<String>,
    refresh: Option<String>,
}

impl Slots {
    fn slot_mut(&mut self, kind: TokenKind) -> &mut Option<String> {
        match kind {
            TokenKind::Access => &mut self.access,
            TokenKind::Refresh => &mut self.refresh,
        }
    }
}

/// A process-local token store.
///
/// Both slots sit behind one lock, so `clear` and `store_session` are atomic
/// for every reader. Useful for tests and short-lived processes.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slots: RwLock<Slots>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding the given session.
    pub fn with_session(session: &Session) -> Self {
        Self {
            slots: RwLock::new(Slots {
                access: Some(session.access_token.as_str().to_string()),
                refresh: Some(session.refresh_token.as_str().to_string()),
            }),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, kind: TokenKind) -> Result<Option<String>> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        Ok(match kind {
            TokenKind::Access => slots.access.clone(),
            TokenKind::Refresh => slots.refresh.clone(),
        })
    }

    fn set(&self, kind: TokenKind, token: &str) -> Result<()> {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        *slots.slot_mut(kind) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        *slots = Slots::default();
        Ok(())
    }

    fn store_session(&self, session: &Session) -> Result<()> {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.access = Some(session.access_token.as_str().to_string());
        slots.refresh = Some(session.refresh_token.as_str().to_string());
        Ok(())
    }
}
