//! Session lifecycle events.

/// Emitted by the request pipeline when the stored session changes on its own.
///
/// The presentation layer subscribes to these and decides how to react, for
/// example by sending the user back to the login screen on `Invalidated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new access token was obtained and stored.
    Renewed,
    /// Renewal failed; the token store has been cleared.
    Invalidated { reason: String },
}
