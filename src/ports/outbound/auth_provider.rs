use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::watch;

/// Session - opaque handle from the external auth provider
///
/// Presence or absence of a session gates whether the triage views
/// render. Created on successful sign-in, destroyed on sign-out or
/// expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub user_email: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

/// AuthProvider port for the external authentication service
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Returns the current session, if any. Expired sessions are
    /// reported as absent.
    async fn current_session(&self) -> Result<Option<Session>>;

    /// Subscribes to auth-state changes. The receiver yields the new
    /// session state on sign-in and `None` on sign-out or expiry.
    fn subscribe(&self) -> watch::Receiver<Option<Session>>;

    /// Signs in with email/password credentials
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    /// Signs out and clears the current session
    async fn sign_out(&self) -> Result<()>;
}
