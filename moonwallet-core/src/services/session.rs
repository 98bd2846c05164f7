//! Session service - registration, login, and the active session

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::domain::result::{Error, Result};
use crate::domain::Credential;
use crate::ports::KeyValueStore;

/// Persisted record keys (kept identical to the mobile app's storage keys
/// so an existing on-device store rehydrates unchanged)
const USERS_KEY: &str = "users";
const SESSION_KEY: &str = "user";

/// Acknowledgment returned by a successful password reset request
///
/// The reset flow only validates that the email is registered; no
/// credential is changed and no message is sent. `credentials_changed` is
/// always false and exists so callers cannot mistake the acknowledgment
/// for an actual reset.
#[derive(Debug, Clone, Serialize)]
pub struct ResetAcknowledgment {
    pub email: String,
    pub credentials_changed: bool,
}

#[derive(Debug, Default)]
struct SessionState {
    users: Vec<Credential>,
    active: Option<Credential>,
}

/// Session service owning the registered-credentials set and the active user
///
/// All operations run under one async mutex that stays held across the
/// persistence write, so a second operation cannot start while the first
/// one's write is still in flight.
pub struct SessionService {
    store: Arc<dyn KeyValueStore>,
    state: Mutex<SessionState>,
}

impl SessionService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Restore the registered set and active session from persisted state
    ///
    /// Non-fatal by contract: a failed read or an unreadable record leaves
    /// the corresponding state at its default (no users / logged out).
    pub async fn rehydrate(&self) {
        let mut state = self.state.lock().await;

        if let Ok(Some(raw)) = self.store.get(USERS_KEY).await {
            state.users = serde_json::from_str(&raw).unwrap_or_default();
        }
        if let Ok(Some(raw)) = self.store.get(SESSION_KEY).await {
            state.active = serde_json::from_str(&raw).ok();
        }
    }

    /// Register a new credential and log it in
    ///
    /// Persists the updated registered set and the new active session
    /// (two independent writes, no cross-key transaction).
    pub async fn register(&self, email: &str, password: &str) -> Result<Credential> {
        let mut state = self.state.lock().await;

        if state.users.iter().any(|u| u.email == email) {
            return Err(Error::DuplicateUser(email.to_string()));
        }

        let credential = Credential::new(email, password);

        // Persist first, commit in memory after, so a failed write leaves
        // the in-memory state matching what is on disk
        let mut users = state.users.clone();
        users.push(credential.clone());
        self.persist_users(&users).await?;
        self.persist_session(&credential).await?;

        state.users = users;
        state.active = Some(credential.clone());

        Ok(credential)
    }

    /// Log in with an exact email/password match
    pub async fn login(&self, email: &str, password: &str) -> Result<Credential> {
        let mut state = self.state.lock().await;

        let credential = state
            .users
            .iter()
            .find(|u| u.matches(email, password))
            .cloned()
            .ok_or(Error::InvalidCredentials)?;

        self.persist_session(&credential).await?;
        state.active = Some(credential.clone());

        Ok(credential)
    }

    /// Clear the active session
    ///
    /// Never fails: the in-memory session is cleared first, and a failure
    /// to remove the persisted record is swallowed (the stale record is
    /// overwritten by the next login).
    pub async fn logout(&self) {
        let mut state = self.state.lock().await;
        state.active = None;
        let _ = self.store.remove(SESSION_KEY).await;
    }

    /// Request a password reset for a registered email
    ///
    /// Validates the email only. See [`ResetAcknowledgment`] for why this
    /// mutates nothing.
    pub async fn reset_password(&self, email: &str) -> Result<ResetAcknowledgment> {
        let state = self.state.lock().await;

        if !state.users.iter().any(|u| u.email == email) {
            return Err(Error::UserNotFound(email.to_string()));
        }

        Ok(ResetAcknowledgment {
            email: email.to_string(),
            credentials_changed: false,
        })
    }

    /// The currently logged-in credential, if any
    pub async fn current_user(&self) -> Option<Credential> {
        self.state.lock().await.active.clone()
    }

    /// Number of registered credentials
    pub async fn registered_count(&self) -> usize {
        self.state.lock().await.users.len()
    }

    async fn persist_users(&self, users: &[Credential]) -> Result<()> {
        let raw = serde_json::to_string(users)?;
        self.store.set(USERS_KEY, &raw).await
    }

    async fn persist_session(&self, credential: &Credential) -> Result<()> {
        let raw = serde_json::to_string(credential)?;
        self.store.set(SESSION_KEY, &raw).await
    }
}
