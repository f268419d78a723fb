//! The single authenticated identity.
//!
//! The session stores only an [`AccountId`].  Every read of names, email or
//! role goes back to the [`EntityStore`], so edits to the account are
//! visible immediately and a deleted account simply stops resolving.
//! The credential token (the account email) lives in storage so a reload
//! can [`restore`](SessionManager::restore) the session.

use serde::Serialize;

use orgdesk_shared::{normalize_email, AccountId, DeskError, DeskResult, Role};
use orgdesk_store::{Account, EntityStore};

/// A read-only view of the authenticated account, rebuilt on every access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
}

impl Identity {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<&Account> for Identity {
    fn from(a: &Account) -> Self {
        Self {
            id: a.id.clone(),
            first_name: a.first_name.clone(),
            last_name: a.last_name.clone(),
            email: a.email.clone(),
            role: a.role,
        }
    }
}

#[derive(Debug, Default)]
pub struct SessionManager {
    current: Option<AccountId>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_id(&self) -> Option<&AccountId> {
        self.current.as_ref()
    }

    /// The authenticated identity as currently stored, or `None` when
    /// nobody is logged in or the account no longer exists.
    pub fn current(&self, store: &EntityStore) -> Option<Identity> {
        let id = self.current.as_ref()?;
        store.find_account(id).map(Identity::from)
    }

    /// Authenticate by email (case-insensitive), exact password and a
    /// verified account.  On success the email is stored as the token.
    pub fn login(
        &mut self,
        store: &mut EntityStore,
        email: &str,
        password: &str,
    ) -> DeskResult<Identity> {
        let email = normalize_email(email);
        let identity = store
            .find_account_by_email(&email)
            .filter(|a| a.password == password && a.verified)
            .map(Identity::from)
            .ok_or(DeskError::Unauthorized)?;

        if let Err(e) = store.persistence_mut().set_auth_token(&identity.email) {
            tracing::warn!(error = %e, "failed to store credential token");
        }
        self.current = Some(identity.id.clone());

        tracing::info!(account_id = %identity.id, "logged in");
        Ok(identity)
    }

    pub fn logout(&mut self, store: &mut EntityStore) {
        if let Some(id) = self.current.take() {
            tracing::info!(account_id = %id, "logged out");
        }
        if let Err(e) = store.persistence_mut().clear_auth_token() {
            tracing::warn!(error = %e, "failed to clear credential token");
        }
    }

    /// Resolve a stored token at startup.  A token that does not match a
    /// verified account is removed and grants nothing.
    pub fn restore(&mut self, store: &mut EntityStore) -> Option<Identity> {
        self.current = None;
        let token = store.persistence().auth_token()?;

        let identity = store
            .find_account_by_email(&token)
            .filter(|a| a.verified)
            .map(Identity::from);

        match identity {
            Some(identity) => {
                tracing::info!(account_id = %identity.id, "session restored");
                self.current = Some(identity.id.clone());
                Some(identity)
            }
            None => {
                tracing::warn!("stale credential token discarded");
                if let Err(e) = store.persistence_mut().clear_auth_token() {
                    tracing::warn!(error = %e, "failed to clear credential token");
                }
                None
            }
        }
    }

    /// Re-align the session with the store after an account mutation: the
    /// token follows an email change, and a vanished account ends the session.
    pub fn sync(&mut self, store: &mut EntityStore) {
        let Some(id) = self.current.clone() else {
            return;
        };

        match store.find_account(&id).map(|a| a.email.clone()) {
            Some(email) => {
                if store.persistence().auth_token().as_deref() != Some(email.as_str()) {
                    if let Err(e) = store.persistence_mut().set_auth_token(&email) {
                        tracing::warn!(error = %e, "failed to re-point credential token");
                    }
                    tracing::debug!(account_id = %id, "credential token re-pointed");
                }
            }
            None => {
                tracing::warn!(account_id = %id, "session account disappeared, logging out");
                self.logout(store);
            }
        }
    }
}
