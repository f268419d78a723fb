//! Application state shared by every command handler.
//!
//! [`AppState`] is the single owned aggregate of the client: the entity
//! store, the session, the host-provided location and the outbox of
//! notifications.  Handlers receive it by `&mut`, one at a time, so no two
//! mutations ever interleave.

use orgdesk_shared::ForbiddenError;
use orgdesk_store::EntityStore;

use crate::error::{ClientError, ClientResult};
use crate::events::{Level, Notification};
use crate::router::ViewId;
use crate::session::{Identity, SessionManager};
use crate::views::ActiveView;

pub struct AppState {
    pub(crate) store: EntityStore,
    pub(crate) session: SessionManager,
    pub(crate) location: String,
    notifications: Vec<Notification>,
}

impl AppState {
    /// Wrap a loaded store.  Nobody is authenticated yet.
    pub fn new(store: EntityStore) -> Self {
        Self {
            store,
            session: SessionManager::new(),
            location: ViewId::Home.path().to_string(),
            notifications: Vec::new(),
        }
    }

    /// Startup sequence: restore a remembered session, then route the
    /// host's initial location.
    pub fn start(store: EntityStore, initial_location: &str) -> (Self, ActiveView) {
        let mut state = Self::new(store);
        state.session.restore(&mut state.store);
        let view = state.navigate(initial_location);
        (state, view)
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Current location token (always a canonical view path).
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn identity(&self) -> Option<Identity> {
        self.session.current(&self.store)
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    pub fn notify(&mut self, notification: Notification) {
        tracing::debug!(level = ?notification.level, message = %notification.message, "notify");
        self.notifications.push(notification);
    }

    /// Hand every queued notification to the host, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Surface the outcome of a command: a success message (plus a warning
    /// if the snapshot could not be written) or the error notification.
    pub(crate) fn finish<T>(
        &mut self,
        result: ClientResult<T>,
        success: impl FnOnce(&T) -> Notification,
    ) -> ClientResult<T> {
        match &result {
            Ok(value) => {
                let notification = success(value);
                self.notify(notification);
                if let Some(e) = self.store.take_persist_error() {
                    self.notify(Notification::new(
                        Level::Warning,
                        format!("Changes could not be saved: {e}"),
                    ));
                }
            }
            Err(e) => {
                tracing::info!(error = %e, "command rejected");
                let notification = Notification::from_error(e);
                self.notify(notification);
            }
        }
        result
    }

    // ------------------------------------------------------------------
    // Authorization
    // ------------------------------------------------------------------

    pub(crate) fn require_identity(&self) -> ClientResult<Identity> {
        self.identity()
            .ok_or(ClientError::from(ForbiddenError::NotAuthenticated))
    }

    pub(crate) fn require_admin(&self) -> ClientResult<Identity> {
        let identity = self.require_identity()?;
        if !identity.is_admin() {
            return Err(ForbiddenError::AdminOnly.into());
        }
        Ok(identity)
    }
}
