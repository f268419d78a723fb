//! The in-memory entity store.
//!
//! [`EntityStore`] owns the [`Dataset`] exclusively.  Callers get clones or
//! shared borrows, never `&mut` access to a collection, so every change goes
//! through an operation in `accounts.rs`, `departments.rs`, `employees.rs` or
//! `requests.rs`.  Each of those validates first, applies all cascading
//! sub-updates, then calls [`EntityStore::commit`] exactly once.

use crate::error::StoreError;
use crate::models::Dataset;
use crate::persistence::Persistence;

pub struct EntityStore {
    pub(crate) data: Dataset,
    persistence: Persistence,
    persist_error: Option<StoreError>,
}

impl EntityStore {
    /// Load (or seed) the dataset from `persistence`.
    pub fn open(mut persistence: Persistence) -> Self {
        let data = persistence.load();
        Self {
            data,
            persistence,
            persist_error: None,
        }
    }

    /// Read-only view of the whole dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut Persistence {
        &mut self.persistence
    }

    /// Write the snapshot after a successful mutation.  A failure is logged
    /// and remembered for [`take_persist_error`](Self::take_persist_error);
    /// the in-memory state stays authoritative either way.
    pub(crate) fn commit(&mut self) {
        match self.persistence.save(&self.data) {
            Ok(()) => {
                tracing::debug!("snapshot saved");
            }
            Err(e) => {
                tracing::error!(error = %e, "storage save error, keeping in-memory state");
                self.persist_error = Some(e);
            }
        }
    }

    /// The most recent save failure, if any, cleared on read.
    pub fn take_persist_error(&mut self) -> Option<StoreError> {
        self.persist_error.take()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::models::Registration;

    #[test]
    fn open_seeds_empty_storage() {
        let store = seeded_store();
        assert_eq!(store.dataset().accounts.len(), 1);
        assert_eq!(store.dataset().departments.len(), 2);
    }

    #[test]
    fn save_failure_is_not_fatal() {
        let mut store = EntityStore::open(Persistence::new(FullStorage));
        assert_eq!(store.dataset().accounts.len(), 1);

        let account = store
            .register_account(Registration {
                first_name: "Jo".into(),
                last_name: "March".into(),
                email: "jo@example.com".into(),
                password: "secret1".into(),
            })
            .expect("mutation succeeds in memory");

        assert!(matches!(
            store.take_persist_error(),
            Some(StoreError::WriteRejected(_))
        ));
        assert!(store.take_persist_error().is_none());
        assert!(store.find_account(&account.id).is_some());
    }
}
