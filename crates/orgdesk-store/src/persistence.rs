//! Snapshot persistence on top of a [`Storage`] backend.
//!
//! The whole [`Dataset`] is serialized to one JSON document and written under
//! [`SNAPSHOT_KEY`].  Two auxiliary keys hold the session credential token
//! and the email awaiting verification.

use orgdesk_shared::constants::{
    AUTH_TOKEN_KEY, SEED_ADMIN_EMAIL, SEED_ADMIN_ID, SEED_ADMIN_PASSWORD, SEED_DEPARTMENTS,
    SNAPSHOT_KEY, UNVERIFIED_EMAIL_KEY,
};
use orgdesk_shared::{AccountId, DepartmentId, Role};

use crate::error::Result;
use crate::models::{Account, Dataset, Department};
use crate::storage::Storage;

/// Owns the storage backend and knows every well-known key.
pub struct Persistence {
    storage: Box<dyn Storage>,
}

impl Persistence {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
        }
    }

    /// Read the snapshot.  A missing key, an unreadable backend or a
    /// document that does not parse all install [`seed_dataset`], which is
    /// written back immediately (best effort).
    pub fn load(&mut self) -> Dataset {
        let raw = match self.storage.get(SNAPSHOT_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(error = %e, "failed to read snapshot, seeding defaults");
                None
            }
        };

        let parsed = raw.map(|json| serde_json::from_str::<Dataset>(&json));
        match parsed {
            Some(Ok(data)) => {
                tracing::info!(
                    accounts = data.accounts.len(),
                    departments = data.departments.len(),
                    employees = data.employees.len(),
                    requests = data.requests.len(),
                    "snapshot loaded"
                );
                data
            }
            Some(Err(e)) => {
                tracing::error!(error = %e, "snapshot parse error, seeding defaults");
                self.install_seed()
            }
            None => {
                tracing::info!("no snapshot found, seeding defaults");
                self.install_seed()
            }
        }
    }

    fn install_seed(&mut self) -> Dataset {
        let data = seed_dataset();
        if let Err(e) = self.save(&data) {
            tracing::error!(error = %e, "failed to persist seed dataset");
        }
        data
    }

    /// Serialize `data` and overwrite the snapshot key.
    pub fn save(&mut self, data: &Dataset) -> Result<()> {
        let json = serde_json::to_string(data)?;
        self.storage.set(SNAPSHOT_KEY, &json)
    }

    // ------------------------------------------------------------------
    // Credential token
    // ------------------------------------------------------------------

    pub fn auth_token(&self) -> Option<String> {
        self.read_key(AUTH_TOKEN_KEY)
    }

    pub fn set_auth_token(&mut self, email: &str) -> Result<()> {
        self.storage.set(AUTH_TOKEN_KEY, email)
    }

    pub fn clear_auth_token(&mut self) -> Result<()> {
        self.storage.remove(AUTH_TOKEN_KEY)
    }

    // ------------------------------------------------------------------
    // Pending verification
    // ------------------------------------------------------------------

    pub fn pending_verification(&self) -> Option<String> {
        self.read_key(UNVERIFIED_EMAIL_KEY)
    }

    pub fn set_pending_verification(&mut self, email: &str) -> Result<()> {
        self.storage.set(UNVERIFIED_EMAIL_KEY, email)
    }

    pub fn clear_pending_verification(&mut self) -> Result<()> {
        self.storage.remove(UNVERIFIED_EMAIL_KEY)
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                tracing::warn!(key, error = %e, "storage read failed");
                None
            }
        }
    }
}

/// The deterministic first-run dataset: one verified admin, two departments.
pub fn seed_dataset() -> Dataset {
    Dataset {
        accounts: vec![Account {
            id: AccountId::from(SEED_ADMIN_ID),
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
            email: SEED_ADMIN_EMAIL.to_string(),
            password: SEED_ADMIN_PASSWORD.to_string(),
            verified: true,
            role: Role::Admin,
        }],
        departments: SEED_DEPARTMENTS
            .iter()
            .map(|(id, name, description)| Department {
                id: DepartmentId::from(*id),
                name: name.to_string(),
                description: Some(description.to_string()),
            })
            .collect(),
        employees: Vec::new(),
        requests: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use orgdesk_shared::{EmployeeRecordId, RequestId, RequestStatus};

    use super::*;
    use crate::models::{Employee, Request, RequestItem};
    use crate::storage::MemoryStorage;
    use crate::Database;

    fn sample_dataset() -> Dataset {
        let mut data = seed_dataset();
        data.accounts.push(Account {
            id: AccountId::from("u42"),
            first_name: "Bob".into(),
            last_name: "Stone".into(),
            email: "bob@example.com".into(),
            password: "hunter22".into(),
            verified: false,
            role: Role::Employee,
        });
        data.employees.push(Employee {
            id: EmployeeRecordId::from("emp1"),
            employee_id: "E-001".into(),
            user_email: "bob@example.com".into(),
            position: "Engineer".into(),
            department_id: DepartmentId::from("dept1"),
            hire_date: NaiveDate::from_ymd_opt(2024, 3, 1),
        });
        data.requests.push(Request {
            id: RequestId::from("req1"),
            kind: "Equipment".into(),
            items: vec![RequestItem {
                name: "Laptop".into(),
                qty: 1,
            }],
            status: RequestStatus::Rejected,
            date: Utc.with_ymd_and_hms(2024, 4, 2, 9, 30, 0).unwrap(),
            employee_email: "bob@example.com".into(),
        });
        data
    }

    #[test]
    fn empty_storage_installs_and_persists_seed() {
        let mut persistence = Persistence::new(MemoryStorage::new());
        let data = persistence.load();

        assert_eq!(data, seed_dataset());
        assert_eq!(data.accounts.len(), 1);
        assert!(data.accounts[0].is_admin());
        assert_eq!(data.departments.len(), 2);
        assert!(persistence.storage.get(SNAPSHOT_KEY).unwrap().is_some());
    }

    #[test]
    fn corrupt_snapshot_is_replaced_by_seed() {
        let mut storage = MemoryStorage::new();
        storage.set(SNAPSHOT_KEY, "{not json").unwrap();
        let mut persistence = Persistence::new(storage);

        assert_eq!(persistence.load(), seed_dataset());
        let raw = persistence.storage.get(SNAPSHOT_KEY).unwrap().unwrap();
        assert!(serde_json::from_str::<Dataset>(&raw).is_ok());
    }

    #[test]
    fn save_then_load_round_trips_every_collection() {
        let dir = tempfile::tempdir().unwrap();
        let data = sample_dataset();

        {
            let mut persistence = Persistence::new(Database::open_in_dir(dir.path()).unwrap());
            persistence.save(&data).unwrap();
        }

        let mut persistence = Persistence::new(Database::open_in_dir(dir.path()).unwrap());
        assert_eq!(persistence.load(), data);
    }

    #[test]
    fn snapshot_uses_wire_field_names() {
        let mut persistence = Persistence::new(MemoryStorage::new());
        persistence.save(&sample_dataset()).unwrap();

        let raw = persistence.storage.get(SNAPSHOT_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["employees"][0]["employeeId"], "E-001");
        assert_eq!(json["employees"][0]["hireDate"], "2024-03-01");
        assert_eq!(json["requests"][0]["type"], "Equipment");
        assert_eq!(json["requests"][0]["employeeEmail"], "bob@example.com");
    }

    #[test]
    fn auxiliary_keys() {
        let mut persistence = Persistence::new(MemoryStorage::new());
        assert_eq!(persistence.auth_token(), None);

        persistence.set_auth_token("a@b.c").unwrap();
        persistence.set_pending_verification("new@b.c").unwrap();
        assert_eq!(persistence.auth_token().as_deref(), Some("a@b.c"));
        assert_eq!(persistence.pending_verification().as_deref(), Some("new@b.c"));

        persistence.clear_auth_token().unwrap();
        persistence.clear_pending_verification().unwrap();
        assert_eq!(persistence.auth_token(), None);
        assert_eq!(persistence.pending_verification(), None);
    }
}
