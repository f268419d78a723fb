//! # orgdesk-store
//!
//! Local record store for the OrgDesk application.
//!
//! The crate holds the four entity collections (accounts, departments,
//! employees, requests) in one owned [`Dataset`] behind an [`EntityStore`],
//! which enforces every cross-entity integrity rule.  After each successful
//! mutation the whole dataset is serialized as one JSON snapshot into a
//! [`Storage`] backend, normally the SQLite-backed [`Database`].

pub mod accounts;
pub mod database;
pub mod departments;
pub mod employees;
pub mod migrations;
pub mod models;
pub mod persistence;
pub mod requests;
pub mod storage;
pub mod store;

mod error;

pub use accounts::DeletedAccount;
pub use database::Database;
pub use employees::EmployeeRow;
pub use error::{Result, StoreError};
pub use models::*;
pub use persistence::{seed_dataset, Persistence};
pub use storage::{MemoryStorage, Storage};
pub use store::EntityStore;
