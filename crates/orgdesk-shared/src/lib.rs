//! # orgdesk-shared
//!
//! Types shared by the OrgDesk store and client crates: typed identifiers,
//! roles and request statuses, email normalization, storage keys and the
//! domain error taxonomy.

pub mod constants;
pub mod error;
pub mod types;

pub use error::{ConflictError, DeskError, DeskResult, ForbiddenError, ValidationError};
pub use types::{
    normalize_email, same_email, AccountId, DepartmentId, EmployeeRecordId, RequestId,
    RequestStatus, Role,
};
