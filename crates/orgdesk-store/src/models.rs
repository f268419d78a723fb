//! Domain model structs held in the dataset snapshot.
//!
//! Every record derives `Serialize` and `Deserialize` with camelCase field
//! names, which is exactly the shape written under the snapshot key.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use orgdesk_shared::{AccountId, DepartmentId, EmployeeRecordId, RequestId, RequestStatus, Role};

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// A login-capable user.  `email` is unique case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Opaque credential, compared for equality only.
    pub password: String,
    pub verified: bool,
    pub role: Role,
}

impl Account {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

// ---------------------------------------------------------------------------
// Department
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: DepartmentId,
    /// Unique case-insensitively.
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Employee
// ---------------------------------------------------------------------------

/// Links an account (by email) to a department and a position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeRecordId,
    /// Business code, unique across employees.
    pub employee_id: String,
    /// References `Account::email` (case-insensitive).
    pub user_email: String,
    pub position: String,
    pub department_id: DepartmentId,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestItem {
    pub name: String,
    pub qty: u32,
}

/// A leave/equipment/resource request owned by one account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: RequestId,
    #[serde(rename = "type")]
    pub kind: String,
    /// Never empty; every item has a non-empty name and `qty > 0`.
    pub items: Vec<RequestItem>,
    pub status: RequestStatus,
    pub date: DateTime<Utc>,
    /// References `Account::email` (case-insensitive).
    pub employee_email: String,
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// The whole persisted state: four ordered collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dataset {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub requests: Vec<Request>,
}

// ---------------------------------------------------------------------------
// Mutation inputs
// ---------------------------------------------------------------------------

/// Self-service sign-up.  Always yields an unverified employee.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Account created from the admin screen, role and verification explicit.
#[derive(Debug, Clone, Default)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub verified: bool,
}

/// Admin edit of an existing account.  `password: None` (or blank) keeps
/// the current one.
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub verified: bool,
    pub password: Option<String>,
}

/// Self edit from the profile screen.  Email and role are not editable.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DepartmentInput {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EmployeeInput {
    pub employee_id: String,
    pub user_email: String,
    pub position: String,
    pub department_id: DepartmentId,
    pub hire_date: Option<NaiveDate>,
}

/// One raw line of a request form.  Lines with a blank name or a
/// non-positive quantity are dropped.
#[derive(Debug, Clone)]
pub struct ItemDraft {
    pub name: String,
    pub qty: i64,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>, qty: i64) -> Self {
        Self {
            name: name.into(),
            qty,
        }
    }

    /// The cleaned item, or `None` when the line should be ignored.
    pub fn into_item(self) -> Option<RequestItem> {
        let name = self.name.trim().to_string();
        if name.is_empty() || self.qty <= 0 {
            return None;
        }
        let qty = u32::try_from(self.qty).ok()?;
        Some(RequestItem { name, qty })
    }
}
