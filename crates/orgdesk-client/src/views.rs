//! Row DTOs for each view, built fresh from the store on every navigation.

use serde::Serialize;

use orgdesk_shared::constants::EMPTY_CELL;
use orgdesk_store::{Account, Department, EmployeeRow, EntityStore, Request};

use crate::router::ViewId;
use crate::session::Identity;

/// The view the router activated together with the data it shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveView {
    pub view: ViewId,
    pub data: ViewData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "camelCase")]
pub enum ViewData {
    Home,
    Register,
    Login,
    Verification { email: String },
    Profile(ProfileDto),
    Requests(Vec<RequestDto>),
    Accounts(Vec<AccountDto>),
    Departments(Vec<DepartmentDto>),
    Employees(Vec<EmployeeDto>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    pub full_name: String,
    pub email: String,
    /// Upper-cased for display, e.g. `ADMIN`.
    pub role: String,
}

impl From<&Identity> for ProfileDto {
    fn from(i: &Identity) -> Self {
        Self {
            full_name: i.full_name(),
            email: i.email.clone(),
            role: i.role.as_str().to_uppercase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub verified: bool,
}

impl From<Account> for AccountDto {
    fn from(a: Account) -> Self {
        Self {
            full_name: a.full_name(),
            id: a.id.0,
            email: a.email,
            role: a.role.as_str().to_string(),
            verified: a.verified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDto {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl From<Department> for DepartmentDto {
    fn from(d: Department) -> Self {
        Self {
            id: d.id.0,
            name: d.name,
            description: d.description.unwrap_or_else(|| EMPTY_CELL.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub id: String,
    pub employee_id: String,
    pub full_name: String,
    pub user_email: String,
    pub position: String,
    pub department: String,
    pub hire_date: String,
}

impl From<EmployeeRow> for EmployeeDto {
    fn from(row: EmployeeRow) -> Self {
        let e = row.employee;
        Self {
            id: e.id.0,
            employee_id: e.employee_id,
            full_name: row.full_name.unwrap_or_default(),
            user_email: e.user_email,
            position: e.position,
            department: row.department_name.unwrap_or_else(|| EMPTY_CELL.to_string()),
            hire_date: e
                .hire_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| EMPTY_CELL.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDto {
    pub id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// `"Laptop (2), Mouse (1)"`
    pub items: String,
    pub status: String,
}

impl From<Request> for RequestDto {
    fn from(r: Request) -> Self {
        let items = r
            .items
            .iter()
            .map(|i| format!("{} ({})", i.name, i.qty))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            id: r.id.0,
            date: r.date.format("%Y-%m-%d").to_string(),
            kind: r.kind,
            items,
            status: r.status.as_str().to_string(),
        }
    }
}

pub fn account_rows(store: &EntityStore) -> Vec<AccountDto> {
    store.list_accounts().into_iter().map(AccountDto::from).collect()
}

pub fn department_rows(store: &EntityStore) -> Vec<DepartmentDto> {
    store
        .list_departments()
        .into_iter()
        .map(DepartmentDto::from)
        .collect()
}

pub fn employee_rows(store: &EntityStore) -> Vec<EmployeeDto> {
    store
        .employee_rows()
        .into_iter()
        .map(EmployeeDto::from)
        .collect()
}

pub fn request_rows(store: &EntityStore, owner_email: &str) -> Vec<RequestDto> {
    store
        .requests_for(owner_email)
        .into_iter()
        .map(RequestDto::from)
        .collect()
}
