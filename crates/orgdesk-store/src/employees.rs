//! CRUD operations for [`Employee`] records.

use orgdesk_shared::{
    normalize_email, ConflictError, DeskError, DeskResult, EmployeeRecordId,
    ValidationError,
};

use crate::models::{Employee, EmployeeInput};
use crate::store::EntityStore;

/// An employee joined with the names a table needs to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRow {
    pub employee: Employee,
    /// Owning account's "first last", if the account exists.
    pub full_name: Option<String>,
    pub department_name: Option<String>,
}

impl EntityStore {
    pub fn find_employee(&self, id: &EmployeeRecordId) -> Option<&Employee> {
        self.data.employees.iter().find(|e| &e.id == id)
    }

    pub fn list_employees(&self) -> Vec<Employee> {
        self.data.employees.clone()
    }

    /// Employees with owner and department names resolved.
    pub fn employee_rows(&self) -> Vec<EmployeeRow> {
        self.data
            .employees
            .iter()
            .map(|e| EmployeeRow {
                employee: e.clone(),
                full_name: self.find_account_by_email(&e.user_email).map(|a| a.full_name()),
                department_name: self.find_department(&e.department_id).map(|d| d.name.clone()),
            })
            .collect()
    }

    /// Validate an input against uniqueness and foreign keys.
    fn checked_employee(
        &self,
        input: EmployeeInput,
        except: Option<&EmployeeRecordId>,
    ) -> DeskResult<EmployeeInput> {
        let code = input.employee_id.trim().to_string();
        if code.is_empty() {
            return Err(ValidationError::Required("employeeId").into());
        }
        if self
            .data
            .employees
            .iter()
            .any(|e| e.employee_id == code && Some(&e.id) != except)
        {
            return Err(ConflictError::EmployeeCodeTaken.into());
        }

        let user_email = normalize_email(&input.user_email);
        let account = self
            .find_account_by_email(&user_email)
            .ok_or_else(|| DeskError::not_found("account", &user_email))?;
        if account.is_admin() {
            return Err(ValidationError::AdminAccount.into());
        }
        if self.find_department(&input.department_id).is_none() {
            return Err(DeskError::not_found("department", &input.department_id));
        }

        Ok(EmployeeInput {
            employee_id: code,
            user_email,
            position: input.position.trim().to_string(),
            department_id: input.department_id,
            hire_date: input.hire_date,
        })
    }

    pub fn create_employee(&mut self, input: EmployeeInput) -> DeskResult<Employee> {
        let input = self.checked_employee(input, None)?;

        let employee = Employee {
            id: EmployeeRecordId::generate(),
            employee_id: input.employee_id,
            user_email: input.user_email,
            position: input.position,
            department_id: input.department_id,
            hire_date: input.hire_date,
        };
        self.data.employees.push(employee.clone());
        self.commit();

        tracing::info!(record_id = %employee.id, code = %employee.employee_id, "employee added");
        Ok(employee)
    }

    pub fn update_employee(
        &mut self,
        id: &EmployeeRecordId,
        input: EmployeeInput,
    ) -> DeskResult<Employee> {
        if self.find_employee(id).is_none() {
            return Err(DeskError::not_found("employee", id));
        }
        let input = self.checked_employee(input, Some(id))?;

        let Some(employee) = self.data.employees.iter_mut().find(|e| &e.id == id) else {
            return Err(DeskError::not_found("employee", id));
        };
        employee.employee_id = input.employee_id;
        employee.user_email = input.user_email;
        employee.position = input.position;
        employee.department_id = input.department_id;
        employee.hire_date = input.hire_date;
        let updated = employee.clone();
        self.commit();

        tracing::info!(record_id = %id, "employee updated");
        Ok(updated)
    }

    pub fn delete_employee(&mut self, id: &EmployeeRecordId) -> DeskResult<Employee> {
        let idx = self
            .data
            .employees
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| DeskError::not_found("employee", id))?;
        let removed = self.data.employees.remove(idx);
        self.commit();

        tracing::info!(record_id = %id, "employee record deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use orgdesk_shared::DepartmentId;

    use super::*;
    use crate::models::Registration;
    use crate::store::test_support::seeded_store;

    fn input(code: &str, email: &str) -> EmployeeInput {
        EmployeeInput {
            employee_id: code.into(),
            user_email: email.into(),
            position: " Engineer ".into(),
            department_id: DepartmentId::from("dept1"),
            hire_date: NaiveDate::from_ymd_opt(2023, 9, 1),
        }
    }

    fn store_with_jo() -> EntityStore {
        let mut store = seeded_store();
        store
            .register_account(Registration {
                first_name: "Jo".into(),
                last_name: "March".into(),
                email: "jo@example.com".into(),
                password: "secret1".into(),
            })
            .unwrap();
        store
    }

    #[test]
    fn create_and_join_rows() {
        let mut store = store_with_jo();
        let emp = store.create_employee(input(" E-1 ", "JO@example.com")).unwrap();
        assert_eq!(emp.employee_id, "E-1");
        assert_eq!(emp.user_email, "jo@example.com");
        assert_eq!(emp.position, "Engineer");

        let rows = store.employee_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].full_name.as_deref(), Some("Jo March"));
        assert_eq!(rows[0].department_name.as_deref(), Some("Engineering"));
    }

    #[test]
    fn employee_code_is_unique() {
        let mut store = store_with_jo();
        let first = store.create_employee(input("E-1", "jo@example.com")).unwrap();
        assert_eq!(
            store
                .create_employee(input("E-1", "admin@example.com"))
                .unwrap_err(),
            DeskError::Conflict(ConflictError::EmployeeCodeTaken)
        );
        // an update keeping its own code is fine
        assert!(store
            .update_employee(&first.id, input("E-1", "jo@example.com"))
            .is_ok());
    }

    #[test]
    fn foreign_keys_are_checked() {
        let mut store = store_with_jo();
        assert!(matches!(
            store.create_employee(input("E-1", "ghost@example.com")),
            Err(DeskError::NotFound { entity: "account", .. })
        ));

        let mut bad_dept = input("E-1", "jo@example.com");
        bad_dept.department_id = DepartmentId::from("dept404");
        assert!(matches!(
            store.create_employee(bad_dept),
            Err(DeskError::NotFound { entity: "department", .. })
        ));
        assert!(store.list_employees().is_empty());
    }

    #[test]
    fn admin_accounts_cannot_hold_records() {
        let mut store = store_with_jo();
        assert_eq!(
            store
                .create_employee(input("E-1", "Admin@Example.com"))
                .unwrap_err(),
            DeskError::Validation(ValidationError::AdminAccount)
        );

        let emp = store.create_employee(input("E-1", "jo@example.com")).unwrap();
        assert!(store
            .update_employee(&emp.id, input("E-1", "admin@example.com"))
            .is_err());
        assert_eq!(store.find_employee(&emp.id).unwrap().user_email, "jo@example.com");
    }

    #[test]
    fn update_and_delete_missing_record() {
        let mut store = store_with_jo();
        let ghost = EmployeeRecordId::from("emp-ghost");
        assert!(matches!(
            store.update_employee(&ghost, input("E-9", "jo@example.com")),
            Err(DeskError::NotFound { entity: "employee", .. })
        ));
        assert!(store.delete_employee(&ghost).is_err());

        let emp = store.create_employee(input("E-1", "jo@example.com")).unwrap();
        store.delete_employee(&emp.id).unwrap();
        assert!(store.find_employee(&emp.id).is_none());
    }
}
