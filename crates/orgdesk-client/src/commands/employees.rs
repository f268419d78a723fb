use orgdesk_shared::EmployeeRecordId;
use orgdesk_store::{Employee, EmployeeInput};

use crate::error::ClientResult;
use crate::events::Notification;
use crate::state::AppState;

/// Create when `id` is `None`, otherwise update in place.
pub fn save_employee(
    state: &mut AppState,
    id: Option<&EmployeeRecordId>,
    input: EmployeeInput,
) -> ClientResult<Employee> {
    let result = state.require_admin().and_then(|_| {
        Ok(match id {
            Some(id) => state.store.update_employee(id, input)?,
            None => state.store.create_employee(input)?,
        })
    });
    let message = if id.is_some() {
        "Employee updated"
    } else {
        "Employee added"
    };
    state.finish(result, |_| Notification::success(message))
}

pub fn delete_employee(state: &mut AppState, id: &EmployeeRecordId) -> ClientResult<Employee> {
    let result = state
        .require_admin()
        .and_then(|_| Ok(state.store.delete_employee(id)?));
    state.finish(result, |_| Notification::info("Employee record deleted"))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use orgdesk_shared::DepartmentId;

    use super::*;
    use crate::commands::test_support::*;
    use crate::views::ViewData;

    fn input(code: &str) -> EmployeeInput {
        EmployeeInput {
            employee_id: code.into(),
            user_email: "jo@example.com".into(),
            position: "Engineer".into(),
            department_id: DepartmentId::from("dept1"),
            hire_date: NaiveDate::from_ymd_opt(2024, 3, 1),
        }
    }

    #[test]
    fn added_employee_joins_names() {
        let mut state = admin_state();
        add_verified_employee(&mut state, "jo@example.com");
        save_employee(&mut state, None, input("E-1")).unwrap();

        let view = state.navigate("/admin/employees");
        match view.data {
            ViewData::Employees(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].full_name, "Jo March");
                assert_eq!(rows[0].department, "Engineering");
                assert_eq!(rows[0].hire_date, "2024-03-01");
            }
            other => panic!("unexpected view data: {other:?}"),
        }
    }

    #[test]
    fn update_and_delete() {
        let mut state = admin_state();
        add_verified_employee(&mut state, "jo@example.com");
        let emp = save_employee(&mut state, None, input("E-1")).unwrap();

        let mut changed = input("E-1");
        changed.position = "Lead".into();
        save_employee(&mut state, Some(&emp.id), changed).unwrap();
        assert_eq!(state.store().find_employee(&emp.id).unwrap().position, "Lead");

        delete_employee(&mut state, &emp.id).unwrap();
        assert!(state.store().list_employees().is_empty());
        assert_eq!(
            state.drain_notifications().last(),
            Some(&Notification::info("Employee record deleted"))
        );
    }

    #[test]
    fn employee_session_cannot_add() {
        let mut state = employee_state("jo@example.com");
        assert!(save_employee(&mut state, None, input("E-1")).is_err());
        assert!(state.store().list_employees().is_empty());
    }
}
