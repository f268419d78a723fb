//! CRUD operations for [`Department`] records.

use orgdesk_shared::{ConflictError, DepartmentId, DeskError, DeskResult, ValidationError};

use crate::models::{Department, DepartmentInput};
use crate::store::EntityStore;

impl EntityStore {
    pub fn find_department(&self, id: &DepartmentId) -> Option<&Department> {
        self.data.departments.iter().find(|d| &d.id == id)
    }

    pub fn list_departments(&self) -> Vec<Department> {
        self.data.departments.clone()
    }

    fn department_name_taken(&self, name: &str, except: Option<&DepartmentId>) -> bool {
        let name = name.to_lowercase();
        self.data
            .departments
            .iter()
            .any(|d| d.name.to_lowercase() == name && Some(&d.id) != except)
    }

    pub fn create_department(&mut self, input: DepartmentInput) -> DeskResult<Department> {
        let (name, description) = clean_input(input)?;
        if self.department_name_taken(&name, None) {
            return Err(ConflictError::DepartmentNameTaken.into());
        }

        let department = Department {
            id: DepartmentId::generate(),
            name,
            description,
        };
        self.data.departments.push(department.clone());
        self.commit();

        tracing::info!(department_id = %department.id, name = %department.name, "department created");
        Ok(department)
    }

    pub fn update_department(
        &mut self,
        id: &DepartmentId,
        input: DepartmentInput,
    ) -> DeskResult<Department> {
        let (name, description) = clean_input(input)?;
        if self.department_name_taken(&name, Some(id)) {
            return Err(ConflictError::DepartmentNameTaken.into());
        }

        let department = self
            .data
            .departments
            .iter_mut()
            .find(|d| &d.id == id)
            .ok_or_else(|| DeskError::not_found("department", id))?;
        department.name = name;
        department.description = description;
        let updated = department.clone();
        self.commit();

        tracing::info!(department_id = %id, "department updated");
        Ok(updated)
    }

    /// Delete a department no employee points at.  Deleting one that is
    /// still referenced would leave dangling `department_id`s, so it is
    /// refused with [`ConflictError::DepartmentInUse`].
    pub fn delete_department(&mut self, id: &DepartmentId) -> DeskResult<Department> {
        let idx = self
            .data
            .departments
            .iter()
            .position(|d| &d.id == id)
            .ok_or_else(|| DeskError::not_found("department", id))?;

        if self.data.employees.iter().any(|e| &e.department_id == id) {
            return Err(ConflictError::DepartmentInUse.into());
        }

        let removed = self.data.departments.remove(idx);
        self.commit();

        tracing::info!(department_id = %id, "department deleted");
        Ok(removed)
    }
}

fn clean_input(input: DepartmentInput) -> DeskResult<(String, Option<String>)> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(ValidationError::Required("name").into());
    }
    let description = input
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());
    Ok((name, description))
}
