use orgdesk_shared::DepartmentId;
use orgdesk_store::{Department, DepartmentInput};

use crate::error::ClientResult;
use crate::events::Notification;
use crate::state::AppState;

/// Create when `id` is `None`, otherwise update in place.
pub fn save_department(
    state: &mut AppState,
    id: Option<&DepartmentId>,
    input: DepartmentInput,
) -> ClientResult<Department> {
    let result = state.require_admin().and_then(|_| {
        Ok(match id {
            Some(id) => state.store.update_department(id, input)?,
            None => state.store.create_department(input)?,
        })
    });
    let message = if id.is_some() {
        "Department updated"
    } else {
        "Department created"
    };
    state.finish(result, |_| Notification::success(message))
}

pub fn delete_department(state: &mut AppState, id: &DepartmentId) -> ClientResult<Department> {
    let result = state
        .require_admin()
        .and_then(|_| Ok(state.store.delete_department(id)?));
    state.finish(result, |_| Notification::info("Department deleted"))
}
