use orgdesk_shared::ForbiddenError;
use orgdesk_store::{ItemDraft, Request};

use crate::error::ClientResult;
use crate::events::Notification;
use crate::state::AppState;

/// Submit a request on behalf of the logged-in employee.  Admins do not
/// file requests.
pub fn submit_request(
    state: &mut AppState,
    kind: &str,
    items: Vec<ItemDraft>,
) -> ClientResult<Request> {
    let result = state.require_identity().and_then(|me| {
        if me.is_admin() {
            return Err(ForbiddenError::EmployeesOnly.into());
        }
        Ok(state.store.create_request(&me.email, kind, items)?)
    });
    state.finish(result, |_| Notification::success("Request submitted"))
}
