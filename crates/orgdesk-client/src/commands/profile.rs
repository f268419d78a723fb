use tracing::info;

use orgdesk_store::ProfileUpdate;

use crate::error::ClientResult;
use crate::events::Notification;
use crate::session::Identity;
use crate::state::AppState;

/// Edit the logged-in account's own name and, optionally, password.
pub fn update_profile(state: &mut AppState, input: ProfileUpdate) -> ClientResult<Identity> {
    let result = state.require_identity().and_then(|me| {
        let account = state.store.update_profile(&me.id, input)?;
        info!(account_id = %account.id, "profile edited");
        Ok(Identity::from(&account))
    });
    state.finish(result, |_| Notification::success("Profile updated"))
}
