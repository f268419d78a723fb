//! Admin account management.

use orgdesk_shared::AccountId;
use orgdesk_store::{Account, AccountUpdate, DeletedAccount, NewAccount};

use crate::error::ClientResult;
use crate::events::{Level, Notification};
use crate::state::AppState;

pub fn create_account(state: &mut AppState, input: NewAccount) -> ClientResult<Account> {
    let result = state
        .require_admin()
        .and_then(|_| Ok(state.store.create_account(input)?));
    state.finish(result, |_| Notification::success("Account created"))
}

/// Admin edit.  If the edited account is the session's own, the session
/// follows the new email and role immediately.
pub fn update_account(
    state: &mut AppState,
    id: &AccountId,
    input: AccountUpdate,
) -> ClientResult<Account> {
    let result = state
        .require_admin()
        .and_then(|_| Ok(state.store.update_account(id, input)?));
    if result.is_ok() {
        state.session.sync(&mut state.store);
    }
    state.finish(result, |_| Notification::success("Account updated"))
}

pub fn reset_password(state: &mut AppState, id: &AccountId, new_password: &str) -> ClientResult<()> {
    let result = state
        .require_admin()
        .and_then(|_| Ok(state.store.reset_password(id, new_password)?));
    state.finish(result, |_| Notification::success("Password updated"))
}

/// Delete an account with its employee records and requests.
pub fn delete_account(state: &mut AppState, id: &AccountId) -> ClientResult<DeletedAccount> {
    let result = state.require_admin().and_then(|me| {
        Ok(state.store.delete_account(id, Some(&me.id))?)
    });
    state.finish(result, |_| Notification::new(Level::Info, "Account deleted"))
}

#[cfg(test)]
mod tests {
    use orgdesk_shared::constants::SEED_ADMIN_ID;
    use orgdesk_shared::Role;

    use super::*;
    use crate::commands::test_support::*;
    use crate::views::ViewData;

    fn new_admin() -> NewAccount {
        NewAccount {
            first_name: "Ada".into(),
            last_name: "Byron".into(),
            email: "ada@example.com".into(),
            password: "engine1".into(),
            role: Role::Admin,
            verified: true,
        }
    }

    #[test]
    fn employees_cannot_manage_accounts() {
        let mut state = employee_state("jo@example.com");
        let err = create_account(&mut state, new_admin()).unwrap_err();
        assert_eq!(err.to_string(), "Admin access only");
        assert_eq!(state.store().list_accounts().len(), 2);
    }

    #[test]
    fn created_account_shows_in_table() {
        let mut state = admin_state();
        create_account(&mut state, new_admin()).unwrap();

        let view = state.navigate("#/accounts");
        match view.data {
            ViewData::Accounts(rows) => {
                assert!(rows.iter().any(|r| r.email == "ada@example.com" && r.role == "admin"));
            }
            other => panic!("unexpected view data: {other:?}"),
        }
        assert_eq!(
            state.drain_notifications(),
            vec![Notification::success("Account created")]
        );
    }

    #[test]
    fn self_delete_is_a_warning() {
        let mut state = admin_state();
        let err = delete_account(&mut state, &AccountId::from(SEED_ADMIN_ID)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "You cannot delete your own account while logged in."
        );
        let notes = state.drain_notifications();
        assert_eq!(notes[0].level, Level::Warning);
        assert!(state.identity().is_some());
    }

    #[test]
    fn own_email_change_keeps_session() {
        let mut state = admin_state();
        let id = AccountId::from(SEED_ADMIN_ID);
        update_account(
            &mut state,
            &id,
            AccountUpdate {
                first_name: "Root".into(),
                last_name: "Admin".into(),
                email: "root@example.com".into(),
                role: Role::Admin,
                verified: true,
                password: None,
            },
        )
        .unwrap();

        assert_eq!(state.identity().unwrap().email, "root@example.com");
        assert_eq!(
            state.store().persistence().auth_token().as_deref(),
            Some("root@example.com")
        );
    }

    #[test]
    fn delete_other_account_cascades() {
        let mut state = admin_state();
        add_verified_employee(&mut state, "jo@example.com");
        let jo = state
            .store()
            .find_account_by_email("jo@example.com")
            .unwrap()
            .id
            .clone();

        let deleted = delete_account(&mut state, &jo).unwrap();
        assert_eq!(deleted.account.email, "jo@example.com");
        assert!(state.store().find_account(&jo).is_none());
    }

    #[test]
    fn reset_password_validates_length() {
        let mut state = admin_state();
        let err = reset_password(&mut state, &AccountId::from(SEED_ADMIN_ID), "abc").unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters");
    }
}
