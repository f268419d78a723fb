use tracing::info;

use orgdesk_shared::DeskError;
use orgdesk_store::{Account, Registration};

use crate::error::ClientResult;
use crate::events::Notification;
use crate::router::ViewId;
use crate::session::Identity;
use crate::state::AppState;

/// Self-registration.  The new account is unverified; its email is kept as
/// the pending verification and the host is sent to the verify screen.
pub fn register(state: &mut AppState, input: Registration) -> ClientResult<Account> {
    let result = state.store.register_account(input).map_err(Into::into);
    let account = state.finish(result, |_| {
        Notification::success("Registration successful! Verify your email.")
    })?;

    if let Err(e) = state
        .store
        .persistence_mut()
        .set_pending_verification(&account.email)
    {
        tracing::warn!(error = %e, "failed to store pending verification");
    }
    state.navigate(ViewId::VerifyEmail.path());
    Ok(account)
}

/// Simulated verification of the pending registration.
pub fn verify_pending(state: &mut AppState) -> ClientResult<Account> {
    let result = match state.store.persistence().pending_verification() {
        Some(email) => state.store.verify_account(&email).map_err(Into::into),
        None => Err(DeskError::not_found("pending verification", "(no email found)").into()),
    };
    let account = state.finish(result, |_| Notification::success("Email verified!"))?;

    if let Err(e) = state.store.persistence_mut().clear_pending_verification() {
        tracing::warn!(error = %e, "failed to clear pending verification");
    }
    state.navigate(ViewId::Login.path());
    Ok(account)
}

pub fn login(state: &mut AppState, email: &str, password: &str) -> ClientResult<Identity> {
    let result = state
        .session
        .login(&mut state.store, email, password)
        .map_err(Into::into);
    let identity = state.finish(result, |i| {
        Notification::success(format!("Welcome, {}!", i.first_name))
    })?;

    state.navigate(ViewId::Profile.path());
    Ok(identity)
}

pub fn logout(state: &mut AppState) {
    state.session.logout(&mut state.store);
    state.notify(Notification::info("Logged out"));
    info!("session ended by user");
    state.navigate(ViewId::Home.path());
}
