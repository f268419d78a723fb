//! Location-driven view routing with authentication and role guards.
//!
//! The host owns a location string (a hash fragment in a browser, a typed
//! path in the shell).  [`resolve`] maps it to a [`ViewId`] as a pure
//! function of the location and the current identity; redirects re-enter
//! the same resolution with the redirect target.  [`AppState::navigate`]
//! adds the side effects: notices, the new location and a data refresh.

use serde::Serialize;

use crate::events::{Notification, MSG_ADMIN_ONLY, MSG_LOGIN_REQUIRED};
use crate::session::Identity;
use crate::state::AppState;
use crate::views::{self, ActiveView, ProfileDto, ViewData};

/// Upper bound on chained redirects.  The guard graph settles in two hops
/// (admin view -> profile -> login); anything longer falls back to home.
const MAX_REDIRECTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewId {
    Home,
    Register,
    VerifyEmail,
    Login,
    Profile,
    Requests,
    Accounts,
    Departments,
    Employees,
}

/// Who may see a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Any authenticated identity.
    Protected,
    /// An authenticated identity with `Role::Admin`.
    AdminOnly,
}

impl ViewId {
    pub const ALL: [ViewId; 9] = [
        ViewId::Home,
        ViewId::Register,
        ViewId::VerifyEmail,
        ViewId::Login,
        ViewId::Profile,
        ViewId::Requests,
        ViewId::Accounts,
        ViewId::Departments,
        ViewId::Employees,
    ];

    /// Canonical location token for this view.
    pub fn path(&self) -> &'static str {
        match self {
            ViewId::Home => "/",
            ViewId::Register => "/register",
            ViewId::VerifyEmail => "/verify-email",
            ViewId::Login => "/login",
            ViewId::Profile => "/profile",
            ViewId::Requests => "/requests",
            ViewId::Accounts => "/accounts",
            ViewId::Departments => "/departments",
            ViewId::Employees => "/employees",
        }
    }

    pub fn access(&self) -> Access {
        match self {
            ViewId::Home | ViewId::Register | ViewId::VerifyEmail | ViewId::Login => {
                Access::Public
            }
            ViewId::Profile | ViewId::Requests => Access::Protected,
            ViewId::Accounts | ViewId::Departments | ViewId::Employees => Access::AdminOnly,
        }
    }

    /// Look up a normalized token.  Unknown tokens map to [`ViewId::Home`].
    pub fn from_path(normalized: &str) -> ViewId {
        let path = normalized.strip_prefix("/admin").unwrap_or(normalized);
        match path {
            "/register" => ViewId::Register,
            "/verify-email" => ViewId::VerifyEmail,
            "/login" => ViewId::Login,
            "/profile" => ViewId::Profile,
            "/requests" => ViewId::Requests,
            "/accounts" => ViewId::Accounts,
            "/departments" => ViewId::Departments,
            "/employees" => ViewId::Employees,
            _ => ViewId::Home,
        }
    }
}

/// Strip a leading `#`, trim, lower-case, ensure a leading `/` and drop a
/// trailing one.  An empty token becomes `/`.
pub fn normalize_location(token: &str) -> String {
    let token = token.trim();
    let token = token.strip_prefix('#').unwrap_or(token).trim().to_lowercase();
    let token = token.trim_end_matches('/');
    if token.is_empty() {
        return "/".to_string();
    }
    if token.starts_with('/') {
        token.to_string()
    } else {
        format!("/{token}")
    }
}

/// Outcome of checking one view against the current identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Activate(ViewId),
    Redirect { to: ViewId, notice: Notification },
}

pub fn guard(view: ViewId, identity: Option<&Identity>) -> Decision {
    match (view.access(), identity) {
        (Access::Protected | Access::AdminOnly, None) => Decision::Redirect {
            to: ViewId::Login,
            notice: Notification::warning(MSG_LOGIN_REQUIRED),
        },
        (Access::AdminOnly, Some(i)) if !i.is_admin() => Decision::Redirect {
            to: ViewId::Profile,
            notice: Notification::danger(MSG_ADMIN_ONLY),
        },
        _ => Decision::Activate(view),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub view: ViewId,
    /// Notices emitted by redirects, in order.
    pub notices: Vec<Notification>,
}

/// Resolve a location token to the view that may be activated.
pub fn resolve(token: &str, identity: Option<&Identity>) -> Resolution {
    let mut view = ViewId::from_path(&normalize_location(token));
    let mut notices = Vec::new();

    for _ in 0..MAX_REDIRECTS {
        match guard(view, identity) {
            Decision::Activate(v) => return Resolution { view: v, notices },
            Decision::Redirect { to, notice } => {
                tracing::warn!(from = view.path(), to = to.path(), "route denied");
                notices.push(notice);
                view = ViewId::from_path(to.path());
            }
        }
    }

    Resolution {
        view: ViewId::Home,
        notices,
    }
}

impl AppState {
    /// Handle a location change: resolve, emit notices, record the final
    /// location and refresh the data of the activated view.
    pub fn navigate(&mut self, token: &str) -> ActiveView {
        self.session.sync(&mut self.store);
        let identity = self.session.current(&self.store);

        let resolution = resolve(token, identity.as_ref());
        for notice in resolution.notices {
            self.notify(notice);
        }
        let view = resolution.view;
        self.location = view.path().to_string();

        let data = match view {
            ViewId::Home => ViewData::Home,
            ViewId::Register => ViewData::Register,
            ViewId::Login => ViewData::Login,
            ViewId::VerifyEmail => match self.store.persistence().pending_verification() {
                Some(email) => ViewData::Verification { email },
                None => return self.navigate(ViewId::Register.path()),
            },
            // guarded views: identity is present once resolution activated them
            ViewId::Profile => match identity.as_ref() {
                Some(i) => ViewData::Profile(ProfileDto::from(i)),
                None => return self.navigate(ViewId::Login.path()),
            },
            ViewId::Requests => match identity.as_ref() {
                Some(i) => ViewData::Requests(views::request_rows(&self.store, &i.email)),
                None => return self.navigate(ViewId::Login.path()),
            },
            ViewId::Accounts => ViewData::Accounts(views::account_rows(&self.store)),
            ViewId::Departments => ViewData::Departments(views::department_rows(&self.store)),
            ViewId::Employees => ViewData::Employees(views::employee_rows(&self.store)),
        };

        tracing::debug!(view = view.path(), "view activated");
        ActiveView { view, data }
    }

    /// Re-resolve the current location, e.g. after a mutation.
    pub fn refresh(&mut self) -> ActiveView {
        let location = self.location.clone();
        self.navigate(&location)
    }
}
