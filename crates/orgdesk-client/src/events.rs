//! Notification events handed to the presentation layer.
//!
//! The core never renders anything; it queues [`Notification`]s on the
//! [`AppState`](crate::state::AppState) and the host drains them.

use serde::Serialize;

use orgdesk_shared::{DeskError, ForbiddenError};

use crate::error::ClientError;

pub const MSG_LOGIN_REQUIRED: &str = "Please login first";
pub const MSG_ADMIN_ONLY: &str = "Admin access only";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Level::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(Level::Danger, message)
    }

    /// The notification a failed command surfaces to the user.
    pub fn from_error(error: &ClientError) -> Self {
        let level = match error {
            ClientError::Desk(DeskError::Validation(_)) => Level::Warning,
            ClientError::Desk(DeskError::Forbidden(
                ForbiddenError::SelfDelete | ForbiddenError::LastAdmin | ForbiddenError::NotAuthenticated,
            )) => Level::Warning,
            _ => Level::Danger,
        };
        Self::new(level, error.to_string())
    }
}
