use thiserror::Error;

use orgdesk_shared::{DeskError, ForbiddenError};
use orgdesk_store::StoreError;

/// Error returned by every command handler.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Desk(#[from] DeskError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<ForbiddenError> for ClientError {
    fn from(e: ForbiddenError) -> Self {
        ClientError::Desk(e.into())
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
