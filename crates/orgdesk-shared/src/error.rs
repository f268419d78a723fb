use thiserror::Error;

/// Domain errors raised by store, session and command operations.
///
/// None of these leave the dataset partially modified: an operation that
/// would violate an invariant is rejected before anything is written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeskError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Conflict(#[from] ConflictError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    Forbidden(#[from] ForbiddenError),

    #[error("Invalid credentials or unverified account")]
    Unauthorized,
}

impl DeskError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize },

    #[error("Add at least one item")]
    EmptyItems,

    #[error("Field '{0}' is required")]
    Required(&'static str),

    #[error("Employee records can only be linked to non-admin accounts")]
    AdminAccount,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConflictError {
    #[error("Email already registered")]
    EmailTaken,

    #[error("Department name already exists")]
    DepartmentNameTaken,

    #[error("Employee ID already in use")]
    EmployeeCodeTaken,

    #[error("Department still has employees assigned")]
    DepartmentInUse,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForbiddenError {
    #[error("You cannot delete your own account while logged in.")]
    SelfDelete,

    #[error("You cannot remove the last remaining admin account.")]
    LastAdmin,

    #[error("Please login first")]
    NotAuthenticated,

    #[error("Admin access only")]
    AdminOnly,

    #[error("Only employees can submit requests")]
    EmployeesOnly,
}

pub type DeskResult<T> = std::result::Result<T, DeskError>;
