use std::fmt;

use thiserror::Error;

pub type ControllerResult<T> = Result<T, ControllerError>;

/// A single failed input rule, rendered as `"<field> <reason>"`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub reason: &'static str,
}

impl ValidationError {
    pub const CANNOT_BE_EMPTY: &'static str = "cannot be empty";
    pub const CANNOT_BE_SPECIFIED: &'static str = "cannot be specified in POST request";
    pub const COULD_NOT_BE_PARSED: &'static str = "could not be parsed";
    pub const NOT_A_VALID_UUID: &'static str = "not a valid uuid";
    pub const NOT_AN_EXISTING_RECORD: &'static str = "does not reference an existing record";

    pub fn new(field: impl Into<String>, reason: &'static str) -> Self {
        Self {
            field: field.into(),
            reason,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("cannot delete {kind}_id {id}: record in use in {table}")]
    Conflict {
        kind: &'static str,
        id: String,
        table: String,
    },

    #[error("{0}")]
    PreconditionFailed(String),

    #[error("{0}")]
    ConsistencyFault(String),

    #[error("{0} timed out")]
    Timeout(String),

    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

impl ControllerError {
    pub fn not_found(kind: &'static str, id: &str) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Timeouts are the only failures worth retrying unchanged.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

impl From<ControllerError> for tonic::Status {
    fn from(err: ControllerError) -> Self {
        let code = match &err {
            ControllerError::Validation(_) => tonic::Code::InvalidArgument,
            ControllerError::NotFound { .. } => tonic::Code::NotFound,
            ControllerError::Conflict { .. } => tonic::Code::FailedPrecondition,
            ControllerError::PreconditionFailed(_) => tonic::Code::FailedPrecondition,
            ControllerError::ConsistencyFault(_) => tonic::Code::DataLoss,
            ControllerError::Timeout(_) => tonic::Code::DeadlineExceeded,
            ControllerError::Storage(_) => tonic::Code::Internal,
        };

        tonic::Status::new(code, err.to_string())
    }
}
