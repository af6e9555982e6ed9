use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::{ControllerError, ControllerResult};

/// Per-request context carried into every service call: an operation id for
/// log correlation and an optional deadline bounding lock waits and storage
/// calls.
#[derive(Clone, Debug)]
pub struct OperationContext {
    pub operation_id: String,
    deadline: Option<Instant>,
}

impl OperationContext {
    pub fn new() -> Self {
        Self {
            operation_id: edgectl_core::uuid::new(),
            deadline: None,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            operation_id: edgectl_core::uuid::new(),
            deadline: Some(Instant::now() + timeout),
        }
    }

    pub fn unwrap_or_create(context: &Option<OperationContext>) -> Self {
        match context {
            Some(context) => context.clone(),
            None => OperationContext::new(),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Runs `future` to completion or until the deadline passes.
    pub async fn bounded<F, T>(&self, operation: &str, future: F) -> ControllerResult<T>
    where
        F: Future<Output = T>,
    {
        match self.deadline {
            Some(deadline) => match tokio::time::timeout_at(deadline, future).await {
                Ok(output) => Ok(output),
                Err(_) => {
                    tracing::warn!(
                        operation_id = %self.operation_id,
                        "{} exceeded its deadline",
                        operation
                    );
                    Err(ControllerError::Timeout(operation.to_string()))
                }
            },
            None => Ok(future.await),
        }
    }

    /// Fails if the deadline has passed. Called right before a write commits.
    pub fn ensure_live(&self, operation: &str) -> ControllerResult<()> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                tracing::warn!(
                    operation_id = %self.operation_id,
                    "{} abandoned before commit",
                    operation
                );
                Err(ControllerError::Timeout(operation.to_string()))
            }
            _ => Ok(()),
        }
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::new()
    }
}
