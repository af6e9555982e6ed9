use async_trait::async_trait;
use std::{fmt, sync::Arc};
use tokio::sync::{OwnedRwLockReadGuard, RwLock};

use crate::{
    context::OperationContext,
    error::{ControllerError, ControllerResult},
};

#[async_trait]
pub trait ReferenceCheck: Send + Sync {
    fn table_name(&self) -> String;

    /// Gate serializing writes to the table. Holding its read side keeps the
    /// table unchanged until the holder commits.
    fn gate(&self) -> Arc<RwLock<()>>;

    /// Reads the table directly. Callers must hold the read side of `gate`.
    async fn is_referenced(&self, entity_id: &str) -> anyhow::Result<bool>;
}

/// Held read gates of every guarding table. Dropping it releases them.
pub struct GuardPermit {
    _held: Vec<OwnedRwLockReadGuard<()>>,
}

#[derive(Clone, Default)]
pub struct DeletionGuard {
    checks: Vec<Arc<dyn ReferenceCheck>>,
}

impl DeletionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, check: Arc<dyn ReferenceCheck>) -> Self {
        self.checks.push(check);
        self
    }

    pub fn tables(&self) -> Vec<String> {
        self.checks.iter().map(|check| check.table_name()).collect()
    }

    /// Locks every guarding table against new links and checks that none of
    /// them references `entity_id`. The returned permit must be held until
    /// the deletion commits.
    #[tracing::instrument(name = "service::guard::authorize", skip(self, context))]
    pub async fn authorize(
        &self,
        context: &OperationContext,
        kind: &'static str,
        entity_id: &str,
    ) -> ControllerResult<GuardPermit> {
        let mut held = Vec::with_capacity(self.checks.len());

        for check in self.checks.iter() {
            let gate = check.gate();
            held.push(
                context
                    .bounded("service::guard::authorize", gate.read_owned())
                    .await?,
            );
        }

        for check in self.checks.iter() {
            let referenced = context
                .bounded(
                    "service::guard::authorize",
                    check.is_referenced(entity_id),
                )
                .await??;

            if referenced {
                let table = check.table_name();
                tracing::warn!(
                    operation_id = %context.operation_id,
                    "refusing to delete {} {}: referenced from {}",
                    kind,
                    entity_id,
                    table
                );

                return Err(ControllerError::Conflict {
                    kind,
                    id: entity_id.to_string(),
                    table,
                });
            }
        }

        Ok(GuardPermit { _held: held })
    }
}

impl fmt::Debug for DeletionGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeletionGuard")
            .field("tables", &self.tables())
            .finish()
    }
}
