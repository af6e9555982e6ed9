use std::sync::Arc;
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

use super::guard::DeletionGuard;
use crate::{
    context::OperationContext,
    error::{ControllerError, ControllerResult, ValidationError},
    models::Entity,
    persistence::Persistence,
};

/// Writes to the collection are serialized by a gate. Reads share it, so a
/// reader never observes half of a batch update.
#[derive(Debug)]
pub struct Repository<E: Entity> {
    persistence: Arc<dyn Persistence<E>>,
    gate: Arc<RwLock<()>>,
    guard: DeletionGuard,
}

impl<E: Entity> Repository<E> {
    pub fn new(persistence: Arc<dyn Persistence<E>>) -> Self {
        Self {
            persistence,
            gate: Arc::new(RwLock::new(())),
            guard: DeletionGuard::new(),
        }
    }

    pub fn guarded_by(mut self, guard: DeletionGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn guard(&self) -> &DeletionGuard {
        &self.guard
    }

    pub(crate) fn gate(&self) -> Arc<RwLock<()>> {
        Arc::clone(&self.gate)
    }

    pub(crate) async fn read_gate(
        &self,
        context: &OperationContext,
        operation: &str,
    ) -> ControllerResult<OwnedRwLockReadGuard<()>> {
        context.bounded(operation, self.gate().read_owned()).await
    }

    async fn write_gate(
        &self,
        context: &OperationContext,
        operation: &str,
    ) -> ControllerResult<OwnedRwLockWriteGuard<()>> {
        context.bounded(operation, self.gate().write_owned()).await
    }

    pub(crate) fn prepare(&self, mut entity: E) -> ControllerResult<E> {
        if !entity.get_id().is_empty() {
            return Err(ValidationError::new("id", ValidationError::CANNOT_BE_SPECIFIED).into());
        }

        entity.set_id(&edgectl_core::uuid::new());
        entity.validate()?;

        Ok(entity)
    }

    /// Stores a prepared entity. Callers must not hold this collection's gate.
    pub(crate) async fn insert(
        &self,
        context: &OperationContext,
        entity: E,
    ) -> ControllerResult<String> {
        const OPERATION: &str = "service::repository::create";

        let _gate = self.write_gate(context, OPERATION).await?;

        context.ensure_live(OPERATION)?;
        context
            .bounded(OPERATION, self.persistence.upsert(&entity))
            .await??;

        tracing::info!(
            operation_id = %context.operation_id,
            "created {} {}",
            E::KIND,
            entity.get_id()
        );

        Ok(entity.get_id())
    }

    /// Reads without taking the gate. Callers must already hold its read side.
    pub(crate) async fn contains_locked(
        &self,
        context: &OperationContext,
        id: &str,
    ) -> ControllerResult<bool> {
        let entity = context
            .bounded("service::repository::contains", self.persistence.get_by_id(id))
            .await??;

        Ok(entity.is_some())
    }

    #[tracing::instrument(name = "service::repository::create", skip(self, context, entity))]
    pub async fn create(&self, context: &OperationContext, entity: E) -> ControllerResult<String> {
        let entity = self.prepare(entity)?;

        self.insert(context, entity).await
    }

    #[tracing::instrument(name = "service::repository::get_by_id", skip(self, context))]
    pub async fn get_by_id(&self, context: &OperationContext, id: &str) -> ControllerResult<E> {
        const OPERATION: &str = "service::repository::get_by_id";

        let _gate = self.read_gate(context, OPERATION).await?;

        match context
            .bounded(OPERATION, self.persistence.get_by_id(id))
            .await??
        {
            Some(entity) => Ok(entity),
            None => Err(ControllerError::not_found(E::KIND, id)),
        }
    }

    #[tracing::instrument(name = "service::repository::list", skip(self, context))]
    pub async fn list(&self, context: &OperationContext) -> ControllerResult<Vec<E>> {
        const OPERATION: &str = "service::repository::list";

        let _gate = self.read_gate(context, OPERATION).await?;

        let entities = context
            .bounded(OPERATION, self.persistence.list())
            .await??;

        Ok(entities)
    }

    /// Replaces a batch of existing entities. Either every entity is written
    /// or none is: the whole batch is validated first and every id must
    /// already exist.
    #[tracing::instrument(name = "service::repository::update", skip(self, context, entities))]
    pub async fn update(&self, context: &OperationContext, entities: Vec<E>) -> ControllerResult<()> {
        const OPERATION: &str = "service::repository::update";

        for entity in entities.iter() {
            entity.validate()?;
        }

        let _gate = self.write_gate(context, OPERATION).await?;

        for entity in entities.iter() {
            if !self.contains_locked(context, &entity.get_id()).await? {
                return Err(ControllerError::not_found(E::KIND, &entity.get_id()));
            }
        }

        context.ensure_live(OPERATION)?;
        context
            .bounded(OPERATION, self.persistence.upsert_many(&entities))
            .await??;

        tracing::info!(
            operation_id = %context.operation_id,
            "updated {} {} records",
            entities.len(),
            E::KIND
        );

        Ok(())
    }

    #[tracing::instrument(name = "service::repository::delete", skip(self, context))]
    pub async fn delete(&self, context: &OperationContext, id: &str) -> ControllerResult<()> {
        const OPERATION: &str = "service::repository::delete";

        let _gate = self.write_gate(context, OPERATION).await?;

        if !self.contains_locked(context, id).await? {
            return Err(ControllerError::not_found(E::KIND, id));
        }

        let _permit = self.guard.authorize(context, E::KIND, id).await?;

        context.ensure_live(OPERATION)?;
        let deleted_count = context
            .bounded(OPERATION, self.persistence.delete(id))
            .await??;

        if deleted_count == 0 {
            return Err(ControllerError::not_found(E::KIND, id));
        }

        tracing::info!(
            operation_id = %context.operation_id,
            "deleted {} {}",
            E::KIND,
            id
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::models::DnsVmAppAlias;
    use crate::persistence::memory::MemoryPersistence;

    fn alias_fixture(name: &str) -> DnsVmAppAlias {
        DnsVmAppAlias {
            id: String::new(),
            name: name.to_owned(),
            description: "alias description".to_owned(),
            vm_app_id: "61c7c6c5-2c8e-4d2c-8a43-3d2f4a6e10f1".to_owned(),
        }
    }

    fn repository() -> Repository<DnsVmAppAlias> {
        Repository::new(Arc::new(MemoryPersistence::<DnsVmAppAlias>::default()))
    }

    #[tokio::test]
    async fn test_create_get_delete() {
        let repository = repository();
        let context = OperationContext::new();

        let id = repository
            .create(&context, alias_fixture("alias-1"))
            .await
            .unwrap();
        assert_eq!(id.len(), 36);

        let fetched = repository.get_by_id(&context, &id).await.unwrap();
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.name, "alias-1");

        repository.delete(&context, &id).await.unwrap();

        let err = repository.get_by_id(&context, &id).await.unwrap_err();
        assert!(matches!(err, ControllerError::NotFound { .. }));

        let err = repository.delete(&context, &id).await.unwrap_err();
        assert!(matches!(err, ControllerError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_create_rejects_supplied_id() {
        let repository = repository();
        let context = OperationContext::new();

        let mut alias = alias_fixture("alias-1");
        alias.id = "61c7c6c5-2c8e-4d2c-8a43-3d2f4a6e10f1".to_owned();

        let err = repository.create(&context, alias).await.unwrap_err();
        assert_eq!(err.to_string(), "id cannot be specified in POST request");
        assert!(repository.list(&context).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_validates() {
        let repository = repository();
        let context = OperationContext::new();

        let err = repository
            .create(&context, alias_fixture(""))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "name cannot be empty");

        let mut alias = alias_fixture("alias-1");
        alias.vm_app_id = "not-a-uuid".to_owned();
        let err = repository.create(&context, alias).await.unwrap_err();
        assert_eq!(err.to_string(), "vm_app_id not a valid uuid");
    }

    #[tokio::test]
    async fn test_update_batch() {
        let repository = repository();
        let context = OperationContext::new();

        let first_id = repository
            .create(&context, alias_fixture("alias-1"))
            .await
            .unwrap();
        let second_id = repository
            .create(&context, alias_fixture("alias-2"))
            .await
            .unwrap();

        let mut first = repository.get_by_id(&context, &first_id).await.unwrap();
        let mut second = repository.get_by_id(&context, &second_id).await.unwrap();
        first.description = "updated 1".to_owned();
        second.description = "updated 2".to_owned();

        repository
            .update(&context, vec![first, second])
            .await
            .unwrap();

        let first = repository.get_by_id(&context, &first_id).await.unwrap();
        let second = repository.get_by_id(&context, &second_id).await.unwrap();
        assert_eq!(first.description, "updated 1");
        assert_eq!(second.description, "updated 2");
    }

    #[tokio::test]
    async fn test_update_batch_is_all_or_nothing() {
        let repository = repository();
        let context = OperationContext::new();

        let id = repository
            .create(&context, alias_fixture("alias-1"))
            .await
            .unwrap();

        let mut valid = repository.get_by_id(&context, &id).await.unwrap();
        valid.description = "changed".to_owned();

        let mut invalid = valid.clone();
        invalid.id = edgectl_core::uuid::new();
        invalid.name = String::new();

        let err = repository
            .update(&context, vec![valid.clone(), invalid])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "name cannot be empty");

        let mut unknown = valid.clone();
        unknown.id = edgectl_core::uuid::new();

        let err = repository
            .update(&context, vec![valid, unknown])
            .await
            .unwrap_err();
        assert!(matches!(err, ControllerError::NotFound { .. }));

        let stored = repository.get_by_id(&context, &id).await.unwrap();
        assert_eq!(stored.description, "alias description");
    }

    #[tokio::test]
    async fn test_expired_context_commits_nothing() {
        let repository = repository();
        let expired = OperationContext::with_timeout(Duration::ZERO);

        let err = repository
            .create(&expired, alias_fixture("alias-1"))
            .await
            .unwrap_err();
        assert!(err.is_retriable());

        let context = OperationContext::new();
        assert!(repository.list(&context).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lock_wait_is_bounded() {
        let repository = repository();
        let held = repository.gate().write_owned().await;

        let context = OperationContext::with_timeout(Duration::from_millis(20));
        let err = repository.list(&context).await.unwrap_err();
        assert!(matches!(err, ControllerError::Timeout(_)));

        drop(held);
        assert!(repository.list(&OperationContext::new()).await.is_ok());
    }
}
