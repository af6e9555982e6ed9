use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{guard::ReferenceCheck, repository::Repository};
use crate::{
    context::OperationContext,
    error::{ControllerResult, ValidationError},
    models::Association,
    persistence::JoinPersistence,
};

#[derive(Debug)]
pub struct AssociationIndex<A: Association> {
    records: Repository<A>,
    lookup: Arc<dyn JoinPersistence<A>>,
}

impl<A: Association> AssociationIndex<A> {
    pub fn new<P>(persistence: Arc<P>) -> Self
    where
        P: JoinPersistence<A> + 'static,
    {
        Self {
            records: Repository::new(persistence.clone()),
            lookup: persistence,
        }
    }

    pub fn table_name(&self) -> String {
        A::table_name()
    }

    async fn exists_locked(
        &self,
        context: &OperationContext,
        entity_id: &str,
    ) -> ControllerResult<bool> {
        let records = context
            .bounded(
                "service::association::exists",
                self.lookup.get_by_foreign_key(entity_id),
            )
            .await??;

        Ok(!records.is_empty())
    }

    #[tracing::instrument(name = "service::association::exists", skip(self, context))]
    pub async fn exists(&self, context: &OperationContext, entity_id: &str) -> ControllerResult<bool> {
        let _gate = self
            .records
            .read_gate(context, "service::association::exists")
            .await?;

        self.exists_locked(context, entity_id).await
    }

    /// Stores a record after checking only that its foreign keys are well
    /// formed. Use `link` to also require that both referenced records exist.
    pub async fn create(&self, context: &OperationContext, record: A) -> ControllerResult<String> {
        self.records.create(context, record).await
    }

    /// Stores a record once both referenced entities are known to exist. The
    /// referenced collections stay read-locked until the record is stored, so
    /// neither entity can be deleted in between.
    #[tracing::instrument(name = "service::association::link", skip_all)]
    pub async fn link(
        &self,
        context: &OperationContext,
        record: A,
        left: &Repository<A::Left>,
        right: &Repository<A::Right>,
    ) -> ControllerResult<String> {
        const OPERATION: &str = "service::association::link";

        let record = self.records.prepare(record)?;
        let [left_id, right_id] = record.foreign_keys().map(str::to_owned);

        let _left_gate = left.read_gate(context, OPERATION).await?;
        let _right_gate = right.read_gate(context, OPERATION).await?;

        if !left.contains_locked(context, &left_id).await? {
            return Err(
                ValidationError::new(A::left_field(), ValidationError::NOT_AN_EXISTING_RECORD).into(),
            );
        }

        if !right.contains_locked(context, &right_id).await? {
            return Err(
                ValidationError::new(A::right_field(), ValidationError::NOT_AN_EXISTING_RECORD)
                    .into(),
            );
        }

        self.records.insert(context, record).await
    }

    pub async fn get_by_id(&self, context: &OperationContext, id: &str) -> ControllerResult<A> {
        self.records.get_by_id(context, id).await
    }

    pub async fn list(&self, context: &OperationContext) -> ControllerResult<Vec<A>> {
        self.records.list(context).await
    }

    pub async fn delete(&self, context: &OperationContext, id: &str) -> ControllerResult<()> {
        self.records.delete(context, id).await
    }
}

#[async_trait]
impl<A: Association> ReferenceCheck for AssociationIndex<A> {
    fn table_name(&self) -> String {
        A::table_name()
    }

    fn gate(&self) -> Arc<RwLock<()>> {
        self.records.gate()
    }

    async fn is_referenced(&self, entity_id: &str) -> anyhow::Result<bool> {
        let records = self.lookup.get_by_foreign_key(entity_id).await?;

        Ok(!records.is_empty())
    }
}
