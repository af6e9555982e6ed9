use async_trait::async_trait;
use std::fmt::Debug;

/// Storage contract for one collection of models. Implementations are plain
/// key-based stores: validation, locking and referential rules live above them.
#[async_trait]
pub trait Persistence<Model>: Debug + Send + Sync {
    async fn upsert(&self, model: &Model) -> anyhow::Result<u64>;
    async fn upsert_many(&self, models: &[Model]) -> anyhow::Result<u64>;
    async fn delete(&self, model_id: &str) -> anyhow::Result<u64>;
    async fn get_by_id(&self, model_id: &str) -> anyhow::Result<Option<Model>>;
    async fn list(&self) -> anyhow::Result<Vec<Model>>;
}

/// Foreign-key style lookups over a collection of join records.
#[async_trait]
pub trait JoinPersistence<Model>: Persistence<Model> {
    async fn get_by_foreign_key(&self, foreign_id: &str) -> anyhow::Result<Vec<Model>>;
}

pub trait PersistableModel: Clone + Debug + Send + Sync + 'static {
    fn get_id(&self) -> String;
}

/// A model that exists only to link two other models.
pub trait JoinModel: PersistableModel {
    fn foreign_keys(&self) -> [&str; 2];

    fn references(&self, foreign_id: &str) -> bool {
        self.foreign_keys().contains(&foreign_id)
    }
}
