mod persistence;
mod protobufs;

pub mod test;
pub mod uuid;

pub use persistence::{JoinModel, JoinPersistence, PersistableModel, Persistence};

pub use protobufs::*;
