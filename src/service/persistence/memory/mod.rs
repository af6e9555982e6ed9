mod generic;

pub use generic::MemoryPersistence;
