pub mod memory;

pub use edgectl_core::{JoinPersistence, Persistence};
