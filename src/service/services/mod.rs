mod application;
mod association;
mod guard;
mod repository;

pub use application::ApplicationService;
pub use association::AssociationIndex;
pub use guard::{DeletionGuard, GuardPermit, ReferenceCheck};
pub use repository::Repository;
