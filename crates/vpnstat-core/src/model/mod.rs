pub mod entity;
pub mod snapshot;

pub use entity::{Entity, EntityState, MAX_ENTITY_NAME_LEN};
pub use snapshot::Snapshot;
