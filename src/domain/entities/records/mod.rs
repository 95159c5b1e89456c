pub mod kind;
pub mod record;

pub use kind::EntityKind;
pub use record::{fields, indexes, Record, STATUS_ACTIVE};
