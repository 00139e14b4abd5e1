//! Counter state and its persistence.

pub mod backend;
pub mod counter_store;

pub use backend::{FileSnapshot, SnapshotBackend};
pub use counter_store::CounterStore;
