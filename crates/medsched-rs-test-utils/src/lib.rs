//! Test helpers shared across MedSched crates.

pub mod sink;
pub mod store;

pub use sink::RecordingSink;
pub use store::FailingStore;
