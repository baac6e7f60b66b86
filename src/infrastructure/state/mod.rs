//! Poll state storage
//!
//! Implementations of the [`PollStateStore`](crate::domain::ports::PollStateStore)
//! port:
//! - `JsonFilePollStateStore`: every trigger key in one JSON file
//! - `InMemoryPollStateStore`: process-local, for tests and one-shot hosts

pub mod file_store;
pub mod memory_store;

pub use file_store::JsonFilePollStateStore;
pub use memory_store::InMemoryPollStateStore;
