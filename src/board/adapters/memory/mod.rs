//! In-memory adapter implementations.
//!
//! These adapters provide simple, thread-safe implementations suitable for
//! tests and local tooling without a storage backend.

mod workspace;

pub use workspace::{InMemoryWorkspaceFacade, RecordedTaskUpdate};
