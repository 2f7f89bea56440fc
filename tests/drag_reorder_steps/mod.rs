//! Step definitions for drag-reorder scenarios.

mod given;
mod then;
mod when;
pub mod world;
