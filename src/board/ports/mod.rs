//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod facade;

pub use facade::{FacadeError, FacadeResult, WorkspaceFacade};
