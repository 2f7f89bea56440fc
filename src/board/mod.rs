//! Admin workspace task board.
//!
//! This module implements the Kanban-style task board used to track admin
//! workspaces: projecting a workspace's tasks into ordered columns, turning
//! drag gestures into optimistic task moves with asynchronous persistence,
//! filtering the workspace collection, and feeding the board, list, and
//! calendar views from one filtered dataset. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//!
//! Runtime tuning lives in [`config`].

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
