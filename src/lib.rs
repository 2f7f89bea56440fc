//! Taskboard: the admin workspace task board.
//!
//! This crate provides a Kanban-style project and task tracker for admin
//! workspaces: column projection, drag-and-drop reordering with optimistic
//! updates, workspace filtering, and board, list, and calendar views over a
//! single filtered collection.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory storage)
//! - **Services**: Orchestration of domain logic through ports
//!
//! # Modules
//!
//! - [`board`]: Workspaces, tasks, columns, views, and the board session

pub mod board;
