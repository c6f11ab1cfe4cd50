//! Kanban-style feature tracking.
//!
//! - [`board`]: the client-side state manager (feature store, view renderer,
//!   drag-and-drop, completion celebration) and its remote variant.
//! - [`api`] and [`db`]: the REST backend persisting features in SQLite.
//! - [`client`]: HTTP client for the REST backend.

pub mod api;
pub mod board;
pub mod client;
pub mod config;
pub mod db;
pub mod models;
