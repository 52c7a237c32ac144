//! Cluster Watchdog Node Library
//!
//! This library crate defines the core modules that make up the watchdog node.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The node is composed of five loosely coupled subsystems:
//!
//! - **`membership`**: The cluster view layer. Owns the current snapshot of known
//!   nodes, derives the leader, and exposes the update ingress that resets the
//!   leader health schedule on every change.
//! - **`health`**: The leader-monitoring engine. Runs a single probe loop against
//!   the current leader at a randomized interval and reports every outcome.
//! - **`monitor`**: The outbound announcement client. Registers this node's
//!   identity with the external monitor service once at startup.
//! - **`logbus`**: The live log fan-out. Broadcasts log lines to connected
//!   WebSocket observers without ever blocking the core.
//! - **`config`**: Environment-driven runtime configuration.

pub mod config;
pub mod health;
pub mod logbus;
pub mod membership;
pub mod monitor;
