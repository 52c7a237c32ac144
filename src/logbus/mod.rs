//! Log Broadcast Module
//!
//! Fans log lines out to live observers. Every ingress request and every probe
//! outcome is mirrored here in addition to the local log sink; publishing is
//! fire-and-forget and never affects core correctness.
//!
//! ## Submodules
//! - **`service`**: the broadcast channel wrapper (`LogBus`).
//! - **`handlers`**: the WebSocket endpoint observers connect to, plus the
//!   request-logging middleware.

pub mod handlers;
pub mod service;
