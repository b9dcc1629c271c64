//! Concurrent account scheduling
//!
//! Two-level fan-out over lightweight tasks:
//!
//! ```text
//! ┌─────────────────────────── Fleet ───────────────────────────┐
//! │                                                             │
//! │   ┌── AccountWorker ──┐   ┌── AccountWorker ──┐    ...      │
//! │   │  earning loop     │   │  earning loop     │             │
//! │   │  keepalive loop   │   │  keepalive loop   │             │
//! │   └───────────────────┘   └───────────────────┘             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The fleet owns one worker per runnable account; each worker owns its two
//! polling loops. There is no ordering between accounts and none between
//! the two loops of one account. The only shared state is the proxy
//! binding table, read fresh at every cycle. A single watch channel
//! cancels the whole tree.
//!
//! # Modules
//!
//! - [`worker`] - per-account supervisor and its two loops
//! - [`fleet`] - account validation and fleet-wide fan-out
//! - [`error`] - scheduler error types

pub mod error;
pub mod fleet;
pub mod worker;

pub use error::{SchedulerError, SchedulerResult};
pub use fleet::Fleet;
pub use worker::AccountWorker;
