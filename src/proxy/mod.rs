//! Proxy resolution and rotation
//!
//! This module owns everything between a raw proxy line and an account
//! holding a working proxy:
//!
//! - [`spec`] - free-form line parsing into validated [`ProxySpec`] values
//! - [`pool`] - deterministic round-robin over the parsed list
//! - [`binding`] - sticky per-account assignment with failover rotation
//! - [`loader`] - file and remote list loading with skip-and-report
//!
//! Assignment is sticky: an account keeps its proxy until a rotation is
//! requested for it after exhausted retries. Rotation pulls the next proxy
//! from the shared pool cursor, so failed accounts walk the pool in the
//! same deterministic order as first-time assignment.

pub mod binding;
pub mod error;
pub mod loader;
pub mod pool;
pub mod spec;

pub use binding::ProxyBindings;
pub use error::{ProxyError, ProxyResult};
pub use loader::{fetch_remote_list, load_from_file, parse_lines, DEFAULT_REMOTE_LIST_URL};
pub use pool::ProxyPool;
pub use spec::{Protocol, ProxyParser, ProxySpec};
