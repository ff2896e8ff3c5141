//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-local user store used by the running server and by
//!   tests.

pub mod memory;
