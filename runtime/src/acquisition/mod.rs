//! HTTP-based acquisition: the cheap primary path.
//!
//! The browser is only consulted when this path fails.

pub mod http_client;
pub mod structured;
