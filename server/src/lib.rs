//! PortMonitor web dashboard.
//!
//! Serves an HTML page listing the host's listening sockets, with a form
//! to name ports and persist those names.

pub mod config;
pub mod web;

pub use config::ServerConfig;
