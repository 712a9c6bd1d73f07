//! PortMonitor Core Library
//!
//! Everything the port monitor dashboard needs below its presentation layer:
//! - Enumerate listening sockets and resolve their owning process names
//! - Persist user-defined port labels (the port mapping)
//! - Compose display rows and filter/sort them per request
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure business logic and data models
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: External system implementations
//! - `application`: Use case services
//!
//! # Platform Support
//! - Linux: Uses the `ss` command
//! - macOS: Uses the `lsof` command
//! - Windows: not supported

pub mod adapters;
pub mod application;
pub mod domain;
pub mod error;
pub mod ports;

// Re-export domain types (primary API)
pub use domain::{
    classify_address, compose_rows, process_rows, DisplayRow, ListeningSocket, MappingOutcome,
    MappingUpdate, PortMapping, RowQuery, SortKey, SortOrder,
};

// Re-export other commonly used types
pub use adapters::{host_name, MappingStore, PortScanner};
pub use application::DashboardService;
pub use error::{Error, Result};
