//! Adapters layer - External system implementations.
//!
//! This module contains implementations of the port traits defined in `ports`.
//! Each adapter handles communication with external systems.

pub mod mapping_store;
pub mod process;
pub mod scanner;

// Re-export main types for convenience
pub use mapping_store::MappingStore;
pub use process::{host_name, ProcessTable};
pub use scanner::{resolve_process_names, PortScanner};
