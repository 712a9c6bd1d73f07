//! Domain layer - Pure business logic and data models.
//!
//! This module contains domain entities that represent core business concepts.
//! These types have no I/O dependencies and can be tested in isolation.

mod mapping;
mod query;
mod socket;
mod update;

// Re-export all domain types
pub use mapping::{canonical_port, PortMapping};
pub use query::{process_rows, RowQuery, SortKey, SortOrder};
pub use socket::{
    classify_address, compose_rows, DisplayRow, ListeningSocket, LOOPBACK_LABEL, UNKNOWN_PROCESS,
    WILDCARD_LABEL,
};
pub use update::{MappingOutcome, MappingUpdate};
