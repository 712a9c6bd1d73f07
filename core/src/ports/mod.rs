//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the interfaces that the application layer uses
//! to interact with external systems. Implementations live in `adapters`.

mod enumerator;
mod mapping;
mod process;

pub use enumerator::SocketEnumeratorPort;
pub use mapping::{MappingRepository, Removal};
pub use process::ProcessLookupPort;
