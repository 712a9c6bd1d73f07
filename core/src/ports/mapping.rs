//! Mapping repository port (interface).

use crate::domain::PortMapping;
use crate::error::Result;

/// Result of removing a port label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// The label existed and the mapping without it was persisted.
    Removed(PortMapping),
    /// No label for that port; nothing was written.
    NotFound,
}

/// Port for persisting the port mapping.
///
/// Every mutation loads the current mapping, applies the change and writes
/// the whole mapping back. Concurrent writers race, last write wins.
pub trait MappingRepository: Send + Sync {
    /// Load the mapping, falling back to the defaults when nothing usable is stored.
    fn load(&self) -> impl std::future::Future<Output = Result<PortMapping>> + Send;

    /// Replace the stored mapping.
    fn save(&self, mapping: &PortMapping) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Set or replace the label for a port and persist the result.
    fn upsert(
        &self,
        port: u16,
        label: &str,
    ) -> impl std::future::Future<Output = Result<PortMapping>> + Send;

    /// Remove the label for a port and persist the result.
    fn remove(&self, port: u16) -> impl std::future::Future<Output = Result<Removal>> + Send;
}
