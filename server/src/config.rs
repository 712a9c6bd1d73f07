//! Server configuration, built once at startup and shared with handlers.

use std::path::PathBuf;

use portmonitor_core::{MappingStore, PortMapping};

/// Address the dashboard binds to by default.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Port the dashboard listens on by default.
pub const DEFAULT_PORT: u16 = 1111;

/// Name the dashboard gives its own port in the default mapping.
pub const DEFAULT_NAME: &str = "Monitor de Portas (ApPortas)";

/// Settings for one dashboard process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Label for the dashboard's own port.
    pub name: String,
    /// Location of the port mapping file.
    pub mappings_file: PathBuf,
}

impl ServerConfig {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        name: impl Into<String>,
        mappings_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            name: name.into(),
            mappings_file: mappings_file.into(),
        }
    }

    /// `host:port` for binding the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Default mapping, naming this dashboard's own port.
    pub fn default_mappings(&self) -> PortMapping {
        PortMapping::defaults(self.port, &self.name)
    }

    /// Mapping store for the configured file.
    pub fn mapping_store(&self) -> MappingStore {
        MappingStore::with_path(&self.mappings_file, self.default_mappings())
    }
}
