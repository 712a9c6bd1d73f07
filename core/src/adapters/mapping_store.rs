//! File-backed storage for the port mapping.
//!
//! Stores the mapping as a pretty-printed JSON object at
//! `~/.portmonitor/port_mappings.json` unless another path is configured.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::domain::PortMapping;
use crate::error::{Error, Result};
use crate::ports::{MappingRepository, Removal};

/// Mapping store for reading and writing the port mapping file.
pub struct MappingStore {
    /// Path to the mapping file.
    path: PathBuf,
    /// Mapping served when the file is missing, malformed or empty.
    defaults: PortMapping,
}

impl MappingStore {
    /// Create a store at the default path.
    ///
    /// Default path: `~/.portmonitor/port_mappings.json`
    pub fn new(defaults: PortMapping) -> Result<Self> {
        Ok(Self::with_path(Self::default_path()?, defaults))
    }

    /// Create a store with a custom path.
    pub fn with_path(path: impl Into<PathBuf>, defaults: PortMapping) -> Self {
        Self {
            path: path.into(),
            defaults,
        }
    }

    /// The default mapping file location.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;
        Ok(home.join(".portmonitor").join("port_mappings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn defaults(&self) -> &PortMapping {
        &self.defaults
    }

    /// Load the mapping from disk.
    ///
    /// Returns the defaults if the file is missing, cannot be decoded, or
    /// holds an empty object. An empty mapping is never served.
    pub async fn load(&self) -> Result<PortMapping> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(self.defaults.clone()),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!(path = %self.path.display(), "mapping file is not UTF-8, using defaults");
                return Ok(self.defaults.clone());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<PortMapping>(&content) {
            Ok(mapping) if mapping.is_empty() => Ok(self.defaults.clone()),
            Ok(mapping) => Ok(mapping),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to decode mapping file, using defaults"
                );
                Ok(self.defaults.clone())
            }
        }
    }

    /// Save the mapping to disk.
    ///
    /// Creates the parent directory if needed. The file is replaced by
    /// rename, so readers never observe a partial write.
    pub async fn save(&self, mapping: &PortMapping) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).await?;
        }

        let content = serde_json::to_string_pretty(mapping)?;

        let temp_path = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(content.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }

    /// Write the defaults if no mapping file exists yet.
    ///
    /// Returns `true` when the file was created.
    pub async fn ensure_initialized(&self) -> Result<bool> {
        if fs::try_exists(&self.path).await? {
            return Ok(false);
        }
        self.save(&self.defaults).await?;
        info!(path = %self.path.display(), "created default mapping file");
        Ok(true)
    }

    /// Set or replace the label for a port.
    pub async fn upsert(&self, port: u16, label: &str) -> Result<PortMapping> {
        let mut mapping = self.load().await?;
        mapping.insert(port, label);
        self.save(&mapping).await?;
        info!(port, label, "saved port mapping");
        Ok(mapping)
    }

    /// Remove the label for a port. Absent ports are reported, not written.
    pub async fn remove(&self, port: u16) -> Result<Removal> {
        let mut mapping = self.load().await?;
        if mapping.remove(port).is_none() {
            return Ok(Removal::NotFound);
        }
        self.save(&mapping).await?;
        info!(port, "removed port mapping");
        Ok(Removal::Removed(mapping))
    }
}

impl MappingRepository for MappingStore {
    async fn load(&self) -> Result<PortMapping> {
        MappingStore::load(self).await
    }

    async fn save(&self, mapping: &PortMapping) -> Result<()> {
        MappingStore::save(self, mapping).await
    }

    async fn upsert(&self, port: u16, label: &str) -> Result<PortMapping> {
        MappingStore::upsert(self, port, label).await
    }

    async fn remove(&self, port: u16) -> Result<Removal> {
        MappingStore::remove(self, port).await
    }
}
