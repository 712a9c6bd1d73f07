//! Socket enumeration adapters.
//!
//! Platform-specific implementations of listening socket discovery.

#[cfg(target_os = "macos")]
mod darwin;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "windows")]
mod windows;

mod utils;

use tracing::debug;

use crate::domain::ListeningSocket;
use crate::error::{Error, Result};
use crate::ports::{ProcessLookupPort, SocketEnumeratorPort};

use super::process::ProcessTable;

/// The main socket enumerator that uses platform-specific implementations.
pub struct PortScanner {
    #[cfg(target_os = "macos")]
    inner: darwin::DarwinScanner,

    #[cfg(target_os = "linux")]
    inner: linux::LinuxScanner,

    #[cfg(target_os = "windows")]
    inner: windows::WindowsScanner,
}

impl PortScanner {
    /// Create a new scanner for the current platform.
    pub fn new() -> Self {
        Self {
            #[cfg(target_os = "macos")]
            inner: darwin::DarwinScanner::new(),

            #[cfg(target_os = "linux")]
            inner: linux::LinuxScanner::new(),

            #[cfg(target_os = "windows")]
            inner: windows::WindowsScanner::new(),
        }
    }

    /// List listening sockets and resolve their owning process names.
    pub async fn enumerate(&self) -> Result<Vec<ListeningSocket>> {
        let mut sockets = self.inner.scan().await?;

        let processes = tokio::task::spawn_blocking(ProcessTable::snapshot)
            .await
            .map_err(|e| Error::CommandFailed(format!("Process snapshot failed: {}", e)))?;
        resolve_process_names(&mut sockets, &processes);

        debug!(count = sockets.len(), "enumerated listening sockets");
        Ok(sockets)
    }
}

impl Default for PortScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl SocketEnumeratorPort for PortScanner {
    async fn enumerate(&self) -> Result<Vec<ListeningSocket>> {
        PortScanner::enumerate(self).await
    }
}

/// Fill in process names from a lookup.
///
/// A socket without a pid, or whose process is gone or hidden from us,
/// keeps `process_name == None`; the rest of the list is unaffected.
pub fn resolve_process_names(sockets: &mut [ListeningSocket], lookup: &impl ProcessLookupPort) {
    for socket in sockets.iter_mut() {
        socket.process_name = socket.pid.and_then(|pid| lookup.process_name(pid));
    }
}

/// Internal trait for platform-specific implementations.
trait Scanner: Send + Sync {
    fn scan(&self) -> impl std::future::Future<Output = Result<Vec<ListeningSocket>>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MockLookup(HashMap<u32, String>);

    impl ProcessLookupPort for MockLookup {
        fn process_name(&self, pid: u32) -> Option<String> {
            self.0.get(&pid).cloned()
        }
    }

    #[test]
    fn test_resolve_process_names() {
        let lookup = MockLookup(HashMap::from([(100, "nginx".to_string())]));
        let mut sockets = vec![
            ListeningSocket::listen("0.0.0.0", 80, Some(100)),
            ListeningSocket::listen("0.0.0.0", 8080, Some(999)),
            ListeningSocket::listen("::", 22, None),
        ];

        resolve_process_names(&mut sockets, &lookup);

        assert_eq!(sockets[0].process_name.as_deref(), Some("nginx"));
        assert_eq!(sockets[1].process_name, None);
        assert_eq!(sockets[2].process_name, None);
    }
}
