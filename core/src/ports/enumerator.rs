//! Socket enumerator port (interface).

use crate::domain::ListeningSocket;
use crate::error::Result;

/// Port for listing listening sockets.
///
/// Implementations handle platform-specific details (ss, lsof, etc.)
pub trait SocketEnumeratorPort: Send + Sync {
    /// Take a snapshot of every socket in listen state.
    ///
    /// Process names are resolved per socket; a socket whose owner cannot be
    /// inspected is still returned, with `process_name` left empty.
    /// The order of the returned sockets is unspecified.
    fn enumerate(&self) -> impl std::future::Future<Output = Result<Vec<ListeningSocket>>> + Send;
}
