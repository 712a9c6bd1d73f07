//! Process lookup port (interface).

/// Port for resolving a process ID to its name.
pub trait ProcessLookupPort {
    /// Name of the process, or `None` if it exited or cannot be inspected.
    fn process_name(&self, pid: u32) -> Option<String>;
}
