//! Process name lookup backed by sysinfo.

use sysinfo::{Pid, ProcessRefreshKind, RefreshKind, System};

use crate::ports::ProcessLookupPort;

/// Point-in-time view of the process table.
pub struct ProcessTable {
    system: System,
}

impl ProcessTable {
    /// Read the current process list. Only names and pids are loaded.
    pub fn snapshot() -> Self {
        let system = System::new_with_specifics(
            RefreshKind::nothing().with_processes(ProcessRefreshKind::nothing()),
        );
        Self { system }
    }
}

impl ProcessLookupPort for ProcessTable {
    fn process_name(&self, pid: u32) -> Option<String> {
        self.system
            .process(Pid::from_u32(pid))
            .map(|process| process.name().to_string_lossy().into_owned())
    }
}

/// Host name of this machine, for page headers.
pub fn host_name() -> String {
    System::host_name().unwrap_or_else(|| "localhost".to_string())
}
