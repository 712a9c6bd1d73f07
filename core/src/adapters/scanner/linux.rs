//! Linux socket scanner implementation using ss.

use std::process::{Output, Stdio};
use std::sync::LazyLock;

use regex::Regex;
use tokio::process::Command;

use crate::domain::ListeningSocket;
use crate::error::{Error, Result};

use super::utils::Utils;
use super::Scanner;

/// First pid in an ss `users:(("name",pid=123,fd=4),...)` column.
static PID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"pid=(\d+)").expect("pid pattern is valid"));

/// Linux-specific socket scanner.
pub struct LinuxScanner;

impl LinuxScanner {
    pub fn new() -> Self {
        Self
    }

    /// Parse ss output into listening sockets.
    ///
    /// Expected ss output format:
    /// ```text
    /// LISTEN 0 4096 0.0.0.0:22 0.0.0.0:* users:(("sshd",pid=812,fd=3))
    /// LISTEN 0 511 [::]:80 [::]:*
    /// ```
    /// The process column is missing for sockets owned by other users when
    /// ss runs unprivileged; those sockets are kept without a pid.
    /// ss prints `*` only for dual-stack IPv6 sockets, so it reads as `::`.
    fn parse_ss_output(&self, output: &str) -> Vec<ListeningSocket> {
        let mut sockets = Vec::new();

        for line in output.lines() {
            let components: Vec<&str> = line.split_whitespace().collect();
            if components.len() < 5 || components[0] != "LISTEN" {
                continue;
            }

            let Some((address, port)) = Utils::parse_address(components[3], "::") else {
                continue;
            };

            let process_column = components[5..].join(" ");
            let pid = PID_REGEX
                .captures(&process_column)
                .and_then(|caps| caps[1].parse::<u32>().ok());

            sockets.push(ListeningSocket::listen(address, port, pid));
        }

        sockets
    }
}

impl Default for LinuxScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner for LinuxScanner {
    /// Scan all listening TCP sockets.
    ///
    /// Executes: `ss -Htlnp`
    async fn scan(&self) -> Result<Vec<ListeningSocket>> {
        let output = Command::new("ss")
            .args(["-Htlnp"])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Error::CommandFailed(format!("Failed to run ss: {}", e)))?;

        let stdout = ss_stdout(output)?;
        Ok(self.parse_ss_output(&stdout))
    }
}

/// Decode the stdout of a finished ss run, failing if ss itself failed.
fn ss_stdout(output: Output) -> Result<String> {
    if !output.status.success() {
        return Err(Error::CommandFailed(format!(
            "ss exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    String::from_utf8(output.stdout)
        .map_err(|e| Error::ParseError(format!("Invalid UTF-8 in ss output: {}", e)))
}
