//! macOS socket scanner implementation using lsof.

use std::process::Stdio;

use tokio::process::Command;

use crate::domain::ListeningSocket;
use crate::error::{Error, Result};

use super::utils::Utils;
use super::Scanner;

/// macOS-specific socket scanner using lsof.
pub struct DarwinScanner;

impl DarwinScanner {
    /// Create a new macOS scanner.
    pub fn new() -> Self {
        Self
    }

    /// Parse lsof output into listening sockets.
    fn parse_lsof_output(&self, output: &str) -> Vec<ListeningSocket> {
        let mut sockets = Vec::new();

        for line in output.lines().skip(1) {
            let components: Vec<&str> = line.split_whitespace().collect();
            if components.len() < 9 || components.last() != Some(&"(LISTEN)") {
                continue;
            }

            let pid: Option<u32> = components[1].parse().ok();
            let wildcard = if components[4] == "IPv6" { "::" } else { "0.0.0.0" };

            let Some(address_part) = components[8..]
                .iter()
                .rev()
                .find(|comp| comp.contains(':') && !comp.starts_with("0x") && !comp.starts_with("0t"))
            else {
                continue;
            };

            let Some((address, port)) = Utils::parse_address(address_part, wildcard) else {
                continue;
            };

            sockets.push(ListeningSocket::listen(address, port, pid));
        }

        sockets
    }
}

impl Default for DarwinScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner for DarwinScanner {
    async fn scan(&self) -> Result<Vec<ListeningSocket>> {
        let output = Command::new("/usr/sbin/lsof")
            .args(["-iTCP", "-sTCP:LISTEN", "-P", "-n", "+c", "0"])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| Error::CommandFailed(format!("Failed to run lsof: {}", e)))?;

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| Error::ParseError(format!("Invalid UTF-8 in lsof output: {}", e)))?;

        Ok(self.parse_lsof_output(&stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lsof_output() {
        let scanner = DarwinScanner::new();

        let output = r#"COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
node     34805  code   19u  IPv6 0x3d8015e195af1f3f      0t0  TCP [::1]:3000 (LISTEN)
nginx        1  root    6u  IPv4 0x1234567890abcdef      0t0  TCP *:80 (LISTEN)
sshd       120  root    7u  IPv6 0x1234567890abcdee      0t0  TCP *:22 (LISTEN)
"#;

        let sockets = scanner.parse_lsof_output(output);
        assert_eq!(sockets.len(), 3);
        assert_eq!(sockets[0].local_ip, "::1");
        assert_eq!(sockets[0].port, 3000);
        assert_eq!(sockets[0].pid, Some(34805));
        assert_eq!(sockets[1].local_ip, "0.0.0.0");
        assert_eq!(sockets[2].local_ip, "::");
    }
}
