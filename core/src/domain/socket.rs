//! Listening socket and display row models.

use serde::{Deserialize, Serialize};

use super::PortMapping;

/// Display address for sockets bound to every interface.
pub const WILDCARD_LABEL: &str = "Localhost Amplo";

/// Display address for sockets bound to the IPv4 loopback.
pub const LOOPBACK_LABEL: &str = "Localhost Restrito";

/// Application name used when the owning process could not be resolved.
pub const UNKNOWN_PROCESS: &str = "Processo Desconhecido";

// ============================================================================
// ListeningSocket
// ============================================================================

/// One OS-level listening endpoint, as reported by the socket table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListeningSocket {
    /// Local IP address, without brackets or interface suffix.
    pub local_ip: String,
    /// Local port number.
    pub port: u16,
    /// Socket status (always `LISTEN` after enumeration).
    pub status: String,
    /// Owning process ID, when the OS let us see it.
    pub pid: Option<u32>,
    /// Owning process name, when the process could be inspected.
    pub process_name: Option<String>,
}

impl ListeningSocket {
    /// Create a listening socket with no process information yet.
    pub fn listen(local_ip: impl Into<String>, port: u16, pid: Option<u32>) -> Self {
        Self {
            local_ip: local_ip.into(),
            port,
            status: "LISTEN".to_string(),
            pid,
            process_name: None,
        }
    }

    /// Attach a resolved process name.
    pub fn with_process_name(mut self, name: impl Into<String>) -> Self {
        self.process_name = Some(name.into());
        self
    }
}

// ============================================================================
// DisplayRow
// ============================================================================

/// A listening socket projected for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    /// Raw local IP address.
    pub local_ip: String,
    /// Classified local address (see [`classify_address`]).
    pub display_address: String,
    /// Local port number.
    pub port: u16,
    /// Socket status text.
    pub status: String,
    /// Custom label, `Processo: <name>`, or [`UNKNOWN_PROCESS`].
    pub application_name: String,
    /// Whether `application_name` came from the port mapping.
    pub has_custom_mapping: bool,
}

impl DisplayRow {
    /// Check if this row matches an already lower-cased search query.
    pub fn matches_search(&self, query_lower: &str) -> bool {
        self.local_ip.to_lowercase().contains(query_lower)
            || self.port.to_string().contains(query_lower)
            || self.status.to_lowercase().contains(query_lower)
            || self.application_name.to_lowercase().contains(query_lower)
            || self.display_address.to_lowercase().contains(query_lower)
    }
}

/// Map a raw bind address to its human category.
///
/// `0.0.0.0` and `::` are wildcard binds, `127.0.0.1` is the restricted
/// loopback; anything else is shown verbatim.
pub fn classify_address(ip: &str) -> String {
    match ip {
        "0.0.0.0" | "::" => WILDCARD_LABEL.to_string(),
        "127.0.0.1" => LOOPBACK_LABEL.to_string(),
        other => other.to_string(),
    }
}

/// Merge enumerated sockets with the port mapping into display rows.
///
/// Produces exactly one row per socket, in input order.
pub fn compose_rows(sockets: &[ListeningSocket], mapping: &PortMapping) -> Vec<DisplayRow> {
    sockets
        .iter()
        .map(|socket| {
            let (application_name, has_custom_mapping) = match mapping.get(socket.port) {
                Some(label) => (label.to_string(), true),
                None => match &socket.process_name {
                    Some(name) => (format!("Processo: {}", name), false),
                    None => (UNKNOWN_PROCESS.to_string(), false),
                },
            };

            DisplayRow {
                local_ip: socket.local_ip.clone(),
                display_address: classify_address(&socket.local_ip),
                port: socket.port,
                status: socket.status.clone(),
                application_name,
                has_custom_mapping,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(entries: &[(&str, &str)]) -> PortMapping {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_classify_address() {
        assert_eq!(classify_address("0.0.0.0"), WILDCARD_LABEL);
        assert_eq!(classify_address("::"), WILDCARD_LABEL);
        assert_eq!(classify_address("127.0.0.1"), LOOPBACK_LABEL);
        assert_eq!(classify_address("::1"), "::1");
        assert_eq!(classify_address("192.168.1.10"), "192.168.1.10");
        assert_eq!(classify_address("127.0.0.53"), "127.0.0.53");
    }

    #[test]
    fn test_mapping_overrides_process_name() {
        let sockets = vec![
            ListeningSocket::listen("0.0.0.0", 8080, Some(42)).with_process_name("java"),
            ListeningSocket::listen("::", 8080, None),
        ];
        let rows = compose_rows(&sockets, &mapping(&[("8080", "X")]));

        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.application_name, "X");
            assert!(row.has_custom_mapping);
        }
    }

    #[test]
    fn test_process_name_fallbacks() {
        let sockets = vec![
            ListeningSocket::listen("127.0.0.1", 5432, Some(7)).with_process_name("postgres"),
            ListeningSocket::listen("10.0.0.2", 6379, Some(8)),
        ];
        let rows = compose_rows(&sockets, &PortMapping::default());

        assert_eq!(rows[0].application_name, "Processo: postgres");
        assert_eq!(rows[0].display_address, LOOPBACK_LABEL);
        assert!(!rows[0].has_custom_mapping);

        assert_eq!(rows[1].application_name, UNKNOWN_PROCESS);
        assert_eq!(rows[1].display_address, "10.0.0.2");
        assert!(!rows[1].has_custom_mapping);
    }

    #[test]
    fn test_no_dedup_for_shared_port() {
        let sockets = vec![
            ListeningSocket::listen("0.0.0.0", 53, Some(1)).with_process_name("dnsmasq"),
            ListeningSocket::listen("127.0.0.1", 53, Some(2)).with_process_name("resolved"),
        ];
        let rows = compose_rows(&sockets, &PortMapping::default());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].display_address, WILDCARD_LABEL);
        assert_eq!(rows[1].display_address, LOOPBACK_LABEL);
    }

    #[test]
    fn test_matches_search_fields() {
        let sockets = vec![ListeningSocket::listen("0.0.0.0", 8080, None)];
        let row = &compose_rows(&sockets, &mapping(&[("8080", "MyApp")]))[0];

        assert!(row.matches_search("myapp"));
        assert!(row.matches_search("808"));
        assert!(row.matches_search("listen"));
        assert!(row.matches_search("amplo"));
        assert!(row.matches_search("0.0.0"));
        assert!(!row.matches_search("postgres"));
    }
}
