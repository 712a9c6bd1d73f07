pub struct Utils;

impl Utils {
    /// Parse an address:port string into a bare IP and port.
    ///
    /// Handles the formats printed by `ss` and `lsof`:
    /// - IPv4: "127.0.0.1:3000", "0.0.0.0:22"
    /// - IPv6: "\[::1]:3000", "\[::ffff:127.0.0.1]:80"
    /// - Zoned: "127.0.0.53%lo:53", "\[fe80::1%eth0]:8080"
    /// - Wildcard: "*:8080", replaced by `wildcard`
    pub fn parse_address(address: &str, wildcard: &str) -> Option<(String, u16)> {
        let (host, port_str) = match address.strip_prefix('[') {
            Some(rest) => {
                let (host, tail) = rest.split_once(']')?;
                (host, tail.strip_prefix(':')?)
            }
            None => address.rsplit_once(':')?,
        };

        let port: u16 = port_str.parse().ok()?;
        let host = host.split_once('%').map_or(host, |(h, _)| h);
        let host = if host.is_empty() || host == "*" {
            wildcard
        } else {
            host
        };
        Some((host.to_string(), port))
    }
}
