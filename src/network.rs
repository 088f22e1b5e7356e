//! Debug-endpoint paths and feed URL derivation.

use url::Url;

use crate::error::ClientError;

/// WebSocket path of the live data feed.
pub const DATA_FEED_PATH: &str = "/debug/charts/data-feed";

/// HTTP path of the exported history.
pub const DATA_PATH: &str = "/debug/charts/data";

/// Feed URL for the conventional local debug server.
pub const DEFAULT_FEED_URL: &str = "ws://localhost:8088/debug/charts/data-feed";

/// Scheme/host/port of the debug endpoint.
///
/// Parsed once from the HTTP base URL of the instrumented process; both the
/// feed URL (`ws`/`wss`) and the data URL (`http`/`https`) derive from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    scheme: String,
    host: String,
    /// `None` when the port equals the scheme's default (80/443).
    port: Option<u16>,
}

impl Location {
    /// Parse a base URL like `http://localhost:8088` or `https://svc.example.com`.
    ///
    /// Only `http` and `https` schemes are accepted.
    pub fn parse(base_url: &str) -> Result<Self, ClientError> {
        let url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;

        let scheme = url.scheme().to_string();
        if scheme != "http" && scheme != "https" {
            return Err(ClientError::InvalidUrl(format!(
                "unsupported scheme '{scheme}' (expected http or https)"
            )));
        }

        let host = url
            .host_str()
            .ok_or_else(|| ClientError::InvalidUrl(format!("{base_url}: missing host")))?
            .to_string();

        // `Url::port()` is already `None` for the scheme's default port,
        // which is exactly the elision the feed URL wants.
        Ok(Self {
            scheme,
            host,
            port: url.port(),
        })
    }

    /// The WebSocket URL of the live feed: `http` maps to `ws`, `https` to
    /// `wss`, the port is kept only when non-default.
    pub fn feed_url(&self) -> String {
        let ws_scheme = if self.scheme == "https" { "wss" } else { "ws" };
        format!("{}://{}{}{}", ws_scheme, self.host, self.port_part(), DATA_FEED_PATH)
    }

    /// The HTTP URL of the exported history.
    pub fn data_url(&self) -> String {
        format!("{}://{}{}{}", self.scheme, self.host, self.port_part(), DATA_PATH)
    }

    fn port_part(&self) -> String {
        match self.port {
            Some(p) => format!(":{p}"),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_url_http_with_port() {
        let loc = Location::parse("http://localhost:8088").unwrap();
        assert_eq!(loc.feed_url(), "ws://localhost:8088/debug/charts/data-feed");
    }

    #[test]
    fn test_feed_url_https_maps_to_wss() {
        let loc = Location::parse("https://svc.example.com").unwrap();
        assert_eq!(loc.feed_url(), "wss://svc.example.com/debug/charts/data-feed");
    }

    #[test]
    fn test_default_port_elided() {
        let loc = Location::parse("http://example.com:80").unwrap();
        assert_eq!(loc.feed_url(), "ws://example.com/debug/charts/data-feed");

        let loc = Location::parse("https://example.com:443").unwrap();
        assert_eq!(loc.feed_url(), "wss://example.com/debug/charts/data-feed");
    }

    #[test]
    fn test_non_default_port_kept_on_https() {
        let loc = Location::parse("https://example.com:8443").unwrap();
        assert_eq!(loc.feed_url(), "wss://example.com:8443/debug/charts/data-feed");
    }

    #[test]
    fn test_data_url_keeps_http_scheme() {
        let loc = Location::parse("http://localhost:8088").unwrap();
        assert_eq!(loc.data_url(), "http://localhost:8088/debug/charts/data");
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let result = Location::parse("ftp://example.com");
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_rejects_missing_host() {
        let result = Location::parse("http://");
        assert!(result.is_err());
    }
}
