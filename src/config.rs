// src/config.rs

// dependencies
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_ROOT_DIR: &str = ".";
pub const DEFAULT_PORT: u16 = 7070;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

// struct type which represents configuration for the asset server
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub root_dir: PathBuf,
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            root_dir: PathBuf::from(DEFAULT_ROOT_DIR),
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
        }
    }
}

// methods for the ServerConfig type
impl ServerConfig {
    pub fn with_root_dir(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = root_dir.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    // the socket address the listener binds to
    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_serve_current_dir_on_7070() {
        let config = ServerConfig::default();

        assert_eq!(config.root_dir, PathBuf::from("."));
        assert_eq!(config.port, 7070);
        assert_eq!(config.address().to_string(), "0.0.0.0:7070");
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = ServerConfig::default()
            .with_root_dir("/srv/www")
            .with_port(8080)
            .with_host(IpAddr::V4(Ipv4Addr::LOCALHOST));

        assert_eq!(config.root_dir, PathBuf::from("/srv/www"));
        assert_eq!(config.address().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: ServerConfig = serde_json::from_str(r#"{ "port": 9000 }"#).unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.root_dir, PathBuf::from("."));
        assert_eq!(config.host, DEFAULT_HOST);
    }
}
