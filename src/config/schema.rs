//! Configuration schema definitions.
//!
//! This module defines the complete settings structure for the service.
//! All types derive Serde traits for deserialization from a TOML file;
//! command-line flags are layered on top by the binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Paths of the per-role base Ignition configs.
    pub ignition: IgnitionPaths,

    /// Template directory and caching.
    pub templates: TemplateConfig,

    /// Ownership and permissions of generated files.
    pub files: FileConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Startup profile output.
    pub profiling: ProfilingConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Address to bind (e.g., "0.0.0.0").
    pub host: String,

    /// Port to bind. 0 picks an ephemeral port.
    pub port: u16,
}

impl ListenerConfig {
    /// The `host:port` string handed to the TCP listener.
    pub fn bind_address(&self) -> String {
        match self.host.parse::<std::net::IpAddr>() {
            Ok(ip) => SocketAddr::new(ip, self.port).to_string(),
            Err(_) => format!("{}:{}", self.host, self.port),
        }
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Locations of the base Ignition config for each role.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IgnitionPaths {
    pub bootstrap: PathBuf,
    pub master: PathBuf,
    pub worker: PathBuf,
}

impl Default for IgnitionPaths {
    fn default() -> Self {
        Self {
            bootstrap: PathBuf::from("bootstrap.ign"),
            master: PathBuf::from("master.ign"),
            worker: PathBuf::from("worker.ign"),
        }
    }
}

/// Template settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory holding `nic.tmpl`, `bond.tmpl` and `bond-slave.tmpl`.
    pub dir: PathBuf,

    /// Compile templates once at startup instead of on every request.
    /// Only valid while the template files do not change.
    pub cache: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("templates"),
            cache: false,
        }
    }
}

/// Attributes stamped on every generated file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FileConfig {
    /// Ignition filesystem name the file is written to.
    pub filesystem: String,

    /// Owning user name.
    pub owner: String,

    /// Permission bits (write as `0o644` in TOML).
    pub mode: u32,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            filesystem: "root".to_string(),
            owner: "root".to_string(),
            mode: 0o644,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format: "text" or "json".
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

/// Startup profiling output.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProfilingConfig {
    /// Where to write the startup profile, if anywhere.
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.listener.port, 8080);
        assert_eq!(config.files.mode, 0o644);
        assert_eq!(config.files.owner, "root");
        assert_eq!(config.ignition.master, PathBuf::from("master.ign"));
        assert!(!config.templates.cache);
        assert!(config.profiling.output.is_none());
    }

    #[test]
    fn test_omitted_sections_use_defaults() {
        let config: ServiceConfig = toml::from_str("[listener]\nport = 9000\n").unwrap();
        assert_eq!(config.listener.port, 9000);
        assert_eq!(config.listener.host, "0.0.0.0");
        assert!(config.profiling.output.is_none());
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn test_bind_address() {
        let mut listener = ListenerConfig::default();
        assert_eq!(listener.bind_address(), "0.0.0.0:8080");

        listener.host = "::1".to_string();
        listener.port = 9000;
        assert_eq!(listener.bind_address(), "[::1]:9000");

        listener.host = "localhost".to_string();
        assert_eq!(listener.bind_address(), "localhost:9000");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [listener]
            port = 9090

            [files]
            mode = 0o600
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.port, 9090);
        assert_eq!(config.listener.host, "0.0.0.0");
        assert_eq!(config.files.mode, 0o600);
        assert_eq!(config.files.owner, "root");
        assert_eq!(config.templates.dir, PathBuf::from("templates"));
    }
}
