//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the three base configs and the templates
//! - Bind the listener only after everything loaded
//! - Record how long each phase took and write it out on request
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal and nothing is served
//! - Phases run in order, not concurrently

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{ServiceConfig, TemplateConfig};
use crate::http::HttpServer;
use crate::ignition::{ConfigLoadError, RoleConfigStore};
use crate::render::{TemplateError, TemplateRenderer};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    ConfigLoad(#[from] ConfigLoadError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write startup profile {}: {source}", path.display())]
    Profile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct PhaseTiming {
    pub phase: &'static str,
    pub duration_us: u128,
}

/// Wall-clock time spent in each startup phase.
#[derive(Debug)]
pub struct StartupProfile {
    started: Instant,
    phases: Vec<PhaseTiming>,
}

#[derive(Serialize)]
struct ProfileReport<'a> {
    total_us: u128,
    phases: &'a [PhaseTiming],
}

impl StartupProfile {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            phases: Vec::new(),
        }
    }

    /// Run `f` and record its duration under `phase`.
    pub fn time<T>(&mut self, phase: &'static str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.record(phase, start.elapsed());
        out
    }

    pub fn record(&mut self, phase: &'static str, elapsed: Duration) {
        self.phases.push(PhaseTiming {
            phase,
            duration_us: elapsed.as_micros(),
        });
    }

    pub fn phases(&self) -> &[PhaseTiming] {
        &self.phases
    }

    pub fn to_json(&self) -> String {
        let report = ProfileReport {
            total_us: self.started.elapsed().as_micros(),
            phases: &self.phases,
        };
        // Only integers and static strings: serialization cannot fail.
        serde_json::to_string_pretty(&report).unwrap_or_default()
    }

    pub fn write(&self, path: &Path) -> Result<(), StartupError> {
        std::fs::write(path, self.to_json()).map_err(|source| StartupError::Profile {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Default for StartupProfile {
    fn default() -> Self {
        Self::new()
    }
}

fn load_renderer(config: &TemplateConfig) -> Result<TemplateRenderer, TemplateError> {
    if config.cache {
        return TemplateRenderer::precompiled(&config.dir);
    }
    if !config.dir.is_dir() {
        tracing::warn!(
            dir = %config.dir.display(),
            "Template directory does not exist; requests will fail until it does"
        );
    }
    Ok(TemplateRenderer::from_dir(&config.dir))
}

/// Load everything the server needs and bind its listener.
pub async fn start(config: ServiceConfig) -> Result<(HttpServer, TcpListener), StartupError> {
    let mut profile = StartupProfile::new();

    let store = profile.time("load_configs", || RoleConfigStore::load(&config.ignition))?;
    let renderer = profile.time("load_templates", || load_renderer(&config.templates))?;

    tracing::info!(
        dir = %renderer.dir().display(),
        cached = renderer.is_cached(),
        "Templates ready"
    );

    let address = config.listener.bind_address();
    let bind_start = Instant::now();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;
    profile.record("bind", bind_start.elapsed());

    if let Some(path) = &config.profiling.output {
        profile.write(path)?;
        tracing::info!(path = %path.display(), "Startup profile written");
    }

    Ok((HttpServer::new(config, store, renderer), listener))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_report() {
        let mut profile = StartupProfile::new();
        let value = profile.time("load_configs", || 7);
        profile.record("bind", Duration::from_micros(42));
        assert_eq!(value, 7);

        let report: serde_json::Value = serde_json::from_str(&profile.to_json()).unwrap();
        let phases = report["phases"].as_array().unwrap();
        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0]["phase"], "load_configs");
        assert_eq!(phases[1]["duration_us"], 42);
        assert!(report["total_us"].is_u64());
    }

    #[tokio::test]
    async fn test_start_fails_before_binding() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ServiceConfig::default();
        config.listener.host = "127.0.0.1".to_string();
        config.listener.port = 0;
        config.ignition.bootstrap = dir.path().join("missing.ign");

        let err = start(config).await.unwrap_err();
        assert!(matches!(err, StartupError::ConfigLoad(ConfigLoadError::Io { .. })));
    }

    #[tokio::test]
    async fn test_cache_mode_requires_templates() {
        let dir = tempfile::tempdir().unwrap();
        let ign = dir.path().join("base.ign");
        std::fs::write(&ign, r#"{"ignition":{"version":"2.2.0"}}"#).unwrap();

        let mut config = ServiceConfig::default();
        config.listener.host = "127.0.0.1".to_string();
        config.listener.port = 0;
        config.ignition.bootstrap = ign.clone();
        config.ignition.master = ign.clone();
        config.ignition.worker = ign;
        config.templates.dir = dir.path().join("no-templates");
        config.templates.cache = true;

        let err = start(config).await.unwrap_err();
        assert!(matches!(err, StartupError::Template(TemplateError::Missing { .. })));
    }
}
