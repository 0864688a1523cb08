//! Per-role base configs and the merge that augments them.
//!
//! The store is filled once at startup and never written again. Handlers get
//! a shared reference and ask for an augmented copy; [`RoleConfigStore::augment`]
//! clones the whole document, so the copy's `storage.files` has its own
//! allocation and concurrent requests cannot see each other's additions.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::IgnitionPaths;
use crate::ignition::role::Role;
use crate::ignition::types::{File, IgnitionConfig};

/// Ignition config versions whose `storage.files` layout we understand.
const SUPPORTED_MAJOR: u64 = 2;
const MAX_SUPPORTED_MINOR: u64 = 2;

/// Failure to load one of the base configs. Always fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read {role} config {}: {source}", path.display())]
    Io {
        role: Role,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {role} config {}: {source}", path.display())]
    Parse {
        role: Role,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{role} config {} has unsupported ignition version {version:?}", path.display())]
    UnsupportedVersion {
        role: Role,
        path: PathBuf,
        version: String,
    },
}

/// Read-only holder of the three base configs.
#[derive(Debug, Clone)]
pub struct RoleConfigStore {
    bootstrap: IgnitionConfig,
    master: IgnitionConfig,
    worker: IgnitionConfig,
}

impl RoleConfigStore {
    pub fn new(bootstrap: IgnitionConfig, master: IgnitionConfig, worker: IgnitionConfig) -> Self {
        Self {
            bootstrap,
            master,
            worker,
        }
    }

    /// Load all three base configs. Fails on the first one that cannot be used.
    pub fn load(paths: &IgnitionPaths) -> Result<Self, ConfigLoadError> {
        let bootstrap = load_role(Role::Bootstrap, &paths.bootstrap)?;
        let master = load_role(Role::Master, &paths.master)?;
        let worker = load_role(Role::Worker, &paths.worker)?;
        Ok(Self::new(bootstrap, master, worker))
    }

    /// The stored base config for a role.
    pub fn get(&self, role: Role) -> &IgnitionConfig {
        match role {
            Role::Bootstrap => &self.bootstrap,
            Role::Master => &self.master,
            Role::Worker => &self.worker,
        }
    }

    /// A private copy of the role's config with `files` appended after the
    /// base files, in iteration order. The store itself is left untouched.
    pub fn augment<I>(&self, role: Role, files: I) -> IgnitionConfig
    where
        I: IntoIterator<Item = File>,
    {
        let mut config = self.get(role).clone();
        config.push_files(files);
        config
    }
}

fn load_role(role: Role, path: &Path) -> Result<IgnitionConfig, ConfigLoadError> {
    let data = fs::read(path).map_err(|source| ConfigLoadError::Io {
        role,
        path: path.to_path_buf(),
        source,
    })?;
    let config = IgnitionConfig::from_slice(&data).map_err(|source| ConfigLoadError::Parse {
        role,
        path: path.to_path_buf(),
        source,
    })?;

    if !is_supported_version(&config.ignition.version) {
        return Err(ConfigLoadError::UnsupportedVersion {
            role,
            path: path.to_path_buf(),
            version: config.ignition.version,
        });
    }

    tracing::info!(
        role = %role,
        path = %path.display(),
        version = %config.ignition.version,
        files = config.files().len(),
        "Loaded base config"
    );
    Ok(config)
}

/// Accepts `2.0.x` through `2.2.x`.
fn is_supported_version(version: &str) -> bool {
    let mut parts = version.split('.').map(str::parse::<u64>);
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(Ok(major)), Some(Ok(minor)), Some(Ok(_patch)), None) => {
            major == SUPPORTED_MAJOR && minor <= MAX_SUPPORTED_MINOR
        }
        _ => false,
    }
}
