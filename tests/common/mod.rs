//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::TempDir;

use ignition_staticnet::config::ServiceConfig;
use ignition_staticnet::lifecycle::{self, Shutdown};
use ignition_staticnet::render::decode_data_url;
use ignition_staticnet::Role;

/// Number of files in each role's base config.
#[allow(dead_code)]
pub fn base_file_count(role: Role) -> usize {
    match role {
        Role::Bootstrap => 1,
        Role::Master => 2,
        Role::Worker => 3,
    }
}

/// A base config with a role-specific number of files and some directives
/// the service does not model.
pub fn base_config(role: Role) -> Value {
    let files: Vec<Value> = (0..base_file_count(role))
        .map(|i| {
            json!({
                "filesystem": "root",
                "path": format!("/etc/{}/file{}", role, i),
                "contents": { "source": "data:,base", "verification": {} },
                "mode": 420
            })
        })
        .collect();

    json!({
        "ignition": { "version": "2.2.0", "config": {} },
        "passwd": { "users": [{ "name": "core", "sshAuthorizedKeys": ["ssh-ed25519 AAAAtest"] }] },
        "storage": { "files": files },
        "systemd": { "units": [{ "name": format!("{}.service", role), "enabled": true }] }
    })
}

/// Template directory shipped with the crate.
pub fn crate_templates() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates")
}

/// A running server; shut down when dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
    _dir: TempDir,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a server on an ephemeral port using the crate's templates.
#[allow(dead_code)]
pub async fn spawn_server() -> TestServer {
    spawn_server_with_templates(&crate_templates()).await
}

/// Start a server on an ephemeral port using templates from `templates`.
pub async fn spawn_server_with_templates(templates: &Path) -> TestServer {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ServiceConfig::default();
    config.listener.host = "127.0.0.1".to_string();
    config.listener.port = 0;
    config.templates.dir = templates.to_path_buf();

    for role in Role::ALL {
        let path = dir.path().join(format!("{}.ign", role));
        std::fs::write(&path, serde_json::to_vec(&base_config(role)).unwrap()).unwrap();
        match role {
            Role::Bootstrap => config.ignition.bootstrap = path,
            Role::Master => config.ignition.master = path,
            Role::Worker => config.ignition.worker = path,
        }
    }

    let (server, listener) = lifecycle::start(config).await.expect("server should start");
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer {
        addr,
        shutdown,
        _dir: dir,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// `storage.files` of a response document.
#[allow(dead_code)]
pub fn files(doc: &Value) -> &Vec<Value> {
    doc["storage"]["files"].as_array().expect("storage.files should be an array")
}

/// Decoded contents of a file entry.
#[allow(dead_code)]
pub fn file_text(file: &Value) -> String {
    let source = file["contents"]["source"].as_str().expect("file should have a source");
    String::from_utf8(decode_data_url(source).unwrap()).unwrap()
}
