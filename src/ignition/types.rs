//! Ignition config document model.
//!
//! Only the parts this service touches are typed: the version header and the
//! `storage.files` list. Every other key, at any of those levels, is carried
//! in a flattened map so a base config serializes back without losing
//! directives we do not understand.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A complete Ignition config document.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct IgnitionConfig {
    pub ignition: IgnitionMeta,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<Storage>,

    /// systemd, passwd, networkd and anything else.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl IgnitionConfig {
    /// Parse a config document from raw JSON bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }

    /// Files declared in `storage.files`, in document order.
    pub fn files(&self) -> &[File] {
        self.storage
            .as_ref()
            .and_then(|storage| storage.files.as_deref())
            .unwrap_or_default()
    }

    /// Append to `storage.files`, creating the section and list if absent.
    pub fn push_files<I>(&mut self, files: I)
    where
        I: IntoIterator<Item = File>,
    {
        self.storage
            .get_or_insert_with(Storage::default)
            .files
            .get_or_insert_with(Vec::new)
            .extend(files);
    }
}

/// The `ignition` header section.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct IgnitionMeta {
    pub version: String,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// The `storage` section.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Storage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<File>>,

    /// disks, raid, filesystems, directories, links.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// A file entry under `storage.files`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct File {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filesystem: Option<String>,

    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<NodeUser>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<FileContents>,

    /// Permission bits. JSON carries the decimal value (0o644 is 420).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<u32>,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Owner of a file node.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct NodeUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Where a file's bytes come from.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct FileContents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// compression, verification, http headers.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_directives_survive() {
        let doc = json!({
            "ignition": { "version": "2.2.0", "config": { "append": [] } },
            "passwd": { "users": [{ "name": "core", "sshAuthorizedKeys": ["ssh-ed25519 AAAA"] }] },
            "storage": {
                "disks": [{ "device": "/dev/sda" }],
                "files": [{
                    "filesystem": "root",
                    "path": "/etc/motd",
                    "contents": { "source": "data:,hi", "verification": {} },
                    "mode": 420,
                    "overwrite": true
                }, {
                    "path": "/etc/empty",
                    "contents": { "source": "" },
                    "user": { "name": "core", "extra": 1 }
                }]
            },
            "systemd": { "units": [{ "name": "kubelet.service", "enabled": true }] }
        });

        let config: IgnitionConfig = serde_json::from_value(doc.clone()).unwrap();
        assert_eq!(config.ignition.version, "2.2.0");
        assert_eq!(config.files().len(), 2);
        assert_eq!(config.files()[0].mode, Some(420));
        assert_eq!(config.files()[0].other["overwrite"], json!(true));
        assert_eq!(config.files()[1].user.as_ref().unwrap().other["extra"], json!(1));

        let back = serde_json::to_value(&config).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_minimal_config() {
        let config = IgnitionConfig::from_slice(br#"{"ignition":{"version":"2.2.0"}}"#).unwrap();
        assert!(config.files().is_empty());
        assert!(config.other.is_empty());
        assert_eq!(
            serde_json::to_string(&config).unwrap(),
            r#"{"ignition":{"version":"2.2.0"}}"#
        );
    }

    #[test]
    fn test_empty_storage_survives() {
        for doc in [
            json!({ "ignition": { "version": "2.2.0" }, "storage": {} }),
            json!({ "ignition": { "version": "2.2.0" }, "storage": { "files": [] } }),
        ] {
            let config: IgnitionConfig = serde_json::from_value(doc.clone()).unwrap();
            assert!(config.files().is_empty());
            assert_eq!(serde_json::to_value(&config).unwrap(), doc);
        }
    }

    #[test]
    fn test_push_files_creates_storage() {
        let mut config = IgnitionConfig::from_slice(br#"{"ignition":{"version":"2.2.0"}}"#).unwrap();
        config.push_files([File {
            filesystem: None,
            path: "/etc/x".to_string(),
            user: None,
            contents: None,
            mode: None,
            other: Map::new(),
        }]);
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({ "ignition": { "version": "2.2.0" }, "storage": { "files": [{ "path": "/etc/x" }] } })
        );
    }

    #[test]
    fn test_missing_version_is_rejected() {
        assert!(IgnitionConfig::from_slice(br#"{"ignition":{}}"#).is_err());
        assert!(IgnitionConfig::from_slice(b"not json").is_err());
    }
}
