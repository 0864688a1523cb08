//! Inline file embedding.
//!
//! Generated files carry their bytes in the config itself as a base64 data
//! URL (`data:text/plain;charset=utf-8;base64,...`). Decoding the URL gives
//! back exactly the bytes that went in, whatever they are.

use base64::engine::general_purpose;
use base64::Engine;
use thiserror::Error;

use crate::config::FileConfig;
use crate::ignition::{File, FileContents, NodeUser};

const DATA_URL_PREFIX: &str = "data:text/plain;charset=utf-8;base64,";

#[derive(Debug, Error)]
pub enum DataUrlError {
    #[error("not a data URL")]
    NotDataUrl,

    #[error("data URL has no payload separator")]
    MissingComma,

    #[error("only base64 data URLs are supported")]
    NotBase64,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Encode bytes as a base64 data URL.
pub fn encode_data_url(bytes: &[u8]) -> String {
    let mut url = String::with_capacity(DATA_URL_PREFIX.len() + bytes.len().div_ceil(3) * 4);
    url.push_str(DATA_URL_PREFIX);
    general_purpose::STANDARD.encode_string(bytes, &mut url);
    url
}

/// Decode a base64 data URL back into its bytes. Any media type is accepted.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, DataUrlError> {
    let rest = url.strip_prefix("data:").ok_or(DataUrlError::NotDataUrl)?;
    let (header, payload) = rest.split_once(',').ok_or(DataUrlError::MissingComma)?;
    if !header.split(';').any(|param| param.eq_ignore_ascii_case("base64")) {
        return Err(DataUrlError::NotBase64);
    }
    Ok(general_purpose::STANDARD.decode(payload)?)
}

/// Builds Ignition file entries with fixed ownership and mode.
#[derive(Debug, Clone)]
pub struct FileEmbedder {
    filesystem: String,
    owner: String,
    mode: u32,
}

impl FileEmbedder {
    pub fn new(filesystem: impl Into<String>, owner: impl Into<String>, mode: u32) -> Self {
        Self {
            filesystem: filesystem.into(),
            owner: owner.into(),
            mode,
        }
    }

    pub fn from_config(config: &FileConfig) -> Self {
        Self::new(config.filesystem.clone(), config.owner.clone(), config.mode)
    }

    /// Wrap `contents` as a file at `path`.
    pub fn embed(&self, path: impl Into<String>, contents: &[u8]) -> File {
        File {
            filesystem: Some(self.filesystem.clone()),
            path: path.into(),
            user: Some(NodeUser {
                id: None,
                name: Some(self.owner.clone()),
                other: Default::default(),
            }),
            contents: Some(FileContents {
                source: Some(encode_data_url(contents)),
                other: Default::default(),
            }),
            mode: Some(self.mode),
            other: Default::default(),
        }
    }
}

impl Default for FileEmbedder {
    fn default() -> Self {
        Self::from_config(&FileConfig::default())
    }
}
