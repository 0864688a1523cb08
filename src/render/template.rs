//! Template rendering.
//!
//! # Responsibilities
//! - Map a template identifier to its file in the template directory
//! - Render any serializable struct into the template's bytes
//! - Report missing files, bad syntax and undefined fields as `TemplateError`
//!
//! # Design Decisions
//! - Default mode reads (through `tokio::fs`) and compiles the template on
//!   every call, so edits on disk are picked up without a restart
//! - `precompiled` loads all templates once; the files must not change after
//! - Field references are checked at render time: an undefined variable is an
//!   error, never an empty substitution

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

/// The templates the service knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Nic,
    Bond,
    BondSlave,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] = [TemplateKind::Nic, TemplateKind::Bond, TemplateKind::BondSlave];

    pub fn file_name(self) -> &'static str {
        match self {
            TemplateKind::Nic => "nic.tmpl",
            TemplateKind::Bond => "bond.tmpl",
            TemplateKind::BondSlave => "bond-slave.tmpl",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template {} could not be read: {source}", path.display())]
    Missing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template {kind} has invalid syntax: {}", describe(source))]
    Syntax {
        kind: TemplateKind,
        #[source]
        source: tera::Error,
    },

    #[error("template {kind} failed to render: {}", describe(source))]
    Render {
        kind: TemplateKind,
        #[source]
        source: tera::Error,
    },
}

/// Tera's top-level message is generic ("Failed to render 'x'"); the useful
/// part is further down the source chain.
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut current = std::error::Error::source(err);
    while let Some(cause) = current {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        current = cause.source();
    }
    message
}

/// Renders the interface templates from a directory.
#[derive(Debug)]
pub struct TemplateRenderer {
    dir: PathBuf,
    cache: Option<Tera>,
}

impl TemplateRenderer {
    /// A renderer that re-reads each template on every render.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: None,
        }
    }

    /// A renderer with all templates compiled up front.
    pub fn precompiled(dir: impl Into<PathBuf>) -> Result<Self, TemplateError> {
        let dir = dir.into();
        let mut tera = Tera::default();
        for kind in TemplateKind::ALL {
            let source = read_template(&dir, kind)?;
            tera.add_raw_template(kind.file_name(), &source)
                .map_err(|source| TemplateError::Syntax { kind, source })?;
        }
        tracing::debug!(dir = %dir.display(), "Templates precompiled");
        Ok(Self {
            dir,
            cache: Some(tera),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Render `kind` with the fields of `data`.
    pub async fn render<T: Serialize>(&self, kind: TemplateKind, data: &T) -> Result<Vec<u8>, TemplateError> {
        let context = Context::from_serialize(data).map_err(|source| TemplateError::Render { kind, source })?;

        let rendered = match &self.cache {
            Some(tera) => tera.render(kind.file_name(), &context),
            None => {
                let path = self.dir.join(kind.file_name());
                let source = tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|source| TemplateError::Missing { path, source })?;
                let mut tera = Tera::default();
                tera.add_raw_template(kind.file_name(), &source)
                    .map_err(|source| TemplateError::Syntax { kind, source })?;
                tera.render(kind.file_name(), &context)
            }
        };

        rendered
            .map(String::into_bytes)
            .map_err(|source| TemplateError::Render { kind, source })
    }
}

fn read_template(dir: &Path, kind: TemplateKind) -> Result<String, TemplateError> {
    let path = dir.join(kind.file_name());
    fs::read_to_string(&path).map_err(|source| TemplateError::Missing { path, source })
}
