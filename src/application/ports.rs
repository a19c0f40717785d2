//! Traits describing the collaborators the application layer drives.
//!
//! In a browser these are the drawing library, the address bar, the clipboard,
//! the download prompt and the toast area. The binary wires terminal-friendly
//! implementations from `crate::infra`; tests use in-memory fakes.

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::application::toast::Toast;
use crate::domain::drawing::Drawing;

#[derive(Debug, Error)]
pub enum PortError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Unavailable(String),
}

impl PortError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// Failure reported by a drawing backend in either stage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("{0}")]
    Parse(String),
    #[error("{0}")]
    Draw(String),
}

/// External depiction capability: structural parsing and 2-D layout live here.
#[async_trait]
pub trait DrawingBackend: Send + Sync {
    /// Backend-specific parse result handed from `parse` to `draw`.
    type Parsed: Send + 'static;

    async fn parse(&self, smiles: &str) -> Result<Self::Parsed, DrawError>;

    async fn draw(&self, parsed: Self::Parsed) -> Result<Drawing, DrawError>;
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("not found")]
    NotFound,
    #[error("search failed ({status})")]
    Failed { status: u16 },
    #[error("found but no usable data")]
    NoUsableData,
    #[error("network error: {0}")]
    Network(String),
}

/// Maps a free-text compound name to a SMILES string.
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn resolve(&self, name: &str) -> Result<String, LookupError>;
}

/// The page location with replace-state semantics.
pub trait History: Send + Sync {
    fn location(&self) -> Url;

    /// Replace the current entry without navigating or adding a new entry.
    fn replace_state(&self, url: Url);
}

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), PortError>;
}

#[async_trait]
pub trait Downloads: Send + Sync {
    /// Offer `bytes` to the user as a file named `file_name`.
    async fn save(&self, file_name: &str, mime: &str, bytes: Vec<u8>) -> Result<(), PortError>;
}

/// Transient user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: &Toast);
}
