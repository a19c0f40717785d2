use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::application::ports::{Clipboard, PortError};

/// Terminal clipboard: copied text goes to stdout or replaces a file's contents.
#[derive(Debug, Clone)]
pub enum TerminalClipboard {
    Stdout,
    File(PathBuf),
}

impl TerminalClipboard {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }
}

#[async_trait]
impl Clipboard for TerminalClipboard {
    async fn write_text(&self, text: &str) -> Result<(), PortError> {
        match self {
            TerminalClipboard::Stdout => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(text.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
            TerminalClipboard::File(path) => {
                tokio::fs::write(path, text.as_bytes()).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_clipboard_keeps_only_latest_text() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("clipboard.txt");
        let clipboard = TerminalClipboard::from_path(Some(path.clone()));

        clipboard.write_text("first").await.expect("write");
        clipboard.write_text("second").await.expect("write");

        assert_eq!(std::fs::read_to_string(path).expect("read"), "second");
    }

    #[tokio::test]
    async fn missing_parent_directory_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let clipboard =
            TerminalClipboard::from_path(Some(dir.path().join("missing").join("clip.txt")));

        assert!(matches!(
            clipboard.write_text("x").await,
            Err(PortError::Io(_))
        ));
    }
}
