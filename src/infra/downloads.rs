use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{Downloads, PortError};

/// Saves "downloads" as files inside one output directory.
#[derive(Debug, Clone)]
pub struct DirectoryDownloads {
    root: PathBuf,
}

impl DirectoryDownloads {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl Downloads for DirectoryDownloads {
    async fn save(&self, file_name: &str, mime: &str, bytes: Vec<u8>) -> Result<(), PortError> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) || file_name.starts_with('.') {
            return Err(PortError::unavailable(format!(
                "refusing to write `{file_name}` outside the output directory"
            )));
        }

        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.root.join(file_name);
        tokio::fs::write(&path, &bytes).await?;

        debug!(
            target = "infra::downloads",
            op = "downloads::save",
            path = %path.display(),
            mime,
            bytes = bytes.len(),
            "Saved download"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saves_into_created_output_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let downloads = DirectoryDownloads::new(dir.path().join("out"));

        downloads
            .save("benzene.svg", "image/svg+xml", b"<svg/>".to_vec())
            .await
            .expect("saved");

        let written = std::fs::read(dir.path().join("out").join("benzene.svg")).expect("read");
        assert_eq!(written, b"<svg/>");
    }

    #[tokio::test]
    async fn rejects_path_like_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        let downloads = DirectoryDownloads::new(dir.path());

        assert!(
            downloads
                .save("../escape.png", "image/png", Vec::new())
                .await
                .is_err()
        );
    }
}
