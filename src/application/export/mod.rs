//! Export and share actions over the last trusted render snapshot.
//!
//! Every action performs one side effect through a port and raises exactly one
//! toast. Failures are reported as error toasts; the snapshot is only read.

mod document;
mod raster;

use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use tracing::{info, warn};

use crate::application::ports::{Clipboard, Downloads, Notifier, PortError};
use crate::application::toast::Toast;
use crate::application::url_sync::UrlSynchronizer;
use crate::domain::slug::export_file_name;
use crate::domain::snapshot::RenderSnapshot;
use crate::presentation::views::TemplateRenderError;

pub use document::{embed_snippet, ensure_namespace, svg_document};
pub use raster::{png_on_white, svg_dimensions};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("rasterization failed: {0}")]
    Raster(String),
    #[error(transparent)]
    Template(#[from] TemplateRenderError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Wrap embed snippets in a link to the share URL.
    pub embed_link: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { embed_link: true }
    }
}

#[derive(Clone)]
pub struct ExportService {
    url_sync: UrlSynchronizer,
    clipboard: Arc<dyn Clipboard>,
    downloads: Arc<dyn Downloads>,
    notifier: Arc<dyn Notifier>,
    options: ExportOptions,
}

impl ExportService {
    pub fn new(
        url_sync: UrlSynchronizer,
        clipboard: Arc<dyn Clipboard>,
        downloads: Arc<dyn Downloads>,
        notifier: Arc<dyn Notifier>,
        options: ExportOptions,
    ) -> Self {
        Self {
            url_sync,
            clipboard,
            downloads,
            notifier,
            options,
        }
    }

    pub async fn download_png(&self, snapshot: &RenderSnapshot) -> Toast {
        let file_name = export_file_name(snapshot.display_name.as_deref(), "png");
        let toast = match png_on_white(&snapshot.drawing) {
            Ok(bytes) => {
                let size = bytes.len();
                match self.downloads.save(&file_name, "image/png", bytes).await {
                    Ok(()) => {
                        self.log_success("png", &file_name, size);
                        Toast::success("PNG downloaded!")
                    }
                    Err(err) => self.save_failed("png", &file_name, &err),
                }
            }
            Err(err) => {
                self.log_failure("png", &err);
                Toast::error(format!("Could not export PNG: {err}"))
            }
        };
        self.finish("png", toast)
    }

    pub async fn download_svg(&self, snapshot: &RenderSnapshot) -> Toast {
        let file_name = export_file_name(snapshot.display_name.as_deref(), "svg");
        let toast = match svg_document(snapshot) {
            Ok(svg) => {
                let size = svg.len();
                match self
                    .downloads
                    .save(&file_name, "image/svg+xml", svg.into_bytes())
                    .await
                {
                    Ok(()) => {
                        self.log_success("svg", &file_name, size);
                        Toast::success("SVG downloaded!")
                    }
                    Err(err) => self.save_failed("svg", &file_name, &err),
                }
            }
            Err(err) => {
                self.log_failure("svg", &err);
                Toast::error(format!("Could not export SVG: {err}"))
            }
        };
        self.finish("svg", toast)
    }

    pub async fn copy_svg_text(&self, snapshot: &RenderSnapshot) -> Toast {
        let toast = match svg_document(snapshot) {
            Ok(svg) => self.copy("copy_svg", &svg, "SVG copied!").await,
            Err(err) => {
                self.log_failure("copy_svg", &err);
                Toast::error(format!("Could not export SVG: {err}"))
            }
        };
        self.finish("copy_svg", toast)
    }

    pub async fn copy_embed_snippet(&self, snapshot: &RenderSnapshot) -> Toast {
        let link = self
            .options
            .embed_link
            .then(|| self.url_sync.share_url(snapshot));
        let toast = match embed_snippet(snapshot, link.as_ref()) {
            Ok(html) => self.copy("copy_embed", &html, "Embed snippet copied!").await,
            Err(err) => {
                self.log_failure("copy_embed", &err);
                Toast::error(format!("Could not build embed snippet: {err}"))
            }
        };
        self.finish("copy_embed", toast)
    }

    pub async fn copy_share_url(&self, snapshot: &RenderSnapshot) -> Toast {
        let url = self.url_sync.share_url(snapshot);
        let toast = self.copy("copy_url", url.as_str(), "URL copied!").await;
        self.finish("copy_url", toast)
    }

    async fn copy(&self, kind: &'static str, text: &str, confirmation: &str) -> Toast {
        match self.clipboard.write_text(text).await {
            Ok(()) => {
                info!(
                    target = "application::export",
                    op = "export::copy",
                    result = "ok",
                    kind,
                    chars = text.chars().count(),
                    "Copied to clipboard"
                );
                Toast::success(confirmation)
            }
            Err(err) => {
                warn!(
                    target = "application::export",
                    op = "export::copy",
                    result = "error",
                    kind,
                    error = %err,
                    "Clipboard write failed"
                );
                Toast::error(format!("Could not copy to clipboard: {err}"))
            }
        }
    }

    fn save_failed(&self, kind: &'static str, file_name: &str, err: &PortError) -> Toast {
        warn!(
            target = "application::export",
            op = "export::download",
            result = "error",
            kind,
            file_name,
            error = %err,
            "Saving export failed"
        );
        Toast::error(format!("Could not save file: {err}"))
    }

    fn log_success(&self, kind: &'static str, file_name: &str, bytes: usize) {
        info!(
            target = "application::export",
            op = "export::download",
            result = "ok",
            kind,
            file_name,
            bytes,
            "Export saved"
        );
    }

    fn log_failure(&self, kind: &'static str, err: &ExportError) {
        warn!(
            target = "application::export",
            op = "export::build",
            result = "error",
            kind,
            error = %err,
            "Export artifact could not be built"
        );
    }

    fn finish(&self, kind: &'static str, toast: Toast) -> Toast {
        counter!(
            "chemsketch_export_total",
            "kind" => kind,
            "result" => toast.kind.as_str()
        )
        .increment(1);
        self.notifier.notify(&toast);
        toast
    }
}
