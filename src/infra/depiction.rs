//! HTTP depiction services standing in for an in-process drawing library.
//!
//! `parse` performs the round-trip (the service rejects bad SMILES with a
//! non-success status); `draw` classifies the returned bytes.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::http::join_segments;
use crate::application::export::{ensure_namespace, svg_dimensions};
use crate::application::ports::{DrawError, DrawingBackend};
use crate::config::{DepictionProvider, DepictionSettings};
use crate::domain::drawing::Drawing;

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const MAX_REASON_CHARS: usize = 200;

/// Raw service response for one SMILES string.
#[derive(Debug)]
pub struct DepictionBody {
    bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct HttpDepictionBackend {
    client: Client,
    provider: DepictionProvider,
    base: Url,
    width: u32,
    height: u32,
}

impl HttpDepictionBackend {
    pub fn new(client: Client, settings: &DepictionSettings) -> Self {
        Self {
            client,
            provider: settings.provider,
            base: settings.base_url.clone(),
            width: settings.width.get(),
            height: settings.height.get(),
        }
    }

    fn request_url(&self, smiles: &str) -> Result<Url, DrawError> {
        let mut url = match self.provider {
            DepictionProvider::PubChem => join_segments(&self.base, &["compound", "smiles", "PNG"]),
            DepictionProvider::CdkDepict => join_segments(&self.base, &["depict", "bow", "svg"]),
        }
        .map_err(DrawError::Parse)?;

        {
            let mut query = url.query_pairs_mut();
            match self.provider {
                DepictionProvider::PubChem => {
                    query
                        .append_pair("smiles", smiles)
                        .append_pair("image_size", &format!("{}x{}", self.width, self.height));
                }
                DepictionProvider::CdkDepict => {
                    query
                        .append_pair("smi", smiles)
                        .append_pair("w", &self.width.to_string())
                        .append_pair("h", &self.height.to_string());
                }
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl DrawingBackend for HttpDepictionBackend {
    type Parsed = DepictionBody;

    async fn parse(&self, smiles: &str) -> Result<DepictionBody, DrawError> {
        let url = self.request_url(smiles)?;
        let started_at = Instant::now();

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| DrawError::Parse(format!("depiction service unreachable: {err}")))?;
        let status = response.status();

        debug!(
            target = "infra::depiction",
            op = "depiction::fetch",
            provider = self.provider.as_str(),
            status = status.as_u16(),
            elapsed_ms = started_at.elapsed().as_millis() as u64,
            "Depiction service responded"
        );

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(DrawError::Parse(rejection_reason(status.as_u16(), &text)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| DrawError::Parse(format!("failed to read depiction: {err}")))?;
        Ok(DepictionBody {
            bytes: bytes.to_vec(),
        })
    }

    async fn draw(&self, parsed: DepictionBody) -> Result<Drawing, DrawError> {
        classify(parsed.bytes)
    }
}

fn rejection_reason(status: u16, text: &str) -> String {
    let detail: String = text.trim().chars().take(MAX_REASON_CHARS).collect();
    if detail.is_empty() {
        format!("depiction service returned {status}")
    } else {
        format!("depiction service returned {status}: {detail}")
    }
}

fn classify(bytes: Vec<u8>) -> Result<Drawing, DrawError> {
    if bytes.starts_with(PNG_SIGNATURE) {
        let size = imagesize::blob_size(&bytes)
            .map_err(|err| DrawError::Draw(format!("unreadable PNG depiction: {err}")))?;
        let width = u32::try_from(size.width)
            .map_err(|_| DrawError::Draw("PNG depiction too wide".into()))?;
        let height = u32::try_from(size.height)
            .map_err(|_| DrawError::Draw("PNG depiction too tall".into()))?;
        return Ok(Drawing::Raster {
            png: bytes,
            width,
            height,
        });
    }

    let text = String::from_utf8(bytes)
        .map_err(|_| DrawError::Draw("depiction is neither PNG nor SVG".into()))?;
    if !text.contains("<svg") {
        return Err(DrawError::Draw("depiction is neither PNG nor SVG".into()));
    }
    let svg = ensure_namespace(&text);
    let (width, height) =
        svg_dimensions(&svg).map_err(|err| DrawError::Draw(format!("unreadable SVG depiction: {err}")))?;
    Ok(Drawing::Vector { svg, width, height })
}
