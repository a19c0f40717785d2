//! Standalone SVG documents and embed snippets built from a snapshot.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use url::Url;

use super::ExportError;
use crate::domain::drawing::Drawing;
use crate::domain::snapshot::RenderSnapshot;
use crate::presentation::views::{EmbedSnippetTemplate, RasterWrapperTemplate, render_template};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Serialize the snapshot's drawing as a complete SVG document.
///
/// Vector output is passed through with its namespace guaranteed; raster
/// output is wrapped in an `<image>` element at native size.
pub fn svg_document(snapshot: &RenderSnapshot) -> Result<String, ExportError> {
    match &snapshot.drawing {
        Drawing::Vector { svg, .. } => Ok(ensure_namespace(svg)),
        Drawing::Raster { png, width, height } => {
            let encoded = BASE64.encode(png);
            let document = render_template(
                &RasterWrapperTemplate {
                    title: snapshot.title(),
                    width: *width,
                    height: *height,
                    png_base64: &encoded,
                },
                "export/raster_wrapper.svg",
            )?;
            Ok(document)
        }
    }
}

/// Self-contained `<img>` tag carrying the SVG document inline.
pub fn embed_snippet(snapshot: &RenderSnapshot, link: Option<&Url>) -> Result<String, ExportError> {
    let document = svg_document(snapshot)?;
    let encoded = BASE64.encode(document.as_bytes());
    let snippet = render_template(
        &EmbedSnippetTemplate {
            link: link.map(Url::as_str),
            alt: snapshot.title(),
            width: snapshot.drawing.width(),
            height: snapshot.drawing.height(),
            svg_base64: &encoded,
        },
        "export/embed_snippet.html",
    )?;
    Ok(snippet.trim().to_string())
}

/// Add the SVG namespace to the root element when it is missing.
pub fn ensure_namespace(svg: &str) -> String {
    let Some(start) = svg.find("<svg") else {
        return svg.to_string();
    };
    let tag_end = svg[start..].find('>').map_or(svg.len(), |offset| start + offset);
    if svg[start..tag_end].contains("xmlns=") {
        return svg.to_string();
    }

    let insert_at = start + "<svg".len();
    let mut out = String::with_capacity(svg.len() + SVG_NAMESPACE.len() + 10);
    out.push_str(&svg[..insert_at]);
    out.push_str(" xmlns=\"");
    out.push_str(SVG_NAMESPACE);
    out.push('"');
    out.push_str(&svg[insert_at..]);
    out
}
