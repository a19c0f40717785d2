use askama::{Error as AskamaError, Template};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to render template `{template}`")]
pub struct TemplateRenderError {
    pub(crate) template: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(template: &'static str, error: AskamaError) -> Self {
        Self { template, error }
    }
}

/// Standalone SVG document embedding raster depiction output.
#[derive(Template)]
#[template(path = "export/raster_wrapper.svg", escape = "html")]
pub struct RasterWrapperTemplate<'a> {
    pub title: &'a str,
    pub width: u32,
    pub height: u32,
    pub png_base64: &'a str,
}

/// `<img>` tag carrying an SVG document, optionally linked to the share URL.
#[derive(Template)]
#[template(path = "export/embed_snippet.html")]
pub struct EmbedSnippetTemplate<'a> {
    pub link: Option<&'a str>,
    pub alt: &'a str,
    pub width: u32,
    pub height: u32,
    pub svg_base64: &'a str,
}

pub fn render_template<T: Template>(
    template: &T,
    name: &'static str,
) -> Result<String, TemplateRenderError> {
    template
        .render()
        .map_err(|err| TemplateRenderError::new(name, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_wrapper_escapes_title() {
        let svg = render_template(
            &RasterWrapperTemplate {
                title: "Tom & <Jerry>",
                width: 12,
                height: 8,
                png_base64: "iVBORw0KGgo=",
            },
            "raster_wrapper",
        )
        .expect("render");

        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("<title>Tom &amp; &lt;Jerry&gt;</title>"), "{svg}");
        assert!(svg.contains("href=\"data:image/png;base64,iVBORw0KGgo=\""));
        assert!(svg.contains("viewBox=\"0 0 12 8\""));
    }

    #[test]
    fn embed_snippet_wraps_link_only_when_present() {
        let linked = render_template(
            &EmbedSnippetTemplate {
                link: Some("http://localhost/?smiles=O&name=Water"),
                alt: "Water",
                width: 500,
                height: 500,
                svg_base64: "PHN2Zy8+",
            },
            "embed_snippet",
        )
        .expect("render");
        assert!(linked.starts_with("<a href=\"http://localhost/?smiles=O&amp;name=Water\""));
        assert!(linked.trim_end().ends_with("</a>"));

        let bare = render_template(
            &EmbedSnippetTemplate {
                link: None,
                alt: "Water",
                width: 500,
                height: 500,
                svg_base64: "PHN2Zy8+",
            },
            "embed_snippet",
        )
        .expect("render");
        assert!(bare.starts_with("<img src=\"data:image/svg+xml;base64,PHN2Zy8+\""));
        assert!(!bare.contains("<a "));
    }
}
