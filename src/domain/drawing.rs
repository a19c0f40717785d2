//! Rendered output and the surface it is shown on.

use std::fmt;

/// Output produced by the depiction backend for one molecule.
#[derive(Clone, PartialEq, Eq)]
pub enum Drawing {
    /// A standalone SVG document.
    Vector {
        svg: String,
        width: u32,
        height: u32,
    },
    /// PNG-encoded pixels.
    Raster {
        png: Vec<u8>,
        width: u32,
        height: u32,
    },
}

impl Drawing {
    pub fn width(&self) -> u32 {
        match self {
            Drawing::Vector { width, .. } | Drawing::Raster { width, .. } => *width,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Drawing::Vector { height, .. } | Drawing::Raster { height, .. } => *height,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Drawing::Vector { .. } => "vector",
            Drawing::Raster { .. } => "raster",
        }
    }
}

impl fmt::Debug for Drawing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Drawing::Vector { svg, width, height } => f
                .debug_struct("Vector")
                .field("svg_bytes", &svg.len())
                .field("width", width)
                .field("height", height)
                .finish(),
            Drawing::Raster { png, width, height } => f
                .debug_struct("Raster")
                .field("png_bytes", &png.len())
                .field("width", width)
                .field("height", height)
                .finish(),
        }
    }
}

/// The drawing area of the page. Holds at most one drawing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Surface {
    content: Option<Drawing>,
}

impl Surface {
    pub fn new() -> Self {
        Self { content: None }
    }

    pub fn clear(&mut self) {
        self.content = None;
    }

    pub fn show(&mut self, drawing: Drawing) {
        self.content = Some(drawing);
    }

    pub fn content(&self) -> Option<&Drawing> {
        self.content.as_ref()
    }

    pub fn is_blank(&self) -> bool {
        self.content.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_clear_drops_previous_drawing() {
        let mut surface = Surface::new();
        surface.show(Drawing::Vector {
            svg: "<svg/>".into(),
            width: 10,
            height: 10,
        });
        assert!(!surface.is_blank());

        surface.clear();
        assert!(surface.is_blank());
    }

    #[test]
    fn debug_output_omits_payload() {
        let drawing = Drawing::Raster {
            png: vec![0; 64],
            width: 8,
            height: 2,
        };
        let rendered = format!("{drawing:?}");
        assert!(rendered.contains("png_bytes: 64"), "{rendered}");
    }
}
