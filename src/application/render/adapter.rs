//! Bridge between the controller and an external drawing backend.
//!
//! The backend runs on its own task; the join handle is the single completion
//! signal, so every call resolves exactly once even when the backend panics.

use std::{sync::Arc, time::Instant};

use async_trait::async_trait;
use tokio::task::JoinError;
use tracing::{debug, warn};

use crate::application::ports::{DrawError, DrawingBackend};
use crate::domain::drawing::{Drawing, Surface};

/// Normalized view of a drawing backend used by the controller.
#[async_trait]
pub trait MoleculeRenderer: Send + Sync {
    /// Draw `smiles` onto `surface`. The surface is cleared first; on failure
    /// it stays blank and the returned reason describes the failure.
    async fn draw(&self, smiles: &str, surface: &mut Surface) -> Result<Drawing, String>;
}

pub struct RendererAdapter<B> {
    backend: Arc<B>,
}

impl<B> RendererAdapter<B>
where
    B: DrawingBackend + 'static,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    async fn parse_then_draw(&self, smiles: &str) -> Result<Drawing, DrawError> {
        let backend = Arc::clone(&self.backend);
        let owned = smiles.to_string();
        let handle = tokio::spawn(async move {
            let parsed = backend.parse(&owned).await?;
            backend.draw(parsed).await
        });

        handle.await.unwrap_or_else(|err| Err(join_failure(err)))
    }
}

#[async_trait]
impl<B> MoleculeRenderer for RendererAdapter<B>
where
    B: DrawingBackend + 'static,
{
    async fn draw(&self, smiles: &str, surface: &mut Surface) -> Result<Drawing, String> {
        surface.clear();
        let started_at = Instant::now();

        match self.parse_then_draw(smiles).await {
            Ok(drawing) => {
                debug!(
                    target = "application::render::adapter",
                    op = "adapter::draw",
                    result = "ok",
                    kind = drawing.kind(),
                    width = drawing.width(),
                    height = drawing.height(),
                    elapsed_ms = started_at.elapsed().as_millis() as u64,
                    "Molecule drawn"
                );
                surface.show(drawing.clone());
                Ok(drawing)
            }
            Err(err) => {
                let stage = match &err {
                    DrawError::Parse(_) => "parse",
                    DrawError::Draw(_) => "draw",
                };
                warn!(
                    target = "application::render::adapter",
                    op = "adapter::draw",
                    result = "error",
                    stage,
                    elapsed_ms = started_at.elapsed().as_millis() as u64,
                    error = %err,
                    "Molecule could not be drawn"
                );
                Err(err.to_string())
            }
        }
    }
}

fn join_failure(err: JoinError) -> DrawError {
    if err.is_panic() {
        let payload = err.into_panic();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "drawing backend panicked".to_string());
        DrawError::Draw(message)
    } else {
        DrawError::Draw("drawing task was cancelled".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedBackend;

    #[async_trait]
    impl DrawingBackend for ScriptedBackend {
        type Parsed = String;

        async fn parse(&self, smiles: &str) -> Result<String, DrawError> {
            match smiles {
                "bad" => Err(DrawError::Parse("unexpected character at 0".into())),
                _ => Ok(smiles.to_string()),
            }
        }

        async fn draw(&self, parsed: String) -> Result<Drawing, DrawError> {
            match parsed.as_str() {
                "panic" => panic!("layout exploded"),
                "undrawable" => Err(DrawError::Draw("ring closure left open".into())),
                _ => Ok(Drawing::Vector {
                    svg: format!("<svg><title>{parsed}</title></svg>"),
                    width: 100,
                    height: 80,
                }),
            }
        }
    }

    fn adapter() -> RendererAdapter<ScriptedBackend> {
        RendererAdapter::new(Arc::new(ScriptedBackend))
    }

    fn stale_surface() -> Surface {
        let mut surface = Surface::new();
        surface.show(Drawing::Vector {
            svg: "<svg>stale</svg>".into(),
            width: 1,
            height: 1,
        });
        surface
    }

    #[tokio::test]
    async fn success_shows_drawing_on_surface() {
        let mut surface = stale_surface();
        let drawing = adapter().draw("CCO", &mut surface).await.expect("drawn");
        assert_eq!(surface.content(), Some(&drawing));
        assert_eq!(drawing.width(), 100);
    }

    #[tokio::test]
    async fn parse_failure_leaves_surface_blank() {
        let mut surface = stale_surface();
        let reason = adapter().draw("bad", &mut surface).await.expect_err("fails");
        assert_eq!(reason, "unexpected character at 0");
        assert!(surface.is_blank());
    }

    #[tokio::test]
    async fn draw_failure_is_normalized() {
        let mut surface = Surface::new();
        let reason = adapter()
            .draw("undrawable", &mut surface)
            .await
            .expect_err("fails");
        assert_eq!(reason, "ring closure left open");
    }

    #[tokio::test]
    async fn backend_panic_resolves_to_single_failure() {
        let mut surface = stale_surface();
        let reason = adapter().draw("panic", &mut surface).await.expect_err("fails");
        assert_eq!(reason, "layout exploded");
        assert!(surface.is_blank());
    }
}
