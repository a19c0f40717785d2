//! Render-state control: validation, sequencing, drawing and the view it drives.
//!
//! The controller is the only writer of the render snapshot. Everything the
//! page shows (label, inline error, search status, export enablement and the
//! drawing itself) is derived from a single locked state so that a completed
//! render is applied as one step.

mod adapter;
mod controller;
mod view;

pub use adapter::{MoleculeRenderer, RendererAdapter};
pub use controller::{RenderController, SearchOutcome};
pub use view::{SearchStatus, StatusKind, ViewState};
