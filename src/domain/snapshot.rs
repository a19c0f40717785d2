//! The last successfully rendered molecule and the outcome of one render attempt.

use std::fmt;

use super::drawing::Drawing;

/// State captured by the last successful render; the sole input to exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSnapshot {
    pub smiles: String,
    pub display_name: Option<String>,
    pub label: String,
    pub drawing: Drawing,
}

impl RenderSnapshot {
    /// Title used inside exported documents: the display name, else the SMILES.
    pub fn title(&self) -> &str {
        self.display_name.as_deref().unwrap_or(self.smiles.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderFailure {
    /// Input was blank after trimming; nothing was attempted.
    EmptyInput,
    /// The backend rejected the SMILES or failed while drawing.
    Invalid { reason: String },
    /// A newer request was issued before this one completed.
    Superseded,
}

impl fmt::Display for RenderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderFailure::EmptyInput => f.write_str("empty input"),
            RenderFailure::Invalid { reason } => write!(f, "invalid input: {reason}"),
            RenderFailure::Superseded => f.write_str("superseded by a newer request"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered(RenderSnapshot),
    Failed(RenderFailure),
}

impl RenderOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, RenderOutcome::Rendered(_))
    }

    pub fn snapshot(&self) -> Option<&RenderSnapshot> {
        match self {
            RenderOutcome::Rendered(snapshot) => Some(snapshot),
            RenderOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&RenderFailure> {
        match self {
            RenderOutcome::Rendered(_) => None,
            RenderOutcome::Failed(failure) => Some(failure),
        }
    }

    pub(crate) fn result_label(&self) -> &'static str {
        match self {
            RenderOutcome::Rendered(_) => "rendered",
            RenderOutcome::Failed(RenderFailure::EmptyInput) => "empty_input",
            RenderOutcome::Failed(RenderFailure::Invalid { .. }) => "invalid",
            RenderOutcome::Failed(RenderFailure::Superseded) => "superseded",
        }
    }
}
