use crate::domain::drawing::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Success,
    Error,
}

impl StatusKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusKind::Loading => "loading",
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

/// Message shown in the name-search status area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchStatus {
    pub kind: StatusKind,
    pub message: String,
}

impl SearchStatus {
    pub(crate) fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Everything the page displays, as one consistent value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Label above the drawing; `None` until the first successful render.
    pub label: Option<String>,
    /// Inline render/validation error.
    pub error: Option<String>,
    pub search_status: Option<SearchStatus>,
    pub exports_enabled: bool,
    pub surface: Surface,
}
