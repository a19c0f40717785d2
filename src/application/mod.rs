//! Application services: render-state control, URL sync and export/share.

pub mod error;
pub mod export;
pub mod ports;
pub mod render;
pub mod toast;
pub mod url_sync;
