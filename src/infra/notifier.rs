use std::io::Write;

use tracing::{info, warn};

use crate::application::ports::Notifier;
use crate::application::toast::{Toast, ToastKind};

/// Shows toasts as stderr lines and mirrors them into the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, toast: &Toast) {
        match toast.kind {
            ToastKind::Success => info!(
                target = "infra::notifier",
                op = "toast",
                kind = toast.kind.as_str(),
                "{}",
                toast.text
            ),
            ToastKind::Error => warn!(
                target = "infra::notifier",
                op = "toast",
                kind = toast.kind.as_str(),
                "{}",
                toast.text
            ),
        }

        let marker = if toast.is_error() { "!" } else { "✓" };
        let _ = writeln!(std::io::stderr().lock(), "[{marker}] {}", toast.text);
    }
}
