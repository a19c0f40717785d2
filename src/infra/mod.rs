//! Infrastructure adapters and runtime bootstrap.

pub mod clipboard;
pub mod depiction;
pub mod downloads;
pub mod error;
pub mod history;
pub mod http;
pub mod notifier;
pub mod pubchem;
pub mod telemetry;
