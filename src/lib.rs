//! Molecule sketcher core: render-state control, share URLs and exports.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
