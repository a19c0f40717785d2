//! Domain layer types and invariants.

pub mod drawing;
pub mod error;
pub mod molecule;
pub mod presets;
pub mod slug;
pub mod snapshot;
