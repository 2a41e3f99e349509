//! Workspace umbrella crate: re-exports `popweight-core` so the demos under
//! `demos/` can be run from the repository root.
pub use popweight_core::*;
