//! High-level operations.

pub mod import;

pub use import::{run_import, ImportOptions, ImportOutcome};
