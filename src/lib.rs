//! oma-import - Interactive importer for oma data artifacts
//!
//! This crate provides the core library for the `oma-import` tool:
//! collecting an artifact declaration from the operator, hashing the
//! artifact bytes, resolving a license label from the Bazel license
//! taxonomy, and patching the generated stanza into the managed region
//! of MODULE.bazel.

pub mod acquire;
pub mod catalog;
pub mod core;
pub mod manifest;
pub mod ops;
pub mod util;

pub use core::{build_purl, ArchiveType, ArtifactKind, ArtifactRequest, ArtifactSource, Stanza};
pub use ops::{run_import, ImportOptions, ImportOutcome};
pub use util::{Config, Prompter, Shell};
