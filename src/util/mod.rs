//! Shared utilities

pub mod config;
pub mod fs;
pub mod hash;
pub mod process;
pub mod prompt;
pub mod shell;

pub use config::Config;
pub use prompt::Prompter;
pub use shell::{Shell, Status};
