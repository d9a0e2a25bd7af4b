//! # CLI Command Implementations
//!
//! One file per subcommand of `gdnative-bootstrap`. Each module exposes an
//! `execute` function taking the resolved [`crate::cli::Context`] (and its
//! own `clap` arguments where it has any), calls into the library, and
//! prints a short summary.

pub mod build;
pub mod clean;
pub mod completions;
pub mod generate;
pub mod sync_docs;
