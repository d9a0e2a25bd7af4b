//! # gdnative-bootstrap
//!
//! Bootstrap library for a bindings project built on an external game
//! engine. It keeps a sparse mirror of the engine's class documentation up
//! to date and drives the external bindings generator. The library is used
//! by the `gdnative-bootstrap` binary but has no dependency on it.
//!
//! ## Quick Example
//!
//! ```
//! use gdnative_bootstrap::config::{self, Config};
//! use gdnative_bootstrap::generate;
//! use std::path::Path;
//!
//! let config = config::parse("generator:\n  program: ./bin/generate\n  args: [-v]\n").unwrap();
//! assert_eq!(config.upstream.branch, Config::default().upstream.branch);
//!
//! let invocation = generate::invocation(&config.generator, Path::new("/work/repo"), Path::new("/work"));
//! assert_eq!(invocation.command_line(), "./bin/generate -v");
//! assert_eq!(invocation.extra_env()["API_PATH"], "/work/repo");
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: optional `.gdnative-bootstrap.yaml` with
//!   defaults for the upstream repository, directory layout, generator and
//!   build commands; plus the `Environment` snapshot (`NODOC`).
//! - **Processes (`process`, `git`)**: immutable `Invocation` values run
//!   through a `CommandRunner`, which tests replace with a recorder.
//! - **Stages (`docs`, `clean`, `generate`, `build`)**: one module per step.
//! - **Pipeline (`pipeline`)**: runs the stages in order.
//!
//! ## Execution Flow
//!
//! 1.  **Skip check**: `NODOC` skips straight to step 3.
//! 2.  **Doc sync**: pull the mirror, or create and pull it.
//! 3.  **Clean**: delete `*.gen.*` from the binding-output directory,
//!     ignoring failures.
//! 4.  **Generate**: run the generator with `API_PATH` set to the
//!     repository root; its failure is the tool's failure.

pub mod build;
pub mod clean;
pub mod config;
pub mod docs;
pub mod error;
pub mod generate;
pub mod git;
pub mod output;
pub mod pipeline;
pub mod process;

#[cfg(test)]
mod clean_proptest;
