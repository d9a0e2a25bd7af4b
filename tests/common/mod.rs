//! Shared test utilities for CLI end-to-end tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_generator("exit 0");
//!     fixture.command().env("NODOC", "1").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{git_available, quote_yaml, UpstreamRepo};
    pub use super::TestFixture;
}

/// Check whether a usable `git` binary is on the PATH.
///
/// Tests that drive real git commands return early when it is not.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Quote a string as a single-quoted YAML scalar.
pub fn quote_yaml(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// A temporary repository root to run the binary in.
///
/// The fixture writes a `.gdnative-bootstrap.yaml` built from the pieces
/// added with the `with_*` methods. The generator and build tool are
/// replaced by `sh -c` scripts so no Go toolchain is needed.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
    generator: Option<String>,
    build: Option<(String, String)>,
    upstream: Option<String>,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
            generator: None,
            build: None,
            upstream: None,
        }
    }

    /// Use `sh -c <script>` as the generator.
    pub fn with_generator(mut self, script: &str) -> Self {
        self.generator = Some(script.to_string());
        self.write_config();
        self
    }

    /// Use `sh -c <script>` for both build and install, with the given
    /// build and install scripts.
    #[allow(dead_code)]
    pub fn with_build(mut self, build_script: &str, install_script: &str) -> Self {
        self.build = Some((build_script.to_string(), install_script.to_string()));
        self.write_config();
        self
    }

    /// Mirror documentation from a local upstream repository.
    #[allow(dead_code)]
    pub fn with_upstream(mut self, upstream: &Path) -> Self {
        self.upstream = Some(upstream.to_string_lossy().into_owned());
        self.write_config();
        self
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    fn write_config(&self) {
        let mut yaml = String::new();
        if let Some(url) = &self.upstream {
            yaml.push_str(&format!("upstream:\n  url: {}\n", quote_yaml(url)));
        }
        if let Some(script) = &self.generator {
            yaml.push_str(&format!(
                "generator:\n  program: sh\n  args:\n    - -c\n    - {}\n",
                quote_yaml(script)
            ));
        }
        if let Some((build, install)) = &self.build {
            yaml.push_str(&format!(
                "build:\n  program: sh\n  build_args:\n    - -c\n    - {}\n  install_args:\n    - -c\n    - {}\n",
                quote_yaml(build),
                quote_yaml(install)
            ));
        }
        self.temp_dir
            .child(".gdnative-bootstrap.yaml")
            .write_str(&yaml)
            .expect("Failed to write config file");
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The root as the binary sees it, with symlinks resolved.
    #[allow(dead_code)]
    pub fn canonical_root(&self) -> PathBuf {
        self.path().canonicalize().expect("Failed to canonicalize root")
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory,
    /// isolated from variables of the surrounding environment.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("gdnative-bootstrap");
        cmd.current_dir(self.path())
            .env_remove("NODOC")
            .env_remove("GDNATIVE_BOOTSTRAP_ROOT")
            .env_remove("GDNATIVE_BOOTSTRAP_CONFIG")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A local git repository standing in for the engine upstream.
///
/// Holds `doc/classes/*.xml` plus files outside the sparse path, on a
/// `master` branch.
#[allow(dead_code)]
pub struct UpstreamRepo {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl UpstreamRepo {
    pub fn new() -> Self {
        let repo = Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        };
        repo.git(&["init", "--quiet"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/master"]);
        repo.temp_dir
            .child("doc/classes/Node.xml")
            .write_str("<class name=\"Node\"></class>\n")
            .unwrap();
        repo.temp_dir
            .child("core/object.cpp")
            .write_str("// engine source\n")
            .unwrap();
        repo.temp_dir.child("README.md").write_str("# Engine\n").unwrap();
        repo.commit("initial import");
        repo
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add or replace a file and commit it.
    pub fn commit_file(&self, path: &str, content: &str, message: &str) {
        self.temp_dir.child(path).write_str(content).unwrap();
        self.commit(message);
    }

    fn commit(&self, message: &str) {
        self.git(&["add", "--all"]);
        self.git(&[
            "-c",
            "user.name=Upstream",
            "-c",
            "user.email=upstream@example.com",
            "commit",
            "--quiet",
            "-m",
            message,
        ]);
    }

    fn git(&self, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .status()
            .expect("Failed to run git");
        assert!(status.success(), "git {:?} failed", args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_writes_generator_config() {
        let fixture = TestFixture::new().with_generator("echo 'hi'");
        let yaml =
            std::fs::read_to_string(fixture.path().join(".gdnative-bootstrap.yaml")).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(value["generator"]["args"][1].as_str(), Some("echo 'hi'"));
    }

    #[test]
    fn test_quote_yaml() {
        assert_eq!(quote_yaml("a'b"), "'a''b'");
    }
}
