//! # Clean Stage
//!
//! Removes the previous generator output from the binding-output directory.
//! Generated files are recognized by the `.gen.` infix in their name
//! (`object.gen.go`, `class_db.gen.h`), which keeps hand-written sources in
//! the same directory safe.
//!
//! Cleaning is best-effort. [`clean_generated`] never returns an error: a
//! missing directory, no matching files or a file that cannot be removed are
//! all recorded in the returned [`CleanReport`], and the caller decides
//! whether to look at it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use log::{debug, info, warn};

/// Glob matching generated artifacts inside the output directory.
pub const GENERATED_PATTERN: &str = "*.gen.*";

const GENERATED_INFIX: &str = ".gen.";

/// Result of a clean pass.
#[derive(Debug, Default)]
pub struct CleanReport {
    /// Files that were deleted.
    pub removed: Vec<PathBuf>,
    /// Files that matched but could not be deleted.
    pub failed: Vec<(PathBuf, io::Error)>,
    /// Problems that prevented listing the directory at all.
    pub skipped: Option<String>,
}

impl CleanReport {
    /// Whether every matching file was removed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_none()
    }

    /// Log the outcome.
    pub fn log(&self) {
        if let Some(reason) = &self.skipped {
            debug!("Nothing cleaned: {}", reason);
        }
        for path in &self.removed {
            debug!("Removed {}", path.display());
        }
        for (path, error) in &self.failed {
            warn!("Could not remove {}: {}", path.display(), error);
        }
    }
}

/// Whether a file name follows the generated-artifact convention.
///
/// Hidden files never count, matching how a shell expands `*.gen.*`.
pub fn is_generated_artifact(file_name: &str) -> bool {
    !file_name.starts_with('.') && file_name.contains(GENERATED_INFIX)
}

/// Delete every generated artifact directly inside `output_dir`.
pub fn clean_generated(output_dir: &Path) -> CleanReport {
    info!("Cleaning previous generation...");
    let mut report = CleanReport::default();

    if !output_dir.is_dir() {
        report.skipped = Some(format!("{} is not a directory", output_dir.display()));
        return report;
    }

    let pattern = format!(
        "{}/{}",
        Pattern::escape(&output_dir.to_string_lossy()),
        GENERATED_PATTERN
    );
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let entries = match glob::glob_with(&pattern, options) {
        Ok(entries) => entries,
        Err(e) => {
            report.skipped = Some(format!("invalid pattern {}: {}", pattern, e));
            return report;
        }
    };

    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                let path = e.path().to_path_buf();
                report.failed.push((path, e.into()));
                continue;
            }
        };

        let is_artifact = path
            .file_name()
            .map(|name| is_generated_artifact(&name.to_string_lossy()))
            .unwrap_or(false);
        if !is_artifact || !path.is_file() {
            continue;
        }

        match fs::remove_file(&path) {
            Ok(()) => report.removed.push(path),
            Err(e) => report.failed.push((path, e)),
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn test_is_generated_artifact() {
        assert!(is_generated_artifact("object.gen.go"));
        assert!(is_generated_artifact("class_db.gen.h"));
        assert!(is_generated_artifact("a.gen.b.c"));
        assert!(!is_generated_artifact("object.go"));
        assert!(!is_generated_artifact("generator.go"));
        assert!(!is_generated_artifact("object.gen"));
        assert!(!is_generated_artifact("gen.go"));
        assert!(!is_generated_artifact(".gen.go"));
        assert!(!is_generated_artifact(".object.gen.go"));
    }

    #[test]
    fn test_removes_only_generated_files() {
        let temp = TempDir::new().unwrap();
        let out = temp.path();
        touch(out, "object.gen.go");
        touch(out, "variant.gen.c");
        touch(out, "variant.go");
        touch(out, "registry.go");

        let report = clean_generated(out);

        assert!(report.is_complete());
        assert_eq!(report.removed.len(), 2);
        assert!(!out.join("object.gen.go").exists());
        assert!(!out.join("variant.gen.c").exists());
        assert!(out.join("variant.go").exists());
        assert!(out.join("registry.go").exists());
    }

    #[test]
    fn test_hidden_files_are_kept() {
        let temp = TempDir::new().unwrap();
        let out = temp.path();
        touch(out, ".gen.go");
        touch(out, ".object.gen.go");
        touch(out, "object.gen.go");

        let report = clean_generated(out);

        assert!(report.is_complete());
        assert_eq!(report.removed, vec![out.join("object.gen.go")]);
        assert!(out.join(".gen.go").exists());
        assert!(out.join(".object.gen.go").exists());
    }

    #[test]
    fn test_does_not_descend_into_subdirectories() {
        let temp = TempDir::new().unwrap();
        let out = temp.path();
        touch(out, "nested/deep.gen.go");

        let report = clean_generated(out);

        assert!(report.removed.is_empty());
        assert!(out.join("nested/deep.gen.go").exists());
    }

    #[test]
    fn test_ignores_directories_matching_pattern() {
        let temp = TempDir::new().unwrap();
        let out = temp.path();
        fs::create_dir(out.join("cache.gen.d")).unwrap();

        let report = clean_generated(out);

        assert!(report.is_complete());
        assert!(report.removed.is_empty());
        assert!(out.join("cache.gen.d").is_dir());
    }

    #[test]
    fn test_missing_directory_is_tolerated() {
        let temp = TempDir::new().unwrap();
        let report = clean_generated(&temp.path().join("gdnative_output"));

        assert!(report.removed.is_empty());
        assert!(report.skipped.is_some());
        assert!(!report.is_complete());
    }

    #[test]
    fn test_empty_directory_is_complete() {
        let temp = TempDir::new().unwrap();
        let report = clean_generated(temp.path());
        assert!(report.is_complete());
        assert!(report.removed.is_empty());
    }

    #[test]
    fn test_directory_name_with_glob_metacharacters() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out[1]");
        touch(&out, "object.gen.go");
        touch(&out, "object.go");

        let report = clean_generated(&out);

        assert_eq!(report.removed, vec![out.join("object.gen.go")]);
        assert!(out.join("object.go").exists());
    }
}
