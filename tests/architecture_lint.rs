//! Architecture enforcement tests.
//!
//! Logging endpoint mutations must go through `engine::execute`, which runs
//! flag validation and the autoclone guard first. These tests scan the
//! source tree so a handler calling the API directly is caught in CI.
//!
//! # Test Categories
//!
//! 1. **Direct Mutation Detection** - Command handlers must not call the
//!    resource mutation methods of the `Api` trait
//! 2. **Layering** - The engine and core must not depend on the CLI or UI

use std::fs;
use std::path::{Path, PathBuf};

/// `Api` methods that change a service version.
const MUTATING_CALLS: &[&str] = &[
    ".create_resource(",
    ".update_resource(",
    ".delete_resource(",
];

/// Handlers allowed to call `clone_version` directly.
const ALLOWED_CLONE: &[&str] = &["service_version.rs"];

fn src_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src")
}

/// Every `.rs` file under `dir`, recursively.
fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            files.extend(rust_files(&path));
        } else if path.extension().is_some_and(|e| e == "rs") {
            files.push(path);
        }
    }
    files.sort();
    files
}

/// Source text with `#[cfg(test)]` modules cut off.
fn non_test_source(path: &Path) -> String {
    let text = fs::read_to_string(path).unwrap();
    match text.find("#[cfg(test)]") {
        Some(idx) => text[..idx].to_string(),
        None => text,
    }
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
}

// =============================================================================
// Direct mutation detection
// =============================================================================

#[test]
fn handlers_do_not_mutate_resources_directly() {
    let mut violations = Vec::new();
    for path in rust_files(&src_dir().join("cli")) {
        let source = non_test_source(&path);
        for call in MUTATING_CALLS {
            if source.contains(call) {
                violations.push(format!("{}: {}", path.display(), call));
            }
        }
    }
    assert!(
        violations.is_empty(),
        "command handlers must use engine::execute:\n{}",
        violations.join("\n")
    );
}

#[test]
fn only_service_version_clones_directly() {
    let mut violations = Vec::new();
    for path in rust_files(&src_dir().join("cli")) {
        if ALLOWED_CLONE.contains(&file_name(&path)) {
            continue;
        }
        if non_test_source(&path).contains(".clone_version(") {
            violations.push(path.display().to_string());
        }
    }
    assert!(
        violations.is_empty(),
        "clones must go through the autoclone guard:\n{}",
        violations.join("\n")
    );
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn engine_and_core_do_not_depend_on_cli_or_ui() {
    let mut violations = Vec::new();
    for layer in ["engine", "core", "api"] {
        for path in rust_files(&src_dir().join(layer)) {
            let source = non_test_source(&path);
            for forbidden in ["crate::cli", "crate::ui"] {
                if source.contains(forbidden) {
                    violations.push(format!("{}: {}", path.display(), forbidden));
                }
            }
        }
    }
    assert!(violations.is_empty(), "layering violations:\n{}", violations.join("\n"));
}

#[test]
fn lint_sees_the_handlers() {
    let names: Vec<String> = rust_files(&src_dir().join("cli"))
        .iter()
        .map(|p| file_name(p).to_string())
        .collect();
    assert!(names.contains(&"logging.rs".to_string()));
    assert!(names.contains(&"service_version.rs".to_string()));
}
