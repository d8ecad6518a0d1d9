//! Shared file and YAML helpers for the check suites.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

/// Read and parse a YAML file, reporting the failure as a message string.
pub(crate) fn parse_yaml_file(path: &Path) -> Result<Value, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("cannot read: {e}"))?;
    serde_yaml::from_str(&text).map_err(|e| format!("YAML error: {e}"))
}

/// Collect `*.yml` / `*.yaml` files directly under `dir`, sorted.
pub(crate) fn yaml_files_in(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .into_iter()
        .flatten()
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == "yml" || e == "yaml")
        })
        .collect();
    files.sort();
    files
}

/// Whether a workflow document has an `on:` trigger block.
///
/// YAML 1.1 resolvers turn the bare key `on` into boolean `true`, so both
/// spellings count.
pub(crate) fn has_trigger_key(doc: &Value) -> bool {
    doc.get("on").is_some()
        || doc
            .as_mapping()
            .is_some_and(|m| m.contains_key(&Value::Bool(true)))
}

/// The `on:` trigger block, accepting the boolean-key spelling.
pub(crate) fn trigger_block(doc: &Value) -> Option<&Value> {
    doc.get("on")
        .or_else(|| doc.as_mapping().and_then(|m| m.get(&Value::Bool(true))))
}

/// File name as lossy UTF-8, for messages.
pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Recursively collect regular files under `root`, skipping noisy trees.
pub(crate) fn walk_files(root: &Path) -> Vec<PathBuf> {
    const SKIP: [&str; 5] = [".git", "target", "node_modules", "__pycache__", ".venv"];

    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                let skip = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| SKIP.contains(&n));
                if !skip {
                    stack.push(path);
                }
            } else if path.is_file() {
                files.push(path);
            }
        }
    }

    files.sort();
    files
}
