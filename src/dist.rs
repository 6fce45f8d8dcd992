//! Bundles backed by a build output directory
//!
//! Lets the injection step run against files already written by a bundler.
//! A script (`.js`, `.mjs`, `.cjs`) is the entry when its path relative to
//! the output directory matches the entry glob pattern; `*` does not cross
//! `/`. Only the entry is read into memory.

use crate::error::{Error, Result};
use crate::plugin::{Artifact, Bundle, BundleArtifact, UserScriptPlugin};
use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const SCRIPT_EXTENSIONS: &[&str] = &["js", "mjs", "cjs"];

fn compile_entry_pattern(entry_pattern: &str) -> Result<Pattern> {
    Pattern::new(entry_pattern)
        .map_err(|e| Error::InvalidGlobPattern(format!("'{}': {}", entry_pattern, e)))
}

fn is_script(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SCRIPT_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// Bundle key for a file: its relative path with `/` separators
fn bundle_name(dir: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(dir).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    Some(parts.join("/"))
}

/// Load the files under `dir` into a [`Bundle`]
///
/// The entry script is decided from its path and is the only file read.
/// Every other file becomes [`BundleArtifact::OnDisk`] and stays untouched.
///
/// Fails with [`Error::InvalidGlobPattern`] for a malformed pattern, with
/// [`Error::WalkDir`] when `dir` cannot be walked and with [`Error::Io`] when
/// the entry cannot be read as UTF-8 text.
pub fn load_dist_bundle(dir: &Path, entry_pattern: &str) -> Result<Bundle> {
    let pattern = compile_entry_pattern(entry_pattern)?;
    let options = MatchOptions {
        require_literal_separator: true,
        ..MatchOptions::new()
    };

    let mut bundle = Bundle::new();
    for entry in walkdir::WalkDir::new(dir) {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = bundle_name(dir, path) else {
            continue;
        };

        let artifact = if is_script(path) && pattern.matches_with(&name, options) {
            BundleArtifact::entry_chunk(fs::read_to_string(path)?)
        } else {
            BundleArtifact::OnDisk {
                path: path.to_path_buf(),
            }
        };
        bundle.insert(name, artifact);
    }

    debug!(dir = %dir.display(), artifacts = bundle.len(), "loaded dist bundle");
    Ok(bundle)
}

/// Write the code of every chunk back under `dir`
///
/// Assets and on-disk records are not written.
pub fn write_dist_bundle(dir: &Path, bundle: &Bundle) -> Result<()> {
    for (name, artifact) in bundle {
        if let Some(code) = artifact.code() {
            write_chunk(&dir.join(name), code)?;
        }
    }
    Ok(())
}

fn write_chunk(path: &Path, code: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, code)?;
    Ok(())
}

/// Inject the plugin's header into the entry script of an output directory
///
/// Only the entry file is rewritten. Returns its path.
pub fn inject_dist(dir: &Path, entry_pattern: &str, plugin: &UserScriptPlugin) -> Result<PathBuf> {
    let mut bundle = load_dist_bundle(dir, entry_pattern)?;

    let (name, artifact) = bundle
        .iter_mut()
        .find(|(_, artifact)| artifact.is_entry())
        .ok_or(Error::EntryNotFound)?;

    plugin.inject(std::iter::once(&mut *artifact))?;

    let path = dir.join(name);
    if let Some(code) = artifact.code() {
        write_chunk(&path, code)?;
    }
    info!(entry = %path.display(), "wrote userscript entry");
    Ok(path)
}
