//! Manifest loading.
//!
//! Turns YAML manifests into typed resources for a [`Snapshot`].

pub mod yaml;

use crate::analyzer::context::Snapshot;
use std::path::{Path, PathBuf};

/// Error type for manifest parsing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("YAML syntax error in {path} at line {line}: {message}")]
    Syntax {
        path: PathBuf,
        line: u32,
        message: String,
    },
}

/// Result of loading manifests: whatever parsed, plus per-file errors.
#[derive(Debug, Default)]
pub struct LoadedManifests {
    pub snapshot: Snapshot,
    pub errors: Vec<ParseError>,
}

/// Load a file or a directory tree of manifests.
///
/// Directories are walked recursively and only `.yaml`/`.yml` files are read.
/// A file that fails to parse is recorded in `errors` and skipped.
pub fn load_path(path: &Path, default_namespace: &str) -> LoadedManifests {
    let mut loaded = LoadedManifests::default();

    if path.is_dir() {
        for entry in walkdir::WalkDir::new(path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let entry_path = entry.path();
            if entry_path.is_file() && yaml::is_yaml_file(entry_path) {
                load_file_into(&mut loaded, entry_path, default_namespace);
            }
        }
    } else {
        load_file_into(&mut loaded, path, default_namespace);
    }

    loaded
}

fn load_file_into(loaded: &mut LoadedManifests, path: &Path, default_namespace: &str) {
    match yaml::parse_yaml_file(path, default_namespace) {
        Ok(resources) => {
            log::debug!(
                "loaded {} resource(s) from {}",
                resources.len(),
                path.display()
            );
            loaded.snapshot.extend(resources);
        }
        Err(err) => {
            log::warn!("skipping {}: {}", path.display(), err);
            loaded.errors.push(err);
        }
    }
}
