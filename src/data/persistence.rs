use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const FILE_EXTENSIONS: [&str; 3] = [".json", ".yaml", ".yml"];

/// Resolves a config path relative to `base_dir` unless it is absolute.
pub fn resolve_path(raw: &str, base_dir: &Path) -> PathBuf {
    let path = Path::new(raw);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    base_dir.join(raw.strip_prefix("./").unwrap_or(raw))
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// A configuration document that can come from a file or from inline JSON.
pub trait Persistable: Sized + Default + for<'de> Deserialize<'de> {
    /// Loads a `.json`, `.yaml` or `.yml` file.
    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("config file {} does not exist", path.display());
        }
        if !path.is_file() {
            bail!("config path {} is not a file", path.display());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if is_yaml(path) {
            serde_norway::from_str(&contents)
                .with_context(|| format!("failed to parse YAML from {}", path.display()))
        } else {
            serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse JSON from {}", path.display()))
        }
    }

    fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse inline JSON config")
    }

    /// `raw` is either inline JSON or a path to a config file. Blank means empty.
    fn load_source(raw: &str, base_dir: &Path) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::default());
        }
        if FILE_EXTENSIONS.iter().any(|ext| raw.ends_with(ext)) {
            return Self::load_from(&resolve_path(raw, base_dir));
        }
        Self::from_json(raw)
    }
}
