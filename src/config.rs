// Copyright 2025 the Glyphscope Authors
// SPDX-License-Identifier: Apache-2.0

//! User preferences file handling.
//!
//! Preferences are stored as TOML and override built-in defaults. Every
//! field has a default, so a partial (or absent) file is fine; a malformed
//! file is reported and ignored rather than aborting startup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Pixel sizes shown in the hinted preview pane when none are configured
const DEFAULT_PREVIEW_SIZES: [u32; 5] = [12, 18, 24, 36, 48];

/// User preferences, loaded from a TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Initial window size
    pub window_width: f64,
    pub window_height: f64,
    /// Pixel sizes requested for hinted previews
    pub preview_pixel_sizes: Vec<u32>,
    /// Most recently opened font file
    pub last_file: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            window_width: 1280.0,
            window_height: 800.0,
            preview_pixel_sizes: DEFAULT_PREVIEW_SIZES.to_vec(),
            last_file: None,
        }
    }
}

impl EditorConfig {
    /// Load preferences from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {path:?}"))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse config {path:?}"))
    }

    /// Load preferences, falling back to defaults when the file is absent
    /// or unreadable
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("{err:#}; using default preferences");
                Self::default()
            }
        }
    }

    /// Write preferences back to disk, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {parent:?}"))?;
        }
        let contents =
            toml::to_string_pretty(self).context("Failed to serialize preferences")?;
        fs::write(path, contents).with_context(|| format!("Failed to write config to {path:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");

        let mut config = EditorConfig::default();
        config.preview_pixel_sizes = vec![16, 32];
        config.last_file = Some(PathBuf::from("/fonts/test.ttf"));
        config.save(&path).unwrap();

        let loaded = EditorConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig::load_or_default(&dir.path().join("nope.toml"));
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "window_width = 640.0\n").unwrap();

        let config = EditorConfig::load_or_default(&path);
        assert_eq!(config.window_width, 640.0);
        assert_eq!(config.window_height, 800.0);
        assert_eq!(config.preview_pixel_sizes, DEFAULT_PREVIEW_SIZES.to_vec());
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "window_width = [not toml").unwrap();

        let config = EditorConfig::load_or_default(&path);
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("prefs.toml");
        EditorConfig::default().save(&path).unwrap();
        assert!(path.exists());
    }
}
