//! Persistent player settings.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::APP_NAME;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SettingsFile {
    pub format_version: u32,
    /// Start battles with quickmode already toggled on.
    pub quickmode: bool,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self { format_version: 1, quickmode: false }
    }
}

impl SettingsFile {
    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("settings.json");
            path
        })
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let state: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn settings_file_roundtrip() {
        let state = SettingsFile { format_version: 1, quickmode: true };
        let json = serde_json::to_string(&state).expect("serialize");
        let decoded: SettingsFile = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(state, decoded);
    }

    #[test]
    fn settings_file_atomic_write_and_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        let state = SettingsFile { format_version: 1, quickmode: true };

        state.write_atomic(&path).expect("write");
        let loaded = SettingsFile::load(&path).expect("load");
        assert_eq!(state, loaded);

        let tmp_path = path.with_extension("json.tmp");
        assert!(!tmp_path.exists());
    }

    #[test]
    fn malformed_settings_report_invalid_data() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").expect("write");
        let err = SettingsFile::load(&path).expect_err("parse should fail");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
