// File: src/paths.rs
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

pub struct AppPaths;

impl AppPaths {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("org", "seismomap", "seismomap")
    }

    /// `SEISMOMAP_CONFIG`, when set, replaces the platform location.
    pub fn config_file() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("SEISMOMAP_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        let dirs = Self::project_dirs().context("Could not determine a home directory")?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn log_file() -> Result<PathBuf> {
        let dirs = Self::project_dirs().context("Could not determine a home directory")?;
        let dir = dirs.data_local_dir();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        Ok(dir.join("seismomap.log"))
    }
}
