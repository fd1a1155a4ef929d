use anyhow::Result;
use std::path::{Path, PathBuf};

/// Overrides the platform config directory when set to an existing directory
const BASE_PATH_ENV: &str = "POPCORN_BASE_PATH";

fn base_path_from_env() -> Option<PathBuf> {
    std::env::var(BASE_PATH_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

#[derive(Debug, Clone)]
pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("popcorn");

        Ok(Self::from_base(base_dir))
    }

    /// Lay out all directories under a single base (config files at the top level)
    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    /// Use `override_base` when it names an existing directory, otherwise the
    /// platform config directory (e.g. `~/.config/popcorn` on Linux)
    pub fn resolve(override_base: Option<PathBuf>) -> Result<Self> {
        match override_base {
            Some(base) if base.is_dir() => Ok(Self::from_base(base)),
            _ => Self::new(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    /// Log file for interactive sessions (rotated daily by the CLI)
    pub fn session_log_file(&self) -> PathBuf {
        self.log_dir.join("popcorn.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // No platform config dir (no HOME): keep everything next to the working directory
        Self::resolve(base_path_from_env()).unwrap_or_else(|_| Self::from_base(PathBuf::from(".popcorn")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base_layout() {
        let paths = PathManager::from_base(PathBuf::from("/tmp/popcorn-test"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/popcorn-test/config.toml"));
        assert_eq!(paths.credentials_file(), PathBuf::from("/tmp/popcorn-test/credentials.toml"));
        assert_eq!(paths.data_dir(), Path::new("/tmp/popcorn-test/data"));
        assert_eq!(paths.session_log_file(), PathBuf::from("/tmp/popcorn-test/logs/popcorn.log"));
    }

    #[test]
    fn test_ensure_directories() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::from_base(dir.path().join("popcorn"));
        paths.ensure_directories().unwrap();
        assert!(paths.config_dir().is_dir());
        assert!(paths.data_dir().is_dir());
        assert!(paths.log_dir().is_dir());
    }

    #[test]
    fn test_resolve_uses_existing_override() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::resolve(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(paths.config_dir(), dir.path());
        assert_eq!(paths.data_dir(), dir.path().join("data"));
    }

    #[test]
    fn test_resolve_without_override_uses_platform_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        for override_base in [None, Some(missing)] {
            let paths = PathManager::resolve(override_base).unwrap();
            assert!(paths.config_dir().ends_with("popcorn"));
            assert!(!paths.config_dir().starts_with(dir.path()));
            assert_ne!(paths.config_dir(), Path::new("/app"));
        }
    }
}
