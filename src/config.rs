// ==========================================
// Station Registry - runtime configuration
// ==========================================
// Resolves where the database file and the attachment
// directories live. Resolution order:
//   1. STATION_REGISTRY_DATA_DIR environment variable
//   2. the user data directory (dirs::data_dir())
//   3. ./data relative to the working directory
// ==========================================

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory (useful for
/// debugging, tests and CI).
pub const DATA_DIR_ENV: &str = "STATION_REGISTRY_DATA_DIR";

/// Database file name inside the data directory.
pub const DB_FILE_NAME: &str = "registry.db";

/// Runtime configuration: a single data directory everything lives under.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    data_dir: PathBuf,
}

impl RegistryConfig {
    /// Build a config rooted at an explicit data directory.
    pub fn with_data_dir<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolve the data directory from the environment.
    pub fn from_env() -> Self {
        if let Ok(path) = std::env::var(DATA_DIR_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Self::with_data_dir(trimmed);
            }
        }

        let data_dir = match dirs::data_dir() {
            Some(base) => base.join("station-registry"),
            None => PathBuf::from("./data"),
        };

        Self::with_data_dir(data_dir)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    /// Directory for uploaded station/employee photos.
    pub fn photos_dir(&self) -> PathBuf {
        self.data_dir.join("photos")
    }

    /// Directory for uploaded PDF documents.
    pub fn pdfs_dir(&self) -> PathBuf {
        self.data_dir.join("pdfs")
    }

    /// Create the data directory and attachment subdirectories.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(self.photos_dir())?;
        std::fs::create_dir_all(self.pdfs_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_derive_from_data_dir() {
        let cfg = RegistryConfig::with_data_dir("/tmp/registry-test");
        assert_eq!(cfg.db_path(), PathBuf::from("/tmp/registry-test/registry.db"));
        assert_eq!(cfg.photos_dir(), PathBuf::from("/tmp/registry-test/photos"));
        assert_eq!(cfg.pdfs_dir(), PathBuf::from("/tmp/registry-test/pdfs"));
    }
}
