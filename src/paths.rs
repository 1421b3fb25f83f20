use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Database file name inside the data directory
pub const DATABASE_FILE: &str = "menu.sqlite";

/// Where the database lives when `--db` is not given
pub struct DataDirs {
    data_dir: PathBuf,
}

impl DataDirs {
    pub fn new(custom_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match custom_dir {
            Some(dir) => dir,
            None => {
                let proj_dirs = ProjectDirs::from("", "", "menu-nutrition-to-sqlite")
                    .context("Could not determine data directory")?;
                proj_dirs.data_dir().to_path_buf()
            }
        };

        fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }
}

/// Explicit database path wins over the data directory default
pub fn resolve_database_path(db: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<PathBuf> {
    match db {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {:?}", parent))?;
            }
            Ok(path)
        }
        None => Ok(DataDirs::new(data_dir)?.database_path()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_data_dir_created() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nested").join("data");
        let dirs = DataDirs::new(Some(dir.clone())).unwrap();
        assert!(dir.is_dir());
        assert_eq!(dirs.database_path(), dir.join(DATABASE_FILE));
    }

    #[test]
    fn test_explicit_db_path_wins() {
        let root = tempfile::tempdir().unwrap();
        let db = root.path().join("sub").join("menus.db");
        let resolved =
            resolve_database_path(Some(db.clone()), Some(root.path().join("unused"))).unwrap();
        assert_eq!(resolved, db);
        assert!(root.path().join("sub").is_dir());
        assert!(!root.path().join("unused").exists());
    }
}
