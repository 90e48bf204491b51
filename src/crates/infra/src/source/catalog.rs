use application::command::stage_records::SourceCatalog;
use application::error::AppError;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 递归扫描本地目录下指定扩展名的源文件
#[derive(Debug, Clone)]
pub struct LocalSourceCatalog {
    root: PathBuf,
    extension: String,
}

impl LocalSourceCatalog {
    pub fn new(root: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            root: root.into(),
            extension: extension.trim_start_matches('.').to_ascii_lowercase(),
        }
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension))
    }

    fn walk(&self) -> Result<Vec<PathBuf>, AppError> {
        if !self.root.is_dir() {
            return Err(AppError::SourceListing(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", self.root.display(), e);
                    continue;
                }
            };
            if entry.file_type().is_file() && self.matches(entry.path()) {
                files.push(entry.into_path());
            }
        }
        files.sort();
        debug!("Found {} source files under {}", files.len(), self.root.display());
        Ok(files)
    }
}

#[async_trait::async_trait]
impl SourceCatalog for LocalSourceCatalog {
    async fn list(&self) -> Result<Vec<PathBuf>, AppError> {
        let catalog = self.clone();
        tokio::task::spawn_blocking(move || catalog.walk())
            .await
            .map_err(|e| AppError::SourceListing(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_lists_matching_files_recursively_in_order() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("A").join("B");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("TRB.json"), "{}").unwrap();
        fs::write(dir.path().join("TRA.JSON"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let catalog = LocalSourceCatalog::new(dir.path(), ".json");
        let files = catalog.list().await.unwrap();

        assert_eq!(files.len(), 2);
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
        assert!(files.iter().all(|f| f.extension().is_some()));
    }

    #[tokio::test]
    async fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let catalog = LocalSourceCatalog::new(dir.path(), "json");
        assert!(catalog.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_root_is_listing_error() {
        let dir = TempDir::new().unwrap();
        let catalog = LocalSourceCatalog::new(dir.path().join("missing"), "json");
        assert!(matches!(
            catalog.list().await,
            Err(AppError::SourceListing(_))
        ));
    }
}
