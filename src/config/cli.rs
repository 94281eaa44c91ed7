use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    pub fn full_path(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(self.full_path(path)).await?;
        Ok(data)
    }

    /// Writes through a sibling temp file so a failed write never leaves a partial artifact.
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path);
        let write_error = |source: std::io::Error| EtlError::OutputWriteError {
            path: full_path.display().to_string(),
            source,
        };

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
        }

        let mut temp_name = full_path.clone().into_os_string();
        temp_name.push(".partial");
        let temp_path = PathBuf::from(temp_name);

        tokio::fs::write(&temp_path, data).await.map_err(write_error)?;
        if let Err(e) = tokio::fs::rename(&temp_path, &full_path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(write_error(e));
        }
        Ok(())
    }

    async fn exists(&self, path: &str) -> bool {
        tokio::fs::metadata(self.full_path(path))
            .await
            .map(|metadata| metadata.is_file())
            .unwrap_or(false)
    }
}

/// Finds every `*.csv` file directly inside `input_dir`, sorted by name.
pub fn discover_inputs(input_dir: &str) -> Result<Vec<String>> {
    let pattern = format!("{}/*.csv", glob::Pattern::escape(input_dir));
    let options = glob::MatchOptions {
        case_sensitive: false,
        ..Default::default()
    };

    let entries = glob::glob_with(&pattern, options).map_err(|e| EtlError::ConfigError {
        message: format!("invalid input directory '{}': {}", input_dir, e),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| EtlError::IoError(e.into()))?;
        if !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
            files.push(name.to_string());
        }
    }
    files.sort();

    tracing::debug!("Discovered {} CSV files in {}", files.len(), input_dir);
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());

        storage.write_file("out/results.xlsx", b"sheet").await.unwrap();

        assert!(storage.exists("out/results.xlsx").await);
        assert!(!dir.path().join("out/results.xlsx.partial").exists());
        assert_eq!(storage.read_file("out/results.xlsx").await.unwrap(), b"sheet");
    }

    #[tokio::test]
    async fn test_write_failure_is_an_output_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("blocker"), "not a directory").unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());

        let err = storage
            .write_file("blocker/results.xlsx", b"sheet")
            .await
            .unwrap_err();

        assert!(matches!(err, EtlError::OutputWriteError { .. }));
        assert_eq!(err.severity().exit_code(), 1);
    }

    #[test]
    fn test_missing_file_does_not_exist() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());

        assert!(!tokio_test::block_on(storage.exists("results.csv")));
        assert!(tokio_test::block_on(storage.read_file("results.csv")).is_err());
    }

    #[test]
    fn test_discover_inputs_only_csv() {
        let dir = TempDir::new().unwrap();
        for name in ["b.csv", "a.csv", "notes.txt", "C.CSV", "a.xlsx"] {
            std::fs::write(dir.path().join(name), "x").unwrap();
        }
        std::fs::create_dir(dir.path().join("dir.csv")).unwrap();

        let files = discover_inputs(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(files, vec!["C.CSV", "a.csv", "b.csv"]);
    }
}
