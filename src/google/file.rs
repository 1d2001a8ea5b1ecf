//! Credentials file access

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

use super::config::default_credentials_path;

/// Source of the credentials JSON
#[async_trait]
pub trait CredentialsFile: Send + Sync {
    /// Where the file lives, for error messages and remediation hints
    fn location(&self) -> String;

    /// Read the whole file
    ///
    /// The handle must not outlive the call.
    async fn read_to_string(&self) -> io::Result<String>;
}

#[async_trait]
impl<T: CredentialsFile + ?Sized> CredentialsFile for &T {
    fn location(&self) -> String {
        (**self).location()
    }

    async fn read_to_string(&self) -> io::Result<String> {
        (**self).read_to_string().await
    }
}

/// A credentials file on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for LocalFile {
    fn default() -> Self {
        Self::new(default_credentials_path())
    }
}

#[async_trait]
impl CredentialsFile for LocalFile {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_to_string(&self) -> io::Result<String> {
        tokio::fs::read_to_string(&self.path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_local_file_reads_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, "{}").unwrap();

        let file = LocalFile::new(&path);
        assert_eq!(file.read_to_string().await.unwrap(), "{}");
        assert_eq!(file.location(), path.display().to_string());
    }

    #[tokio::test]
    async fn test_local_file_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let file = LocalFile::new(dir.path().join("nope.json"));

        let err = file.read_to_string().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
