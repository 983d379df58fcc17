//! Manifest storage behind the local seismic store

use crate::error::{MetadataError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Where a store root lives, judged by its URL scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Directory on the local file system (`file://` or a bare path)
    FileSystem,
    /// Remote seismic DMS (`sd://`)
    SeismicStore,
}

impl StorageBackend {
    pub fn from_url(url: &str) -> Result<Self> {
        match url.split_once("://") {
            None | Some(("file", _)) => Ok(StorageBackend::FileSystem),
            Some(("sd", _)) => Ok(StorageBackend::SeismicStore),
            Some((scheme, _)) => Err(MetadataError::InvalidUrl(format!(
                "unsupported store scheme '{}'",
                scheme
            ))),
        }
    }
}

/// Byte access to manifest documents, keyed by path relative to a store root
#[async_trait]
pub trait IOManager: Send + Sync {
    async fn read(&self, path: &str) -> Result<Bytes>;

    /// Store a document, creating intermediate tenant/subproject directories
    async fn write(&self, path: &str, data: &[u8]) -> Result<()>;
}

/// Manifest directory on the local file system
pub struct FileSystemIOManager {
    root: PathBuf,
}

impl FileSystemIOManager {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl IOManager for FileSystemIOManager {
    async fn read(&self, path: &str) -> Result<Bytes> {
        let data = fs::read(self.root.join(path)).await?;
        Ok(Bytes::from(data))
    }

    async fn write(&self, path: &str, data: &[u8]) -> Result<()> {
        let target = self.root.join(path);
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir).await?;
        }
        fs::write(&target, data).await?;
        Ok(())
    }
}

/// Open the manifest storage for a store root given as a path or `file://` URL
pub fn create_io_manager(url: &str) -> Result<Box<dyn IOManager>> {
    match StorageBackend::from_url(url)? {
        StorageBackend::FileSystem => {
            let root = url.strip_prefix("file://").unwrap_or(url);
            Ok(Box::new(FileSystemIOManager::new(root)))
        }
        StorageBackend::SeismicStore => Err(MetadataError::Configuration(format!(
            "'{}' is a seismic store URL; the local store needs a filesystem root",
            url
        ))),
    }
}
