//! Local seismic store - reader and session implementations backed by
//! manifest documents on a filesystem root.
//!
//! `sd://tenant/subproject/name` resolves to `<root>/tenant/subproject/name.json`.

use crate::error::{MetadataError, Result};
use crate::io::{create_io_manager, IOManager};
use crate::layout::CubeLayout;
use crate::metadata::{trace_range, SegyManifest, ZgyManifest};
use crate::sdk::{
    CubeReader, CubeReaderFactory, Release, RemoteCredentials, SdPath, SegySession,
    SegySessionFactory,
};
use crate::types::{
    Corners, SampleDataType, SampleHistogram, SampleStatistics, UnitInfo, ValueRange,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Manifest-backed seismic store rooted at a local directory
#[derive(Clone)]
pub struct LocalSeismicStore {
    io_manager: Arc<Box<dyn IOManager>>,
}

impl LocalSeismicStore {
    /// Open a store rooted at a path or `file://` URL
    pub fn new(root: impl AsRef<str>) -> Result<Self> {
        let io_manager = Arc::new(create_io_manager(root.as_ref())?);
        Ok(Self { io_manager })
    }

    /// Manifest location for a dataset
    pub fn manifest_path(path: &SdPath) -> String {
        format!("{}.json", path.relative_path())
    }

    async fn load<T: DeserializeOwned>(
        &self,
        path: &SdPath,
        credentials: &RemoteCredentials,
    ) -> Result<T> {
        let manifest_path = Self::manifest_path(path);
        debug!(
            dataset = %path,
            service_url = %credentials.service_url,
            "Loading dataset manifest"
        );

        let bytes = match self.io_manager.read(&manifest_path).await {
            Ok(bytes) => bytes,
            Err(MetadataError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(MetadataError::Sdk(format!(
                    "HTTP 404 dataset {} does not exist",
                    path
                )));
            }
            Err(e) => return Err(e),
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            MetadataError::Serialization(format!("manifest for {} is invalid: {}", path, e))
        })
    }
}

#[async_trait]
impl CubeReaderFactory for LocalSeismicStore {
    async fn open(
        &self,
        path: &SdPath,
        credentials: &RemoteCredentials,
    ) -> Result<Box<dyn CubeReader>> {
        let manifest: ZgyManifest = self.load(path, credentials).await?;
        manifest.validate()?;
        let layout = manifest.layout()?;
        debug!(dataset = %path, layout = %layout.summary(), "Opened local cube");
        Ok(Box::new(LocalCubeReader {
            manifest,
            layout,
            closed: false,
        }))
    }
}

#[async_trait]
impl SegySessionFactory for LocalSeismicStore {
    async fn open(
        &self,
        path: &SdPath,
        credentials: &RemoteCredentials,
    ) -> Result<Box<dyn SegySession>> {
        let manifest: SegyManifest = self.load(path, credentials).await?;
        Ok(Box::new(LocalSegySession {
            manifest,
            closed: false,
        }))
    }
}

fn ensure_open(closed: bool) -> Result<()> {
    if closed {
        return Err(MetadataError::Internal("reader already closed".to_string()));
    }
    Ok(())
}

/// ZGY cube reader over a loaded manifest
pub struct LocalCubeReader {
    manifest: ZgyManifest,
    layout: CubeLayout,
    closed: bool,
}

impl Release for LocalCubeReader {
    fn close(&mut self) -> Result<()> {
        ensure_open(self.closed)?;
        self.closed = true;
        Ok(())
    }
}

impl CubeReader for LocalCubeReader {
    fn guid(&self) -> Result<Uuid> {
        ensure_open(self.closed)?;
        Ok(self.manifest.guid)
    }

    fn size(&self) -> Result<[u64; 3]> {
        ensure_open(self.closed)?;
        Ok(self.layout.size)
    }

    fn brick_size(&self) -> Result<[u64; 3]> {
        ensure_open(self.closed)?;
        Ok(self.layout.brick_size.dims())
    }

    fn data_type(&self) -> Result<SampleDataType> {
        ensure_open(self.closed)?;
        Ok(self.manifest.data_type)
    }

    fn data_range(&self) -> Result<ValueRange> {
        ensure_open(self.closed)?;
        Ok(self.manifest.data_range)
    }

    fn z_unit(&self) -> Result<UnitInfo> {
        ensure_open(self.closed)?;
        Ok(self.manifest.z_unit.clone())
    }

    fn xy_unit(&self) -> Result<UnitInfo> {
        ensure_open(self.closed)?;
        Ok(self.manifest.xy_unit.clone())
    }

    fn annotation_start(&self) -> Result<[f64; 2]> {
        ensure_open(self.closed)?;
        Ok(self.manifest.annotation_start)
    }

    fn annotation_increment(&self) -> Result<[f64; 2]> {
        ensure_open(self.closed)?;
        Ok(self.manifest.annotation_increment)
    }

    fn world_corners(&self) -> Result<Corners> {
        ensure_open(self.closed)?;
        Ok(self.manifest.world_corners)
    }

    fn index_corners(&self) -> Result<Corners> {
        ensure_open(self.closed)?;
        Ok(self.manifest.index_corners)
    }

    fn annotation_corners(&self) -> Result<Corners> {
        ensure_open(self.closed)?;
        Ok(self.manifest.annotation_corners)
    }

    fn levels_of_detail(&self) -> Result<u32> {
        ensure_open(self.closed)?;
        Ok(self.layout.levels_of_detail())
    }

    fn brick_counts(&self) -> Result<Vec<[u64; 3]>> {
        ensure_open(self.closed)?;
        Ok(self.layout.bricks_per_level())
    }

    fn statistics(&self) -> Result<SampleStatistics> {
        ensure_open(self.closed)?;
        Ok(self.manifest.statistics.clone())
    }

    fn histogram(&self) -> Result<SampleHistogram> {
        ensure_open(self.closed)?;
        Ok(self.manifest.histogram.clone())
    }
}

/// SEG-Y session over a loaded manifest
pub struct LocalSegySession {
    manifest: SegyManifest,
    closed: bool,
}

impl Release for LocalSegySession {
    fn close(&mut self) -> Result<()> {
        ensure_open(self.closed)?;
        self.closed = true;
        Ok(())
    }
}

impl SegySession for LocalSegySession {
    fn revision(&self) -> Result<i64> {
        ensure_open(self.closed)?;
        Ok(self.manifest.revision)
    }

    fn is_3d(&self) -> Result<bool> {
        ensure_open(self.closed)?;
        Ok(self.manifest.is_3d)
    }

    fn trace_header_field_count(&self) -> Result<i64> {
        ensure_open(self.closed)?;
        Ok(self.manifest.trace_header_field_count)
    }

    fn ascii_headers_json(&self) -> Result<String> {
        ensure_open(self.closed)?;
        let text = self.manifest.textual_header.join("\n");
        Ok(json!({ "Textualheader": text }).to_string())
    }

    fn extended_ascii_headers_json(&self) -> Result<String> {
        ensure_open(self.closed)?;
        Ok(serde_json::to_string(&self.manifest.extended_textual_headers)?)
    }

    fn binary_header_json(&self) -> Result<String> {
        ensure_open(self.closed)?;
        Ok(serde_json::to_string(&self.manifest.binary_header)?)
    }

    fn raw_trace_headers_json(&self, start_trace: i64, traces_to_dump: i64) -> Result<String> {
        ensure_open(self.closed)?;
        let records = trace_range(&self.manifest.raw_trace_headers, start_trace, traces_to_dump)?;
        Ok(serde_json::to_string(records)?)
    }

    fn scaled_trace_headers_json(&self, start_trace: i64, traces_to_dump: i64) -> Result<String> {
        ensure_open(self.closed)?;
        let records = trace_range(
            &self.manifest.scaled_trace_headers,
            start_trace,
            traces_to_dump,
        )?;
        Ok(serde_json::to_string(records)?)
    }
}
