//! Collaborator interfaces for the seismic readers.
//!
//! The binary formats (SEG-Y, ZGY) and the seismic-store protocol live behind
//! these traits. A request configures remote access once, opens one reader or
//! session, runs one operation against it and releases it. Readers are owned
//! by a single request and never shared.

use crate::error::{MetadataError, Result};
use crate::types::{
    Corners, SampleDataType, SampleHistogram, SampleStatistics, UnitInfo, ValueRange,
};
use async_trait::async_trait;
use std::fmt;
use uuid::Uuid;

/// Location of a dataset in the seismic store (`sd://tenant/subproject/path`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdPath {
    pub tenant: String,
    pub subproject: String,
    pub path: String,
}

impl SdPath {
    pub const SCHEME: &'static str = "sd://";

    /// Parse an `sd://` URL
    pub fn parse(url: &str) -> Result<Self> {
        let rest = url.trim().strip_prefix(Self::SCHEME).ok_or_else(|| {
            MetadataError::InvalidUrl(format!("expected {} URL, got '{}'", Self::SCHEME, url))
        })?;

        let mut parts = rest.splitn(3, '/');
        let tenant = parts.next().unwrap_or_default();
        let subproject = parts.next().unwrap_or_default();
        let path = parts.next().unwrap_or_default().trim_matches('/');

        if tenant.is_empty() || subproject.is_empty() || path.is_empty() {
            return Err(MetadataError::InvalidUrl(format!(
                "'{}' must name a tenant, subproject and dataset",
                url
            )));
        }
        if rest.contains('\\') {
            return Err(MetadataError::InvalidUrl(format!(
                "'{}' must not contain backslashes",
                url
            )));
        }
        let mut segments = [tenant, subproject].into_iter().chain(path.split('/'));
        if segments.any(|s| s.is_empty() || s == "." || s == "..") {
            return Err(MetadataError::InvalidUrl(format!(
                "'{}' must not contain empty, current or parent segments",
                url
            )));
        }

        Ok(Self {
            tenant: tenant.to_string(),
            subproject: subproject.to_string(),
            path: path.to_string(),
        })
    }

    /// Path relative to the store root
    pub fn relative_path(&self) -> String {
        format!("{}/{}/{}", self.tenant, self.subproject, self.path)
    }
}

impl fmt::Display for SdPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::SCHEME, self.relative_path())
    }
}

/// Credentials forwarded with every call to the seismic store
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteCredentials {
    pub service_url: String,
    pub app_key: String,
    pub token: String,
}

impl fmt::Debug for RemoteCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteCredentials")
            .field("service_url", &self.service_url)
            .field("app_key", &"<redacted>")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Configures remote access for one request
#[async_trait]
pub trait RemoteAccess: Send + Sync {
    async fn configure(
        &self,
        service_url: &str,
        app_key: &str,
        token: &str,
    ) -> Result<RemoteCredentials>;
}

/// Release of a reader or session. Called exactly once per opened handle.
pub trait Release: Send {
    fn close(&mut self) -> Result<()>;
}

/// Read access to the header of a ZGY cube
pub trait CubeReader: Release {
    fn guid(&self) -> Result<Uuid>;
    /// Samples per axis (inline, crossline, z)
    fn size(&self) -> Result<[u64; 3]>;
    fn brick_size(&self) -> Result<[u64; 3]>;
    fn data_type(&self) -> Result<SampleDataType>;
    fn data_range(&self) -> Result<ValueRange>;
    fn z_unit(&self) -> Result<UnitInfo>;
    fn xy_unit(&self) -> Result<UnitInfo>;
    /// First inline and crossline annotation
    fn annotation_start(&self) -> Result<[f64; 2]>;
    /// Inline and crossline annotation increment
    fn annotation_increment(&self) -> Result<[f64; 2]>;
    fn world_corners(&self) -> Result<Corners>;
    fn index_corners(&self) -> Result<Corners>;
    fn annotation_corners(&self) -> Result<Corners>;
    fn levels_of_detail(&self) -> Result<u32>;
    /// Bricks per axis for each level of detail
    fn brick_counts(&self) -> Result<Vec<[u64; 3]>>;
    fn statistics(&self) -> Result<SampleStatistics>;
    fn histogram(&self) -> Result<SampleHistogram>;
}

/// Read access to a SEG-Y file
pub trait SegySession: Release {
    fn revision(&self) -> Result<i64>;
    fn is_3d(&self) -> Result<bool>;
    fn trace_header_field_count(&self) -> Result<i64>;
    /// JSON document with a `Textualheader` member
    fn ascii_headers_json(&self) -> Result<String>;
    fn extended_ascii_headers_json(&self) -> Result<String>;
    fn binary_header_json(&self) -> Result<String>;
    fn raw_trace_headers_json(&self, start_trace: i64, traces_to_dump: i64) -> Result<String>;
    fn scaled_trace_headers_json(&self, start_trace: i64, traces_to_dump: i64) -> Result<String>;
}

/// Opens ZGY cube readers
#[async_trait]
pub trait CubeReaderFactory: Send + Sync {
    async fn open(
        &self,
        path: &SdPath,
        credentials: &RemoteCredentials,
    ) -> Result<Box<dyn CubeReader>>;
}

/// Opens SEG-Y sessions
#[async_trait]
pub trait SegySessionFactory: Send + Sync {
    async fn open(
        &self,
        path: &SdPath,
        credentials: &RemoteCredentials,
    ) -> Result<Box<dyn SegySession>>;
}

/// Credential configurator that requires every part of the credential triple
#[derive(Debug, Default, Clone, Copy)]
pub struct SeismicStoreAccess;

#[async_trait]
impl RemoteAccess for SeismicStoreAccess {
    async fn configure(
        &self,
        service_url: &str,
        app_key: &str,
        token: &str,
    ) -> Result<RemoteCredentials> {
        if service_url.trim().is_empty() {
            return Err(MetadataError::Configuration(
                "seismic store service URL is not configured".to_string(),
            ));
        }
        if app_key.trim().is_empty() {
            return Err(MetadataError::Authorization("empty app key".to_string()));
        }
        if token.trim().is_empty() {
            return Err(MetadataError::Authorization("empty bearer token".to_string()));
        }

        Ok(RemoteCredentials {
            service_url: service_url.to_string(),
            app_key: app_key.to_string(),
            token: token.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sd_path() {
        let path = SdPath::parse("sd://opendes/kt-demo/volumes/example.zgy").unwrap();
        assert_eq!(path.tenant, "opendes");
        assert_eq!(path.subproject, "kt-demo");
        assert_eq!(path.path, "volumes/example.zgy");
        assert_eq!(path.relative_path(), "opendes/kt-demo/volumes/example.zgy");
        assert_eq!(path.to_string(), "sd://opendes/kt-demo/volumes/example.zgy");
    }

    #[test]
    fn test_reject_malformed_sd_path() {
        assert!(SdPath::parse("s3://bucket/key").is_err());
        assert!(SdPath::parse("sd://opendes").is_err());
        assert!(SdPath::parse("sd://opendes/kt-demo/").is_err());
        assert!(SdPath::parse("sd://opendes/kt-demo/../secret").is_err());
        assert!(SdPath::parse("sd://../../secret").is_err());
        assert!(SdPath::parse("sd://opendes/../secret").is_err());
        assert!(SdPath::parse("sd://./kt-demo/cube.zgy").is_err());
        assert!(SdPath::parse("sd://opendes/kt-demo/a//b.zgy").is_err());
        assert!(SdPath::parse("sd://opendes/kt-demo/./b.zgy").is_err());
        assert!(SdPath::parse(r"sd://opendes/kt-demo/..\..\secret").is_err());
    }

    #[test]
    fn test_credentials_debug_redacts_secrets() {
        let creds = RemoteCredentials {
            service_url: "https://store".into(),
            app_key: "key".into(),
            token: "Bearer abc".into(),
        };
        let debug = format!("{:?}", creds);
        assert!(debug.contains("https://store"));
        assert!(!debug.contains("abc"));
    }

    #[tokio::test]
    async fn test_seismic_store_access() {
        let access = SeismicStoreAccess;
        let creds = access
            .configure("https://store", "key", "Bearer abc")
            .await
            .unwrap();
        assert_eq!(creds.token, "Bearer abc");

        assert!(matches!(
            access.configure("https://store", "", "Bearer abc").await,
            Err(MetadataError::Authorization(_))
        ));
        assert!(matches!(
            access.configure("", "key", "Bearer abc").await,
            Err(MetadataError::Configuration(_))
        ));
    }
}
