//! Seismic File Metadata Service
//!
//! An HTTP service that reads metadata out of seismic files held in a seismic
//! store and returns it as JSON.
//!
//! # Features
//!
//! - SEG-Y header fields: revision, 3D flag, textual/binary/trace headers
//! - ZGY cube header bundle (size, bricking, units, corners, statistics)
//! - Bin-grid description derived from the cube's three corner coordinate systems
//! - One reader per request, always released, with HTTP status classification
//!   of collaborator failures
//!
//! # Storage
//!
//! The reader and session traits in [`sdk`] are the seam to a seismic store.
//! The crate ships a filesystem-backed store ([`access::LocalSeismicStore`])
//! that resolves `sd://tenant/subproject/name` to a JSON manifest.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use seismic_file_metadata::{build_router, AppState, ServiceConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServiceConfig::new("/seismic-file-metadata/api/v1/", "https://sdms.example.com");
//! let state = Arc::new(AppState::local(config, "./data")?);
//! let app = build_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod access;
pub mod bingrid;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod handlers;
pub mod headers;
pub mod io;
pub mod layout;
pub mod metadata;
pub mod sdk;
pub mod server;
pub mod state;
pub mod types;

// Re-exports
pub use access::LocalSeismicStore;
pub use bingrid::{BinGrid, BinGridAttributes};
pub use config::ServiceConfig;
pub use dispatch::{Dispatcher, RequestAuth};
pub use error::{MetadataError, Result};
pub use headers::{HeaderBundle, HeaderText};
pub use io::{IOManager, StorageBackend};
pub use layout::{BrickSize, CubeLayout};
pub use sdk::{CubeReader, SdPath, SegySession};
pub use server::build_router;
pub use state::AppState;

/// Version of the metadata service
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
