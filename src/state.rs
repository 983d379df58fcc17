//! Application state for the metadata service.

use std::sync::Arc;

use crate::access::LocalSeismicStore;
use crate::config::ServiceConfig;
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::sdk::{CubeReaderFactory, RemoteAccess, SeismicStoreAccess, SegySessionFactory};

/// Shared application state.
pub struct AppState {
    /// Immutable service configuration.
    pub config: Arc<ServiceConfig>,

    /// Runs reader operations for the seismic endpoints.
    pub dispatcher: Dispatcher,
}

impl AppState {
    /// Create state from explicit collaborators.
    pub fn new(
        config: ServiceConfig,
        remote_access: Arc<dyn RemoteAccess>,
        cubes: Arc<dyn CubeReaderFactory>,
        segy: Arc<dyn SegySessionFactory>,
    ) -> Self {
        let config = Arc::new(config);
        let dispatcher = Dispatcher::new(Arc::clone(&config), remote_access, cubes, segy);
        Self { config, dispatcher }
    }

    /// Create state backed by the local seismic store under `data_root`.
    pub fn local(config: ServiceConfig, data_root: &str) -> Result<Self> {
        let store = Arc::new(LocalSeismicStore::new(data_root)?);
        Ok(Self::new(
            config,
            Arc::new(SeismicStoreAccess),
            store.clone(),
            store,
        ))
    }
}
