//! Request dispatch: configure credentials, open one reader or session, run
//! one operation against it and release it.
//!
//! Every opened handle is wrapped in a [`Scoped`] guard, so it is closed
//! exactly once whether the operation succeeds, fails or panics.

use crate::config::ServiceConfig;
use crate::error::{MetadataError, Result};
use crate::sdk::{
    CubeReader, CubeReaderFactory, Release, RemoteAccess, RemoteCredentials, SdPath,
    SegySession, SegySessionFactory,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Caller credentials taken from the request headers
#[derive(Clone, PartialEq, Eq)]
pub struct RequestAuth {
    /// Value of the `Authorization` header, forwarded verbatim
    pub bearer: String,
    /// Value of the `appkey` header
    pub app_key: String,
}

impl std::fmt::Debug for RequestAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestAuth").finish_non_exhaustive()
    }
}

/// Owns an open reader or session and closes it exactly once
pub struct Scoped<R: Release + ?Sized> {
    inner: Option<Box<R>>,
    dataset: String,
}

impl<R: Release + ?Sized> Scoped<R> {
    pub fn new(inner: Box<R>, dataset: impl Into<String>) -> Self {
        Self {
            inner: Some(inner),
            dataset: dataset.into(),
        }
    }

    pub fn get(&self) -> Result<&R> {
        self.inner
            .as_deref()
            .ok_or_else(|| MetadataError::Internal(format!("{} already released", self.dataset)))
    }

    /// Close the handle now and report the outcome
    pub fn release(mut self) -> Result<()> {
        match self.inner.take() {
            Some(mut inner) => {
                debug!(dataset = %self.dataset, "Releasing reader");
                inner.close()
            }
            None => Ok(()),
        }
    }
}

impl<R: Release + ?Sized> Drop for Scoped<R> {
    fn drop(&mut self) {
        if let Some(mut inner) = self.inner.take() {
            debug!(dataset = %self.dataset, "Releasing reader on early exit");
            if let Err(e) = inner.close() {
                warn!(dataset = %self.dataset, error = %e, "Failed to release reader");
            }
        }
    }
}

/// Runs one operation per request against the seismic readers
#[derive(Clone)]
pub struct Dispatcher {
    config: Arc<ServiceConfig>,
    remote_access: Arc<dyn RemoteAccess>,
    cubes: Arc<dyn CubeReaderFactory>,
    segy: Arc<dyn SegySessionFactory>,
}

impl Dispatcher {
    pub fn new(
        config: Arc<ServiceConfig>,
        remote_access: Arc<dyn RemoteAccess>,
        cubes: Arc<dyn CubeReaderFactory>,
        segy: Arc<dyn SegySessionFactory>,
    ) -> Self {
        Self {
            config,
            remote_access,
            cubes,
            segy,
        }
    }

    /// Open the ZGY cube at `sdpath` and run `op` against it
    pub async fn with_cube_reader<T, F>(&self, auth: &RequestAuth, sdpath: &str, op: F) -> Result<T>
    where
        F: FnOnce(&dyn CubeReader) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (path, credentials) = self.prepare(auth, sdpath).await?;
        let reader = self
            .cubes
            .open(&path, &credentials)
            .await
            .map_err(|e| open_failure(&path, e))?;
        debug!(dataset = %path, "Opened cube reader");

        run_scoped(Scoped::new(reader, path.to_string()), move |reader| op(reader)).await
    }

    /// Open the SEG-Y file at `sdpath` and run `op` against it
    pub async fn with_segy_session<T, F>(
        &self,
        auth: &RequestAuth,
        sdpath: &str,
        op: F,
    ) -> Result<T>
    where
        F: FnOnce(&dyn SegySession) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (path, credentials) = self.prepare(auth, sdpath).await?;
        let session = self
            .segy
            .open(&path, &credentials)
            .await
            .map_err(|e| open_failure(&path, e))?;
        debug!(dataset = %path, "Opened SEG-Y session");

        run_scoped(Scoped::new(session, path.to_string()), move |session| op(session)).await
    }

    async fn prepare(&self, auth: &RequestAuth, sdpath: &str) -> Result<(SdPath, RemoteCredentials)> {
        let credentials = self
            .remote_access
            .configure(&self.config.sdms_url, &auth.app_key, &auth.bearer)
            .await
            .map_err(|e| match e {
                MetadataError::Authorization(msg) => MetadataError::Authorization(msg),
                other => MetadataError::Authorization(other.to_string()),
            })?;

        let path = SdPath::parse(sdpath).map_err(|e| MetadataError::InvalidInput(e.to_string()))?;
        Ok((path, credentials))
    }
}

/// Opening keeps an embedded status code; any other failure means the path
/// could not be used.
fn open_failure(path: &SdPath, err: MetadataError) -> MetadataError {
    if err.is_classified() {
        warn!(dataset = %path, error = %err, "Open failed with classified error");
        err
    } else {
        MetadataError::InvalidInput(format!("cannot open {}: {}", path, err))
    }
}

/// Run a blocking operation on the guarded handle and release it afterwards.
///
/// The operation runs on the blocking pool; a panic there drops the guard
/// during unwinding and surfaces as an internal error.
async fn run_scoped<R, T, F>(scoped: Scoped<R>, op: F) -> Result<T>
where
    R: Release + ?Sized + 'static,
    F: FnOnce(&R) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let dataset = scoped.dataset.clone();
    let joined = tokio::task::spawn_blocking(move || {
        let result = scoped.get().and_then(op);
        match (result, scoped.release()) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(close_err)) => Err(close_err),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(close_err)) => {
                warn!(error = %close_err, "Failed to release reader after error");
                Err(e)
            }
        }
    })
    .await;

    match joined {
        Ok(result) => result,
        Err(e) if e.is_panic() => Err(MetadataError::Internal(format!(
            "operation on {} panicked",
            dataset
        ))),
        Err(e) => Err(MetadataError::Internal(e.to_string())),
    }
}
