//! Async wrapper around [`Dashboard`] for use in async runtimes (Tokio, etc.).
//!
//! The dashboard does blocking HTTP, so every operation is moved onto the
//! blocking thread pool via [`tokio::task::spawn_blocking`].
//!
//! # Example
//!
//! ```no_run
//! use epiforecast_dashboard::{AsyncDashboard, DashboardConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let config = DashboardConfig::from_env().unwrap();
//!     let dashboard = AsyncDashboard::from_config(config).await.unwrap();
//!
//!     let html = dashboard.render().await.unwrap();
//!
//!     // Any sync method via closure
//!     let token = dashboard.run(|d| d.token()).await.unwrap();
//!
//!     dashboard.close().await.unwrap();
//! }
//! ```

use std::sync::Arc;

use crate::error::{DashboardError, Result};
use crate::{Dashboard, DashboardConfig, DashboardParams, HttpTransport, TimeSeries};

/// Async wrapper around [`Dashboard`].
///
/// The dashboard holds no mutable state, so renders share it through an
/// [`Arc`] without locking and may run concurrently.
#[derive(Clone)]
pub struct AsyncDashboard {
    inner: Arc<Dashboard<HttpTransport>>,
}

impl AsyncDashboard {
    /// Build the dashboard on the blocking pool.
    ///
    /// The blocking HTTP client must not be created on an async worker.
    pub async fn from_config(config: DashboardConfig) -> Result<Self> {
        tokio::task::spawn_blocking(move || {
            let dashboard = Dashboard::from_config(config)?;
            Ok(AsyncDashboard {
                inner: Arc::new(dashboard),
            })
        })
        .await
        .map_err(|e| DashboardError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Run a sync dashboard operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Dashboard<HttpTransport>) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let dashboard = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&dashboard))
            .await
            .map_err(|e| DashboardError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Render the dashboard page with the configured inputs.
    pub async fn render(&self) -> Result<String> {
        self.run(|d| d.render()).await
    }

    /// Fetch a calibration forecast with its daily change columns.
    pub async fn calibration(&self, params: DashboardParams) -> Result<TimeSeries> {
        self.run(move |d| d.calibration(&params)).await
    }

    /// Release the dashboard on the blocking pool.
    ///
    /// Dropping the blocking HTTP client on an async worker panics, so call
    /// this instead of letting the last handle drop inside the runtime.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || {
            drop(self.inner);
            Ok(())
        })
        .await
        .map_err(|e| DashboardError::InvalidArgument(format!("Task join error: {e}")))?
    }
}
