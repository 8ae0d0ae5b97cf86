pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, ErrorKind};

use services::api_service::ApiService;
use services::connection_monitor::ConnectionMonitor;
use tracing::info;

/// Everything a front-end shell needs for one session. Build it once at
/// startup and hand out references.
pub struct AppState {
    pub api: ApiService,
    pub monitor: ConnectionMonitor,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let api = ApiService::new(config)?;
        let monitor = ConnectionMonitor::new(api.clone(), config.poll_interval);
        Ok(Self { api, monitor })
    }

    /// Installs logging, builds the state and kicks off connection
    /// monitoring. Must be called from inside a Tokio runtime.
    pub fn start(config: &AppConfig) -> Result<Self, AppError> {
        init_tracing();
        let state = Self::new(config)?;
        info!("Using backend at {}", state.api.base_url());
        state.monitor.start();
        Ok(state)
    }

    pub fn shutdown(&self) {
        self.monitor.shutdown();
    }
}

/// Installs a fmt subscriber unless one is already set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_target(false).try_init();
}
