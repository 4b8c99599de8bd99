//! Application state for the console service.

use std::sync::Arc;

use common::config::AppConfig;

use crate::gateway::{PgSessionFactory, SqlGateway};
use crate::provisioning::{NeonClient, ProvisioningApi};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub provisioning: Arc<dyn ProvisioningApi>,
    pub gateway: Arc<SqlGateway>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: AppConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        let provisioning = Arc::new(NeonClient::new(&config, http_client));
        let sessions = Arc::new(PgSessionFactory::new(&config));

        Self {
            provisioning,
            gateway: Arc::new(SqlGateway::new(sessions)),
            config,
        }
    }
}
