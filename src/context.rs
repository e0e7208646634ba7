use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::HttpService;

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub http: Arc<dyn HttpService>,
}

impl AppContext {
    pub fn new(config: AppConfig, http: Arc<dyn HttpService>) -> Self {
        Self { config, http }
    }
}
