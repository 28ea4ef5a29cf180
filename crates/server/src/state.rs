use std::sync::Arc;
use brickfind_core::{Config, SanitizedConfig, SetResolver};

/// Shared application state
pub struct AppState {
    config: Config,
    resolver: Arc<SetResolver>,
}

impl AppState {
    pub fn new(config: Config, resolver: Arc<SetResolver>) -> Self {
        Self { config, resolver }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn resolver(&self) -> &SetResolver {
        self.resolver.as_ref()
    }
}
