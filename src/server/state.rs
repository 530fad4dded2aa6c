use std::sync::Arc;

use crate::config::Settings;
use crate::template::RegistryOptions;

#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }

    pub fn registry_options(&self) -> RegistryOptions {
        self.settings.templates.registry_options()
    }
}
