use std::{collections::HashMap, sync::Arc};

use crate::{
    application::{error::ApplicationError, services::StorageService},
    domain::config::local::Provider,
};

/// Configured storage providers, looked up by name.
#[derive(Clone)]
pub struct StorageRegistry {
    services: Arc<HashMap<Provider, Arc<dyn StorageService>>>,
}

impl StorageRegistry {
    pub fn new(services: HashMap<Provider, Arc<dyn StorageService>>) -> Self {
        Self {
            services: Arc::new(services),
        }
    }

    pub fn get(&self, provider: Provider) -> Option<Arc<dyn StorageService>> {
        self.services.get(&provider).cloned()
    }

    /// Provider holding an already stored file. A missing provider means the
    /// configuration changed since the file was saved.
    pub fn for_stored(&self, provider: Provider) -> Result<Arc<dyn StorageService>, ApplicationError> {
        self.get(provider).ok_or_else(|| {
            ApplicationError::Unexpected(format!("Storage provider '{}' is not configured", provider))
        })
    }

    pub fn providers(&self) -> Vec<Provider> {
        Provider::ALL
            .into_iter()
            .filter(|provider| self.services.contains_key(provider))
            .collect()
    }
}
