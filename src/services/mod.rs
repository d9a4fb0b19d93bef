mod error;
mod local_storage;
mod supabase_storage;

pub use error::StorageError;
pub use local_storage::LocalStorageService;
pub use supabase_storage::SupabaseStorageService;

use std::{collections::HashMap, sync::Arc};

use tracing::info;

use crate::{
    application::services::StorageService,
    domain::config::local::{LocalConfig, Provider},
};

/// Builds every provider the configuration enables. `local` is always available.
pub async fn create_storage_services(
    config: &LocalConfig,
) -> Result<HashMap<Provider, Arc<dyn StorageService>>, StorageError> {
    let mut services: HashMap<Provider, Arc<dyn StorageService>> = HashMap::new();

    let local = LocalStorageService::new(&config.storage).await?;
    info!("Local storage ready at {}", local.storage_root());
    services.insert(Provider::Local, Arc::new(local));

    if let Some(secrets) = &config.supabase {
        let supabase = SupabaseStorageService::new(secrets.clone(), &config.storage);
        info!("Supabase storage enabled for bucket {}", secrets.bucket_name);
        services.insert(Provider::Supabase, Arc::new(supabase));
    }

    Ok(services)
}
