// Command handlers, one module per command family
pub mod backup;
pub mod configure;
pub mod projects;
pub mod subs;

use crate::config::Config;
use crate::store::{ProjectStore, SupabaseClient};
use anyhow::{Context, Result};

/// Build the store and perform the initial load. A load failure aborts the
/// command before any interaction happens.
pub(crate) async fn load_store(config: &Config) -> Result<ProjectStore<SupabaseClient>> {
    let backend = config.require_backend()?;
    let client = SupabaseClient::new(backend)?;

    let mut store = ProjectStore::new(client);
    store
        .load()
        .await
        .context("Failed to load data from backend")?;
    Ok(store)
}
