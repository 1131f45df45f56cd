//! Fitroom application composition root
//!
//! Wires the selection store, session provider, record store and generation
//! client into a single [`FittingRoom`].

mod fitting_room;

use std::sync::Arc;

use fitroom_auth::{SessionConfig, SessionProviderFactory};
use fitroom_common::{Config, LogFormat};
use fitroom_records::{InMemoryBlobStore, InMemoryRecordStore};
use fitroom_render::{GenerationClientFactory, GenerationConfig};
use fitroom_selection::{FileKeyValueStore, PersistentSelectionStore, SharedSelectionStore};
use tracing_subscriber::EnvFilter;

pub use fitting_room::FittingRoom;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {}", e))
}

/// Create the fitting room with providers selected from the environment
pub fn create_app(config: &Config) -> Result<FittingRoom, anyhow::Error> {
    // Device-local storage, restored before any screen subscribes
    let storage = FileKeyValueStore::open(&config.selection_storage_path)?;
    let store: PersistentSelectionStore<_> =
        PersistentSelectionStore::restore(storage, config.selection_storage_key.clone());
    let selection = SharedSelectionStore::new(store);

    let session = SessionProviderFactory::create(SessionConfig::from_env())?;
    let generation = GenerationClientFactory::create(GenerationConfig::from_env()?)?;

    let blobs = Arc::new(InMemoryBlobStore::new(config.blob_base_url.clone()));
    let records = Arc::new(InMemoryRecordStore::new(blobs));

    tracing::info!(
        storage_path = %config.selection_storage_path.display(),
        phase = %selection.phase(),
        "Fitting room created"
    );

    Ok(FittingRoom::new(
        selection,
        Arc::from(session),
        records,
        Arc::from(generation),
    ))
}
