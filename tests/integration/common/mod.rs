//! Common test utilities and fixtures for integration tests
//!
//! This module provides shared infrastructure for all integration tests including:
//! - A fitting room wired to in-memory collaborators
//! - File-backed selection storage in a temporary directory
//! - Catalogue fixtures

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use fitroom_app::FittingRoom;
use fitroom_auth::{InMemorySessionProvider, SessionProvider, User};
use fitroom_common::config::DEFAULT_SELECTION_STORAGE_KEY;
use fitroom_records::{
    InMemoryBlobStore, InMemoryRecordStore, NewActor, NewOutfit, RecordStore, UploadFile,
};
use fitroom_render::mock::MockGenerationClient;
use fitroom_render::GenerationClient;
use fitroom_selection::{FileKeyValueStore, PersistentSelectionStore, SharedSelectionStore};
use tempfile::TempDir;
use uuid::Uuid;

pub const BLOB_BASE_URL: &str = "https://blob.test/v1/storage";
pub const TEST_EMAIL: &str = "mia@example.com";
pub const TEST_PASSWORD: &str = "runway-2024";

/// Fitting room plus handles to every collaborator behind it
pub struct TestApp {
    pub room: FittingRoom,
    pub session: Arc<InMemorySessionProvider>,
    pub blobs: Arc<InMemoryBlobStore>,
    pub records: Arc<InMemoryRecordStore>,
    pub generation: MockGenerationClient,
    pub storage_path: PathBuf,
    _storage_dir: Arc<TempDir>,
}

impl TestApp {
    /// Create a fitting room backed by a fresh storage file
    pub fn new() -> Result<Self> {
        let storage_dir = Arc::new(tempfile::tempdir()?);
        let storage_path = storage_dir.path().join("fitroom_storage.json");

        let session = Arc::new(InMemorySessionProvider::new());
        let blobs = Arc::new(InMemoryBlobStore::new(BLOB_BASE_URL));
        let records = Arc::new(InMemoryRecordStore::new(blobs.clone()));
        let generation = MockGenerationClient::new();

        let room = build_room(
            &storage_path,
            session.clone(),
            records.clone(),
            Arc::new(generation.clone()),
        )?;

        Ok(Self {
            room,
            session,
            blobs,
            records,
            generation,
            storage_path,
            _storage_dir: storage_dir,
        })
    }

    /// Simulate an app restart: same device storage and backends, new store
    pub fn restart(&self) -> Result<Self> {
        let room = build_room(
            &self.storage_path,
            self.session.clone(),
            self.records.clone(),
            Arc::new(self.generation.clone()),
        )?;

        Ok(Self {
            room,
            session: self.session.clone(),
            blobs: self.blobs.clone(),
            records: self.records.clone(),
            generation: self.generation.clone(),
            storage_path: self.storage_path.clone(),
            _storage_dir: self._storage_dir.clone(),
        })
    }

    pub async fn sign_in(&self) -> Result<User> {
        Ok(self
            .session
            .register(TEST_EMAIL, TEST_PASSWORD, "Mia")
            .await?)
    }

    /// Raw JSON blob persisted under the selection key
    pub fn persisted_blob(&self) -> Result<serde_json::Value> {
        let raw = std::fs::read_to_string(&self.storage_path)?;
        let map: serde_json::Value = serde_json::from_str(&raw)?;
        let blob = map[DEFAULT_SELECTION_STORAGE_KEY]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("selection key missing from storage file"))?;
        Ok(serde_json::from_str(blob)?)
    }
}

pub fn build_room(
    storage_path: &Path,
    session: Arc<dyn SessionProvider>,
    records: Arc<dyn RecordStore>,
    generation: Arc<dyn GenerationClient>,
) -> Result<FittingRoom> {
    let storage = FileKeyValueStore::open(storage_path)?;
    let store: PersistentSelectionStore<_> =
        PersistentSelectionStore::restore(storage, DEFAULT_SELECTION_STORAGE_KEY);

    Ok(FittingRoom::new(
        SharedSelectionStore::new(store),
        session,
        records,
        generation,
    ))
}

pub fn png(name: &str) -> UploadFile {
    UploadFile::new(name, "image/png", vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a])
}

/// Catalogue ids created by [`seed_catalogue`]
pub struct Catalogue {
    pub actor: Uuid,
    pub top: Uuid,
    pub bottom: Uuid,
    pub gown: Uuid,
    pub hat: Uuid,
}

pub async fn seed_catalogue(records: &dyn RecordStore) -> Result<Catalogue> {
    let actor = records
        .add_actor(
            NewActor {
                name: "Mia".to_string(),
                age: 27,
                weight: 58.5,
                height: 172.0,
                bio: "Runway model".to_string(),
                gender: "female".to_string(),
                genre: "editorial".to_string(),
            },
            png("mia.png"),
        )
        .await?;

    let top = records
        .add_outfit(
            NewOutfit::new("Linen Shirt", "top")
                .with_brand("Acme")
                .with_size("M")
                .with_garment_type("Tops"),
            png("shirt.png"),
        )
        .await?;
    let bottom = records
        .add_outfit(
            NewOutfit::new("Pleated Skirt", "bottom").with_garment_type("Bottoms"),
            png("skirt.png"),
        )
        .await?;
    // caller category says top, garment type says full
    let gown = records
        .add_outfit(
            NewOutfit::new("Silk Gown", "top").with_garment_type("Evening Dress"),
            png("gown.png"),
        )
        .await?;
    let hat = records
        .add_outfit(
            NewOutfit::new("Straw Hat", "accessory").with_garment_type("Accessories"),
            png("hat.png"),
        )
        .await?;

    Ok(Catalogue {
        actor,
        top,
        bottom,
        gown,
        hat,
    })
}
