//! In-memory record and blob stores
//!
//! Used by the mock composition root and by tests. Documents are kept in
//! insertion order and served newest first.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use super::{BlobStore, RecordError, RecordStore};
use crate::domain::entities::{
    ActorRecord, ActorUpdate, GenerationRecord, NewActor, NewOutfit, OutfitRecord, OutfitUpdate,
    UploadFile,
};

/// Blob store keeping file bytes in a map
pub struct InMemoryBlobStore {
    base_url: String,
    files: RwLock<HashMap<Uuid, UploadFile>>,
}

impl InMemoryBlobStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            files: RwLock::new(HashMap::new()),
        }
    }

    pub fn contains(&self, file_id: Uuid) -> bool {
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&file_id)
    }

    pub fn len(&self) -> usize {
        self.files.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn upload(&self, file: UploadFile) -> Result<Uuid, RecordError> {
        file.validate_image()?;

        let file_id = Uuid::new_v4();
        tracing::debug!(
            file_id = %file_id,
            filename = %file.filename,
            size = file.bytes.len(),
            "Stored blob"
        );
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(file_id, file);
        Ok(file_id)
    }

    async fn delete(&self, file_id: Uuid) -> Result<(), RecordError> {
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&file_id)
            .map(|_| ())
            .ok_or(RecordError::NotFound {
                kind: "file",
                id: file_id,
            })
    }

    fn url(&self, file_id: Uuid) -> String {
        format!("{}/files/{}/view", self.base_url, file_id)
    }
}

#[derive(Default)]
struct Documents {
    actors: Vec<ActorRecord>,
    outfits: Vec<OutfitRecord>,
    generations: Vec<GenerationRecord>,
}

/// Record store keeping documents in memory, images in a [`BlobStore`]
pub struct InMemoryRecordStore {
    blobs: Arc<dyn BlobStore>,
    documents: RwLock<Documents>,
}

impl InMemoryRecordStore {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            blobs,
            documents: RwLock::new(Documents::default()),
        }
    }

    pub fn blobs(&self) -> &Arc<dyn BlobStore> {
        &self.blobs
    }

    /// Add a generation document as the render backend would
    pub fn insert_generation(&self, record: GenerationRecord) -> Uuid {
        let id = record.id;
        tracing::debug!(
            generation_id = %id,
            kind = %record.kind,
            status = %record.status,
            "Inserted generation record"
        );
        self.write().generations.push(record);
        id
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Documents> {
        self.documents.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Documents> {
        self.documents.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn resolve_actor(&self, mut record: ActorRecord) -> ActorRecord {
        record.image_url = self.blobs.url(record.file_id);
        record
    }

    fn resolve_outfit(&self, mut record: OutfitRecord) -> OutfitRecord {
        record.image_url = self.blobs.url(record.file_id);
        record
    }

    fn resolve_generation(&self, mut record: GenerationRecord) -> GenerationRecord {
        record.image_url = record.file_id.map(|file_id| self.blobs.url(file_id));
        record
    }

    /// Delete a blob that is no longer referenced; failure leaves an orphan
    async fn release_blob(&self, file_id: Uuid) {
        if let Err(e) = self.blobs.delete(file_id).await {
            tracing::warn!(file_id = %file_id, error = %e, "Failed to delete blob");
        }
    }
}

fn newest_first<T>(mut records: Vec<T>, created_at: impl Fn(&T) -> chrono::DateTime<Utc>) -> Vec<T> {
    records.reverse();
    records.sort_by_key(|record| std::cmp::Reverse(created_at(record)));
    records
}

fn check_file_id(kind: &'static str, expected: Uuid, given: Uuid) -> Result<(), RecordError> {
    if expected != given {
        return Err(RecordError::Validation(format!(
            "File {} does not belong to this {}",
            given, kind
        )));
    }
    Ok(())
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list_actors(&self) -> Result<Vec<ActorRecord>, RecordError> {
        let actors = self.read().actors.clone();
        Ok(newest_first(actors, |a| a.created_at)
            .into_iter()
            .map(|a| self.resolve_actor(a))
            .collect())
    }

    async fn get_actor(&self, id: Uuid) -> Result<ActorRecord, RecordError> {
        let actor = self
            .read()
            .actors
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(RecordError::NotFound { kind: "actor", id })?;
        Ok(self.resolve_actor(actor))
    }

    async fn add_actor(&self, actor: NewActor, file: UploadFile) -> Result<Uuid, RecordError> {
        actor.validate()?;
        let file_id = self.blobs.upload(file).await?;

        let now = Utc::now();
        let record = ActorRecord {
            id: Uuid::new_v4(),
            name: actor.name,
            file_id,
            image_url: String::new(),
            age: actor.age,
            weight: actor.weight,
            height: actor.height,
            bio: actor.bio,
            gender: actor.gender,
            genre: actor.genre,
            created_at: now,
            updated_at: now,
        };
        let id = record.id;

        tracing::info!(actor_id = %id, file_id = %file_id, "Created actor record");
        self.write().actors.push(record);
        Ok(id)
    }

    async fn edit_actor(&self, id: Uuid, mut update: ActorUpdate) -> Result<ActorRecord, RecordError> {
        update.validate()?;
        let current = self.get_actor(id).await?;

        let replaced = match update.file.take() {
            Some(file) => Some((current.file_id, self.blobs.upload(file).await?)),
            None => None,
        };

        let record = {
            let mut documents = self.write();
            let record = documents
                .actors
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or(RecordError::NotFound { kind: "actor", id })?;
            update.apply(record);
            if let Some((_, new_file_id)) = replaced {
                record.file_id = new_file_id;
            }
            record.clone()
        };

        if let Some((old_file_id, _)) = replaced {
            self.release_blob(old_file_id).await;
        }

        tracing::info!(actor_id = %id, "Updated actor record");
        Ok(self.resolve_actor(record))
    }

    async fn delete_actor(&self, id: Uuid, file_id: Uuid) -> Result<(), RecordError> {
        {
            let mut documents = self.write();
            let index = documents
                .actors
                .iter()
                .position(|a| a.id == id)
                .ok_or(RecordError::NotFound { kind: "actor", id })?;
            check_file_id("actor", documents.actors[index].file_id, file_id)?;
            documents.actors.remove(index);
        }

        self.release_blob(file_id).await;
        tracing::info!(actor_id = %id, "Deleted actor record");
        Ok(())
    }

    async fn list_outfits(&self) -> Result<Vec<OutfitRecord>, RecordError> {
        let outfits = self.read().outfits.clone();
        Ok(newest_first(outfits, |o| o.created_at)
            .into_iter()
            .map(|o| self.resolve_outfit(o))
            .collect())
    }

    async fn get_outfit(&self, id: Uuid) -> Result<OutfitRecord, RecordError> {
        let outfit = self
            .read()
            .outfits
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or(RecordError::NotFound { kind: "outfit", id })?;
        Ok(self.resolve_outfit(outfit))
    }

    async fn add_outfit(&self, outfit: NewOutfit, file: UploadFile) -> Result<Uuid, RecordError> {
        outfit.validate()?;
        let file_id = self.blobs.upload(file).await?;

        let now = Utc::now();
        let record = OutfitRecord {
            id: Uuid::new_v4(),
            name: outfit.name,
            file_id,
            image_url: String::new(),
            brand: outfit.brand,
            size: outfit.size,
            material: outfit.material,
            garment_type: outfit.garment_type,
            category: outfit.category,
            theme: outfit.theme,
            created_at: now,
            updated_at: now,
        };
        let id = record.id;

        tracing::info!(
            outfit_id = %id,
            category = %record.category,
            file_id = %file_id,
            "Created outfit record"
        );
        self.write().outfits.push(record);
        Ok(id)
    }

    async fn edit_outfit(
        &self,
        id: Uuid,
        mut update: OutfitUpdate,
    ) -> Result<OutfitRecord, RecordError> {
        update.validate()?;
        let current = self.get_outfit(id).await?;

        let replaced = match update.file.take() {
            Some(file) => Some((current.file_id, self.blobs.upload(file).await?)),
            None => None,
        };

        let record = {
            let mut documents = self.write();
            let record = documents
                .outfits
                .iter_mut()
                .find(|o| o.id == id)
                .ok_or(RecordError::NotFound { kind: "outfit", id })?;
            update.apply(record);
            if let Some((_, new_file_id)) = replaced {
                record.file_id = new_file_id;
            }
            record.clone()
        };

        if let Some((old_file_id, _)) = replaced {
            self.release_blob(old_file_id).await;
        }

        tracing::info!(outfit_id = %id, "Updated outfit record");
        Ok(self.resolve_outfit(record))
    }

    async fn delete_outfit(&self, id: Uuid, file_id: Uuid) -> Result<(), RecordError> {
        {
            let mut documents = self.write();
            let index = documents
                .outfits
                .iter()
                .position(|o| o.id == id)
                .ok_or(RecordError::NotFound { kind: "outfit", id })?;
            check_file_id("outfit", documents.outfits[index].file_id, file_id)?;
            documents.outfits.remove(index);
        }

        self.release_blob(file_id).await;
        tracing::info!(outfit_id = %id, "Deleted outfit record");
        Ok(())
    }

    async fn list_generations(&self) -> Result<Vec<GenerationRecord>, RecordError> {
        let generations = self.read().generations.clone();
        Ok(newest_first(generations, |g| g.created_at)
            .into_iter()
            .map(|g| self.resolve_generation(g))
            .collect())
    }

    async fn get_generation(&self, id: Uuid) -> Result<GenerationRecord, RecordError> {
        let generation = self
            .read()
            .generations
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or(RecordError::NotFound {
                kind: "generation",
                id,
            })?;
        Ok(self.resolve_generation(generation))
    }

    async fn delete_generation(
        &self,
        id: Uuid,
        file_id: Option<Uuid>,
    ) -> Result<(), RecordError> {
        {
            let mut documents = self.write();
            let index = documents
                .generations
                .iter()
                .position(|g| g.id == id)
                .ok_or(RecordError::NotFound {
                    kind: "generation",
                    id,
                })?;
            if documents.generations[index].file_id != file_id {
                return Err(RecordError::Validation(
                    "File does not belong to this generation".to_string(),
                ));
            }
            documents.generations.remove(index);
        }

        if let Some(file_id) = file_id {
            self.release_blob(file_id).await;
        }
        tracing::info!(generation_id = %id, "Deleted generation record");
        Ok(())
    }
}
