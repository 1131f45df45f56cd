//! Repository interfaces for the Records domain

pub mod memory;

use async_trait::async_trait;
use fitroom_common::Error;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{
    ActorRecord, ActorUpdate, GenerationRecord, NewActor, NewOutfit, OutfitRecord, OutfitUpdate,
    UploadFile,
};

/// Record-store specific error types
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Uuid },

    #[error("Invalid record: {0}")]
    Validation(String),

    #[error("Blob storage error: {0}")]
    Blob(String),

    #[error("Record storage error: {0}")]
    Storage(String),
}

impl From<validator::ValidationErrors> for RecordError {
    fn from(err: validator::ValidationErrors) -> Self {
        RecordError::Validation(err.to_string())
    }
}

impl From<RecordError> for Error {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::NotFound { .. } => Error::NotFound(err.to_string()),
            RecordError::Validation(msg) => Error::Validation(msg),
            RecordError::Blob(msg) | RecordError::Storage(msg) => Error::Storage(msg),
        }
    }
}

/// Document store for actors, outfits and generations.
///
/// Returned records always carry an `image_url` resolved through the
/// store's [`BlobStore`]. Lists are ordered newest first.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_actors(&self) -> Result<Vec<ActorRecord>, RecordError>;

    async fn get_actor(&self, id: Uuid) -> Result<ActorRecord, RecordError>;

    /// Upload the image and create the document, returning its id
    async fn add_actor(&self, actor: NewActor, file: UploadFile) -> Result<Uuid, RecordError>;

    async fn edit_actor(&self, id: Uuid, update: ActorUpdate) -> Result<ActorRecord, RecordError>;

    /// Remove the document and its image blob
    async fn delete_actor(&self, id: Uuid, file_id: Uuid) -> Result<(), RecordError>;

    async fn list_outfits(&self) -> Result<Vec<OutfitRecord>, RecordError>;

    async fn get_outfit(&self, id: Uuid) -> Result<OutfitRecord, RecordError>;

    async fn add_outfit(&self, outfit: NewOutfit, file: UploadFile) -> Result<Uuid, RecordError>;

    async fn edit_outfit(
        &self,
        id: Uuid,
        update: OutfitUpdate,
    ) -> Result<OutfitRecord, RecordError>;

    async fn delete_outfit(&self, id: Uuid, file_id: Uuid) -> Result<(), RecordError>;

    async fn list_generations(&self) -> Result<Vec<GenerationRecord>, RecordError>;

    async fn get_generation(&self, id: Uuid) -> Result<GenerationRecord, RecordError>;

    /// Remove a generation; `file_id` is `None` for generations without output
    async fn delete_generation(&self, id: Uuid, file_id: Option<Uuid>)
        -> Result<(), RecordError>;
}

/// Binary storage for record images
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn upload(&self, file: UploadFile) -> Result<Uuid, RecordError>;

    async fn delete(&self, file_id: Uuid) -> Result<(), RecordError>;

    /// Fetchable URL for a stored file
    fn url(&self, file_id: Uuid) -> String;
}
