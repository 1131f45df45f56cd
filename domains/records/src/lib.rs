//! Records domain: actor, outfit and generation documents
//!
//! Documents live in a [`RecordStore`]; their images live in a [`BlobStore`]
//! and are exposed to callers as fetchable URLs.

pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{
    ActorRecord, ActorUpdate, GenerationKind, GenerationRecord, GenerationStatus, NewActor,
    NewOutfit, OutfitRecord, OutfitUpdate, UploadFile, MAX_UPLOAD_BYTES,
};

// Re-export repository types
pub use repository::memory::{InMemoryBlobStore, InMemoryRecordStore};
pub use repository::{BlobStore, RecordError, RecordStore};
