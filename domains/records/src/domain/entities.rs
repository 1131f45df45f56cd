//! Domain entities for the Records domain
//!
//! Records are the catalogue documents selection screens browse: actors,
//! outfits, and the generations the render backend produced. Image-bearing
//! records carry the blob `file_id` plus a resolved `image_url`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use fitroom_selection::{ActorSelection, Category, OutfitSelection};

use crate::repository::RecordError;

/// Maximum upload size (10MB)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Content types accepted for actor and outfit images
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// A file to be placed in blob storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Check content type and size before upload
    pub fn validate_image(&self) -> Result<(), RecordError> {
        if !ALLOWED_IMAGE_TYPES.contains(&self.content_type.as_str()) {
            return Err(RecordError::Validation(format!(
                "Unsupported content type: {}",
                self.content_type
            )));
        }
        if self.bytes.is_empty() {
            return Err(RecordError::Validation(format!(
                "File {} is empty",
                self.filename
            )));
        }
        if self.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(RecordError::Validation(format!(
                "File {} exceeds {} bytes",
                self.filename, MAX_UPLOAD_BYTES
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Actors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorRecord {
    pub id: Uuid,
    pub name: String,
    pub file_id: Uuid,
    pub image_url: String,
    pub age: u32,
    pub weight: f64,
    pub height: f64,
    pub bio: String,
    pub gender: String,
    pub genre: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ActorRecord {
    /// Selection value the fitting room store holds for this actor
    pub fn to_selection(&self) -> ActorSelection {
        ActorSelection::new(self.id.to_string(), self.image_url.clone(), self.name.clone())
            .with_age(self.age)
            .with_weight(self.weight)
            .with_height(self.height)
            .with_bio(self.bio.clone())
            .with_gender(self.gender.clone())
            .with_genre(self.genre.clone())
    }
}

/// Payload for creating an actor
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct NewActor {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(range(max = 150))]
    pub age: u32,
    #[validate(
        range(min = 0.0, max = 500.0),
        custom(function = "validate_finite", message = "Must be a finite number")
    )]
    pub weight: f64,
    #[validate(
        range(min = 0.0, max = 300.0),
        custom(function = "validate_finite", message = "Must be a finite number")
    )]
    pub height: f64,
    #[validate(length(max = 2000))]
    pub bio: String,
    pub gender: String,
    pub genre: String,
}

/// Range checks let NaN through; stored measurements must serialize as numbers
fn validate_finite(value: f64) -> std::result::Result<(), validator::ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(validator::ValidationError::new("not_finite"))
    }
}

/// Partial actor edit; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ActorUpdate {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    #[validate(range(max = 150))]
    pub age: Option<u32>,
    #[validate(
        range(min = 0.0, max = 500.0),
        custom(function = "validate_finite", message = "Must be a finite number")
    )]
    pub weight: Option<f64>,
    #[validate(
        range(min = 0.0, max = 300.0),
        custom(function = "validate_finite", message = "Must be a finite number")
    )]
    pub height: Option<f64>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    pub gender: Option<String>,
    pub genre: Option<String>,
    /// Replacement image; the previous blob is deleted
    pub file: Option<UploadFile>,
}

impl ActorUpdate {
    pub(crate) fn apply(self, record: &mut ActorRecord) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(age) = self.age {
            record.age = age;
        }
        if let Some(weight) = self.weight {
            record.weight = weight;
        }
        if let Some(height) = self.height {
            record.height = height;
        }
        if let Some(bio) = self.bio {
            record.bio = bio;
        }
        if let Some(gender) = self.gender {
            record.gender = gender;
        }
        if let Some(genre) = self.genre {
            record.genre = genre;
        }
        record.updated_at = Utc::now();
    }
}

// ============================================================================
// Outfits
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitRecord {
    pub id: Uuid,
    pub name: String,
    pub file_id: Uuid,
    pub image_url: String,
    pub brand: String,
    pub size: String,
    pub material: String,
    pub garment_type: String,
    pub category: Category,
    pub theme: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OutfitRecord {
    /// Selection value for the fitting room, category still caller-supplied
    pub fn to_selection(&self) -> OutfitSelection {
        OutfitSelection::new(self.id.to_string(), self.category.clone())
            .with_image_url(self.image_url.clone())
            .with_name(self.name.clone())
            .with_brand(self.brand.clone())
            .with_size(self.size.clone())
            .with_material(self.material.clone())
            .with_garment_type(self.garment_type.clone())
            .with_theme(self.theme.clone())
    }
}

/// Payload for creating an outfit
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewOutfit {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub category: Category,
    #[validate(length(max = 128))]
    pub brand: String,
    #[validate(length(max = 32))]
    pub size: String,
    #[validate(length(max = 128))]
    pub material: String,
    #[validate(length(max = 128))]
    pub garment_type: String,
    #[validate(length(max = 128))]
    pub theme: String,
}

impl NewOutfit {
    pub fn new(name: impl Into<String>, category: impl Into<Category>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            brand: String::new(),
            size: String::new(),
            material: String::new(),
            garment_type: String::new(),
            theme: String::new(),
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = material.into();
        self
    }

    pub fn with_garment_type(mut self, garment_type: impl Into<String>) -> Self {
        self.garment_type = garment_type.into();
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }
}

/// Partial outfit edit; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct OutfitUpdate {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    pub category: Option<Category>,
    #[validate(length(max = 128))]
    pub brand: Option<String>,
    #[validate(length(max = 32))]
    pub size: Option<String>,
    #[validate(length(max = 128))]
    pub material: Option<String>,
    #[validate(length(max = 128))]
    pub garment_type: Option<String>,
    #[validate(length(max = 128))]
    pub theme: Option<String>,
    /// Replacement image; the previous blob is deleted
    pub file: Option<UploadFile>,
}

impl OutfitUpdate {
    pub(crate) fn apply(self, record: &mut OutfitRecord) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(category) = self.category {
            record.category = category;
        }
        if let Some(brand) = self.brand {
            record.brand = brand;
        }
        if let Some(size) = self.size {
            record.size = size;
        }
        if let Some(material) = self.material {
            record.material = material;
        }
        if let Some(garment_type) = self.garment_type {
            record.garment_type = garment_type;
        }
        if let Some(theme) = self.theme {
            record.theme = theme;
        }
        record.updated_at = Utc::now();
    }
}

// ============================================================================
// Generations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationKind {
    Image,
    Video,
}

impl std::fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationKind::Image => write!(f, "image"),
            GenerationKind::Video => write!(f, "video"),
        }
    }
}

/// Generation status as reported by the render backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

impl GenerationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl std::fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationStatus::Pending => write!(f, "pending"),
            GenerationStatus::Completed => write!(f, "completed"),
            GenerationStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Output of the render backend, written by the backend and read here
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub id: Uuid,
    pub kind: GenerationKind,
    pub status: GenerationStatus,
    /// Present once the backend stored its output
    pub file_id: Option<Uuid>,
    pub image_url: Option<String>,
    pub prompt: String,
    pub actor_ref: Option<String>,
    pub outfit_refs: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl GenerationRecord {
    /// A freshly queued image generation
    pub fn pending_image(
        prompt: impl Into<String>,
        actor_ref: impl Into<String>,
        outfit_refs: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: GenerationKind::Image,
            status: GenerationStatus::Pending,
            file_id: None,
            image_url: None,
            prompt: prompt.into(),
            actor_ref: Some(actor_ref.into()),
            outfit_refs,
            created_at: Utc::now(),
        }
    }

    /// Mark the generation as finished with its output file
    pub fn completed_with(mut self, file_id: Uuid) -> Self {
        self.status = GenerationStatus::Completed;
        self.file_id = Some(file_id);
        self
    }

    /// Whether this record can seed a video generation
    pub fn is_video_source(&self) -> bool {
        self.kind == GenerationKind::Image
            && self.status == GenerationStatus::Completed
            && self.file_id.is_some()
    }
}
