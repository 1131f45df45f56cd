//! Domain entities for the Selection domain
//!
//! The persisted aggregate is [`SelectionState`]. Field names serialize in
//! camelCase so the stored blob matches what the other clients read.

use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::state::SelectionPhase;

/// Upper bound on outfit items held at once (one top, bottom and accessory)
pub const MAX_OUTFIT_ITEMS: usize = 3;

/// A single outfit piece picked from the catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitSelection {
    pub image_id: String,
    pub category: Category,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub material: String,
    /// Free-text class label; overrides `category` when it names a known slot
    #[serde(default)]
    pub garment_type: String,
    #[serde(default)]
    pub theme: String,
}

impl OutfitSelection {
    /// Create an outfit selection with the caller-supplied category
    pub fn new(image_id: impl Into<String>, category: impl Into<Category>) -> Self {
        Self {
            image_id: image_id.into(),
            category: category.into(),
            image_url: String::new(),
            name: String::new(),
            brand: String::new(),
            size: String::new(),
            material: String::new(),
            garment_type: String::new(),
            theme: String::new(),
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
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

/// The model the outfit is rendered onto.
///
/// "No actor" is the all-default value, not an `Option`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActorSelection {
    pub image_id: String,
    pub image_url: String,
    pub name: String,
    /// 0 = unset
    pub age: u32,
    /// 0 = unset
    pub weight: f64,
    /// 0 = unset
    pub height: f64,
    pub bio: String,
    pub gender: String,
    pub genre: String,
}

impl ActorSelection {
    pub fn new(
        image_id: impl Into<String>,
        image_url: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            image_id: image_id.into(),
            image_url: image_url.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    /// True when every field is at its default
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Input for turning an existing generation into a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGenerationInput {
    pub document_id: String,
    /// May be empty while the user is still typing it
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub preview_image_url: Option<String>,
}

impl VideoGenerationInput {
    pub fn new(document_id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            prompt: prompt.into(),
            preview_image_url: None,
        }
    }

    pub fn with_preview_image_url(mut self, url: impl Into<String>) -> Self {
        self.preview_image_url = Some(url.into());
        self
    }
}

/// The fitting room aggregate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectionState {
    pub actor: ActorSelection,
    /// Insertion order, one entry per category
    pub outfit_items: Vec<OutfitSelection>,
    pub video_gen_input: Option<VideoGenerationInput>,
}

impl SelectionState {
    /// Number of populated facets among actor and outfit (0, 1 or 2)
    pub fn selection_count(&self) -> usize {
        usize::from(!self.actor.is_empty()) + usize::from(!self.outfit_items.is_empty())
    }

    pub fn has_full_outfit(&self) -> bool {
        self.outfit_items.iter().any(|item| item.category.is_full())
    }

    /// Look up the item occupying `category`, if any
    pub fn outfit_item(&self, category: &Category) -> Option<&OutfitSelection> {
        self.outfit_items
            .iter()
            .find(|item| &item.category == category)
    }

    /// Which facet is currently active
    pub fn phase(&self) -> SelectionPhase {
        if self.video_gen_input.is_some() {
            return SelectionPhase::VideoInputActive;
        }

        match (!self.actor.is_empty(), !self.outfit_items.is_empty()) {
            (false, false) => SelectionPhase::Empty,
            (true, false) => SelectionPhase::ActorOnly,
            (false, true) => SelectionPhase::OutfitOnly,
            (true, true) => SelectionPhase::ActorAndOutfit,
        }
    }
}
