//! Outfit categories and garment-type based category inference

use serde::{Deserialize, Serialize};

/// Outfit slot an item occupies.
///
/// The four known slots carry the combination rules. Any other caller-supplied
/// value is kept verbatim as [`Category::Other`] and behaves like a regular
/// single-item slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Full,
    Top,
    Bottom,
    Accessory,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Full => "full",
            Category::Top => "top",
            Category::Bottom => "bottom",
            Category::Accessory => "accessory",
            Category::Other(name) => name,
        }
    }

    /// Fold an `Other` spelled like a known slot into that slot.
    ///
    /// Stored categories are read back through [`From<String>`], so only
    /// normalized values survive a save and restore unchanged.
    pub fn normalized(self) -> Self {
        match self {
            Category::Other(name) => Category::from(name),
            known => known,
        }
    }

    /// Whether this item is a complete look that excludes every other piece
    pub fn is_full(&self) -> bool {
        matches!(self, Category::Full)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "full" => Category::Full,
            "top" => Category::Top,
            "bottom" => Category::Bottom,
            "accessory" => Category::Accessory,
            _ => Category::Other(value.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::from(value.as_str())
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// Ordered keyword rules; the first rule with a matching keyword wins.
static CATEGORY_RULES: [(&[&str], Category); 4] = [
    (&["full", "dress", "suit"], Category::Full),
    (&["top", "shirt", "blouse"], Category::Top),
    (&["bottom", "pant", "skirt"], Category::Bottom),
    (&["accessory", "hat", "jewelry"], Category::Accessory),
];

/// Derive the effective category from a free-text garment type.
///
/// Matching is a case-insensitive substring search, so "Evening Dress" and
/// "Jumpsuit" both map to [`Category::Full`]. When no rule matches, the
/// caller-supplied `fallback` is returned unchanged.
pub fn infer_category(garment_type: &str, fallback: Category) -> Category {
    let garment_type = garment_type.to_lowercase();

    CATEGORY_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| garment_type.contains(k)))
        .map(|(_, category)| category.clone())
        .unwrap_or(fallback)
}
