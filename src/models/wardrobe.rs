use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::error::AppError;

/// Style assumed for items that carry none
pub const DEFAULT_STYLE: &str = "casual";

/// Wardrobe category an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tops,
    Bottoms,
    Layers,
    Shoes,
    Accessories,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Tops,
        Category::Bottoms,
        Category::Layers,
        Category::Shoes,
        Category::Accessories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tops => "tops",
            Category::Bottoms => "bottoms",
            Category::Layers => "layers",
            Category::Shoes => "shoes",
            Category::Accessories => "accessories",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown category: {}", s)))
    }
}

/// A single piece of clothing in the wardrobe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
    pub id: i64,
    pub name: String,
    pub category: Category,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub style: Option<String>,
    pub season: Option<String>,
    pub image_path: Option<String>,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub last_worn: Option<DateTime<Utc>>,
    pub wear_count: u32,
}

impl ClothingItem {
    /// Style used for matching, falling back to casual when absent
    pub fn style_or_default(&self) -> &str {
        match self.style.as_deref() {
            Some(style) if !style.is_empty() => style,
            _ => DEFAULT_STYLE,
        }
    }

    /// Lowercased primary color, empty when the item has none
    pub fn primary_color_key(&self) -> String {
        self.primary_color
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
    }
}

/// Payload for adding an item to the wardrobe
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClothingItem {
    #[serde(default = "default_item_name")]
    pub name: String,
    #[serde(default = "default_category")]
    pub category: Category,
    #[serde(default)]
    pub primary_color: Option<String>,
    #[serde(default)]
    pub secondary_color: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
}

fn default_item_name() -> String {
    "Untitled".to_string()
}

fn default_category() -> Category {
    Category::Tops
}

impl Default for Category {
    fn default() -> Self {
        default_category()
    }
}

/// Partial update of an existing item; absent fields are left untouched.
/// Nullable fields distinguish an explicit `null`, which clears the value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItemUpdate {
    pub name: Option<String>,
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "present")]
    pub primary_color: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub secondary_color: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub style: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub season: Option<Option<String>>,
    pub is_favorite: Option<bool>,
}

/// Marks a key as supplied, keeping a `null` value as `Some(None)`
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl ClothingItemUpdate {
    pub fn apply(self, item: &mut ClothingItem) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(color) = self.primary_color {
            item.primary_color = color;
        }
        if let Some(color) = self.secondary_color {
            item.secondary_color = color;
        }
        if let Some(style) = self.style {
            item.style = style;
        }
        if let Some(season) = self.season {
            item.season = season;
        }
        if let Some(is_favorite) = self.is_favorite {
            item.is_favorite = is_favorite;
        }
    }
}

/// Attributes extracted from a clothing photo by the image analysis service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemAttributes {
    pub category: Category,
    #[serde(default)]
    pub primary_color: Option<String>,
    #[serde(default)]
    pub secondary_color: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(style: Option<&str>, color: Option<&str>) -> ClothingItem {
        ClothingItem {
            id: 1,
            name: "Shirt".to_string(),
            category: Category::Tops,
            primary_color: color.map(str::to_string),
            secondary_color: None,
            style: style.map(str::to_string),
            season: None,
            image_path: None,
            is_favorite: false,
            created_at: Utc::now(),
            last_worn: None,
            wear_count: 0,
        }
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("shoes".parse::<Category>().unwrap(), Category::Shoes);
        assert!("hats".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_lowercase() {
        let json = serde_json::to_string(&Category::Accessories).unwrap();
        assert_eq!(json, "\"accessories\"");
    }

    #[test]
    fn test_style_defaults_to_casual() {
        assert_eq!(item(None, None).style_or_default(), "casual");
        assert_eq!(item(Some(""), None).style_or_default(), "casual");
        assert_eq!(item(Some("formal"), None).style_or_default(), "formal");
    }

    #[test]
    fn test_primary_color_key_is_lowercase() {
        assert_eq!(item(None, Some("Navy")).primary_color_key(), "navy");
        assert_eq!(item(None, None).primary_color_key(), "");
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let json = serde_json::to_value(item(Some("sporty"), Some("red"))).unwrap();
        assert_eq!(json["primaryColor"], "red");
        assert_eq!(json["wearCount"], 0);
        assert_eq!(json["isFavorite"], false);
    }

    #[test]
    fn test_new_item_defaults() {
        let new_item: NewClothingItem = serde_json::from_str("{}").unwrap();
        assert_eq!(new_item.name, "Untitled");
        assert_eq!(new_item.category, Category::Tops);
    }

    #[test]
    fn test_update_only_touches_supplied_fields() {
        let mut shirt = item(Some("casual"), Some("blue"));
        let update: ClothingItemUpdate =
            serde_json::from_str(r#"{"isFavorite": true, "style": "formal"}"#).unwrap();
        update.apply(&mut shirt);
        assert!(shirt.is_favorite);
        assert_eq!(shirt.style.as_deref(), Some("formal"));
        assert_eq!(shirt.primary_color.as_deref(), Some("blue"));
    }

    #[test]
    fn test_update_null_clears_nullable_field() {
        let mut shirt = item(Some("casual"), Some("red"));
        let update: ClothingItemUpdate =
            serde_json::from_str(r#"{"primaryColor": null, "season": "winter"}"#).unwrap();
        assert_eq!(update.primary_color, Some(None));
        assert_eq!(update.style, None);

        update.apply(&mut shirt);
        assert_eq!(shirt.primary_color, None);
        assert_eq!(shirt.season.as_deref(), Some("winter"));
        assert_eq!(shirt.style.as_deref(), Some("casual"));
    }
}
