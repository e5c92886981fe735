//! Frontend Models
//!
//! Data structures matching the wardrobe API payloads.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize};

use crate::categories::{ItemCategory, WardrobeCategory};
use crate::config::AppConfig;

/// One dominant colour of an image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorEntry {
    pub color: [u8; 3],
    pub percentage: f32,
}

impl ColorEntry {
    pub fn hex(&self) -> String {
        let [r, g, b] = self.color;
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", self.percentage)
    }
}

/// Wardrobe item as stored on the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ItemRecord", into = "ItemRecord")]
pub struct ClothingItem {
    pub id: Option<String>,
    pub custom_name: String,
    pub display_name: Option<String>,
    pub category: ItemCategory,
    pub notes: Option<String>,
    pub colors: Vec<ColorEntry>,
    pub path: Option<String>,
}

impl ClothingItem {
    pub fn new(custom_name: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            id: None,
            custom_name: custom_name.into(),
            display_name: None,
            category,
            notes: None,
            colors: Vec::new(),
            path: None,
        }
    }

    /// Name shown in the grid
    pub fn title(&self) -> &str {
        if !self.custom_name.trim().is_empty() {
            &self.custom_name
        } else {
            self.display_name.as_deref().unwrap_or("Unnamed")
        }
    }

    /// Changes whenever any displayed field changes
    pub fn revision(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.id.hash(&mut hasher);
        self.custom_name.hash(&mut hasher);
        self.display_name.hash(&mut hasher);
        self.category.hash(&mut hasher);
        self.notes.hash(&mut hasher);
        self.path.hash(&mut hasher);
        for entry in &self.colors {
            entry.color.hash(&mut hasher);
            entry.percentage.to_bits().hash(&mut hasher);
        }
        hasher.finish()
    }

    pub fn image_url(&self, config: &AppConfig) -> Option<String> {
        self.path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| config.image_url(p))
    }
}

/// Sub-category as it may appear on the wire: a key or a legacy label
#[derive(Debug, Clone, PartialEq)]
enum SubCategoryRef {
    Key(u8),
    Label(String),
}

/// Raw item payload. Older records use `_id` and sometimes store numbers as
/// strings, so decoding is lenient here and strict in `ClothingItem`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(alias = "_id", default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    custom_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    #[serde(default = "default_wardrobe_key", deserialize_with = "wardrobe_key")]
    wardrobe_category: u8,
    #[serde(
        default = "default_sub_category",
        deserialize_with = "sub_category_ref",
        serialize_with = "serialize_sub_category"
    )]
    category: SubCategoryRef,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    colors: Vec<ColorEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

fn default_wardrobe_key() -> u8 {
    WardrobeCategory::default().key()
}

fn default_sub_category() -> SubCategoryRef {
    SubCategoryRef::Key(1)
}

/// `null` decodes like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Number or numeric string
#[derive(Deserialize)]
#[serde(untagged)]
enum KeyOrText {
    Key(u64),
    Text(String),
}

fn wardrobe_key<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    Ok(match Option::<KeyOrText>::deserialize(deserializer)? {
        Some(KeyOrText::Key(k)) => u8::try_from(k).unwrap_or(0),
        Some(KeyOrText::Text(t)) => t.trim().parse().unwrap_or(0),
        None => default_wardrobe_key(),
    })
}

fn sub_category_ref<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SubCategoryRef, D::Error> {
    Ok(match Option::<KeyOrText>::deserialize(deserializer)? {
        Some(KeyOrText::Key(k)) => SubCategoryRef::Key(u8::try_from(k).unwrap_or(0)),
        Some(KeyOrText::Text(t)) => match t.trim().parse() {
            Ok(k) => SubCategoryRef::Key(k),
            Err(_) => SubCategoryRef::Label(t),
        },
        None => default_sub_category(),
    })
}

fn serialize_sub_category<S: serde::Serializer>(value: &SubCategoryRef, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        SubCategoryRef::Key(k) => serializer.serialize_u8(*k),
        SubCategoryRef::Label(l) => serializer.serialize_str(l),
    }
}

impl From<ItemRecord> for ClothingItem {
    fn from(record: ItemRecord) -> Self {
        let category = match record.category {
            SubCategoryRef::Key(sub) => ItemCategory::from_keys_lenient(record.wardrobe_category, sub),
            SubCategoryRef::Label(label) => {
                let parent = WardrobeCategory::from_key(record.wardrobe_category).unwrap_or_default();
                ItemCategory::find_by_label(parent, &label).unwrap_or_else(|| ItemCategory::first_of(parent))
            }
        };
        Self {
            id: record.id,
            custom_name: record.custom_name,
            display_name: record.display_name,
            category,
            notes: record.notes,
            colors: record.colors,
            path: record.path,
        }
    }
}

impl From<ClothingItem> for ItemRecord {
    fn from(item: ClothingItem) -> Self {
        Self {
            id: item.id,
            custom_name: item.custom_name,
            display_name: item.display_name,
            wardrobe_category: item.category.wardrobe().key(),
            category: SubCategoryRef::Key(item.category.sub_key()),
            notes: item.notes,
            colors: item.colors,
            path: item.path,
        }
    }
}

/// Body of `POST /items`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewItem {
    pub custom_name: String,
    pub wardrobe_category: u8,
    pub category: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<ColorEntry>,
}

impl NewItem {
    pub fn new(custom_name: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            custom_name: custom_name.into(),
            wardrobe_category: category.wardrobe().key(),
            category: category.sub_key(),
            notes: None,
            colors: Vec::new(),
        }
    }
}

/// Body of `PUT /items/{id}`; only changed fields are sent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wardrobe_category: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<ColorEntry>>,
}

impl ItemPatch {
    /// Fields of `edited` that differ from `original`
    pub fn between(original: &ClothingItem, edited: &ClothingItem) -> Self {
        let mut patch = Self::default();
        if original.custom_name != edited.custom_name {
            patch.custom_name = Some(edited.custom_name.clone());
        }
        if original.category.wardrobe() != edited.category.wardrobe() {
            patch.wardrobe_category = Some(edited.category.wardrobe().key());
        }
        if original.category != edited.category {
            patch.category = Some(edited.category.sub_key());
        }
        let before = original.notes.as_deref().unwrap_or("");
        let after = edited.notes.as_deref().unwrap_or("");
        if before != after {
            patch.notes = Some(after.to_string());
        }
        if original.colors != edited.colors {
            patch.colors = Some(edited.colors.clone());
        }
        patch
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Response of `POST /items`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedItem {
    pub id: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `GET /stats`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Stats {
    pub total_items: u64,
}

/// Response of `GET /categories`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CategoryList {
    #[serde(default, deserialize_with = "category_names")]
    pub categories: Vec<String>,
}

fn category_names<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|v| match v {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
        .collect())
}

/// Response of `GET /health`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub database: Option<String>,
}

impl Health {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// Response of `POST /extract-colors`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ColorPalette {
    #[serde(default)]
    pub colors: Vec<ColorEntry>,
}

/// Response of the classifier service
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Classification {
    pub message: String,
}

/// User returned by the login exchange
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Response of `POST /auth/google`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// An image picked in the browser, already read into memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let content_type = content_type.into();
        Self {
            name: name.into(),
            content_type: if content_type.is_empty() {
                "application/octet-stream".to_string()
            } else {
                content_type
            },
            bytes,
        }
    }

    /// `data:` URL for a local preview
    pub fn data_url(&self) -> String {
        use base64::Engine;
        format!(
            "data:{};base64,{}",
            self.content_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::{AccessoryKind, ClothingKind, ShoeKind};

    #[test]
    fn test_item_decodes_numeric_categories() {
        let json = r#"{
            "_id": "abc123",
            "custom_name": "Blue Summer Dress",
            "wardrobe_category": 1,
            "category": 2,
            "notes": "linen",
            "colors": [{"color": [10, 20, 30], "percentage": 55.5}],
            "path": "wardrobe/blue_summer_dress"
        }"#;
        let item: ClothingItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id.as_deref(), Some("abc123"));
        assert_eq!(item.category, ItemCategory::Clothing(ClothingKind::Tops));
        assert_eq!(item.colors[0].color, [10, 20, 30]);
    }

    #[test]
    fn test_item_decodes_string_keys_and_labels() {
        let json = r#"{"id": "1", "custom_name": "Chelsea", "wardrobe_category": "2", "category": "1"}"#;
        let item: ClothingItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.category, ItemCategory::Shoes(ShoeKind::Boots));

        let json = r#"{"id": "2", "custom_name": "Watch", "wardrobe_category": 3, "category": "Watches"}"#;
        let item: ClothingItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.category, ItemCategory::Accessories(AccessoryKind::Watches));
    }

    #[test]
    fn test_item_serializes_wire_keys() {
        let mut item = ClothingItem::new("Boots", ItemCategory::Shoes(ShoeKind::Boots));
        item.id = Some("x".into());
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["wardrobe_category"], 2);
        assert_eq!(value["category"], 1);
        assert_eq!(value["id"], "x");
    }

    #[test]
    fn test_new_item_payload() {
        let payload = NewItem::new("Blue Summer Dress", ItemCategory::Clothing(ClothingKind::Outerwear));
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"custom_name": "Blue Summer Dress", "wardrobe_category": 1, "category": 1})
        );
    }

    #[test]
    fn test_patch_contains_only_changes() {
        let mut original = ClothingItem::new("Coat", ItemCategory::Clothing(ClothingKind::Outerwear));
        original.notes = None;
        let mut edited = original.clone();
        assert!(ItemPatch::between(&original, &edited).is_empty());

        // Empty notes vs missing notes is not a change
        edited.notes = Some(String::new());
        assert!(ItemPatch::between(&original, &edited).is_empty());

        edited.custom_name = "Winter Coat".into();
        edited.category = ItemCategory::Shoes(ShoeKind::Boots);
        let patch = ItemPatch::between(&original, &edited);
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"custom_name": "Winter Coat", "wardrobe_category": 2, "category": 1})
        );
    }

    #[test]
    fn test_color_entry_display() {
        let entry = ColorEntry { color: [255, 0, 16], percentage: 42.26 };
        assert_eq!(entry.hex(), "#ff0010");
        assert_eq!(entry.percentage_label(), "42.3%");
    }

    #[test]
    fn test_image_url_requires_path() {
        let config = AppConfig::default();
        let mut item = ClothingItem::new("Hat", ItemCategory::Accessories(AccessoryKind::Hats));
        assert_eq!(item.image_url(&config), None);
        item.path = Some("wardrobe/hat".into());
        assert_eq!(
            item.image_url(&config).as_deref(),
            Some("http://localhost:8000/api/v1/images/wardrobe/hat")
        );
    }

    #[test]
    fn test_image_file_data_url() {
        let file = ImageFile::new("a.png", "image/png", vec![1, 2, 3]);
        assert_eq!(file.data_url(), "data:image/png;base64,AQID");
        assert_eq!(ImageFile::new("a", "", vec![]).content_type, "application/octet-stream");
    }

    #[test]
    fn test_stats_and_categories_decode() {
        let stats: Stats = serde_json::from_str(r#"{"total_items": 3, "category_counts": {"1": 2, "2": 1}}"#).unwrap();
        assert_eq!(stats.total_items, 3);

        let cats: CategoryList = serde_json::from_str(r#"{"categories": [1, "Shoes"]}"#).unwrap();
        assert_eq!(cats.categories, vec!["1".to_string(), "Shoes".to_string()]);
    }

    #[test]
    fn test_null_fields_do_not_fail_the_listing() {
        let json = r#"[
            {"_id":"1","custom_name":"Coat","wardrobe_category":1,"category":1,"colors":[]},
            {"_id":"2","custom_name":null,"display_name":"IMG_0042.jpg","wardrobe_category":null,"category":null,"notes":null,"colors":null}
        ]"#;
        let items: Vec<ClothingItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].custom_name, "");
        assert_eq!(items[1].title(), "IMG_0042.jpg");
        assert!(items[1].colors.is_empty());
        assert_eq!(items[1].category, ItemCategory::default());
    }

    #[test]
    fn test_revision_tracks_image_and_palette() {
        let mut item = ClothingItem::new("Coat", ItemCategory::Clothing(ClothingKind::Outerwear));
        item.id = Some("1".into());
        let base = item.revision();
        assert_eq!(item.clone().revision(), base);

        let mut moved = item.clone();
        moved.path = Some("1.jpg".into());
        assert_ne!(moved.revision(), base);

        let mut recolored = item.clone();
        recolored.colors.push(ColorEntry { color: [1, 2, 3], percentage: 40.0 });
        assert_ne!(recolored.revision(), base);
    }
}
