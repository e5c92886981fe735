//! Item Drafts
//!
//! Form state for creating and editing items, and the submit workflows that
//! turn a draft into API calls.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::api::{ApiError, WardrobeApi};
use crate::categories::{ItemCategory, WardrobeCategory};
use crate::models::{ClothingItem, ColorEntry, ImageFile, ItemPatch, NewItem};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please enter a name for the item")]
    NameRequired,
    #[error("This item has no id yet, reload and try again")]
    MissingId,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] FormError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Already saving, please wait")]
    InFlight,
}

/// Editable fields of an item
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemDraft {
    pub name: String,
    pub category: ItemCategory,
    pub notes: String,
    pub colors: Vec<ColorEntry>,
    pub image: Option<ImageFile>,
}

impl ItemDraft {
    pub fn from_item(item: &ClothingItem) -> Self {
        Self {
            name: item.custom_name.clone(),
            category: item.category,
            notes: item.notes.clone().unwrap_or_default(),
            colors: item.colors.clone(),
            image: None,
        }
    }

    /// Switch wardrobe category; the sub-category resets to the new
    /// category's first entry.
    pub fn set_wardrobe(&mut self, wardrobe: WardrobeCategory) {
        self.category = self.category.with_wardrobe(wardrobe);
    }

    pub fn set_sub_key(&mut self, key: u8) {
        self.category = self.category.with_sub_key(key);
    }

    /// Pick a new image. Colours from the previous image no longer apply.
    pub fn set_image(&mut self, image: Option<ImageFile>) {
        self.image = image;
        self.colors.clear();
    }

    fn trimmed_name(&self) -> Result<&str, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            Err(FormError::NameRequired)
        } else {
            Ok(name)
        }
    }

    fn trimmed_notes(&self) -> Option<String> {
        let notes = self.notes.trim();
        (!notes.is_empty()).then(|| notes.to_string())
    }

    /// Create payload, or why the draft cannot be submitted
    pub fn validate(&self) -> Result<NewItem, FormError> {
        let mut item = NewItem::new(self.trimmed_name()?, self.category);
        item.notes = self.trimmed_notes();
        item.colors = self.colors.clone();
        Ok(item)
    }

    /// `original` with this draft's edits applied
    pub fn applied_to(&self, original: &ClothingItem) -> Result<ClothingItem, FormError> {
        let mut edited = original.clone();
        edited.custom_name = self.trimmed_name()?.to_string();
        edited.category = self.category;
        edited.notes = self.trimmed_notes();
        Ok(edited)
    }

    /// Adopt a fresher copy of the item unless the user has already typed
    /// over `loaded`. Returns whether the draft was replaced.
    pub fn refresh_from(&mut self, loaded: &ClothingItem, fresh: &ClothingItem) -> bool {
        if *self != ItemDraft::from_item(loaded) {
            return false;
        }
        *self = ItemDraft::from_item(fresh);
        true
    }

    /// Changes relative to `original`
    pub fn patch_for(&self, original: &ClothingItem) -> Result<ItemPatch, FormError> {
        let edited = self.applied_to(original)?;
        Ok(ItemPatch::between(original, &edited))
    }
}

/// Rejects a second submit while one is pending
#[derive(Debug, Clone, Default)]
pub struct SubmitGuard {
    busy: Arc<AtomicBool>,
}

/// Held for the duration of a submit
#[derive(Debug)]
pub struct InFlight {
    busy: Arc<AtomicBool>,
}

impl SubmitGuard {
    pub fn try_begin(&self) -> Option<InFlight> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight { busy: self.busy.clone() })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Generation counter for the selected file. Results computed for an older
/// selection are dropped when they arrive.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    current: Arc<AtomicU64>,
}

impl SelectionTracker {
    /// Register a new selection and return its generation
    pub fn begin(&self) -> u64 {
        self.current.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current.load(Ordering::Acquire) == generation
    }

    /// `value` if `generation` is still the latest selection
    pub fn accept<T>(&self, generation: u64, value: T) -> Option<T> {
        if self.is_current(generation) {
            Some(value)
        } else {
            log::debug!("[FORM] Dropping result for stale selection {}", generation);
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    NotRequested,
    Uploaded,
    /// Item exists but has no image
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub id: String,
    pub image: ImageOutcome,
}

/// Create the item, then upload its image. An upload failure does not undo
/// the create.
pub async fn submit_draft<A: WardrobeApi + ?Sized>(
    api: &A,
    draft: &ItemDraft,
    guard: &SubmitGuard,
) -> Result<SubmitOutcome, SubmitError> {
    let payload = draft.validate()?;
    let _in_flight = guard.try_begin().ok_or(SubmitError::InFlight)?;

    let id = api.create_item(&payload).await?;
    log::info!("[FORM] Created '{}' as {}", payload.custom_name, id);

    let image = match (&draft.image, id.is_empty()) {
        (Some(file), false) => match api.upload_image(&id, file).await {
            Ok(()) => ImageOutcome::Uploaded,
            Err(e) => {
                log::error!("[FORM] Image upload for {} failed: {}", id, e);
                ImageOutcome::Failed(e.to_string())
            }
        },
        (Some(_), true) => {
            log::warn!("[FORM] Create returned no id, skipping image upload");
            ImageOutcome::NotRequested
        }
        (None, _) => ImageOutcome::NotRequested,
    };

    Ok(SubmitOutcome { id, image })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Saved,
    NoChanges,
}

/// Send only the fields that changed
pub async fn save_edit<A: WardrobeApi + ?Sized>(
    api: &A,
    original: &ClothingItem,
    draft: &ItemDraft,
) -> Result<EditOutcome, SubmitError> {
    let id = original
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or(FormError::MissingId)?;
    let patch = draft.patch_for(original)?;
    if patch.is_empty() {
        return Ok(EditOutcome::NoChanges);
    }
    api.update_item(id, &patch).await?;
    Ok(EditOutcome::Saved)
}

/// Palette for a freshly picked image; failures only get logged
pub async fn extract_palette<A: WardrobeApi + ?Sized>(api: &A, file: &ImageFile) -> Vec<ColorEntry> {
    match api.extract_colors(file).await {
        Ok(colors) => colors,
        Err(e) => {
            log::warn!("[FORM] Color extraction failed for {}: {}", file.name, e);
            Vec::new()
        }
    }
}

/// Classifier label for a freshly picked image; failures only get logged
pub async fn classify_image<A: WardrobeApi + ?Sized>(api: &A, file: &ImageFile) -> Option<String> {
    match api.classify(file).await {
        Ok(label) if !label.trim().is_empty() => Some(label),
        Ok(_) => None,
        Err(e) => {
            log::warn!("[FORM] Classification failed for {}: {}", file.name, e);
            None
        }
    }
}

/// Sub-category suggested by a classifier label. Only clothing labels are
/// known to the classifier, so other wardrobe categories are left alone.
pub fn suggest_category(current: ItemCategory, label: &str) -> Option<ItemCategory> {
    if current.wardrobe() != WardrobeCategory::Clothing {
        return None;
    }
    ItemCategory::find_by_label(WardrobeCategory::Clothing, label)
}
