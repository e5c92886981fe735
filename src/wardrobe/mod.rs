//! Wardrobe View Logic
//!
//! State and workflows behind the list and form components, kept free of
//! DOM code so they run under `cargo test`.

pub mod draft;
pub mod filter;
pub mod listing;

pub use draft::{
    classify_image, extract_palette, save_edit, submit_draft, suggest_category, EditOutcome, FormError, ImageOutcome,
    ItemDraft, SelectionTracker, SubmitError, SubmitGuard, SubmitOutcome,
};
pub use filter::{category_breakdown, filter_items, in_wardrobe};
pub use listing::{delete_item, load_items, Confirmation, DeleteOutcome, ListPhase, ListSource, ListState};

#[cfg(test)]
pub(crate) mod fake {
    //! Recording `WardrobeApi` for workflow tests

    use std::cell::RefCell;

    use async_trait::async_trait;

    use crate::api::{ApiError, WardrobeApi};
    use crate::categories::ItemCategory;
    use crate::models::{ClothingItem, ColorEntry, ImageFile, ItemPatch, NewItem};

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        List,
        ListCategory(u8, u8),
        Search(String),
        Create(NewItem),
        Update(String, ItemPatch),
        Delete(String),
        Upload(String, String),
        ExtractColors(String),
        Classify(String),
    }

    #[derive(Default)]
    pub struct FakeApi {
        pub calls: RefCell<Vec<Call>>,
        pub items: Vec<ClothingItem>,
        pub created_id: String,
        pub palette: Vec<ColorEntry>,
        pub label: String,
        pub fail_create: Option<ApiError>,
        pub fail_update: Option<ApiError>,
        pub fail_delete: Option<ApiError>,
        pub fail_upload: Option<ApiError>,
        pub fail_extract: Option<ApiError>,
    }

    impl FakeApi {
        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: Call) {
            self.calls.borrow_mut().push(call);
        }
    }

    fn outcome(failure: &Option<ApiError>) -> Result<(), ApiError> {
        match failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    #[async_trait(?Send)]
    impl WardrobeApi for FakeApi {
        async fn list_items(&self) -> Result<Vec<ClothingItem>, ApiError> {
            self.record(Call::List);
            Ok(self.items.clone())
        }

        async fn list_by_category(&self, category: ItemCategory) -> Result<Vec<ClothingItem>, ApiError> {
            self.record(Call::ListCategory(category.wardrobe().key(), category.sub_key()));
            Ok(self.items.iter().filter(|i| i.category == category).cloned().collect())
        }

        async fn search(&self, query: &str) -> Result<Vec<ClothingItem>, ApiError> {
            self.record(Call::Search(query.to_string()));
            Ok(self.items.clone())
        }

        async fn create_item(&self, item: &NewItem) -> Result<String, ApiError> {
            self.record(Call::Create(item.clone()));
            outcome(&self.fail_create)?;
            Ok(self.created_id.clone())
        }

        async fn update_item(&self, id: &str, patch: &ItemPatch) -> Result<(), ApiError> {
            self.record(Call::Update(id.to_string(), patch.clone()));
            outcome(&self.fail_update)
        }

        async fn delete_item(&self, id: &str) -> Result<(), ApiError> {
            self.record(Call::Delete(id.to_string()));
            outcome(&self.fail_delete)
        }

        async fn upload_image(&self, id: &str, file: &ImageFile) -> Result<(), ApiError> {
            self.record(Call::Upload(id.to_string(), file.name.clone()));
            outcome(&self.fail_upload)
        }

        async fn extract_colors(&self, file: &ImageFile) -> Result<Vec<ColorEntry>, ApiError> {
            self.record(Call::ExtractColors(file.name.clone()));
            outcome(&self.fail_extract)?;
            Ok(self.palette.clone())
        }

        async fn classify(&self, file: &ImageFile) -> Result<String, ApiError> {
            self.record(Call::Classify(file.name.clone()));
            Ok(self.label.clone())
        }
    }
}
