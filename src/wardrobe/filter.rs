//! Client-side Filtering
//!
//! Case-insensitive substring match over the fields a user sees on a card.

use std::collections::BTreeMap;

use crate::categories::WardrobeCategory;
use crate::models::ClothingItem;

/// Does `item` match an already-lowercased, non-empty needle?
fn matches(item: &ClothingItem, needle: &str) -> bool {
    let haystacks = [
        item.custom_name.as_str(),
        item.category.sub_label(),
        item.category.wardrobe().label(),
        item.notes.as_deref().unwrap_or(""),
    ];
    haystacks.iter().any(|h| h.to_lowercase().contains(needle))
}

/// Items matching `query`, in their original order. A blank query keeps
/// everything.
pub fn filter_items(items: &[ClothingItem], query: &str) -> Vec<ClothingItem> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }
    items.iter().filter(|item| matches(item, &needle)).cloned().collect()
}

/// Items under one wardrobe category, or all of them for `None`
pub fn in_wardrobe(items: &[ClothingItem], wardrobe: Option<WardrobeCategory>) -> Vec<ClothingItem> {
    match wardrobe {
        Some(wardrobe) => items.iter().filter(|i| i.category.wardrobe() == wardrobe).cloned().collect(),
        None => items.to_vec(),
    }
}

/// Count per full category label ("Shoes / Boots"), sorted by label
pub fn category_breakdown(items: &[ClothingItem]) -> Vec<(String, usize)> {
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(item.category.to_string()).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::{AccessoryKind, ClothingKind, ItemCategory, ShoeKind};

    fn wardrobe() -> Vec<ClothingItem> {
        let mut dress = ClothingItem::new("Blue Summer Dress", ItemCategory::Clothing(ClothingKind::Other));
        dress.id = Some("1".into());
        dress.notes = Some("Linen, wash cold".into());
        let mut boots = ClothingItem::new("Chelsea", ItemCategory::Shoes(ShoeKind::Boots));
        boots.id = Some("2".into());
        let mut watch = ClothingItem::new("Grandpa's", ItemCategory::Accessories(AccessoryKind::Watches));
        watch.id = Some("3".into());
        watch.notes = Some("needs a new BLUE strap".into());
        vec![dress, boots, watch]
    }

    fn ids(items: &[ClothingItem]) -> Vec<&str> {
        items.iter().filter_map(|i| i.id.as_deref()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let items = wardrobe();
        assert_eq!(filter_items(&items, ""), items);
        assert_eq!(filter_items(&items, "   "), items);
    }

    #[test]
    fn test_matches_name_and_notes_case_insensitively() {
        let items = wardrobe();
        assert_eq!(ids(&filter_items(&items, "blue")), vec!["1", "3"]);
        assert_eq!(ids(&filter_items(&items, "LINEN")), vec!["1"]);
    }

    #[test]
    fn test_matches_category_labels() {
        let items = wardrobe();
        assert_eq!(ids(&filter_items(&items, "boots")), vec!["2"]);
        assert_eq!(ids(&filter_items(&items, "shoes")), vec!["2"]);
        assert_eq!(ids(&filter_items(&items, "accessories")), vec!["3"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let items = wardrobe();
        for query in ["blue", "o", "", "zzz"] {
            let once = filter_items(&items, query);
            let twice = filter_items(&once, query);
            assert_eq!(once, twice, "query {:?}", query);
        }
    }

    #[test]
    fn test_source_is_untouched() {
        let items = wardrobe();
        let before = items.clone();
        let _ = filter_items(&items, "chelsea");
        assert_eq!(items, before);
    }

    #[test]
    fn test_in_wardrobe_uses_parent_not_sub_key() {
        let mut items = wardrobe();
        let mut tee = ClothingItem::new("Tee", ItemCategory::Clothing(ClothingKind::Tops));
        tee.id = Some("4".into());
        let mut mules = ClothingItem::new("Mules", ItemCategory::Shoes(ShoeKind::ClogsAndMules));
        mules.id = Some("5".into());
        items.push(tee);
        items.push(mules);

        assert_eq!(ids(&in_wardrobe(&items, Some(WardrobeCategory::Shoes))), vec!["2", "5"]);
        assert_eq!(in_wardrobe(&items, None), items);
    }

    #[test]
    fn test_category_breakdown_uses_full_labels() {
        let mut items = wardrobe();
        items.push(ClothingItem::new("Hiking", ItemCategory::Shoes(ShoeKind::Boots)));
        assert_eq!(
            category_breakdown(&items),
            vec![
                ("Accessories / Watches".to_string(), 1),
                ("Clothing / Other men's clothing".to_string(), 1),
                ("Shoes / Boots".to_string(), 2),
            ]
        );
    }
}
