//! Category Taxonomy
//!
//! Two-level classification: a wardrobe category (Clothing / Shoes /
//! Accessories) and a sub-category that only exists inside it. The wire
//! format uses small integer keys for both levels; inside the app they are
//! enums so a sub-category can never be paired with the wrong parent.

use std::fmt;

macro_rules! sub_categories {
    ($name:ident { $($variant:ident = $key:literal => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn key(self) -> u8 {
                match self {
                    $($name::$variant => $key),+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn from_key(key: u8) -> Option<Self> {
                match key {
                    $($key => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

sub_categories!(ClothingKind {
    Outerwear = 1 => "Outerwear",
    Tops = 2 => "Tops & t-shirts",
    SuitsAndBlazers = 3 => "Suits & blazers",
    Jumpers = 4 => "Jumpers & sweaters",
    Trousers = 5 => "Trousers",
    Shorts = 6 => "Shorts",
    SocksAndUnderwear = 7 => "Socks & underwear",
    Sleepwear = 8 => "Sleepwear",
    Activewear = 9 => "Activewear",
    Other = 10 => "Other men's clothing",
});

sub_categories!(ShoeKind {
    Boots = 1 => "Boots",
    ClogsAndMules = 2 => "Clogs & mules",
    Espadrilles = 3 => "Espadrilles",
    FlipFlops = 4 => "Flip-flops & slides",
    Formal = 5 => "Formal shoes",
    Sandals = 6 => "Sandals",
    Slippers = 7 => "Slippers",
    Sports = 8 => "Sports shoes",
    Trainers = 9 => "Trainers",
    Loafers = 10 => "Boat shoes, loafers & moccasins",
});

sub_categories!(AccessoryKind {
    Bags = 1 => "Bags & backpacks",
    Headscarves = 2 => "Bandanas & headscarves",
    Belts = 3 => "Belts",
    Braces = 4 => "Braces & suspenders",
    Gloves = 5 => "Gloves",
    Handkerchiefs = 6 => "Handkerchiefs",
    Hats = 7 => "Hats & caps",
    Jewellery = 8 => "Jewellery",
    PocketSquares = 9 => "Pocket squares",
    Scarves = 10 => "Scarves & shawls",
    Sunglasses = 11 => "Sunglasses",
    Ties = 12 => "Ties & bow ties",
    Watches = 13 => "Watches",
    Other = 14 => "Other accessories",
});

/// Top-level wardrobe category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WardrobeCategory {
    #[default]
    Clothing,
    Shoes,
    Accessories,
}

impl WardrobeCategory {
    pub const ALL: &'static [WardrobeCategory] = &[
        WardrobeCategory::Clothing,
        WardrobeCategory::Shoes,
        WardrobeCategory::Accessories,
    ];

    pub fn key(self) -> u8 {
        match self {
            WardrobeCategory::Clothing => 1,
            WardrobeCategory::Shoes => 2,
            WardrobeCategory::Accessories => 3,
        }
    }

    pub fn from_key(key: u8) -> Option<Self> {
        match key {
            1 => Some(WardrobeCategory::Clothing),
            2 => Some(WardrobeCategory::Shoes),
            3 => Some(WardrobeCategory::Accessories),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WardrobeCategory::Clothing => "Clothing",
            WardrobeCategory::Shoes => "Shoes",
            WardrobeCategory::Accessories => "Accessories",
        }
    }

    /// `(key, label)` pairs of the sub-categories, in key order
    pub fn sub_categories(self) -> Vec<(u8, &'static str)> {
        match self {
            WardrobeCategory::Clothing => ClothingKind::ALL.iter().map(|k| (k.key(), k.label())).collect(),
            WardrobeCategory::Shoes => ShoeKind::ALL.iter().map(|k| (k.key(), k.label())).collect(),
            WardrobeCategory::Accessories => AccessoryKind::ALL.iter().map(|k| (k.key(), k.label())).collect(),
        }
    }

    /// Sub-categories of this parent whose key appears in `server_keys`
    /// (the `/categories` listing). An empty listing offers everything.
    pub fn sub_categories_in(self, server_keys: &[String]) -> Vec<ItemCategory> {
        let keys: Vec<u8> = server_keys.iter().filter_map(|k| k.trim().parse().ok()).collect();
        self.sub_categories()
            .into_iter()
            .filter(|(key, _)| keys.is_empty() || keys.contains(key))
            .filter_map(|(key, _)| ItemCategory::from_keys(self.key(), key))
            .collect()
    }
}

impl fmt::Display for WardrobeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A full two-level classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemCategory {
    Clothing(ClothingKind),
    Shoes(ShoeKind),
    Accessories(AccessoryKind),
}

impl ItemCategory {
    /// The first sub-category of a wardrobe category
    pub fn first_of(wardrobe: WardrobeCategory) -> Self {
        match wardrobe {
            WardrobeCategory::Clothing => ItemCategory::Clothing(ClothingKind::Outerwear),
            WardrobeCategory::Shoes => ItemCategory::Shoes(ShoeKind::Boots),
            WardrobeCategory::Accessories => ItemCategory::Accessories(AccessoryKind::Bags),
        }
    }

    /// Exact lookup by wire keys
    pub fn from_keys(wardrobe: u8, sub: u8) -> Option<Self> {
        match WardrobeCategory::from_key(wardrobe)? {
            WardrobeCategory::Clothing => ClothingKind::from_key(sub).map(ItemCategory::Clothing),
            WardrobeCategory::Shoes => ShoeKind::from_key(sub).map(ItemCategory::Shoes),
            WardrobeCategory::Accessories => AccessoryKind::from_key(sub).map(ItemCategory::Accessories),
        }
    }

    /// Lookup that never fails: unknown wardrobe keys become Clothing and
    /// unknown sub keys become the first sub-category of the parent.
    pub fn from_keys_lenient(wardrobe: u8, sub: u8) -> Self {
        let parent = WardrobeCategory::from_key(wardrobe).unwrap_or_default();
        Self::from_keys(parent.key(), sub).unwrap_or_else(|| Self::first_of(parent))
    }

    /// Case-insensitive lookup of a sub-category label within a parent
    pub fn find_by_label(wardrobe: WardrobeCategory, label: &str) -> Option<Self> {
        let wanted = label.trim().to_lowercase();
        wardrobe
            .sub_categories()
            .into_iter()
            .find(|(_, l)| l.to_lowercase() == wanted)
            .and_then(|(key, _)| Self::from_keys(wardrobe.key(), key))
    }

    pub fn wardrobe(self) -> WardrobeCategory {
        match self {
            ItemCategory::Clothing(_) => WardrobeCategory::Clothing,
            ItemCategory::Shoes(_) => WardrobeCategory::Shoes,
            ItemCategory::Accessories(_) => WardrobeCategory::Accessories,
        }
    }

    pub fn sub_key(self) -> u8 {
        match self {
            ItemCategory::Clothing(kind) => kind.key(),
            ItemCategory::Shoes(kind) => kind.key(),
            ItemCategory::Accessories(kind) => kind.key(),
        }
    }

    pub fn sub_label(self) -> &'static str {
        match self {
            ItemCategory::Clothing(kind) => kind.label(),
            ItemCategory::Shoes(kind) => kind.label(),
            ItemCategory::Accessories(kind) => kind.label(),
        }
    }

    /// Move to another wardrobe category. Staying in the same one keeps the
    /// sub-category; switching resets it to the new parent's first key.
    pub fn with_wardrobe(self, wardrobe: WardrobeCategory) -> Self {
        if self.wardrobe() == wardrobe {
            self
        } else {
            Self::first_of(wardrobe)
        }
    }

    /// Pick a sub-category key within the current parent
    pub fn with_sub_key(self, sub: u8) -> Self {
        Self::from_keys(self.wardrobe().key(), sub).unwrap_or(self)
    }
}

// `#[derive(Default)]` only supports unit variants
impl Default for ItemCategory {
    fn default() -> Self {
        Self::first_of(WardrobeCategory::default())
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.wardrobe().label(), self.sub_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_category_keys_are_contiguous_from_one() {
        for wardrobe in WardrobeCategory::ALL {
            let keys: Vec<u8> = wardrobe.sub_categories().iter().map(|(k, _)| *k).collect();
            let expected: Vec<u8> = (1..=keys.len() as u8).collect();
            assert_eq!(keys, expected, "{}", wardrobe);
        }
        assert_eq!(ClothingKind::ALL.len(), 10);
        assert_eq!(ShoeKind::ALL.len(), 10);
        assert_eq!(AccessoryKind::ALL.len(), 14);
    }

    #[test]
    fn test_switching_wardrobe_resets_sub_category() {
        let trousers = ItemCategory::Clothing(ClothingKind::Trousers);
        let shoes = trousers.with_wardrobe(WardrobeCategory::Shoes);
        assert_eq!(shoes, ItemCategory::Shoes(ShoeKind::Boots));
        assert_eq!(shoes.sub_key(), 1);
        assert_eq!(shoes.sub_label(), "Boots");

        // Same parent keeps the selection
        assert_eq!(trousers.with_wardrobe(WardrobeCategory::Clothing), trousers);
    }

    #[test]
    fn test_from_keys() {
        assert_eq!(
            ItemCategory::from_keys(3, 13),
            Some(ItemCategory::Accessories(AccessoryKind::Watches))
        );
        // Shoes only go up to 10
        assert_eq!(ItemCategory::from_keys(2, 13), None);
        assert_eq!(ItemCategory::from_keys(9, 1), None);
    }

    #[test]
    fn test_from_keys_lenient_falls_back_to_first() {
        assert_eq!(ItemCategory::from_keys_lenient(2, 99), ItemCategory::Shoes(ShoeKind::Boots));
        assert_eq!(
            ItemCategory::from_keys_lenient(0, 5),
            ItemCategory::Clothing(ClothingKind::Trousers)
        );
    }

    #[test]
    fn test_find_by_label() {
        assert_eq!(
            ItemCategory::find_by_label(WardrobeCategory::Clothing, "tops & T-shirts"),
            Some(ItemCategory::Clothing(ClothingKind::Tops))
        );
        assert_eq!(ItemCategory::find_by_label(WardrobeCategory::Shoes, "Tops & t-shirts"), None);
    }

    #[test]
    fn test_with_sub_key_ignores_keys_outside_parent() {
        let boots = ItemCategory::Shoes(ShoeKind::Boots);
        assert_eq!(boots.with_sub_key(9), ItemCategory::Shoes(ShoeKind::Trainers));
        assert_eq!(boots.with_sub_key(14), boots);
    }

    #[test]
    fn test_default_is_first_clothing_entry() {
        assert_eq!(WardrobeCategory::default(), WardrobeCategory::Clothing);
        assert_eq!(ItemCategory::default(), ItemCategory::Clothing(ClothingKind::Outerwear));
    }

    #[test]
    fn test_sub_categories_in_server_listing() {
        let listed = vec!["2".to_string(), " 4".to_string(), "Trousers".to_string()];
        assert_eq!(
            WardrobeCategory::Shoes.sub_categories_in(&listed),
            vec![ItemCategory::Shoes(ShoeKind::ClogsAndMules), ItemCategory::Shoes(ShoeKind::FlipFlops)]
        );
        assert_eq!(WardrobeCategory::Shoes.sub_categories_in(&[]).len(), 10);
    }
}
