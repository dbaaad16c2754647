use serde::{Deserialize, Serialize};


/// Product category (closed set the demand model was trained on).
///
/// `BedBathTable` is the baseline category: its model weight is zero and every
/// other category weight is relative to it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    BedBathTable,
    ComputersAccessories,
    ConsolesGames,
    CoolStuff,
    FurnitureDecor,
    GardenTools,
    HealthBeauty,
    Perfumery,
    WatchesGifts,
}

impl Category {
    pub const COUNT: usize = 9;

    /// All categories, in one-hot index order.
    pub const ALL: [Category; Self::COUNT] = [
        Category::BedBathTable,
        Category::ComputersAccessories,
        Category::ConsolesGames,
        Category::CoolStuff,
        Category::FurnitureDecor,
        Category::GardenTools,
        Category::HealthBeauty,
        Category::Perfumery,
        Category::WatchesGifts,
    ];

    /// The dropped dummy of the trained model.
    pub const BASELINE: Category = Category::BedBathTable;

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::BedBathTable => "bed_bath_table",
            Category::ComputersAccessories => "computers_accessories",
            Category::ConsolesGames => "consoles_games",
            Category::CoolStuff => "cool_stuff",
            Category::FurnitureDecor => "furniture_decor",
            Category::GardenTools => "garden_tools",
            Category::HealthBeauty => "health_beauty",
            Category::Perfumery => "perfumery",
            Category::WatchesGifts => "watches_gifts",
        }
    }

    /// Position of this category in the one-hot vector.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn is_baseline(&self) -> bool {
        *self == Self::BASELINE
    }

    /// Case-insensitive lookup. Surrounding whitespace is not trimmed.
    pub fn parse(label: &str) -> Option<Category> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(label))
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category as supplied by a caller.
///
/// Labels outside the closed set are kept verbatim instead of being rejected:
/// the estimator treats them as "no category" (every indicator zero).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductCategory {
    Known(Category),
    Unrecognized(String),
}

impl ProductCategory {
    pub fn known(&self) -> Option<Category> {
        match self {
            ProductCategory::Known(c) => Some(*c),
            ProductCategory::Unrecognized(_) => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ProductCategory::Known(c) => c.as_str(),
            ProductCategory::Unrecognized(label) => label,
        }
    }
}

impl From<&str> for ProductCategory {
    fn from(label: &str) -> Self {
        match Category::parse(label) {
            Some(c) => ProductCategory::Known(c),
            None => ProductCategory::Unrecognized(label.to_string()),
        }
    }
}

impl From<String> for ProductCategory {
    fn from(label: String) -> Self {
        match Category::parse(&label) {
            Some(c) => ProductCategory::Known(c),
            None => ProductCategory::Unrecognized(label),
        }
    }
}

impl From<Category> for ProductCategory {
    fn from(category: Category) -> Self {
        ProductCategory::Known(category)
    }
}

impl From<ProductCategory> for String {
    fn from(category: ProductCategory) -> Self {
        match category {
            ProductCategory::Known(c) => c.as_str().to_string(),
            ProductCategory::Unrecognized(label) => label,
        }
    }
}

impl core::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Category::parse("Bed_Bath_Table"), Some(Category::BedBathTable));
        assert_eq!(Category::parse("PERFUMERY"), Some(Category::Perfumery));
        assert_eq!(Category::parse("watches_gifts"), Some(Category::WatchesGifts));
    }

    #[test]
    fn parse_rejects_labels_outside_the_closed_set() {
        assert_eq!(Category::parse("apparel"), None);
        assert_eq!(Category::parse(""), None);
        assert_eq!(Category::parse(" perfumery"), None);
    }

    #[test]
    fn indices_follow_declaration_order() {
        for (i, c) in Category::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
        assert!(Category::BedBathTable.is_baseline());
        assert!(!Category::CoolStuff.is_baseline());
    }

    #[test]
    fn unrecognized_label_is_kept_verbatim() {
        let c = ProductCategory::from("Apparel");
        assert_eq!(c, ProductCategory::Unrecognized("Apparel".to_string()));
        assert_eq!(c.known(), None);
        assert_eq!(c.label(), "Apparel");
    }

    #[test]
    fn known_label_normalizes_on_serialize() {
        let c: ProductCategory = serde_json::from_str("\"Garden_Tools\"").unwrap();
        assert_eq!(c.known(), Some(Category::GardenTools));
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"garden_tools\"");
    }

    #[test]
    fn unrecognized_label_round_trips_through_json() {
        let c: ProductCategory = serde_json::from_str("\"footwear\"").unwrap();
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"footwear\"");
    }
}
