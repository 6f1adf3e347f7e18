use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Category, ItemRecord, Rarity};

/// The on-disk shape of an extraction run: `{ "items": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub items: Vec<ItemRecord>,
}

/// Rarity and category distributions over a catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub total: usize,
    pub rarities: BTreeMap<Rarity, usize>,
    pub categories: BTreeMap<Category, usize>,
}

impl Catalog {
    pub fn new(items: Vec<ItemRecord>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.name.as_str())
    }

    pub fn summary(&self) -> CatalogSummary {
        let mut summary = CatalogSummary {
            total: self.items.len(),
            ..Default::default()
        };

        for item in &self.items {
            *summary.rarities.entry(item.rarity).or_insert(0) += 1;
            *summary.categories.entry(item.category).or_insert(0) += 1;
        }

        summary
    }

    /// Pretty JSON with two-space indentation; non-ASCII text is kept as-is.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Action;

    fn item(name: &str, rarity: Rarity, category: Category) -> ItemRecord {
        ItemRecord {
            name: name.to_string(),
            rarity,
            action: Action::Unknown,
            category,
            description: String::new(),
            value: String::new(),
        }
    }

    #[test]
    fn summary_counts_rarities_and_categories() {
        let catalog = Catalog::new(vec![
            item("Wires", Rarity::Common, Category::Materials),
            item("Fabric", Rarity::Common, Category::Materials),
            item("Power Rod", Rarity::Rare, Category::Recyclable),
        ]);

        let summary = catalog.summary();
        assert!(!catalog.is_empty());
        assert_eq!(summary.total, 3);
        assert_eq!(summary.rarities[&Rarity::Common], 2);
        assert_eq!(summary.rarities[&Rarity::Rare], 1);
        assert_eq!(summary.categories[&Category::Materials], 2);
        assert!(!summary.categories.contains_key(&Category::Quests));
    }

    #[test]
    fn empty_catalog_keeps_items_key() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.summary().total, 0);
        assert_eq!(catalog.to_json_pretty().unwrap(), "{\n  \"items\": []\n}");
    }

    #[test]
    fn pretty_json_keeps_non_ascii() {
        let mut entry = item("Café Sign", Rarity::Uncommon, Category::Materials);
        entry.description = "📜 Quest: Into the Fray".to_string();
        let json = Catalog::new(vec![entry]).to_json_pretty().unwrap();

        assert!(json.starts_with("{\n  \"items\": [\n    {\n      \"name\": \"Café Sign\""));
        assert!(json.contains("📜 Quest"));
    }
}
