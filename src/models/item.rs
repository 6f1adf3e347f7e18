use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Unknown,
}

impl Rarity {
    /// Map a badge label (`EPIC`, `RARE`, ...) to a rarity. Only the exact
    /// uppercase vocabulary is accepted.
    pub fn from_badge(text: &str) -> Option<Self> {
        match text {
            "COMMON" => Some(Rarity::Common),
            "UNCOMMON" => Some(Rarity::Uncommon),
            "RARE" => Some(Rarity::Rare),
            "EPIC" => Some(Rarity::Epic),
            "LEGENDARY" => Some(Rarity::Legendary),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
            Rarity::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Keep,
    Sell,
    Recycle,
    Unknown,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Keep => "keep",
            Action::Sell => "sell",
            Action::Recycle => "recycle",
            Action::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Quests,
    Workshop,
    ArcParts,
    Recyclable,
    Sellable,
    Materials,
    Unknown,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Quests => "quests",
            Category::Workshop => "workshop",
            Category::ArcParts => "arc_parts",
            Category::Recyclable => "recyclable",
            Category::Sellable => "sellable",
            Category::Materials => "materials",
            Category::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One parsed catalog entry. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: String,
    pub rarity: Rarity,
    pub action: Action,
    pub category: Category,
    pub description: String,
    pub value: String,
}
