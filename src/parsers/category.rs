use crate::models::{Action, Category};

/// Name fragments that mark an ARC part
pub const ARC_PART_KEYWORDS: &[&str] = &[
    "leaper",
    "rocketeer",
    "surveyor",
    "pulse unit",
    "driver",
    "vault",
];

/// Description fragments that mark a quest item, including known quest names
pub const QUEST_KEYWORDS: &[&str] = &["quest", "into the fray", "out of the shadows"];

/// Description fragments that mark a workshop item
pub const WORKSHOP_KEYWORDS: &[&str] = &["workshop", "craft", "station", "project"];

/// Resolve a category the action badge left open.
///
/// Checked in order, first match wins: ARC part name, quest description,
/// workshop description, recycle action, then materials.
pub fn fallback_category(name: &str, description: &str, action: Action) -> Category {
    let name_lower = name.to_lowercase();
    let desc_lower = description.to_lowercase();

    if contains_any(&name_lower, ARC_PART_KEYWORDS) {
        Category::ArcParts
    } else if contains_any(&desc_lower, QUEST_KEYWORDS) {
        Category::Quests
    } else if contains_any(&desc_lower, WORKSHOP_KEYWORDS) {
        Category::Workshop
    } else if action == Action::Recycle {
        Category::Recyclable
    } else {
        Category::Materials
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_part_name_wins_over_quest_description() {
        assert_eq!(
            fallback_category("Leaper Pulse Unit", "Needed for quest: Into the Fray", Action::Keep),
            Category::ArcParts
        );
        assert_eq!(
            fallback_category("Surveyor Vault", "", Action::Unknown),
            Category::ArcParts
        );
    }

    #[test]
    fn quest_before_workshop() {
        assert_eq!(
            fallback_category("Antiseptic", "Quest item and Workshop upgrade", Action::Keep),
            Category::Quests
        );
        assert_eq!(
            fallback_category("Lemon", "📜 Out of the Shadows", Action::Keep),
            Category::Quests
        );
    }

    #[test]
    fn quest_in_description_outranks_project_in_description() {
        assert_eq!(
            fallback_category("Magnetic Accelerator", "🏗️ Project: Expedition (Quest line)", Action::Keep),
            Category::Quests
        );
        assert_eq!(
            fallback_category("Magnetic Accelerator", "🏗️ Project: Expedition", Action::Keep),
            Category::Workshop
        );
    }

    #[test]
    fn workshop_keywords() {
        for desc in ["Workshop upgrade", "Used to craft", "Refiner Station", "🏗️ Project: Expedition"] {
            assert_eq!(
                fallback_category("Steel Spring", desc, Action::Keep),
                Category::Workshop,
                "description {desc:?}"
            );
        }
    }

    #[test]
    fn recycle_then_materials() {
        assert_eq!(fallback_category("Toaster", "", Action::Recycle), Category::Recyclable);
        assert_eq!(fallback_category("Fabric", "", Action::Unknown), Category::Materials);
        assert_eq!(fallback_category("Fabric", "", Action::Sell), Category::Materials);
    }
}
