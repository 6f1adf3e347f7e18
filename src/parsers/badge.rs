use crate::models::{Action, Category};

/// Classify action badge text by substring containment.
///
/// KEEP is checked before RECYCLE and SELL. A KEEP badge only resolves a
/// category when it names a quest or a project/workshop; a plain KEEP leaves
/// the category to the fallback chain.
pub fn classify_action(badge_text: &str) -> (Action, Option<Category>) {
    if badge_text.contains("KEEP") {
        let category = if badge_text.contains("Quest") {
            Some(Category::Quests)
        } else if badge_text.contains("Project") || badge_text.contains("Workshop") {
            Some(Category::Workshop)
        } else {
            None
        };
        (Action::Keep, category)
    } else if badge_text.contains("RECYCLE") {
        (Action::Recycle, Some(Category::Recyclable))
    } else if badge_text.contains("SELL") {
        (Action::Sell, Some(Category::Sellable))
    } else {
        (Action::Unknown, None)
    }
}
