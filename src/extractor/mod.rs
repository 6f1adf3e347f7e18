//! Item card extraction from a saved catalog page.
//!
//! The page is parsed into a tree and every card container becomes one
//! candidate. Fields are looked up inside the card's region by class
//! signature; cards nested inside another card form regions of their own.

mod markers;

pub use markers::{CardMarkers, ClassSignature};

use scraper::{ElementRef, Html};
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{Action, Category, ItemRecord, Rarity};
use crate::parsers::{
    classify_action, clean_text, fallback_category, format_value_display, is_value_token,
    join_fragments,
};

/// Why a single card produced no record
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("card has no name heading")]
    MissingName,
}

/// Records in document order plus aggregate counts of dropped cards.
/// `skipped` counts cards without a name, `faults` cards whose processing
/// panicked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub items: Vec<ItemRecord>,
    pub skipped: usize,
    pub faults: usize,
}

impl Extraction {
    pub fn candidates(&self) -> usize {
        self.items.len() + self.skipped + self.faults
    }
}

#[derive(Debug, Clone, Default)]
pub struct ItemCardExtractor {
    markers: CardMarkers,
}

impl ItemCardExtractor {
    pub fn new(markers: CardMarkers) -> Self {
        Self { markers }
    }

    pub fn extract(&self, html: &str) -> Vec<ItemRecord> {
        self.extract_with_report(html).items
    }

    pub fn extract_with_report(&self, html: &str) -> Extraction {
        let document = Html::parse_document(html);
        let mut extraction = Extraction::default();

        let cards = document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| self.markers.card.matches(el));

        for (idx, card) in cards.enumerate() {
            match panic::catch_unwind(AssertUnwindSafe(|| self.extract_card(card))) {
                Ok(Ok(item)) => extraction.items.push(item),
                Ok(Err(e)) => {
                    debug!("Skipping card {}: {}", idx, e);
                    extraction.skipped += 1;
                }
                Err(_) => {
                    warn!("Error processing card {}, skipping it", idx);
                    extraction.faults += 1;
                }
            }
        }

        info!(
            "Extracted {} items from {} candidate cards ({} skipped, {} faulted)",
            extraction.items.len(),
            extraction.candidates(),
            extraction.skipped,
            extraction.faults
        );

        extraction
    }

    fn extract_card(&self, card: ElementRef<'_>) -> Result<ItemRecord, CardError> {
        let region = self.region(card);
        let markers = &self.markers;

        let name = region
            .iter()
            .find(|el| markers.name.matches(el))
            .map(|el| clean_text(&join_fragments(el.text())))
            .filter(|name| !name.is_empty())
            .ok_or(CardError::MissingName)?;

        let rarity = region
            .iter()
            .filter(|el| markers.rarity.matches(el))
            .find_map(|el| Rarity::from_badge(&clean_text(&join_fragments(el.text()))))
            .unwrap_or(Rarity::Unknown);

        let (action, badge_category) = region
            .iter()
            .find(|el| markers.action.matches(el))
            .map(|el| classify_action(&join_fragments(el.text())))
            .unwrap_or((Action::Unknown, None));

        let description = region
            .iter()
            .find(|el| markers.description.matches(el))
            .map(|el| join_fragments(el.text()))
            .unwrap_or_default();

        let value = region
            .iter()
            .filter(|el| markers.value.matches(el))
            .map(|el| join_fragments(el.text()))
            .find(|text| is_value_token(text))
            .map(|token| format_value_display(&token))
            .unwrap_or_default();

        let category: Category = badge_category
            .unwrap_or_else(|| fallback_category(&name, &description, action));

        Ok(ItemRecord {
            name,
            rarity,
            action,
            category,
            description,
            value,
        })
    }

    /// Elements under `card` in document order, without descending into
    /// nested cards.
    fn region<'a>(&self, card: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        let mut region = Vec::new();
        let mut stack: Vec<ElementRef<'a>> = card
            .children()
            .filter_map(ElementRef::wrap)
            .collect();
        stack.reverse();

        while let Some(el) = stack.pop() {
            if self.markers.card.matches(&el) {
                continue;
            }
            region.push(el);

            let children: Vec<ElementRef<'a>> = el.children().filter_map(ElementRef::wrap).collect();
            stack.extend(children.into_iter().rev());
        }

        region
    }
}

/// Extract item records with the default card markers
pub fn extract(html: &str) -> Vec<ItemRecord> {
    ItemCardExtractor::default().extract(html)
}

/// Like [`extract`], also reporting how many cards were dropped
pub fn extract_with_report(html: &str) -> Extraction {
    ItemCardExtractor::default().extract_with_report(html)
}
