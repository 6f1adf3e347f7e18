use scraper::ElementRef;

/// An optional tag name plus a set of class tokens that must all be present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSignature {
    pub tag: Option<&'static str>,
    pub tokens: &'static [&'static str],
}

impl ClassSignature {
    pub const fn new(tag: Option<&'static str>, tokens: &'static [&'static str]) -> Self {
        Self { tag, tokens }
    }

    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        let value = element.value();

        if let Some(tag) = self.tag {
            if !value.name().eq_ignore_ascii_case(tag) {
                return false;
            }
        }

        self.tokens
            .iter()
            .all(|token| value.classes().any(|class| class == *token))
    }
}

/// Class signatures locating each field of an item card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardMarkers {
    pub card: ClassSignature,
    pub name: ClassSignature,
    pub rarity: ClassSignature,
    pub action: ClassSignature,
    pub description: ClassSignature,
    pub value: ClassSignature,
}

impl Default for CardMarkers {
    fn default() -> Self {
        Self {
            card: ClassSignature::new(Some("div"), &["rounded-xl", "text-card-foreground"]),
            name: ClassSignature::new(Some("h3"), &["text-sm", "font-bold"]),
            rarity: ClassSignature::new(None, &["absolute", "top-1", "right-1"]),
            action: ClassSignature::new(None, &["text-[10px]", "border", "font-bold", "text-center"]),
            description: ClassSignature::new(None, &["text-[10px]", "text-center", "bg-slate-950/50"]),
            value: ClassSignature::new(Some("span"), &["font-bold", "text-yellow-300"]),
        }
    }
}
