use once_cell::sync::Lazy;
use regex::Regex;

static NON_SLUG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-z0-9_]")
        .expect("Invalid slug regex")
});

static SOURCE_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"name:\s*'([^']+)'")
        .expect("Invalid source name regex")
});

/// Convert an item name into its icon slug: `"Dog's Collar"` -> `dogs_collar`
pub fn normalize_name(name: &str) -> String {
    let lowered = name
        .to_lowercase()
        .replace(['\'', '\u{2019}'], "")
        .replace(' ', "_");
    NON_SLUG_REGEX.replace_all(&lowered, "").into_owned()
}

/// Pull item names out of a data source file containing `name: '...'` entries
pub fn names_from_source(text: &str) -> Vec<String> {
    SOURCE_NAME_REGEX
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
