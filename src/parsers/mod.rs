pub mod badge;
pub mod category;
pub mod names;
pub mod value;

pub use badge::*;
pub use category::*;
pub use names::*;
pub use value::*;

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trim each fragment, drop the empty ones and join the rest with single spaces
pub fn join_fragments<'a, I>(fragments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    fragments
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
