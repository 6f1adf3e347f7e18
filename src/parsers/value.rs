use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::CURRENCY_SUFFIX;

static VALUE_TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9][0-9,]*$")
        .expect("Invalid value token regex")
});

/// Whether the text is a bare amount such as `450` or `12,345`
pub fn is_value_token(text: &str) -> bool {
    VALUE_TOKEN_REGEX.is_match(text.trim())
}

/// Insert `,` every three places from the right of a digit string
pub fn group_digits(digits: &str) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(len + len / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Format an amount token for display.
///
/// Tokens that already carry separators or start with a zero are kept
/// verbatim; other digit runs are grouped, e.g. `12345` -> `12,345 CR`.
pub fn format_value_display(token: &str) -> String {
    let token = token.trim();
    let amount = if token.contains(',') || (token.len() > 1 && token.starts_with('0')) {
        token.to_string()
    } else {
        group_digits(token)
    };
    format!("{} {}", amount, CURRENCY_SUFFIX)
}
