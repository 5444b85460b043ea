//! Text normalization before vocabulary matching.

use unicode_normalization::UnicodeNormalization;

/// Normalize heading text: NFKC (which also expands ligatures), lowercase,
/// leading numbering tokens ("1.", "2.3", "IV.", "A.") removed, only letters
/// kept, single spaces between words.
pub fn normalize_heading(text: &str) -> String {
    let folded: String = text.nfkc().collect::<String>().to_lowercase();
    let tokens: Vec<&str> = folded.split_whitespace().collect();

    let mut start = 0;
    while start + 1 < tokens.len() && is_numbering(tokens[start]) {
        start += 1;
    }
    let rest: Vec<String> = tokens[start..]
        .iter()
        .map(|t| t.chars().filter(|c| c.is_alphabetic()).collect::<String>())
        .filter(|t| !t.is_empty())
        .collect();
    rest.join(" ")
}

/// Normalize running header/footer text: lowercase, digits removed,
/// whitespace collapsed.
pub fn normalize_margin_text(text: &str) -> String {
    text.nfkc()
        .collect::<String>()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_numeric())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_numbering(token: &str) -> bool {
    let body = token.trim_end_matches(['.', ')', ':']);
    if body.is_empty() {
        return !token.is_empty();
    }
    let arabic = body.chars().all(|c| c.is_ascii_digit() || c == '.');
    let roman = body.chars().all(|c| "ivxlcdm".contains(c)) && body.len() < token.len();
    let letter = body.chars().count() == 1
        && body.chars().all(|c| c.is_ascii_alphabetic())
        && body.len() < token.len();
    arabic || roman || letter
}
