/**
 * Canonicalization of free-text answers before they are compared.
 *
 * Version: October 2026
 */
use unicode_normalization::UnicodeNormalization;


/// Letters outside of ASCII that survive normalization.
const EXTRA_LETTERS: [char; 4] = ['ä', 'ö', 'ü', 'ß'];


/// Return the canonical form of `text`, or the empty string if there is no text.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Return the canonical form of `text`: lowercased, stripped of everything but ASCII
/// letters, digits and the letters in `EXTRA_LETTERS`, with words separated by single
/// spaces.
///
/// Characters are filtered out before whitespace is collapsed, so that `"a ! b"`
/// becomes `"a b"` and the function is idempotent.
pub fn normalize(text: &str) -> String {
    let filtered: String = text
        .nfc()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|c| is_kept(*c))
        .collect();
    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Return `true` if `guess` matches `solution` after both have been normalized.
pub fn check_answer(guess: &str, solution: &str) -> bool {
    normalize(guess) == normalize(solution)
}

fn is_kept(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' ' || EXTRA_LETTERS.contains(&c)
}
