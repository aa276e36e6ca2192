//! Field name normalization.
//!
//! Turns raw document field names (`patient_DOB`, `PatientFirstName`,
//! `Date of Birth`) into comparable lowercase token sequences.

/// Tokens dropped during normalization.
pub const STOP_WORDS: &[&str] = &["the", "a", "an", "of", "for", "to", "in", "on", "at"];

/// Normalizes a raw field name into an ordered sequence of lowercase tokens.
///
/// - `_`, `-` and `.` become spaces
/// - an ASCII lowercase letter followed by an ASCII uppercase letter is split
/// - the result is lowercased, split on whitespace and stripped of stop words
///
/// Token order is preserved.
pub fn normalize(raw: &str) -> Vec<String> {
    let mut spaced = String::with_capacity(raw.len() + 4);
    let mut prev_lower = false;
    for ch in raw.chars() {
        if matches!(ch, '_' | '-' | '.') {
            spaced.push(' ');
            prev_lower = false;
            continue;
        }
        if prev_lower && ch.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(ch);
        prev_lower = ch.is_ascii_lowercase();
    }

    spaced
        .to_lowercase()
        .split_whitespace()
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Joins normalized tokens back into a single space-separated string.
pub fn normalize_to_string(tokens: &[String]) -> String {
    tokens.join(" ")
}

/// Normalizes and joins in one step.
pub fn normalized_text(raw: &str) -> String {
    normalize_to_string(&normalize(raw))
}

/// Lowercase alphanumeric-only form used for substring comparisons.
///
/// `Patient DOB`, `patient_dob` and `patientDob` all compact to `patientdob`.
pub fn compact(raw: &str) -> String {
    raw.chars()
        .filter(|ch| ch.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns true if the token is a stop word.
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}
