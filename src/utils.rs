//! # Utilities Module
//!
//! Shared helpers for percentage rounding and border label construction.

use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;

/// Number of leading characters of a label used in a border code
pub const BORDER_CODE_LEN: usize = 3;

/// Literal suffix appended to every synthesized border label
pub const BORDER_SUFFIX: &str = " Border";

/// Round a percentage to two decimal digits.
///
/// Applied exactly once, at ingestion.
pub fn round_percentage(percentage: f64) -> f64 {
    (percentage * 100.0).round() / 100.0
}

/// Fold a label to its closest ASCII form.
///
/// Compatibility decomposition splits accented letters into base letter plus
/// combining marks; everything outside ASCII is then dropped.
pub fn fold_ascii(label: &str) -> Cow<'_, str> {
    if label.is_ascii() {
        return Cow::Borrowed(label);
    }
    Cow::Owned(label.nfkd().filter(char::is_ascii).collect())
}

/// The three character code of a label used inside a border label.
pub fn border_code(label: &str) -> String {
    fold_ascii(label).chars().take(BORDER_CODE_LEN).collect()
}

/// Build the canonical border label between two regions.
///
/// Codes are ordered with a plain byte comparison, so case is significant.
pub fn border_label(first: &str, second: &str) -> String {
    let mut codes = [border_code(first), border_code(second)];
    codes.sort();
    format!("{}-{}{}", codes[0], codes[1], BORDER_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_percentage() {
        assert_eq!(round_percentage(62.499), 62.5);
        assert_eq!(round_percentage(33.333333), 33.33);
        assert_eq!(round_percentage(100.0), 100.0);
        assert_eq!(round_percentage(0.004), 0.0);
    }

    #[test]
    fn test_fold_ascii_strips_diacritics() {
        assert_eq!(fold_ascii("Côte d'Ivoire"), "Cote d'Ivoire");
        assert_eq!(fold_ascii("Curaçao"), "Curacao");
        assert_eq!(fold_ascii("Åland"), "Aland");
        assert!(matches!(fold_ascii("Mexico"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_border_code_uses_folded_label() {
        assert_eq!(border_code("Mexico"), "Mex");
        assert_eq!(border_code("Østfold"), "stf");
        assert_eq!(border_code("Éire"), "Eir");
        assert_eq!(border_code("UK"), "UK");
    }

    #[test]
    fn test_border_label_is_sorted_and_case_sensitive() {
        assert_eq!(border_label("USA", "Mexico"), "Mex-USA Border");
        assert_eq!(border_label("Mexico", "USA"), "Mex-USA Border");
        // Uppercase sorts before lowercase.
        assert_eq!(border_label("bhutan", "China"), "Chi-bhu Border");
        assert_eq!(border_label("", "USA"), "-USA Border");
    }
}
