// crates/popweight-core/src/text.rs

/// Offset from an ASCII capital letter to its Unicode regional indicator symbol.
pub const REGIONAL_INDICATOR_OFFSET: u32 = 127_397;

/// Returns the trimmed value, or `None` when nothing is left.
#[inline]
pub fn non_empty(s: &str) -> Option<&str> {
    let t = s.trim();
    (!t.is_empty()).then_some(t)
}

/// Case folding used for every name comparison in the crate.
///
/// Full Unicode lowercase, no transliteration: "Côte d'Ivoire" and
/// "cote d'ivoire" are different names.
#[inline]
pub fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

/// Case-insensitive equality on [`fold_case`] forms.
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_case(a) == fold_case(b)
}

/// Derives a flag emoji from an ISO-2 code.
///
/// Each letter becomes its regional indicator symbol; the pair renders as the
/// flag. Anything that is not exactly two ASCII letters yields `None`.
///
/// ```rust
/// use popweight_core::text::flag_emoji;
///
/// assert_eq!(flag_emoji("US").as_deref(), Some("🇺🇸"));
/// assert_eq!(flag_emoji("fr").as_deref(), Some("🇫🇷"));
/// assert_eq!(flag_emoji("USA"), None);
/// assert_eq!(flag_emoji(""), None);
/// ```
pub fn flag_emoji(iso2: &str) -> Option<String> {
    let bytes = iso2.as_bytes();
    if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_alphabetic) {
        return None;
    }
    bytes
        .iter()
        .map(|b| char::from_u32(u32::from(b.to_ascii_uppercase()) + REGIONAL_INDICATOR_OFFSET))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_emoji_is_two_regional_indicators() {
        let us = flag_emoji("US").unwrap();
        let cps: Vec<u32> = us.chars().map(u32::from).collect();
        assert_eq!(cps, vec![0x1F1FA, 0x1F1F8]);
        assert_eq!(us, "\u{1F1FA}\u{1F1F8}");
        assert_eq!(flag_emoji("US"), flag_emoji("us"));
    }

    #[test]
    fn flag_emoji_rejects_anything_but_two_letters() {
        for code in ["", "U", "USA", "1A", "U ", "ÄÖ"] {
            assert_eq!(flag_emoji(code), None, "{code:?}");
        }
    }

    #[test]
    fn non_empty_trims() {
        assert_eq!(non_empty("  FRA "), Some("FRA"));
        assert_eq!(non_empty(" \t "), None);
    }

    #[test]
    fn folding_is_case_only() {
        assert!(equals_folded("FRANCE", "france"));
        assert!(equals_folded("Åland", "åLAND"));
        assert!(!equals_folded("Côte d'Ivoire", "Cote d'Ivoire"));
    }
}
