// crates/popweight-core/src/traits.rs
use crate::text::equals_folded;

/// Name-based matching helpers for types that expose a canonical display name.
///
/// Implementors provide a `&str` view of their name via
/// [`NameMatch::name_str`] and get case-insensitive equality through
/// [`NameMatch::is_named`]. Surrounding whitespace is ignored and empty
/// names never match.
///
/// # Examples
/// ```rust
/// use popweight_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("France").is_named("FRANCE"));
/// assert!(Place(" France ").is_named("france"));
/// assert!(!Place("").is_named(""));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    /// Both sides are trimmed before folding.
    #[inline]
    fn is_named(&self, q: &str) -> bool {
        let name = self.name_str().trim();
        !name.is_empty() && equals_folded(name, q.trim())
    }
}

/// Resolves a country display name to an ISO-3 code.
///
/// Both the gazetteer itself (linear scan) and the prebuilt
/// [`NameIndex`](crate::reconcile::NameIndex) implement this; they must agree,
/// including the first-match-wins tie-break.
pub trait NameLookup {
    fn iso3_for_name(&self, name: &str) -> Option<&str>;
}
