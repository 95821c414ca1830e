//! Pagination and search helpers for catalog listing.
//!
//! Pure functions only; the repository layer turns their output into bind
//! parameters.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// First page number. Pages are 1-based.
pub const DEFAULT_PAGE: i64 = 1;

/// Default number of entries per page for listing and curated views.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum number of entries per page for listing and curated views.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Entity name used in not-found errors.
pub const ENTITY_NAME: &str = "Manhwa";

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Clamp a user-provided page number to `>= 1`.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(DEFAULT_PAGE).max(1)
}

/// Clamp a user-provided page size (or curated-view limit) to `1..=MAX_PAGE_SIZE`.
pub fn clamp_page_size(page_size: Option<i64>) -> i64 {
    page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// Row offset for a 1-based page.
///
/// Saturates instead of overflowing for absurd page numbers; the query then
/// simply returns no rows.
pub fn page_offset(page: i64, page_size: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(page_size.max(0))
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Normalize a search term. Returns `None` for absent or empty input.
///
/// Whitespace is significant and kept as-is.
pub fn normalize_search_term(term: Option<&str>) -> Option<&str> {
    term.filter(|t| !t.is_empty())
}

/// Build an `ILIKE` substring pattern (`%term%`) from a raw search term.
///
/// `%`, `_` and `\` are escaped with a backslash (PostgreSQL's default LIKE
/// escape character) so they match literally.
pub fn substring_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
