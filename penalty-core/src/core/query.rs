//! Search filters: a free-text term plus an optional category restriction.
//!
//! A [`SearchFilter`] matches a record when the category filter admits the
//! record's category and the term occurs in at least one of the four free-text
//! columns (`vehicle_number`, `driver_name`, `plate_number`, `description`).
//!
//! Matching is case-insensitive for ASCII letters on both sides. The SQL form
//! relies on SQLite's `LIKE`, which folds ASCII case only, and
//! [`SearchFilter::matches`] applies the same folding in memory so the two
//! never disagree. `%`, `_` and `\` in the term are escaped, so the term is
//! always a literal substring.
//!
//! An empty term matches every record; this is how "filter by category only"
//! is expressed.

use crate::{CategoryFilter, Record, Result};

/// Escape character used in generated `LIKE` patterns.
const LIKE_ESCAPE: char = '\\';

/// A compiled search predicate over [`Record`]s.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchFilter {
    term: String,
    category: CategoryFilter,
}

impl SearchFilter {
    pub fn new(term: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            term: term.into(),
            category,
        }
    }

    /// Builds a filter from the raw search-box text and category dropdown value.
    ///
    /// `category` is `"All"` or a category label / variant name. The term is
    /// used as given; trimming is the caller's business.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PenaltyError::InvalidCategory`] if `category` is not recognised.
    pub fn build(term: &str, category: &str) -> Result<Self> {
        Ok(Self::new(term, category.parse()?))
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    /// True when the filter admits every record.
    pub fn is_unrestricted(&self) -> bool {
        self.term.is_empty() && self.category == CategoryFilter::All
    }

    /// Evaluates the filter against an in-memory record.
    pub fn matches(&self, record: &Record) -> bool {
        if !self.category.admits(record.category) {
            return false;
        }
        let needle = self.term.to_ascii_lowercase();
        [
            &record.vehicle_number,
            &record.driver_name,
            &record.plate_number,
            &record.description,
        ]
        .iter()
        .any(|field| field.to_ascii_lowercase().contains(&needle))
    }

    /// Renders the `WHERE` clause body and its positional parameters.
    ///
    /// Parameters are `?1` (category label, or NULL for all categories) and
    /// `?2` (the escaped `LIKE` pattern). NULL columns search as empty text,
    /// matching how rows are read back.
    pub(crate) fn where_clause(&self) -> (&'static str, (Option<&'static str>, String)) {
        let category = match self.category {
            CategoryFilter::All => None,
            CategoryFilter::Only(c) => Some(c.label()),
        };
        let pattern = format!("%{}%", escape_like(&self.term));
        (
            "(?1 IS NULL OR category = ?1)
             AND (COALESCE(vehicle_number, '') LIKE ?2 ESCAPE '\\'
                  OR COALESCE(driver_name, '') LIKE ?2 ESCAPE '\\'
                  OR COALESCE(plate_number, '') LIKE ?2 ESCAPE '\\'
                  OR COALESCE(description, '') LIKE ?2 ESCAPE '\\')",
            (category, pattern),
        )
    }
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}
