//! News category allow-list and validation
//!
//! The upstream news API accepts a fixed, closed set of category filters.
//! Validation happens before any fetch: a request naming a category outside
//! the allow-list is rejected with the raw value preserved so the caller can
//! render a listing of valid options.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// A validated news category accepted by the upstream API
///
/// The set is immutable configuration known at build time. Absent or empty
/// input defaults to [`Category::All`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// All categories combined (the default)
    All,
    /// National news
    National,
    /// Business news
    Business,
    /// Sports news
    Sports,
    /// World news
    World,
    /// Politics news
    Politics,
    /// Technology news
    Technology,
    /// Startup news
    Startup,
    /// Entertainment news
    Entertainment,
    /// Miscellaneous news
    Miscellaneous,
    /// Offbeat ("hatke") news
    Hatke,
    /// Science news
    Science,
    /// Automobile news
    Automobile,
}

/// Every category in allow-list order, used for validation and for rendering
/// the "valid options" listing on rejection.
pub const ALL_CATEGORIES: [Category; 13] = [
    Category::All,
    Category::National,
    Category::Business,
    Category::Sports,
    Category::World,
    Category::Politics,
    Category::Technology,
    Category::Startup,
    Category::Entertainment,
    Category::Miscellaneous,
    Category::Hatke,
    Category::Science,
    Category::Automobile,
];

/// Rejection outcome for a category not in the allow-list
///
/// Carries the raw requested value so user-facing messages can echo it back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid category: {raw:?}")]
pub struct InvalidCategory {
    /// The rejected input, as received (pre-normalization)
    pub raw: String,
}

impl Category {
    /// The canonical lowercase name sent as the `category` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::National => "national",
            Category::Business => "business",
            Category::Sports => "sports",
            Category::World => "world",
            Category::Politics => "politics",
            Category::Technology => "technology",
            Category::Startup => "startup",
            Category::Entertainment => "entertainment",
            Category::Miscellaneous => "miscellaneous",
            Category::Hatke => "hatke",
            Category::Science => "science",
            Category::Automobile => "automobile",
        }
    }

    /// Validate an optional raw category string against the allow-list
    ///
    /// Absent or empty (after trimming) input defaults to [`Category::All`].
    /// Otherwise the input is trimmed and lowercased before the membership
    /// check, so `"  Sports\n"` validates to [`Category::Sports`].
    ///
    /// Returns [`InvalidCategory`] carrying the original raw value when the
    /// normalized input is not in the allow-list.
    pub fn validate(raw: Option<&str>) -> Result<Category, InvalidCategory> {
        let raw = match raw {
            Some(s) if !s.trim().is_empty() => s,
            _ => return Ok(Category::All),
        };

        let normalized = raw.trim().to_lowercase();
        ALL_CATEGORIES
            .iter()
            .find(|c| c.as_str() == normalized)
            .copied()
            .ok_or_else(|| InvalidCategory {
                raw: raw.to_string(),
            })
    }

    /// Comma-separated listing of every valid category name
    ///
    /// Used in the rejection message sent back to the requesting chat.
    pub fn listing() -> String {
        ALL_CATEGORIES
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
