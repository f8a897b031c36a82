//! Target category vocabulary.

use serde::{Deserialize, Serialize};

/// Product category in the target import schema.
///
/// The target defines a closed vocabulary; source categories outside it are
/// mapped to [`Category::Other`] rather than passed through verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Electronics,
    Apparel,
    Home,
    Toys,
    Books,
    #[default]
    Other,
}

impl Category {
    /// Map a source-side category string into the target vocabulary.
    ///
    /// Matching is case-insensitive and tolerates a few common source
    /// spellings; anything unrecognized becomes [`Category::Other`].
    #[must_use]
    pub fn from_source(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "electronics" | "electronic" => Self::Electronics,
            "apparel" | "clothing" | "clothes" => Self::Apparel,
            "home" | "household" | "home-goods" => Self::Home,
            "toys" | "toy" => Self::Toys,
            "books" | "book" => Self::Books,
            _ => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_source_known_values() {
        assert_eq!(Category::from_source("Electronics"), Category::Electronics);
        assert_eq!(Category::from_source("clothing"), Category::Apparel);
        assert_eq!(Category::from_source("  home "), Category::Home);
    }

    #[test]
    fn test_from_source_unknown_falls_back_to_other() {
        assert_eq!(Category::from_source("gardening"), Category::Other);
        assert_eq!(Category::from_source(""), Category::Other);
    }

    #[test]
    fn test_category_serde_snake_case() {
        let json = serde_json::to_string(&Category::Electronics).expect("serialize");
        assert_eq!(json, "\"electronics\"");
    }
}
