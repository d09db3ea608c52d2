//! Product availability status.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a product can currently be bought.
///
/// The backend spells out-of-stock as a single word: `OUTOFSTOCK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductStatus {
    #[default]
    Available,
    OutOfStock,
}

impl ProductStatus {
    /// Every status, in the order the product form lists them.
    pub const ALL: [Self; 2] = [Self::Available, Self::OutOfStock];

    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::OutOfStock => "OUTOFSTOCK",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::OutOfStock => "Out of Stock",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProductCategory;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&ProductStatus::OutOfStock).unwrap(),
            "\"OUTOFSTOCK\""
        );
        let status: ProductStatus = serde_json::from_str("\"AVAILABLE\"").unwrap();
        assert_eq!(status, ProductStatus::Available);
    }

    #[test]
    fn test_category_wire_format_matches_as_str() {
        for category in ProductCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }
}
