//! Product categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Catalog category, serialized the way the backend stores it (`BOOKS`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductCategory {
    #[default]
    Books,
    Fashion,
    Electronics,
    Furniture,
    Groceries,
}

impl ProductCategory {
    /// Every category, in the order the product form lists them.
    pub const ALL: [Self; 5] = [
        Self::Books,
        Self::Fashion,
        Self::Electronics,
        Self::Furniture,
        Self::Groceries,
    ];

    /// Wire value (`BOOKS`, `FASHION`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Books => "BOOKS",
            Self::Fashion => "FASHION",
            Self::Electronics => "ELECTRONICS",
            Self::Furniture => "FURNITURE",
            Self::Groceries => "GROCERIES",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Books => "Books",
            Self::Fashion => "Fashion",
            Self::Electronics => "Electronics",
            Self::Furniture => "Furniture",
            Self::Groceries => "Groceries",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
