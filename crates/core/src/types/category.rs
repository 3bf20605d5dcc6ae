//! Product category enumeration.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string is not a recognized [`Category`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category '{0}', expected one of: furniture, parts, cars")]
pub struct CategoryParseError(pub String);

/// Product catalog category.
///
/// The catalog recognizes exactly these values; mapping from display
/// labels to these canonical identifiers is the UI layer's job. Any
/// other value submitted to the API is a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Furniture,
    Parts,
    Cars,
}

impl Category {
    /// All known categories, in display order.
    pub const ALL: [Self; 3] = [Self::Furniture, Self::Parts, Self::Cars];

    /// Returns the canonical lowercase identifier for this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Furniture => "furniture",
            Self::Parts => "parts",
            Self::Cars => "cars",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "furniture" => Ok(Self::Furniture),
            "parts" => Ok(Self::Parts),
            "cars" => Ok(Self::Cars),
            other => Err(CategoryParseError(other.to_owned())),
        }
    }
}
