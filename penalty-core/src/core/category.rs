//! Vehicle / complaint categories and the search-side category filter.

use crate::PenaltyError;
use rusqlite::types::{ToSql, ToSqlOutput};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label the category filter uses to mean "no category restriction".
pub const ALL_CATEGORIES: &str = "All";

/// Classification of the vehicle or complaint a record is about.
///
/// Stored in the database as its display label (e.g. `"Light Trucks"`), so
/// files written by earlier versions of the register stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    #[default]
    Taxis,
    CitizenComplaintsOnTaxis,
    LightTrucks,
    HeavyTrucks,
    Buses,
}

impl Category {
    /// Every category, in dropdown order. The first entry is the form default.
    pub const ALL: [Category; 5] = [
        Category::Taxis,
        Category::CitizenComplaintsOnTaxis,
        Category::LightTrucks,
        Category::HeavyTrucks,
        Category::Buses,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Taxis => "Taxis",
            Self::CitizenComplaintsOnTaxis => "Citizen Complaints on Taxis",
            Self::LightTrucks => "Light Trucks",
            Self::HeavyTrucks => "Heavy Trucks",
            Self::Buses => "Buses",
        }
    }

    fn variant_name(self) -> &'static str {
        match self {
            Self::Taxis => "Taxis",
            Self::CitizenComplaintsOnTaxis => "CitizenComplaintsOnTaxis",
            Self::LightTrucks => "LightTrucks",
            Self::HeavyTrucks => "HeavyTrucks",
            Self::Buses => "Buses",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = PenaltyError;

    /// Accepts either the display label or the variant name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.label() == s || c.variant_name() == s)
            .ok_or_else(|| PenaltyError::InvalidCategory(s.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = PenaltyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.label().to_string()
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.label()))
    }
}

/// The category half of a search: either every category or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Dropdown options for the search filter: `"All"` followed by every category label.
    pub fn options() -> Vec<&'static str> {
        std::iter::once(ALL_CATEGORIES)
            .chain(Category::ALL.iter().map(|c| c.label()))
            .collect()
    }

    pub fn admits(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = PenaltyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_CATEGORIES {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_CATEGORIES),
            Self::Only(category) => category.fmt(f),
        }
    }
}
