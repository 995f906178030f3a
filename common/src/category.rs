//! The fixed set of expense categories.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, PartialEq)]
#[error("{0} is not a valid expense category")]
pub struct ParseCategoryError(pub String);

/// The category of an expense.
///
/// Expenses belong to exactly one category from a closed set;
/// [Category::Other] catches everything that does not fit the named ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Travel,
    Shopping,
    Entertainment,
    Bills,
    Healthcare,
    Education,
    Other,
}

impl Category {
    /// Every category, in the order the client's form lists them.
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Travel,
        Category::Shopping,
        Category::Entertainment,
        Category::Bills,
        Category::Healthcare,
        Category::Education,
        Category::Other,
    ];

    /// The category name as it appears on the wire and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Travel => "Travel",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Bills => "Bills",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Other => "Other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

#[cfg(test)]
mod category_tests {
    use std::str::FromStr;

    use super::{Category, ParseCategoryError};

    #[test]
    fn from_str_round_trips_every_category() {
        for category in Category::ALL {
            assert_eq!(Category::from_str(category.as_str()), Ok(category));
        }
    }

    #[test]
    fn from_str_rejects_unknown_name() {
        assert_eq!(
            Category::from_str("Groceries"),
            Err(ParseCategoryError("Groceries".to_string()))
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Category::Food).unwrap();

        assert_eq!(json, "\"Food\"");
    }
}
