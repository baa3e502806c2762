//! Expense categories shared by fixed and variable expenses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Closed set of spending categories.
///
/// The declaration order is the canonical order used to break ties when
/// categories are ranked by total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseCategory {
    Transport,
    Housing,
    Food,
    Health,
    Education,
    Leisure,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 7] = [
        ExpenseCategory::Transport,
        ExpenseCategory::Housing,
        ExpenseCategory::Food,
        ExpenseCategory::Health,
        ExpenseCategory::Education,
        ExpenseCategory::Leisure,
        ExpenseCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Transport => "TRANSPORT",
            ExpenseCategory::Housing => "HOUSING",
            ExpenseCategory::Food => "FOOD",
            ExpenseCategory::Health => "HEALTH",
            ExpenseCategory::Education => "EDUCATION",
            ExpenseCategory::Leisure => "LEISURE",
            ExpenseCategory::Other => "OTHER",
        }
    }

    /// Human readable name.
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::Housing => "Housing",
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Health => "Health",
            ExpenseCategory::Education => "Education",
            ExpenseCategory::Leisure => "Leisure",
            ExpenseCategory::Other => "Other",
        }
    }

    /// Portuguese name, as users of the assistant tend to type it.
    fn local_label(&self) -> &'static str {
        match self {
            ExpenseCategory::Transport => "transporte",
            ExpenseCategory::Housing => "moradia",
            ExpenseCategory::Food => "alimentação",
            ExpenseCategory::Health => "saúde",
            ExpenseCategory::Education => "educação",
            ExpenseCategory::Leisure => "lazer",
            ExpenseCategory::Other => "outros",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = Error;

    /// Accepts the stored key, the English label or the Portuguese label,
    /// ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_lowercase();
        ExpenseCategory::ALL
            .into_iter()
            .find(|c| {
                c.as_str().eq_ignore_ascii_case(&needle)
                    || c.label().to_lowercase() == needle
                    || c.local_label() == needle
            })
            .ok_or_else(|| Error::invalid_input(format!("Unknown expense category '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_keys_and_labels() {
        assert_eq!(
            "TRANSPORT".parse::<ExpenseCategory>().unwrap(),
            ExpenseCategory::Transport
        );
        assert_eq!(
            " leisure ".parse::<ExpenseCategory>().unwrap(),
            ExpenseCategory::Leisure
        );
        assert_eq!(
            "Alimentação".parse::<ExpenseCategory>().unwrap(),
            ExpenseCategory::Food
        );
        assert!("groceries".parse::<ExpenseCategory>().is_err());
    }

    #[test]
    fn test_serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&ExpenseCategory::Housing).unwrap();
        assert_eq!(json, "\"HOUSING\"");
        let back: ExpenseCategory = serde_json::from_str("\"OTHER\"").unwrap();
        assert_eq!(back, ExpenseCategory::Other);
    }

    #[test]
    fn test_all_is_in_declaration_order() {
        let mut sorted = ExpenseCategory::ALL;
        sorted.sort();
        assert_eq!(sorted, ExpenseCategory::ALL);
    }
}
