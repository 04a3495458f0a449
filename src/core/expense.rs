//! Expense domain types, ordering, and the running total.
//!
//! A snapshot from the store is converted into [`ExpenseRecord`]s, sorted with
//! [`order_expenses`], and summed with [`total_amount`]. None of this touches the
//! database; it operates on whatever the last snapshot delivered.

use crate::entities::expense;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Format of every date string the tracker writes
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The fixed set of expense categories offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    /// Groceries, restaurants, coffee
    Food,
    /// Fuel, fares, parking
    Transport,
    /// Rent and mortgage
    Housing,
    /// Leisure spending
    Entertainment,
    /// Power, water, internet
    Utilities,
    /// General purchases
    Shopping,
    /// Medical and pharmacy
    Health,
    /// Courses and books
    Education,
    /// Anything else
    Other,
}

impl Category {
    /// Every category in dropdown order
    pub const ALL: [Self; 9] = [
        Self::Food,
        Self::Transport,
        Self::Housing,
        Self::Entertainment,
        Self::Utilities,
        Self::Shopping,
        Self::Health,
        Self::Education,
        Self::Other,
    ];

    /// Label shown in the dropdown and stored in the database
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Housing => "Housing",
            Self::Entertainment => "Entertainment",
            Self::Utilities => "Utilities",
            Self::Shopping => "Shopping",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Other => "Other",
        }
    }

    /// Badge style for a stored category label.
    ///
    /// Unknown labels get the `Other` style; the stored value itself is left alone.
    #[must_use]
    pub fn badge_class(label: &str) -> &'static str {
        match label.parse::<Self>().unwrap_or(Self::Other) {
            Self::Food => "badge badge-food",
            Self::Transport => "badge badge-transport",
            Self::Housing => "badge badge-housing",
            Self::Entertainment => "badge badge-entertainment",
            Self::Utilities => "badge badge-utilities",
            Self::Shopping => "badge badge-shopping",
            Self::Health => "badge badge-health",
            Self::Education => "badge badge-education",
            Self::Other => "badge badge-other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a label is not one of the fixed categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// The editable fields of an expense, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseFields {
    /// Trimmed, non-empty name
    pub name: String,
    /// Strictly positive amount
    pub amount: f64,
    /// Category label
    pub category: String,
    /// `YYYY-MM-DD`
    pub date: String,
}

/// One expense as delivered by a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseRecord {
    /// Store-assigned identifier
    pub id: String,
    /// What the money was spent on
    pub name: String,
    /// `None` when the stored value is not a usable number
    pub amount: Option<f64>,
    /// Category label as stored
    pub category: String,
    /// Date string as stored
    pub date: String,
    /// Creation time; `None` sorts as the earliest possible time
    pub timestamp: Option<DateTime<Utc>>,
}

impl ExpenseRecord {
    /// Amount counted towards the total: non-numeric amounts count as zero.
    #[must_use]
    pub fn counted_amount(&self) -> f64 {
        self.amount.filter(|a| a.is_finite()).unwrap_or(0.0)
    }

    /// The date as a calendar date, if it parses.
    #[must_use]
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }
}

impl From<expense::Model> for ExpenseRecord {
    fn from(model: expense::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            amount: model.amount,
            category: model.category,
            date: model.date,
            timestamp: model.timestamp,
        }
    }
}

/// Display ordering: newest date first, then newest creation time first.
///
/// Unparsable dates and missing timestamps both sort after every real value.
#[must_use]
pub fn compare_for_display(a: &ExpenseRecord, b: &ExpenseRecord) -> Ordering {
    b.calendar_date()
        .cmp(&a.calendar_date())
        .then_with(|| b.timestamp.cmp(&a.timestamp))
}

/// Sorts a snapshot into display order.
pub fn order_expenses(expenses: &mut [ExpenseRecord]) {
    expenses.sort_by(compare_for_display);
}

/// Sum of every counted amount in the list.
#[must_use]
pub fn total_amount(expenses: &[ExpenseRecord]) -> f64 {
    expenses.iter().map(ExpenseRecord::counted_amount).sum()
}

/// Formats a value as dollars with two decimals, e.g. `$4.50`.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    format!("${amount:.2}")
}
