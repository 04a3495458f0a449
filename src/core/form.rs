//! The expense form: raw field text, the edit target, and submit validation.

use crate::core::expense::{DATE_FORMAT, ExpenseFields, ExpenseRecord};
use crate::errors::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Message shown for every rejected submission
pub const VALIDATION_MESSAGE: &str = "All fields are required and amount must be positive.";

/// Field text as submitted by the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FormInput {
    /// Expense name
    #[serde(default)]
    pub name: String,
    /// Amount as typed
    #[serde(default)]
    pub amount: String,
    /// Selected category label
    #[serde(default)]
    pub category: String,
    /// Date as `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
}

/// Whether submit creates a record or updates one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SubmitMode {
    /// New record on submit
    Create,
    /// Update of the edit target on submit
    Edit,
}

impl SubmitMode {
    /// Label for the submit button
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Create => "Add Expense",
            Self::Edit => "Update Expense",
        }
    }
}

/// The form as the ledger currently holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormState {
    /// Expense name
    pub name: String,
    /// Amount as typed
    pub amount: String,
    /// Category label, empty when nothing is selected
    pub category: String,
    /// Date as `YYYY-MM-DD`
    pub date: String,
    /// Identifier being edited, `None` in create mode
    pub editing: Option<String>,
}

impl FormState {
    /// Empty form dated today.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            amount: String::new(),
            category: String::new(),
            date: today.format(DATE_FORMAT).to_string(),
            editing: None,
        }
    }

    /// Current submit mode, derived from the edit target.
    #[must_use]
    pub const fn mode(&self) -> SubmitMode {
        if self.editing.is_some() {
            SubmitMode::Edit
        } else {
            SubmitMode::Create
        }
    }

    /// Replaces the field text with what the page submitted. The edit target is kept.
    pub fn fill(&mut self, input: FormInput) {
        self.name = input.name;
        self.amount = input.amount;
        self.category = input.category;
        self.date = input.date;
    }

    /// Copies an existing record into the form and makes it the edit target.
    pub fn load(&mut self, record: &ExpenseRecord) {
        self.name.clone_from(&record.name);
        self.amount = record.amount.map(|a| a.to_string()).unwrap_or_default();
        self.category.clone_from(&record.category);
        self.date.clone_from(&record.date);
        self.editing = Some(record.id.clone());
    }

    /// Clears name, amount and category, and dates the form today.
    pub fn reset_fields(&mut self, today: NaiveDate) {
        self.name.clear();
        self.amount.clear();
        self.category.clear();
        self.date = today.format(DATE_FORMAT).to_string();
    }

    /// Leaves edit mode.
    pub fn clear_edit_target(&mut self) {
        self.editing = None;
    }

    /// Validates the field text into writable fields.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] if the trimmed name, category or date is empty,
    /// or the amount is not a finite number greater than zero.
    pub fn validate(&self) -> Result<ExpenseFields> {
        let name = self.name.trim();
        let category = self.category.trim();
        let date = self.date.trim();
        let amount = parse_amount(&self.amount);

        match amount {
            Some(amount) if !name.is_empty() && !category.is_empty() && !date.is_empty() => {
                Ok(ExpenseFields {
                    name: name.to_string(),
                    amount,
                    category: category.to_string(),
                    date: date.to_string(),
                })
            }
            _ => Err(Error::Validation {
                message: VALIDATION_MESSAGE.to_string(),
            }),
        }
    }
}

/// Parses a positive, finite amount.
fn parse_amount(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite() && *a > 0.0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn filled(name: &str, amount: &str, category: &str, date: &str) -> FormState {
        let mut form = FormState::new(today());
        form.fill(FormInput {
            name: name.to_string(),
            amount: amount.to_string(),
            category: category.to_string(),
            date: date.to_string(),
        });
        form
    }

    #[test]
    fn test_new_form_is_dated_today_in_create_mode() {
        let form = FormState::new(today());
        assert_eq!(form.date, "2024-01-15");
        assert_eq!(form.mode(), SubmitMode::Create);
        assert_eq!(form.mode().label(), "Add Expense");
    }

    #[test]
    fn test_valid_form_trims_name() {
        let fields = filled("  Coffee ", "4.50", "Food", "2024-01-15")
            .validate()
            .unwrap();
        assert_eq!(fields.name, "Coffee");
        assert_eq!(fields.amount, 4.5);
        assert_eq!(fields.category, "Food");
        assert_eq!(fields.date, "2024-01-15");
    }

    #[test]
    fn test_rejects_non_positive_and_non_numeric_amounts() {
        for amount in ["0", "-3", "abc", "", "NaN", "inf", "1e400"] {
            let result = filled("Coffee", amount, "Food", "2024-01-15").validate();
            assert!(
                matches!(result, Err(Error::Validation { ref message }) if message == VALIDATION_MESSAGE),
                "amount {amount:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_missing_fields() {
        assert!(filled("   ", "1", "Food", "2024-01-15").validate().is_err());
        assert!(filled("Bus", "1", "", "2024-01-15").validate().is_err());
        assert!(filled("Bus", "1", "Transport", "").validate().is_err());
    }

    #[test]
    fn test_load_enters_edit_mode() {
        let mut form = FormState::new(today());
        form.load(&ExpenseRecord {
            id: "abc".to_string(),
            name: "Rent".to_string(),
            amount: Some(1200.0),
            category: "Housing".to_string(),
            date: "2024-01-01".to_string(),
            timestamp: None,
        });

        assert_eq!(form.editing.as_deref(), Some("abc"));
        assert_eq!(form.mode().label(), "Update Expense");
        assert_eq!(form.amount, "1200");
        assert_eq!(form.date, "2024-01-01");
    }

    #[test]
    fn test_reset_keeps_edit_target_until_cleared() {
        let mut form = filled("Bus", "2.75", "Transport", "2023-12-01");
        form.editing = Some("x".to_string());
        form.reset_fields(today());

        assert!(form.name.is_empty() && form.amount.is_empty() && form.category.is_empty());
        assert_eq!(form.date, "2024-01-15");
        assert_eq!(form.mode(), SubmitMode::Edit);

        form.clear_edit_target();
        assert_eq!(form.mode(), SubmitMode::Create);
    }
}
