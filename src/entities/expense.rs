//! Expense entity - One ledger entry inside an anonymous user's collection.
//!
//! Rows are grouped by `collection`, the storage location derived for a session
//! (`artifacts/<app_id>/users/<user_id>/expenses`). `amount` and `timestamp` are
//! nullable: rows written by other tools may lack them, and updates never touch
//! `timestamp`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Store-assigned opaque identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Collection path this expense belongs to
    pub collection: String,
    /// What the money was spent on
    pub name: String,
    /// Amount spent, `None` when the stored value is not a number
    pub amount: Option<f64>,
    /// Category label (`Food`, `Transport`, ...)
    pub category: String,
    /// Calendar date in `YYYY-MM-DD` form
    pub date: String,
    /// Creation time, set once on insert
    pub timestamp: Option<DateTimeUtc>,
}

/// Expenses have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
