//! Entity module - Contains all SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod anonymous_user;
pub mod expense;

// Re-export specific types to avoid conflicts
pub use anonymous_user::{
    Column as AnonymousUserColumn, Entity as AnonymousUser, Model as AnonymousUserModel,
};
pub use expense::{Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel};
