//! Core ledger logic - framework-agnostic expense, form, budget and state handling.
//!
//! Nothing in here performs I/O. The controller feeds it events and carries out
//! the effects it asks for.

/// Budget progress calculations
pub mod budget;
/// Expense types, ordering and totals
pub mod expense;
/// Expense form state and validation
pub mod form;
/// Ledger state and reducer
pub mod ledger;
/// Single-slot message dialog
pub mod message;
