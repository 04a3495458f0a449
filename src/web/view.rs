//! Page rendering.

use crate::core::expense::{Category, ExpenseRecord, format_currency};
use crate::core::form::SubmitMode;
use crate::core::ledger::{LedgerState, Readiness};
use crate::session::INIT_FAILURE_MESSAGE;
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Placeholder shown for amounts that are not numbers
const MISSING_AMOUNT: &str = "-";

const STYLES: &str = r"
body { font-family: system-ui, sans-serif; background: #f3f4f6; margin: 0; padding: 2rem; }
main { max-width: 56rem; margin: 0 auto; }
.card { background: #fff; border-radius: 0.5rem; padding: 1.5rem; margin-bottom: 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
.session { color: #6b7280; font-size: 0.875rem; word-break: break-all; }
.error { border-left: 4px solid #dc2626; color: #991b1b; }
form.expense-form { display: grid; grid-template-columns: repeat(4, 1fr) auto; gap: 0.75rem; }
fieldset { border: none; padding: 0; margin: 0; display: contents; }
button { cursor: pointer; border: none; border-radius: 0.375rem; padding: 0.5rem 1rem; color: #fff; background: #2563eb; }
button.edit-mode { background: #16a34a; }
button:disabled { opacity: 0.5; cursor: not-allowed; }
button.small { padding: 0.25rem 0.5rem; font-size: 0.75rem; }
button.danger { background: #dc2626; }
.inline { display: inline; }
.total { font-size: 1.5rem; font-weight: bold; }
.bar { background: #e5e7eb; border-radius: 9999px; height: 0.75rem; overflow: hidden; }
.bar-fill { background: #2563eb; height: 100%; }
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: 0.5rem; border-bottom: 1px solid #e5e7eb; }
.badge { padding: 0.125rem 0.5rem; border-radius: 9999px; font-size: 0.75rem; }
.badge-food { background: #fef3c7; }
.badge-transport { background: #dbeafe; }
.badge-housing { background: #ede9fe; }
.badge-utilities { background: #cffafe; }
.badge-entertainment { background: #fce7f3; }
.badge-health { background: #fee2e2; }
.badge-shopping { background: #dcfce7; }
.badge-education { background: #e0e7ff; }
.badge-other { background: #f3f4f6; }
.overlay { position: fixed; inset: 0; background: rgba(0,0,0,0.4); display: flex; align-items: center; justify-content: center; }
.dialog { background: #fff; border-radius: 0.5rem; padding: 1.5rem; min-width: 18rem; text-align: center; }
";

/// Full page for the ledger's current state.
#[must_use]
pub fn ledger_page(state: &LedgerState) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Expense Tracker" }
                style { (PreEscaped(STYLES)) }
            }
            body {
                main {
                    h1 { "Expense Tracker" }
                    p class="session" { (session_line(state)) }
                    @if state.readiness() == Readiness::Unavailable {
                        div class="card error" {
                            p { "Error: " (INIT_FAILURE_MESSAGE) }
                        }
                    }
                    (expense_form(state))
                    (budget_summary(state))
                    (expense_table(state))
                }
                @if let Some(message) = state.message() {
                    (message_dialog(message))
                }
            }
        }
    }
}

fn session_line(state: &LedgerState) -> String {
    match state.session() {
        Some(session) => session.label(),
        None if state.readiness() == Readiness::Initializing => "Initializing...".to_string(),
        None => "No session".to_string(),
    }
}

fn expense_form(state: &LedgerState) -> Markup {
    let form = state.form();
    let disabled = state.readiness() != Readiness::Ready;
    let mode = state.submit_mode();
    let submit_label = if state.readiness() == Readiness::Initializing {
        "Loading..."
    } else {
        mode.label()
    };

    html! {
        div class="card" {
            h2 { @if mode == SubmitMode::Edit { "Edit Expense" } @else { "Add Expense" } }
            form class="expense-form" method="post" action="/expenses" {
                fieldset disabled[disabled] {
                    input type="text" name="name" placeholder="Expense name" value=(form.name);
                    input type="number" name="amount" placeholder="Amount" step="0.01" min="0" value=(form.amount);
                    select name="category" {
                        option value="" selected[form.category.is_empty()] { "Select Category" }
                        @for category in Category::ALL {
                            option value=(category.as_str()) selected[form.category == category.as_str()] {
                                (category.as_str())
                            }
                        }
                    }
                    input type="date" name="date" value=(form.date);
                    button type="submit" class=[(mode == SubmitMode::Edit).then_some("edit-mode")] {
                        (submit_label)
                    }
                }
            }
        }
    }
}

fn budget_summary(state: &LedgerState) -> Markup {
    let progress = state.progress();
    let bar_style = format!("width: {:.1}%", progress.bar_width_percent);

    html! {
        div class="card" {
            p { "Total: " span class="total" { (format_currency(state.total())) } }
            form method="post" action="/budget" {
                label for="budget" { "Monthly budget " }
                input id="budget" type="number" name="budget" step="0.01" value=(state.budget());
                " "
                button type="submit" class="small" { "Set" }
            }
            div class="bar" {
                div class="bar-fill" style=(bar_style) {}
            }
            p { (progress.label) }
        }
    }
}

fn expense_table(state: &LedgerState) -> Markup {
    let disabled = state.readiness() != Readiness::Ready;

    html! {
        div class="card" {
            h2 { "Expenses" }
            @if state.readiness() == Readiness::Initializing {
                p { "Loading expenses..." }
            } @else if state.expenses().is_empty() {
                p { "No expenses added." }
            } @else {
                table {
                    thead {
                        tr { th { "Name" } th { "Amount" } th { "Category" } th { "Date" } th { "Actions" } }
                    }
                    tbody {
                        @for expense in state.expenses() {
                            (expense_row(expense, disabled))
                        }
                    }
                }
            }
        }
    }
}

fn expense_row(expense: &ExpenseRecord, disabled: bool) -> Markup {
    let amount = expense
        .amount
        .map_or_else(|| MISSING_AMOUNT.to_string(), format_currency);

    html! {
        tr {
            td { (expense.name) }
            td { (amount) }
            td { span class=(Category::badge_class(&expense.category)) { (expense.category) } }
            td { (expense.date) }
            td {
                form class="inline" method="post" action={ "/expenses/" (expense.id) "/edit" } {
                    button type="submit" class="small" disabled[disabled] { "Edit" }
                }
                " "
                form class="inline" method="post" action={ "/expenses/" (expense.id) "/delete" } {
                    button type="submit" class="small danger" disabled[disabled] { "Delete" }
                }
            }
        }
    }
}

fn message_dialog(message: &str) -> Markup {
    html! {
        div class="overlay" role="dialog" {
            div class="dialog" {
                p { (message) }
                form method="post" action="/message/dismiss" {
                    button type="submit" { "OK" }
                }
            }
        }
    }
}
