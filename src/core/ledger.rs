//! Ledger state and its reducer.
//!
//! [`LedgerState`] is everything the page shows: session label, form, the
//! ordered expense list, total, budget, and the message slot. It changes only
//! through [`LedgerState::reduce`], which may ask for at most one side effect.
//! Performing that effect and feeding its outcome back as an [`Action`] is the
//! controller's job. Writes never touch the list; only snapshots do.
//!
//! Every requested write carries a [`WriteTicket`]. The ledger keeps the ticket
//! until the write's outcome is visible: its failure message, or a snapshot
//! that includes it.

use crate::core::budget::{BudgetProgress, budget_progress, parse_budget};
use crate::core::expense::{ExpenseFields, ExpenseRecord, order_expenses, total_amount};
use crate::core::form::{FormInput, FormState, SubmitMode};
use crate::core::message::MessageSlot;
use crate::session::{INIT_FAILURE_MESSAGE, Session};
use crate::storage::CollectionPath;
use chrono::NaiveDate;
use tracing::debug;

/// Message shown when the user acts before the session is ready
pub const NOT_READY_MESSAGE: &str = "App not ready.";

/// Whether the ledger can take user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Signing in
    Initializing,
    /// Session established, subscription requested
    Ready,
    /// Session could not be established; the form stays disabled
    Unavailable,
}

/// Which of the three writes an operation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    /// A new expense
    Create,
    /// An update of an existing expense
    Update,
    /// Removal of an expense
    Delete,
}

/// Identifies one write from the moment the reducer requests it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WriteTicket(u64);

/// Everything that can change ledger state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The session was established
    SessionReady(Session),
    /// Signing in failed
    SessionFailed(String),
    /// A full collection snapshot arrived
    SnapshotDelivered(Vec<ExpenseRecord>),
    /// The subscription reported an error
    SubscriptionFailed(String),
    /// The user submitted the form
    Submit(FormInput),
    /// The user chose to edit an expense
    BeginEdit(String),
    /// The user chose to delete an expense
    Delete(String),
    /// A write finished successfully
    WriteSucceeded {
        /// Which write
        ticket: WriteTicket,
        /// Identifier of the written document
        document_id: String,
        /// Date the form resets to
        today: NaiveDate,
    },
    /// A write failed
    WriteFailed {
        /// Which write
        ticket: WriteTicket,
        /// Failure description
        reason: String,
    },
    /// The user changed the budget input
    SetBudget(String),
    /// The user closed the message dialog
    DismissMessage,
}

/// Side effect requested by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Open a subscription on the collection, replacing any current one
    Subscribe(CollectionPath),
    /// Issue one document write
    Write(WriteRequest),
}

/// A single document write against one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteRequest {
    /// Ticket the completion must report
    pub ticket: WriteTicket,
    /// Target collection
    pub path: CollectionPath,
    /// What to write
    pub op: WriteOp,
}

/// The three document writes.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Create an expense
    Create {
        /// Validated fields
        fields: ExpenseFields,
    },
    /// Overwrite an existing expense
    Update {
        /// Expense identifier
        id: String,
        /// Validated fields
        fields: ExpenseFields,
    },
    /// Remove an expense
    Delete {
        /// Expense identifier
        id: String,
    },
}

impl WriteOp {
    /// Which write this is
    #[must_use]
    pub const fn kind(&self) -> WriteKind {
        match self {
            Self::Create { .. } => WriteKind::Create,
            Self::Update { .. } => WriteKind::Update,
            Self::Delete { .. } => WriteKind::Delete,
        }
    }
}

/// A requested write whose outcome the list does not show yet.
#[derive(Debug, Clone, PartialEq)]
struct PendingWrite {
    ticket: WriteTicket,
    op: WriteOp,
    /// Document the store acknowledged, `None` while the write is in flight
    written: Option<String>,
}

impl PendingWrite {
    /// Whether a list shows the acknowledged write.
    fn is_reflected_in(&self, expenses: &[ExpenseRecord]) -> bool {
        let Some(id) = &self.written else {
            return false;
        };
        let current = expenses.iter().find(|r| &r.id == id);
        match (&self.op, current) {
            (WriteOp::Create { .. }, found) => found.is_some(),
            (WriteOp::Update { fields, .. }, Some(record)) => {
                record.name == fields.name
                    && record
                        .amount
                        .is_some_and(|a| (a - fields.amount).abs() < f64::EPSILON)
                    && record.category == fields.category
                    && record.date == fields.date
            }
            (WriteOp::Update { .. }, None) => false,
            (WriteOp::Delete { .. }, found) => found.is_none(),
        }
    }
}

/// Acknowledged writes kept waiting for a snapshot that shows them
const MAX_UNREFLECTED_WRITES: usize = 16;

/// Everything one page session shows and edits.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerState {
    readiness: Readiness,
    session: Option<Session>,
    form: FormState,
    expenses: Vec<ExpenseRecord>,
    total: f64,
    budget: f64,
    message: MessageSlot,
    next_ticket: u64,
    pending: Vec<PendingWrite>,
}

impl LedgerState {
    /// A fresh ledger waiting for its session.
    #[must_use]
    pub fn new(budget: f64, today: NaiveDate) -> Self {
        Self {
            readiness: Readiness::Initializing,
            session: None,
            form: FormState::new(today),
            expenses: Vec::new(),
            total: 0.0,
            budget,
            message: MessageSlot::default(),
            next_ticket: 0,
            pending: Vec::new(),
        }
    }

    /// Current readiness
    #[must_use]
    pub const fn readiness(&self) -> Readiness {
        self.readiness
    }

    /// The established session, if any
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The form as currently held
    #[must_use]
    pub const fn form(&self) -> &FormState {
        &self.form
    }

    /// Expenses in display order
    #[must_use]
    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    /// Sum of the last snapshot's amounts
    #[must_use]
    pub const fn total(&self) -> f64 {
        self.total
    }

    /// Monthly budget
    #[must_use]
    pub const fn budget(&self) -> f64 {
        self.budget
    }

    /// Progress of the total against the budget
    #[must_use]
    pub fn progress(&self) -> BudgetProgress {
        budget_progress(self.total, self.budget)
    }

    /// The open message, if any
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.current()
    }

    /// Current submit mode
    #[must_use]
    pub const fn submit_mode(&self) -> SubmitMode {
        self.form.mode()
    }

    /// Whether the outcome of `ticket` is on display.
    ///
    /// A failed write is settled once its message is shown. A successful one is
    /// settled when a snapshot carrying it has replaced the list.
    #[must_use]
    pub fn is_settled(&self, ticket: WriteTicket) -> bool {
        !self.pending.iter().any(|p| p.ticket == ticket)
    }

    /// Applies one action, returning the side effect it needs, if any.
    pub fn reduce(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::SessionReady(session) => {
                let path = session.collection.clone();
                self.session = Some(session);
                self.readiness = Readiness::Ready;
                Some(Effect::Subscribe(path))
            }
            Action::SessionFailed(reason) => {
                debug!(%reason, "Session failed");
                self.readiness = Readiness::Unavailable;
                self.show(INIT_FAILURE_MESSAGE);
                None
            }
            Action::SnapshotDelivered(mut records) => {
                order_expenses(&mut records);
                self.total = total_amount(&records);
                self.expenses = records;
                self.prune_reflected();
                None
            }
            Action::SubscriptionFailed(reason) => {
                // No snapshot is coming for acknowledged writes
                self.pending.retain(|p| p.written.is_none());
                self.show(format!("Failed to load expenses: {reason}"));
                None
            }
            Action::Submit(input) => {
                self.form.fill(input);
                self.submit()
            }
            Action::BeginEdit(id) => {
                if let Some(record) = self.expenses.iter().find(|r| r.id == id) {
                    self.form.load(record);
                } else {
                    debug!(%id, "Edit requested for an expense not in the list");
                }
                None
            }
            Action::Delete(id) => match self.collection() {
                Some(path) => Some(self.issue(path, WriteOp::Delete { id })),
                None => {
                    self.show(NOT_READY_MESSAGE);
                    None
                }
            },
            Action::WriteSucceeded {
                ticket,
                document_id,
                today,
            } => {
                let Some(pending) = self.pending.iter_mut().find(|p| p.ticket == ticket) else {
                    debug!(?ticket, "Completion for an unknown write");
                    return None;
                };
                pending.written = Some(document_id);
                match pending.op.kind() {
                    WriteKind::Create => {
                        self.show("Expense added.");
                        self.form.reset_fields(today);
                    }
                    WriteKind::Update => {
                        self.show("Expense updated.");
                        self.form.clear_edit_target();
                        self.form.reset_fields(today);
                    }
                    WriteKind::Delete => self.show("Expense deleted."),
                }
                self.prune_reflected();
                None
            }
            Action::WriteFailed { ticket, reason } => {
                let Some(index) = self.pending.iter().position(|p| p.ticket == ticket) else {
                    debug!(?ticket, "Failure for an unknown write");
                    return None;
                };
                match self.pending.remove(index).op.kind() {
                    WriteKind::Create | WriteKind::Update => {
                        self.show(format!("Failed to save expense: {reason}"));
                    }
                    WriteKind::Delete => self.show(format!("Failed to delete: {reason}")),
                }
                None
            }
            Action::SetBudget(input) => {
                self.budget = parse_budget(&input);
                None
            }
            Action::DismissMessage => {
                self.message.dismiss();
                None
            }
        }
    }

    fn submit(&mut self) -> Option<Effect> {
        let Some(path) = self.collection() else {
            self.show(NOT_READY_MESSAGE);
            return None;
        };

        let fields = match self.form.validate() {
            Ok(fields) => fields,
            Err(e) => {
                debug!("Rejected submission: {}", e);
                self.show(crate::core::form::VALIDATION_MESSAGE);
                return None;
            }
        };

        let op = match self.form.editing.clone() {
            Some(id) => WriteOp::Update { id, fields },
            None => WriteOp::Create { fields },
        };
        Some(self.issue(path, op))
    }

    fn issue(&mut self, path: CollectionPath, op: WriteOp) -> Effect {
        let ticket = WriteTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending.push(PendingWrite {
            ticket,
            op: op.clone(),
            written: None,
        });
        Effect::Write(WriteRequest { ticket, path, op })
    }

    fn prune_reflected(&mut self) {
        let expenses = &self.expenses;
        self.pending.retain(|p| !p.is_reflected_in(expenses));

        // A write another session undid may never show up; forget the oldest
        let mut acknowledged = self.pending.iter().filter(|p| p.written.is_some()).count();
        while acknowledged > MAX_UNREFLECTED_WRITES {
            if let Some(index) = self.pending.iter().position(|p| p.written.is_some()) {
                self.pending.remove(index);
            }
            acknowledged -= 1;
        }
    }

    fn collection(&self) -> Option<CollectionPath> {
        match (self.readiness, &self.session) {
            (Readiness::Ready, Some(session)) => Some(session.collection.clone()),
            _ => None,
        }
    }

    fn show(&mut self, text: impl Into<String>) {
        if let Some(replaced) = self.message.show(text) {
            debug!(%replaced, "Replaced open message");
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    #![allow(clippy::panic)]
    use super::*;
    use crate::core::form::VALIDATION_MESSAGE;
    use crate::session::IdentitySource;
    use chrono::{TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    fn session() -> Session {
        Session {
            user_id: "u1".to_string(),
            source: IdentitySource::Provider,
            collection: CollectionPath::new("app", "u1"),
        }
    }

    fn ready_ledger() -> LedgerState {
        let mut ledger = LedgerState::new(1000.0, today());
        let effect = ledger.reduce(Action::SessionReady(session()));
        assert_eq!(effect, Some(Effect::Subscribe(CollectionPath::new("app", "u1"))));
        ledger
    }

    fn input(name: &str, amount: &str, category: &str, date: &str) -> FormInput {
        FormInput {
            name: name.to_string(),
            amount: amount.to_string(),
            category: category.to_string(),
            date: date.to_string(),
        }
    }

    fn record(id: &str, amount: Option<f64>, date: &str, ts: i64) -> ExpenseRecord {
        ExpenseRecord {
            id: id.to_string(),
            name: format!("item {id}"),
            amount,
            category: "Food".to_string(),
            date: date.to_string(),
            timestamp: Some(Utc.timestamp_opt(ts, 0).unwrap()),
        }
    }

    #[test]
    fn test_valid_submit_requests_one_create() {
        let mut ledger = ready_ledger();
        let effect = ledger.reduce(Action::Submit(input("Coffee", "4.50", "Food", "2024-01-15")));

        match effect {
            Some(Effect::Write(WriteRequest {
                path,
                op: WriteOp::Create { fields },
                ..
            })) => {
                assert_eq!(path, CollectionPath::new("app", "u1"));
                assert_eq!(fields.name, "Coffee");
                assert_eq!(fields.amount, 4.5);
            }
            other => panic!("expected a create, got {other:?}"),
        }
        // Nothing changes locally until the write completes and a snapshot arrives
        assert!(ledger.expenses().is_empty());
        assert_eq!(ledger.form().name, "Coffee");
        assert_eq!(ledger.message(), None);
    }

    #[test]
    fn test_invalid_submit_issues_no_write_and_keeps_form() {
        let mut ledger = ready_ledger();
        for amount in ["0", "-1", "twelve"] {
            let effect = ledger.reduce(Action::Submit(input("Coffee", amount, "Food", "2024-01-15")));
            assert_eq!(effect, None);
            assert_eq!(ledger.message(), Some(VALIDATION_MESSAGE));
            assert_eq!(ledger.form().amount, amount);
        }
    }

    #[test]
    fn test_submit_before_ready_is_refused() {
        let mut ledger = LedgerState::new(1000.0, today());
        let effect = ledger.reduce(Action::Submit(input("Coffee", "1", "Food", "2024-01-15")));
        assert_eq!(effect, None);
        assert_eq!(ledger.message(), Some(NOT_READY_MESSAGE));

        let effect = ledger.reduce(Action::Delete("x".to_string()));
        assert_eq!(effect, None);
    }

    #[test]
    fn test_session_failure_disables_ledger() {
        let mut ledger = LedgerState::new(1000.0, today());
        ledger.reduce(Action::SessionFailed("network down".to_string()));
        assert_eq!(ledger.readiness(), Readiness::Unavailable);
        assert_eq!(ledger.message(), Some(INIT_FAILURE_MESSAGE));

        let effect = ledger.reduce(Action::Submit(input("Coffee", "1", "Food", "2024-01-15")));
        assert_eq!(effect, None);
    }

    fn write_request(effect: Option<Effect>) -> WriteRequest {
        match effect {
            Some(Effect::Write(request)) => request,
            other => panic!("expected a write, got {other:?}"),
        }
    }

    fn creation(id: &str, name: &str, amount: f64) -> ExpenseRecord {
        ExpenseRecord {
            id: id.to_string(),
            name: name.to_string(),
            amount: Some(amount),
            category: "Food".to_string(),
            date: "2024-01-15".to_string(),
            timestamp: Some(Utc.timestamp_opt(10, 0).unwrap()),
        }
    }

    #[test]
    fn test_create_success_resets_form() {
        let mut ledger = ready_ledger();
        let request = write_request(
            ledger.reduce(Action::Submit(input("Coffee", "4.50", "Food", "2024-01-15"))),
        );
        ledger.reduce(Action::WriteSucceeded {
            ticket: request.ticket,
            document_id: "new".to_string(),
            today: today(),
        });

        let form = ledger.form();
        assert!(form.name.is_empty() && form.amount.is_empty() && form.category.is_empty());
        assert_eq!(form.date, "2024-02-01");
        assert_eq!(ledger.message(), Some("Expense added."));
    }

    #[test]
    fn test_write_failure_keeps_form() {
        let mut ledger = ready_ledger();
        let request = write_request(
            ledger.reduce(Action::Submit(input("Coffee", "4.50", "Food", "2024-01-15"))),
        );
        ledger.reduce(Action::WriteFailed {
            ticket: request.ticket,
            reason: "disk full".to_string(),
        });
        assert_eq!(ledger.message(), Some("Failed to save expense: disk full"));
        assert_eq!(ledger.form().name, "Coffee");
        assert!(ledger.is_settled(request.ticket));
    }

    #[test]
    fn test_edit_then_submit_updates_original_id() {
        let mut ledger = ready_ledger();
        ledger.reduce(Action::SnapshotDelivered(vec![record("e1", Some(12.0), "2024-01-10", 5)]));

        assert_eq!(ledger.reduce(Action::BeginEdit("e1".to_string())), None);
        assert_eq!(ledger.submit_mode(), SubmitMode::Edit);
        assert_eq!(ledger.form().amount, "12");

        let request = write_request(
            ledger.reduce(Action::Submit(input("Lunch", "15", "Food", "2024-01-10"))),
        );
        match &request.op {
            WriteOp::Update { id, fields } => {
                assert_eq!(id, "e1");
                assert_eq!(fields.amount, 15.0);
            }
            other => panic!("expected an update, got {other:?}"),
        }
        assert_eq!(ledger.submit_mode(), SubmitMode::Edit);

        ledger.reduce(Action::WriteSucceeded {
            ticket: request.ticket,
            document_id: "e1".to_string(),
            today: today(),
        });
        assert_eq!(ledger.submit_mode(), SubmitMode::Create);
        assert_eq!(ledger.message(), Some("Expense updated."));
        assert!(ledger.form().name.is_empty());
    }

    #[test]
    fn test_edit_of_unknown_id_changes_nothing() {
        let mut ledger = ready_ledger();
        let before = ledger.clone();
        ledger.reduce(Action::BeginEdit("ghost".to_string()));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_snapshot_replaces_list_and_total() {
        let mut ledger = ready_ledger();
        ledger.reduce(Action::SnapshotDelivered(vec![
            record("a", Some(100.0), "2024-01-01", 1),
            record("b", Some(50.0), "2024-01-03", 2),
            record("c", None, "2024-01-02", 3),
        ]));
        let ids: Vec<_> = ledger.expenses().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert_eq!(ledger.total(), 150.0);
        assert_eq!(ledger.progress().label, "15.0% of budget used");

        // Delete of "a" shows up only once a snapshot omits it
        let request = write_request(ledger.reduce(Action::Delete("a".to_string())));
        assert_eq!(request.op.kind(), WriteKind::Delete);
        assert_eq!(ledger.expenses().len(), 3);

        ledger.reduce(Action::SnapshotDelivered(vec![
            record("b", Some(50.0), "2024-01-03", 2),
            record("c", None, "2024-01-02", 3),
        ]));
        assert_eq!(ledger.expenses().len(), 2);
        assert_eq!(ledger.total(), 50.0);
    }

    #[test]
    fn test_subscription_failure_freezes_last_snapshot() {
        let mut ledger = ready_ledger();
        ledger.reduce(Action::SnapshotDelivered(vec![record("a", Some(9.0), "2024-01-01", 1)]));
        ledger.reduce(Action::SubscriptionFailed("permission denied".to_string()));

        assert_eq!(ledger.expenses().len(), 1);
        assert_eq!(ledger.total(), 9.0);
        assert_eq!(ledger.message(), Some("Failed to load expenses: permission denied"));
    }

    #[test]
    fn test_delete_outcomes() {
        let mut ledger = ready_ledger();
        let request = write_request(ledger.reduce(Action::Delete("a".to_string())));
        ledger.reduce(Action::WriteSucceeded {
            ticket: request.ticket,
            document_id: "a".to_string(),
            today: today(),
        });
        assert_eq!(ledger.message(), Some("Expense deleted."));

        let request = write_request(ledger.reduce(Action::Delete("b".to_string())));
        ledger.reduce(Action::WriteFailed {
            ticket: request.ticket,
            reason: "offline".to_string(),
        });
        assert_eq!(ledger.message(), Some("Failed to delete: offline"));

        ledger.reduce(Action::DismissMessage);
        assert_eq!(ledger.message(), None);
    }

    #[test]
    fn test_create_settles_once_snapshot_shows_it() {
        let mut ledger = ready_ledger();
        let request = write_request(
            ledger.reduce(Action::Submit(input("Coffee", "4.50", "Food", "2024-01-15"))),
        );
        assert!(!ledger.is_settled(request.ticket));

        ledger.reduce(Action::WriteSucceeded {
            ticket: request.ticket,
            document_id: "new".to_string(),
            today: today(),
        });
        assert!(!ledger.is_settled(request.ticket));

        ledger.reduce(Action::SnapshotDelivered(vec![creation("new", "Coffee", 4.5)]));
        assert!(ledger.is_settled(request.ticket));
    }

    #[test]
    fn test_snapshot_before_completion_settles_on_completion() {
        let mut ledger = ready_ledger();
        let request = write_request(
            ledger.reduce(Action::Submit(input("Coffee", "4.50", "Food", "2024-01-15"))),
        );
        ledger.reduce(Action::SnapshotDelivered(vec![creation("new", "Coffee", 4.5)]));
        assert!(!ledger.is_settled(request.ticket));

        ledger.reduce(Action::WriteSucceeded {
            ticket: request.ticket,
            document_id: "new".to_string(),
            today: today(),
        });
        assert!(ledger.is_settled(request.ticket));
    }

    #[test]
    fn test_update_settles_when_snapshot_carries_new_fields() {
        let mut ledger = ready_ledger();
        ledger.reduce(Action::SnapshotDelivered(vec![creation("e1", "Coffee", 4.5)]));
        ledger.reduce(Action::BeginEdit("e1".to_string()));
        let request = write_request(
            ledger.reduce(Action::Submit(input("Coffee", "6", "Food", "2024-01-15"))),
        );
        ledger.reduce(Action::WriteSucceeded {
            ticket: request.ticket,
            document_id: "e1".to_string(),
            today: today(),
        });

        // The list still shows the old amount
        ledger.reduce(Action::SnapshotDelivered(vec![creation("e1", "Coffee", 4.5)]));
        assert!(!ledger.is_settled(request.ticket));

        ledger.reduce(Action::SnapshotDelivered(vec![creation("e1", "Coffee", 6.0)]));
        assert!(ledger.is_settled(request.ticket));
    }

    #[test]
    fn test_subscription_failure_settles_acknowledged_writes() {
        let mut ledger = ready_ledger();
        let request = write_request(ledger.reduce(Action::Delete("a".to_string())));
        ledger.reduce(Action::WriteSucceeded {
            ticket: request.ticket,
            document_id: "a".to_string(),
            today: today(),
        });
        ledger.reduce(Action::SnapshotDelivered(vec![record("a", Some(1.0), "2024-01-01", 1)]));
        assert!(!ledger.is_settled(request.ticket));

        ledger.reduce(Action::SubscriptionFailed("gone".to_string()));
        assert!(ledger.is_settled(request.ticket));
    }

    #[test]
    fn test_tickets_are_distinct() {
        let mut ledger = ready_ledger();
        let first = write_request(ledger.reduce(Action::Delete("a".to_string())));
        let second = write_request(ledger.reduce(Action::Delete("a".to_string())));
        assert_ne!(first.ticket, second.ticket);
    }

    #[test]
    fn test_budget_changes_are_local() {
        let mut ledger = ready_ledger();
        ledger.reduce(Action::SnapshotDelivered(vec![record("a", Some(150.0), "2024-01-01", 1)]));

        assert_eq!(ledger.reduce(Action::SetBudget("300".to_string())), None);
        assert_eq!(ledger.budget(), 300.0);
        assert_eq!(ledger.progress().label, "50.0% of budget used");

        ledger.reduce(Action::SetBudget("nonsense".to_string()));
        assert_eq!(ledger.budget(), 0.0);
        assert_eq!(ledger.progress().label, "Set a budget");
        assert_eq!(ledger.progress().bar_width_percent, 0.0);
    }
}
