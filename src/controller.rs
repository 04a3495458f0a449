//! Expense ledger controller.
//!
//! Each ledger runs as one tokio task that exclusively owns its
//! [`LedgerState`]. Everything that changes the state arrives as a message:
//! user commands over an `mpsc` channel, snapshots from the store
//! subscription, and completions from sign-in and write tasks. After every
//! message the new state is published on a `watch` channel for the page to
//! render.
//!
//! Sign-in and writes run as separate tasks so a slow call never blocks the
//! loop. They carry no timeout.

use crate::core::form::FormInput;
use crate::core::ledger::{Action, Effect, LedgerState, WriteOp, WriteRequest, WriteTicket};
use crate::errors::{Error, Result};
use crate::identity::IdentityProvider;
use crate::session;
use crate::storage::{CollectionPath, ExpenseStore, Subscription, SubscriptionEvent};
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, warn};

const COMMAND_BUFFER: usize = 32;
const COMPLETION_BUFFER: usize = 32;

/// Actions a user can take on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Submit the form (create or update)
    Submit(FormInput),
    /// Load an expense into the form
    BeginEdit(String),
    /// Delete an expense
    Delete(String),
    /// Change the budget input
    SetBudget(String),
    /// Close the message dialog
    DismissMessage,
}

impl From<UserAction> for Action {
    fn from(action: UserAction) -> Self {
        match action {
            UserAction::Submit(input) => Self::Submit(input),
            UserAction::BeginEdit(id) => Self::BeginEdit(id),
            UserAction::Delete(id) => Self::Delete(id),
            UserAction::SetBudget(input) => Self::SetBudget(input),
            UserAction::DismissMessage => Self::DismissMessage,
        }
    }
}

/// Per-ledger settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSettings {
    /// Application identifier for storage locations
    pub app_id: String,
    /// Budget the ledger starts with
    pub budget: f64,
}

#[derive(Debug)]
struct Command {
    action: UserAction,
    applied: oneshot::Sender<Option<WriteTicket>>,
}

/// Cloneable handle to a running ledger.
///
/// The ledger stops once every handle is dropped.
#[derive(Debug, Clone)]
pub struct LedgerHandle {
    commands: mpsc::Sender<Command>,
    state: watch::Receiver<LedgerState>,
}

impl LedgerHandle {
    /// Sends a user action and waits until the ledger has applied it.
    ///
    /// Applying means the state reflects the action; a write it starts may
    /// still be in flight. The ticket of that write is returned so callers can
    /// [`wait_for_write`](Self::wait_for_write).
    ///
    /// # Errors
    /// Returns [`Error::ControllerClosed`] if the ledger task has stopped.
    pub async fn dispatch(&self, action: UserAction) -> Result<Option<WriteTicket>> {
        let (applied, done) = oneshot::channel();
        self.commands
            .send(Command { action, applied })
            .await
            .map_err(|_| Error::ControllerClosed)?;
        done.await.map_err(|_| Error::ControllerClosed)
    }

    /// The most recently published state
    #[must_use]
    pub fn current(&self) -> LedgerState {
        self.state.borrow().clone()
    }

    /// Waits until the published state satisfies `predicate`.
    ///
    /// # Errors
    /// Returns [`Error::ControllerClosed`] if the ledger stops first.
    pub async fn wait_until(
        &self,
        predicate: impl FnMut(&LedgerState) -> bool,
    ) -> Result<LedgerState> {
        let mut state = self.state.clone();
        let matched = state
            .wait_for(predicate)
            .await
            .map_err(|_| Error::ControllerClosed)?;
        Ok(matched.clone())
    }

    /// Waits until the outcome of `ticket` is on display.
    ///
    /// # Errors
    /// Returns [`Error::ControllerClosed`] if the ledger stops first.
    pub async fn wait_for_write(&self, ticket: WriteTicket) -> Result<LedgerState> {
        self.wait_until(|s| s.is_settled(ticket)).await
    }

    /// A receiver of every state the ledger publishes.
    ///
    /// It reports the sender closed once the ledger task has stopped.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<LedgerState> {
        self.state.clone()
    }
}

/// The calendar date the form resets to
fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Starts a ledger for `device_token` and returns its handle.
///
/// Sign-in begins immediately; until it completes the ledger reports
/// itself as initializing and refuses writes.
pub fn spawn_ledger<S, P>(
    store: Arc<S>,
    identity: Arc<P>,
    settings: LedgerSettings,
    device_token: String,
) -> LedgerHandle
where
    S: ExpenseStore,
    P: IdentityProvider,
{
    let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);
    let (completions_tx, completions_rx) = mpsc::channel(COMPLETION_BUFFER);
    let state = LedgerState::new(settings.budget, today());
    let (published, state_rx) = watch::channel(state.clone());

    let sign_in = completions_tx.clone();
    tokio::spawn(async move {
        let action =
            match session::bootstrap(identity.as_ref(), &settings.app_id, &device_token).await {
                Ok(session) => Action::SessionReady(session),
                Err(e) => {
                    error!("Session bootstrap failed: {}", e);
                    Action::SessionFailed(e.to_string())
                }
            };
        sign_in.send(action).await.ok();
    });

    let controller = LedgerController {
        store,
        state,
        published,
        completions_tx,
        completions_rx,
        subscription: None,
    };
    tokio::spawn(controller.run(commands_rx));

    LedgerHandle {
        commands: commands_tx,
        state: state_rx,
    }
}

struct LedgerController<S> {
    store: Arc<S>,
    state: LedgerState,
    published: watch::Sender<LedgerState>,
    completions_tx: mpsc::Sender<Action>,
    completions_rx: mpsc::Receiver<Action>,
    subscription: Option<Subscription>,
}

impl<S: ExpenseStore> LedgerController<S> {
    async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        debug!("Ledger controller started");
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command { action, applied }) => {
                        let started = self.apply(action.into()).await;
                        applied.send(started).ok();
                    }
                    None => break,
                },
                Some(action) = self.completions_rx.recv() => {
                    self.apply(action).await;
                }
                event = next_delivery(&mut self.subscription) => match event {
                    Some(SubscriptionEvent::Snapshot(records)) => {
                        self.apply(Action::SnapshotDelivered(records)).await;
                    }
                    Some(SubscriptionEvent::Error(reason)) => {
                        self.apply(Action::SubscriptionFailed(reason)).await;
                    }
                    None => {
                        warn!("Subscription feed ended");
                        self.subscription = None;
                    }
                },
            }
        }
        // Dropping the subscription here stops its feed
        debug!("Ledger controller stopped");
    }

    /// Applies `action`, publishes the new state, and returns the ticket of
    /// any write it started.
    async fn apply(&mut self, action: Action) -> Option<WriteTicket> {
        let started = match self.state.reduce(action) {
            Some(Effect::Subscribe(path)) => {
                self.resubscribe(path).await;
                None
            }
            Some(Effect::Write(request)) => {
                let ticket = request.ticket;
                self.spawn_write(request);
                Some(ticket)
            }
            None => None,
        };
        self.published.send_replace(self.state.clone());
        started
    }

    async fn resubscribe(&mut self, path: CollectionPath) {
        // Stop the old feed first so it cannot deliver against a stale location
        if let Some(previous) = self.subscription.take() {
            previous.cancel();
        }
        match self.store.subscribe(&path).await {
            Ok(subscription) => {
                info!(collection = %path, "Subscribed to expenses");
                self.subscription = Some(subscription);
            }
            Err(e) => {
                error!(collection = %path, "Failed to subscribe: {}", e);
                self.state.reduce(Action::SubscriptionFailed(e.to_string()));
            }
        }
    }

    fn spawn_write(&self, request: WriteRequest) {
        let store = Arc::clone(&self.store);
        let completions = self.completions_tx.clone();
        tokio::spawn(async move {
            let ticket = request.ticket;
            let write = request.op.kind();
            let action = match execute_write(store.as_ref(), request).await {
                Ok(document_id) => Action::WriteSucceeded {
                    ticket,
                    document_id,
                    today: today(),
                },
                Err(e) => {
                    warn!(?write, "Write failed: {}", e);
                    Action::WriteFailed {
                        ticket,
                        reason: e.to_string(),
                    }
                }
            };
            completions.send(action).await.ok();
        });
    }
}

/// Performs one write, returning the identifier of the document it touched.
async fn execute_write<S: ExpenseStore>(store: &S, request: WriteRequest) -> Result<String> {
    let WriteRequest { path, op, .. } = request;
    match op {
        WriteOp::Create { fields } => store.create(&path, fields).await,
        WriteOp::Update { id, fields } => {
            store.update(&path, &id, fields).await?;
            Ok(id)
        }
        WriteOp::Delete { id } => {
            store.delete(&path, &id).await?;
            Ok(id)
        }
    }
}

/// Next subscription event, or never when there is no subscription.
async fn next_delivery(subscription: &mut Option<Subscription>) -> Option<SubscriptionEvent> {
    match subscription {
        Some(subscription) => subscription.next().await,
        None => std::future::pending().await,
    }
}
