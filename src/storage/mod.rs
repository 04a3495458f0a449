//! Storage collaborator - where expense documents live.
//!
//! The ledger only talks to storage through [`ExpenseStore`]: single-document
//! writes plus a continuous [`Subscription`] that delivers the full current
//! collection whenever it changes.

/// `SQLite`-backed store with change notification
pub mod sqlite;

pub use sqlite::SqliteExpenseStore;

use crate::core::expense::{ExpenseFields, ExpenseRecord};
use crate::errors::Result;
use std::fmt;
use std::future::Future;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Address of one user's expense collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath {
    app_id: String,
    user_id: String,
}

impl CollectionPath {
    /// Collection for `user_id` under the fixed application identifier.
    #[must_use]
    pub fn new(app_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            user_id: user_id.into(),
        }
    }

    /// The application identifier
    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// The user identifier
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "artifacts/{}/users/{}/expenses", self.app_id, self.user_id)
    }
}

/// One delivery on a subscription.
#[derive(Debug, Clone, PartialEq)]
pub enum SubscriptionEvent {
    /// The complete current contents of the collection, unordered
    Snapshot(Vec<ExpenseRecord>),
    /// Reading the collection failed; later deliveries may still succeed
    Error(String),
}

/// A live feed of snapshots for one collection.
///
/// Dropping the subscription, or calling [`Subscription::cancel`], stops the
/// feed task so no further deliveries arrive.
#[derive(Debug)]
pub struct Subscription {
    events: mpsc::Receiver<SubscriptionEvent>,
    task: JoinHandle<()>,
}

impl Subscription {
    /// Wraps a feed task and the receiving end of its channel.
    #[must_use]
    pub const fn new(events: mpsc::Receiver<SubscriptionEvent>, task: JoinHandle<()>) -> Self {
        Self { events, task }
    }

    /// Waits for the next delivery; `None` once the feed has ended.
    pub async fn next(&mut self) -> Option<SubscriptionEvent> {
        self.events.recv().await
    }

    /// Stops the feed.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Document storage for expenses, addressed by collection path.
pub trait ExpenseStore: Send + Sync + 'static {
    /// Writes a new expense stamped with the current time and returns its identifier.
    fn create(
        &self,
        path: &CollectionPath,
        fields: ExpenseFields,
    ) -> impl Future<Output = Result<String>> + Send;

    /// Overwrites name, amount, category and date of an existing expense.
    ///
    /// The creation timestamp is left as it was. Fails with
    /// [`Error::ExpenseNotFound`](crate::errors::Error::ExpenseNotFound) if no such
    /// expense exists in the collection.
    fn update(
        &self,
        path: &CollectionPath,
        id: &str,
        fields: ExpenseFields,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Removes an expense. Removing an identifier that is already gone succeeds.
    fn delete(&self, path: &CollectionPath, id: &str) -> impl Future<Output = Result<()>> + Send;

    /// Opens a subscription whose first delivery is the current collection.
    fn subscribe(&self, path: &CollectionPath)
    -> impl Future<Output = Result<Subscription>> + Send;
}
