//! `SQLite` expense store.
//!
//! Documents are rows in the `expenses` table, keyed by a generated identifier
//! and grouped by collection path. Every successful write publishes the path on
//! a broadcast channel; each open subscription listens there and re-reads its
//! collection when its own path changes.

use super::{CollectionPath, ExpenseStore, Subscription, SubscriptionEvent};
use crate::core::expense::{ExpenseFields, ExpenseRecord};
use crate::entities::{Expense, expense};
use crate::errors::{Error, Result};
use sea_orm::{Set, prelude::*};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

const CHANGE_BUFFER: usize = 64;
const SUBSCRIPTION_BUFFER: usize = 16;

/// Expense store on a `SeaORM` connection.
#[derive(Debug, Clone)]
pub struct SqliteExpenseStore {
    db: DatabaseConnection,
    changes: broadcast::Sender<String>,
}

impl SqliteExpenseStore {
    /// Wraps a connection whose tables already exist.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_BUFFER);
        Self { db, changes }
    }

    /// The underlying connection
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Number of subscription feeds currently listening for changes
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.changes.receiver_count()
    }

    fn notify(&self, path: &CollectionPath) {
        // No receivers just means nobody is subscribed right now
        self.changes.send(path.to_string()).ok();
    }
}

async fn load_collection(db: &DatabaseConnection, collection: &str) -> Result<Vec<ExpenseRecord>> {
    let models = Expense::find()
        .filter(expense::Column::Collection.eq(collection))
        .all(db)
        .await?;
    Ok(models.into_iter().map(ExpenseRecord::from).collect())
}

impl ExpenseStore for SqliteExpenseStore {
    #[instrument(skip(self, path, fields), fields(collection = %path))]
    async fn create(&self, path: &CollectionPath, fields: ExpenseFields) -> Result<String> {
        let id = Uuid::new_v4().simple().to_string();
        let model = expense::ActiveModel {
            id: Set(id.clone()),
            collection: Set(path.to_string()),
            name: Set(fields.name),
            amount: Set(Some(fields.amount)),
            category: Set(fields.category),
            date: Set(fields.date),
            timestamp: Set(Some(chrono::Utc::now())),
        };
        model.insert(&self.db).await?;
        info!(%id, "Created expense");

        self.notify(path);
        Ok(id)
    }

    #[instrument(skip(self, path, fields), fields(collection = %path))]
    async fn update(&self, path: &CollectionPath, id: &str, fields: ExpenseFields) -> Result<()> {
        let existing = Expense::find_by_id(id.to_string())
            .filter(expense::Column::Collection.eq(path.to_string()))
            .one(&self.db)
            .await?
            .ok_or_else(|| Error::ExpenseNotFound { id: id.to_string() })?;

        let mut active: expense::ActiveModel = existing.into();
        active.name = Set(fields.name);
        active.amount = Set(Some(fields.amount));
        active.category = Set(fields.category);
        active.date = Set(fields.date);
        active.update(&self.db).await?;
        info!(%id, "Updated expense");

        self.notify(path);
        Ok(())
    }

    #[instrument(skip(self, path), fields(collection = %path))]
    async fn delete(&self, path: &CollectionPath, id: &str) -> Result<()> {
        let result = Expense::delete_many()
            .filter(expense::Column::Id.eq(id))
            .filter(expense::Column::Collection.eq(path.to_string()))
            .exec(&self.db)
            .await?;
        info!(%id, removed = result.rows_affected, "Deleted expense");

        self.notify(path);
        Ok(())
    }

    #[instrument(skip(self, path), fields(collection = %path))]
    async fn subscribe(&self, path: &CollectionPath) -> Result<Subscription> {
        let (tx, rx) = mpsc::channel(SUBSCRIPTION_BUFFER);
        // Listen before the first read so a write landing in between is not missed
        let mut changes = self.changes.subscribe();
        let db = self.db.clone();
        let collection = path.to_string();

        let task = tokio::spawn(async move {
            loop {
                let event = match load_collection(&db, &collection).await {
                    Ok(records) => {
                        debug!(%collection, count = records.len(), "Delivering snapshot");
                        SubscriptionEvent::Snapshot(records)
                    }
                    Err(e) => {
                        warn!(%collection, "Failed to read collection: {}", e);
                        SubscriptionEvent::Error(e.to_string())
                    }
                };
                if tx.send(event).await.is_err() {
                    debug!(%collection, "Subscriber went away");
                    return;
                }

                loop {
                    match changes.recv().await {
                        Ok(changed) if changed == collection => break,
                        Ok(_) => {}
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            debug!(%collection, skipped, "Change feed lagged, re-reading");
                            break;
                        }
                        Err(broadcast::error::RecvError::Closed) => return,
                    }
                }
            }
        });

        Ok(Subscription::new(rx, task))
    }
}
