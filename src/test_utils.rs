//! Shared test utilities.
//!
//! In-memory database setup plus test doubles for the two external
//! collaborators: a store that counts (and can fail) writes, and an identity
//! provider with a scripted answer.

#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use crate::{
    core::expense::ExpenseFields,
    errors::{Error, Result},
    identity::{AuthUser, IdentityProvider},
    storage::{CollectionPath, ExpenseStore, SqliteExpenseStore, Subscription, SubscriptionEvent},
};
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

const WAIT_LIMIT: Duration = Duration::from_secs(5);

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// An expense store on a fresh in-memory database.
pub async fn setup_test_store() -> Result<SqliteExpenseStore> {
    Ok(SqliteExpenseStore::new(setup_test_db().await?))
}

/// Valid fields with sensible defaults.
///
/// # Defaults
/// * `category`: "Food"
/// * `date`: "2024-01-15"
#[must_use]
pub fn fields(name: &str, amount: f64) -> ExpenseFields {
    ExpenseFields {
        name: name.to_string(),
        amount,
        category: "Food".to_string(),
        date: "2024-01-15".to_string(),
    }
}

/// Awaits `future`, failing the test if it takes longer than a few seconds.
pub async fn wait<T>(future: impl Future<Output = T>) -> T {
    tokio::time::timeout(WAIT_LIMIT, future)
        .await
        .expect("timed out waiting in test")
}

/// Receives the next delivery and insists it is a snapshot.
pub async fn expect_snapshot(
    subscription: &mut Subscription,
) -> Vec<crate::core::expense::ExpenseRecord> {
    match wait(subscription.next()).await {
        Some(SubscriptionEvent::Snapshot(records)) => records,
        other => panic!("expected a snapshot, got {other:?}"),
    }
}

/// Store wrapper that counts write attempts and can be told to fail them.
#[derive(Debug)]
pub struct RecordingStore {
    inner: SqliteExpenseStore,
    writes: AtomicUsize,
    failing: AtomicBool,
}

impl RecordingStore {
    /// Wraps a real store.
    #[must_use]
    pub const fn new(inner: SqliteExpenseStore) -> Self {
        Self {
            inner,
            writes: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// The wrapped store
    #[must_use]
    pub const fn inner(&self) -> &SqliteExpenseStore {
        &self.inner
    }

    /// Number of write calls so far, failed ones included
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Makes every later write fail (or succeed again).
    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn record_write(&self) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            Err(Error::Database(sea_orm::DbErr::Custom(
                "injected write failure".to_string(),
            )))
        } else {
            Ok(())
        }
    }
}

impl ExpenseStore for RecordingStore {
    async fn create(&self, path: &CollectionPath, fields: ExpenseFields) -> Result<String> {
        self.record_write()?;
        self.inner.create(path, fields).await
    }

    async fn update(&self, path: &CollectionPath, id: &str, fields: ExpenseFields) -> Result<()> {
        self.record_write()?;
        self.inner.update(path, id, fields).await
    }

    async fn delete(&self, path: &CollectionPath, id: &str) -> Result<()> {
        self.record_write()?;
        self.inner.delete(path, id).await
    }

    async fn subscribe(&self, path: &CollectionPath) -> Result<Subscription> {
        self.inner.subscribe(path).await
    }
}

/// Identity provider with a fixed answer.
#[derive(Debug, Clone)]
pub struct StubIdentity {
    answer: std::result::Result<Option<String>, String>,
}

impl StubIdentity {
    /// Always signs in as `uid`.
    #[must_use]
    pub fn issuing(uid: &str) -> Self {
        Self {
            answer: Ok(Some(uid.to_string())),
        }
    }

    /// Signs in but supplies no user identifier.
    #[must_use]
    pub const fn anonymous_without_uid() -> Self {
        Self { answer: Ok(None) }
    }

    /// Always fails with `message`.
    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self {
            answer: Err(message.to_string()),
        }
    }
}

impl IdentityProvider for StubIdentity {
    async fn sign_in_anonymously(&self, _device_token: &str) -> Result<AuthUser> {
        match &self.answer {
            Ok(uid) => Ok(AuthUser { uid: uid.clone() }),
            Err(message) => Err(Error::Auth {
                message: message.clone(),
            }),
        }
    }
}
