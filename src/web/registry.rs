//! Running ledgers, one per device.
//!
//! Only a page load starts a ledger. Ledgers nobody has touched for a while are
//! evicted; dropping the last handle closes the ledger's command channel, which
//! stops its task and its subscription.

use crate::controller::{LedgerHandle, LedgerSettings, spawn_ledger};
use crate::identity::IdentityProvider;
use crate::storage::ExpenseStore;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

#[derive(Debug)]
struct Entry {
    handle: LedgerHandle,
    last_seen: Instant,
}

/// Maps device tokens to their ledgers, starting ledgers on first use.
#[derive(Debug)]
pub struct SessionRegistry<S, P> {
    store: Arc<S>,
    identity: Arc<P>,
    settings: LedgerSettings,
    ledgers: RwLock<HashMap<String, Entry>>,
}

impl<S: ExpenseStore, P: IdentityProvider> SessionRegistry<S, P> {
    /// Registry whose ledgers share `store`, `identity` and `settings`.
    #[must_use]
    pub fn new(store: Arc<S>, identity: Arc<P>, settings: LedgerSettings) -> Self {
        Self {
            store,
            identity,
            settings,
            ledgers: RwLock::new(HashMap::new()),
        }
    }

    /// The ledger for `device_token`, if one is running. Counts as activity.
    pub async fn get(&self, device_token: &str) -> Option<LedgerHandle> {
        let mut ledgers = self.ledgers.write().await;
        ledgers.get_mut(device_token).map(|entry| {
            entry.last_seen = Instant::now();
            entry.handle.clone()
        })
    }

    /// The ledger for `device_token`, started now if it is not running yet.
    pub async fn get_or_start(&self, device_token: &str) -> LedgerHandle {
        let mut ledgers = self.ledgers.write().await;
        let entry = ledgers.entry(device_token.to_string()).or_insert_with(|| {
            debug!("Starting ledger for new device");
            Entry {
                handle: spawn_ledger(
                    Arc::clone(&self.store),
                    Arc::clone(&self.identity),
                    self.settings.clone(),
                    device_token.to_string(),
                ),
                last_seen: Instant::now(),
            }
        });
        entry.last_seen = Instant::now();
        entry.handle.clone()
    }

    /// Drops every ledger idle for at least `max_idle`, returning how many went.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut ledgers = self.ledgers.write().await;
        let before = ledgers.len();
        ledgers.retain(|_, entry| entry.last_seen.elapsed() < max_idle);
        before - ledgers.len()
    }

    /// Number of running ledgers
    pub async fn len(&self) -> usize {
        self.ledgers.read().await.len()
    }

    /// Whether no ledger is running
    pub async fn is_empty(&self) -> bool {
        self.ledgers.read().await.is_empty()
    }
}

/// Sweeps `registry` every `every`, evicting ledgers idle for `max_idle`.
///
/// The sweeper ends by itself once the registry is dropped.
pub fn spawn_idle_sweeper<S, P>(
    registry: &Arc<SessionRegistry<S, P>>,
    every: Duration,
    max_idle: Duration,
) -> JoinHandle<()>
where
    S: ExpenseStore,
    P: IdentityProvider,
{
    let registry: Weak<SessionRegistry<S, P>> = Arc::downgrade(registry);
    tokio::spawn(async move {
        let mut ticks = tokio::time::interval(every);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticks.tick().await;
            let Some(registry) = registry.upgrade() else {
                debug!("Registry dropped, idle sweeper stopping");
                return;
            };
            let evicted = registry.evict_idle(max_idle).await;
            if evicted > 0 {
                let remaining = registry.len().await;
                info!(evicted, remaining, "Evicted idle ledgers");
            }
        }
    })
}
