//! Query Cache
//!
//! Keyed cache of asynchronous read results with in-flight dedup, explicit
//! invalidation and scoped subscriptions.
//!
//! Everything runs on one event loop: state lives in `Rc<RefCell<..>>` and no borrow
//! is ever held across an `.await` or a subscriber callback.

mod hook;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use futures::future::{FutureExt, LocalBoxFuture, Shared};

use crate::error::{ClientError, ClientResult};

pub use hook::use_query;

/// Produces the future that fetches one query's value
pub type Fetcher<V> = Rc<dyn Fn() -> LocalBoxFuture<'static, ClientResult<V>>>;

/// Runs a local future to completion on the current event loop
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

type Subscriber<V> = Rc<dyn Fn(&CachedResult<V>)>;
type InFlight = Shared<LocalBoxFuture<'static, ()>>;

/// Snapshot of one cache entry as seen by a reader
#[derive(Debug, Clone, PartialEq)]
pub struct CachedResult<V> {
    /// Most recent resolved value, kept across failed refetches
    pub value: Option<V>,
    /// A fetch is in flight
    pub loading: bool,
    /// Error from the most recent fetch, cleared by the next success
    pub error: Option<ClientError>,
}

struct Entry<V> {
    value: Option<V>,
    error: Option<ClientError>,
    fetched: bool,
    stale: bool,
    refetch_queued: bool,
    in_flight: Option<InFlight>,
    /// Identifies the fetch in flight; outcomes of any other fetch are dropped
    fetch_id: u64,
    fetcher: Option<Fetcher<V>>,
    subscribers: Vec<(u64, Subscriber<V>)>,
}

impl<V: Clone> Entry<V> {
    fn new() -> Self {
        Self {
            value: None,
            error: None,
            fetched: false,
            stale: false,
            refetch_queued: false,
            in_flight: None,
            fetch_id: 0,
            fetcher: None,
            subscribers: Vec::new(),
        }
    }

    fn snapshot(&self) -> CachedResult<V> {
        CachedResult {
            value: self.value.clone(),
            loading: self.in_flight.is_some(),
            error: self.error.clone(),
        }
    }
}

struct CacheState<V> {
    entries: HashMap<String, Entry<V>>,
    next_subscriber: u64,
    next_fetch: u64,
}

/// Handle to a subscriber callback; dropping it deregisters the callback
#[must_use = "dropping a Subscription immediately deregisters it"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Deregister now instead of at drop
    pub fn unsubscribe(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// Process-wide cache of query results, one entry per logical key.
///
/// Cloning shares the same underlying state.
pub struct QueryCache<V> {
    state: Rc<RefCell<CacheState<V>>>,
    spawner: Spawner,
}

impl<V> Clone for QueryCache<V> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            spawner: self.spawner.clone(),
        }
    }
}

impl<V: Clone + 'static> QueryCache<V> {
    pub fn new(spawner: Spawner) -> Self {
        Self {
            state: Rc::new(RefCell::new(CacheState {
                entries: HashMap::new(),
                next_subscriber: 0,
                next_fetch: 1,
            })),
            spawner,
        }
    }

    /// Current snapshot of `key`; a key never read reports no value and no fetch
    pub fn snapshot(&self, key: &str) -> CachedResult<V> {
        match self.state.borrow().entries.get(key) {
            Some(entry) => entry.snapshot(),
            None => CachedResult {
                value: None,
                loading: false,
                error: None,
            },
        }
    }

    /// Read `key`, starting one fetch when the entry was never fetched or is stale.
    ///
    /// Reads that arrive while a fetch is in flight share it.
    pub fn read<F>(&self, key: &str, fetch: F) -> CachedResult<V>
    where
        F: Fn() -> LocalBoxFuture<'static, ClientResult<V>> + 'static,
    {
        let start = {
            let mut state = self.state.borrow_mut();
            let entry = state.entries.entry(key.to_string()).or_insert_with(Entry::new);
            entry.fetcher = Some(Rc::new(fetch));
            entry.in_flight.is_none() && (!entry.fetched || entry.stale)
        };
        if start {
            self.start_fetch(key);
        }
        self.snapshot(key)
    }

    /// Read `key` and wait for it to settle
    pub async fn fetch<F>(&self, key: &str, fetch: F) -> CachedResult<V>
    where
        F: Fn() -> LocalBoxFuture<'static, ClientResult<V>> + 'static,
    {
        self.read(key, fetch);
        self.settled(key).await
    }

    /// Wait until no fetch (queued refetches included) is in flight for `key`
    pub async fn settled(&self, key: &str) -> CachedResult<V> {
        loop {
            let in_flight = self
                .state
                .borrow()
                .entries
                .get(key)
                .and_then(|entry| entry.in_flight.clone());
            match in_flight {
                Some(task) => task.await,
                None => return self.snapshot(key),
            }
        }
    }

    /// Mark `key` stale and refetch it.
    ///
    /// With a fetch already in flight, exactly one refetch is queued behind it so the
    /// new value always reflects state after the caller's mutation.
    pub fn invalidate(&self, key: &str) {
        let start = {
            let mut state = self.state.borrow_mut();
            let Some(entry) = state.entries.get_mut(key) else {
                tracing::debug!(key, "invalidate on unknown query ignored");
                return;
            };
            entry.stale = true;
            if entry.in_flight.is_some() {
                entry.refetch_queued = true;
                false
            } else {
                entry.fetcher.is_some()
            }
        };
        tracing::debug!(key, start, "query invalidated");
        if start {
            self.start_fetch(key);
        }
    }

    /// Register `callback` for every loading and settled transition of `key`
    pub fn subscribe<F>(&self, key: &str, callback: F) -> Subscription
    where
        F: Fn(&CachedResult<V>) + 'static,
    {
        let callback: Subscriber<V> = Rc::new(callback);
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_subscriber;
            state.next_subscriber += 1;
            state
                .entries
                .entry(key.to_string())
                .or_insert_with(Entry::new)
                .subscribers
                .push((id, callback));
            id
        };

        let weak: Weak<RefCell<CacheState<V>>> = Rc::downgrade(&self.state);
        let key = key.to_string();
        Subscription {
            release: Some(Box::new(move || {
                let Some(state) = weak.upgrade() else { return };
                let mut guard = state.borrow_mut();
                if let Some(entry) = guard.entries.get_mut(&key) {
                    entry.subscribers.retain(|(sid, _)| *sid != id);
                }
            })),
        }
    }

    /// Number of live subscribers on `key`
    pub fn subscriber_count(&self, key: &str) -> usize {
        self.state
            .borrow()
            .entries
            .get(key)
            .map_or(0, |entry| entry.subscribers.len())
    }

    /// Drop every entry; fetches still in flight settle into nothing, even when the
    /// key is read again before they finish
    pub fn clear(&self) {
        let entries = std::mem::take(&mut self.state.borrow_mut().entries);
        tracing::debug!(count = entries.len(), "query cache cleared");
        drop(entries);
    }

    fn start_fetch(&self, key: &str) {
        let (fetcher, fetch_id) = {
            let mut state = self.state.borrow_mut();
            let fetch_id = state.next_fetch;
            let Some(entry) = state.entries.get_mut(key) else { return };
            let Some(fetcher) = entry.fetcher.clone() else { return };
            entry.fetched = true;
            entry.stale = false;
            entry.refetch_queued = false;
            entry.fetch_id = fetch_id;
            state.next_fetch += 1;
            (fetcher, fetch_id)
        };
        let request = fetcher();

        let weak = Rc::downgrade(&self.state);
        let spawner = self.spawner.clone();
        let owned_key = key.to_string();
        let task: InFlight = async move {
            let outcome = request.await;
            if let Some(state) = weak.upgrade() {
                QueryCache { state, spawner }.settle(&owned_key, fetch_id, outcome);
            }
        }
        .boxed_local()
        .shared();

        {
            let mut state = self.state.borrow_mut();
            if let Some(entry) = state.entries.get_mut(key).filter(|entry| entry.fetch_id == fetch_id) {
                entry.in_flight = Some(task.clone());
            }
        }
        tracing::debug!(key, "query fetch started");
        self.notify(key);
        (self.spawner)(task.boxed_local());
    }

    fn settle(&self, key: &str, fetch_id: u64, outcome: ClientResult<V>) {
        let queued = {
            let mut state = self.state.borrow_mut();
            let Some(entry) = state.entries.get_mut(key) else { return };
            if entry.fetch_id != fetch_id {
                tracing::debug!(key, fetch_id, "discarding outcome of a cleared fetch");
                return;
            }
            entry.in_flight = None;
            match outcome {
                Ok(value) => {
                    entry.value = Some(value);
                    entry.error = None;
                }
                Err(err) => {
                    tracing::warn!(key, error = %err, "query fetch failed");
                    entry.error = Some(err);
                }
            }
            entry.refetch_queued
        };
        self.notify(key);
        if queued {
            self.start_fetch(key);
        }
    }

    fn notify(&self, key: &str) {
        let (snapshot, subscribers) = {
            let state = self.state.borrow();
            let Some(entry) = state.entries.get(key) else { return };
            let subscribers: Vec<Subscriber<V>> =
                entry.subscribers.iter().map(|(_, cb)| cb.clone()).collect();
            (entry.snapshot(), subscribers)
        };
        for subscriber in subscribers {
            subscriber(&snapshot);
        }
    }
}
