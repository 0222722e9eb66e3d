//! Keyed collection query store

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, warn};

use crate::domain::query::{QueryState, USERS_KEY};
use crate::domain::user::UserGateway;
use crate::domain::DomainError;

/// Process-wide store of collection reads, one entry per registered key.
///
/// The store is the single source of truth for the current list of
/// users. Mutation logic never writes the list directly; it only
/// invalidates, and the next read re-fetches through the gateway.
///
/// A key in `Loading` has exactly one fetch in flight and concurrent
/// readers share it. Invalidating a loading key bumps the entry's
/// generation, so the in-flight result is discarded and a fresh fetch
/// runs instead of a stale overwrite.
///
/// Keys are registered at construction. Operating on any other key is a
/// `CacheInconsistency` - an internal invariant violation, not a
/// user-recoverable condition.
pub struct QueryStore {
    gateway: Arc<dyn UserGateway>,
    entries: Arc<Mutex<HashMap<&'static str, Entry>>>,
}

struct Entry {
    state: QueryState,
    generation: u64,
    tx: watch::Sender<QueryState>,
}

impl Entry {
    fn new() -> Self {
        let (tx, _) = watch::channel(QueryState::Absent);
        Self {
            state: QueryState::Absent,
            generation: 0,
            tx,
        }
    }

    fn set_state(&mut self, state: QueryState) {
        self.state = state.clone();
        self.tx.send_replace(state);
    }
}

impl QueryStore {
    /// Create a store with the `users` key registered and `Absent`.
    pub fn new(gateway: Arc<dyn UserGateway>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(USERS_KEY, Entry::new());

        Self {
            gateway,
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    /// Current state of a key. An `Absent` key transitions to `Loading`
    /// and starts the one shared background fetch; every other state is
    /// returned as-is.
    pub async fn read(&self, key: &str) -> Result<QueryState, DomainError> {
        let mut entries = self.entries.lock().await;
        let key = Self::registered_key(&entries, key)?;
        let Some(entry) = entries.get_mut(key) else {
            return Err(unknown_key(key));
        };

        if matches!(entry.state, QueryState::Absent) {
            entry.set_state(QueryState::Loading);
            self.spawn_fetch(key, entry.generation);
        }

        Ok(entry.state.clone())
    }

    /// Mark a key stale.
    ///
    /// An idle key becomes `Absent` so the next read re-fetches. A
    /// loading key keeps its in-flight fetch running, but the result is
    /// discarded when it arrives and a fresh fetch runs in its place.
    pub async fn invalidate(&self, key: &str) -> Result<(), DomainError> {
        let mut entries = self.entries.lock().await;
        let key = Self::registered_key(&entries, key)?;
        let Some(entry) = entries.get_mut(key) else {
            return Err(unknown_key(key));
        };

        entry.generation = entry.generation.wrapping_add(1);
        if matches!(entry.state, QueryState::Loading) {
            debug!(key, "invalidated while loading, in-flight result will be discarded");
        } else {
            debug!(key, "invalidated");
            entry.set_state(QueryState::Absent);
        }

        Ok(())
    }

    /// Watch a key. The receiver immediately holds the current state and
    /// updates on every transition; all observers of a key at one
    /// instant see the same state.
    pub async fn subscribe(&self, key: &str) -> Result<watch::Receiver<QueryState>, DomainError> {
        let entries = self.entries.lock().await;
        let entry = entries.get(key).ok_or_else(|| unknown_key(key))?;
        Ok(entry.tx.subscribe())
    }

    /// Read a key and wait until its fetch settles to `Ready` or
    /// `Errored`. A key that is already settled returns immediately.
    pub async fn settled(&self, key: &str) -> Result<QueryState, DomainError> {
        loop {
            let state = self.read(key).await?;
            if state.is_settled() {
                return Ok(state);
            }

            let mut rx = self.subscribe(key).await?;
            let state = rx
                .wait_for(|state| !matches!(state, QueryState::Loading))
                .await
                .map_err(|_| {
                    DomainError::cache_inconsistency(format!(
                        "query entry for '{key}' dropped mid-flight"
                    ))
                })?
                .clone();

            if state.is_settled() {
                return Ok(state);
            }
            // Invalidated back to Absent while we waited; read again to
            // trigger a fresh fetch.
        }
    }

    /// Test hook: return every key to `Absent` and detach in-flight
    /// fetches.
    pub async fn reset(&self) {
        let mut entries = self.entries.lock().await;
        for entry in entries.values_mut() {
            entry.generation = entry.generation.wrapping_add(1);
            entry.set_state(QueryState::Absent);
        }
    }

    fn registered_key(
        entries: &HashMap<&'static str, Entry>,
        key: &str,
    ) -> Result<&'static str, DomainError> {
        entries
            .keys()
            .find(|registered| **registered == key)
            .copied()
            .ok_or_else(|| unknown_key(key))
    }

    fn spawn_fetch(&self, key: &'static str, generation: u64) {
        let gateway = Arc::clone(&self.gateway);
        let entries = Arc::clone(&self.entries);

        tokio::spawn(async move {
            let mut generation = generation;
            loop {
                debug!(key, generation, "fetching collection");
                let result = gateway.list().await;

                let mut guard = entries.lock().await;
                let Some(entry) = guard.get_mut(key) else {
                    return;
                };

                if entry.generation == generation {
                    let state = match result {
                        Ok(users) => {
                            debug!(key, count = users.len(), "fetch settled");
                            QueryState::Ready(users)
                        }
                        Err(err) => {
                            warn!(key, error = %err, "fetch failed");
                            QueryState::Errored(err.to_string())
                        }
                    };
                    entry.set_state(state);
                    return;
                }

                // Superseded while in flight. If the key still wants
                // data, fetch again for the new generation; a reset
                // leaves it Absent and we stand down.
                if !matches!(entry.state, QueryState::Loading) {
                    return;
                }
                generation = entry.generation;
            }
        });
    }
}

fn unknown_key(key: &str) -> DomainError {
    DomainError::cache_inconsistency(format!("unknown query key '{key}'"))
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio::sync::Semaphore;

    use super::*;
    use crate::domain::user::{Address, Company, User, UserDraft, UserId};

    /// Gateway stub with a gate on `list` so tests control exactly when
    /// an in-flight fetch settles.
    struct StubGateway {
        calls: AtomicUsize,
        gate: Semaphore,
        responses: std::sync::Mutex<VecDeque<Result<Vec<User>, DomainError>>>,
    }

    impl StubGateway {
        /// Responses settle as soon as the fetch runs.
        fn open(responses: Vec<Result<Vec<User>, DomainError>>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                gate: Semaphore::new(Semaphore::MAX_PERMITS),
                responses: std::sync::Mutex::new(responses.into()),
            }
        }

        /// Every `list` call blocks until the test releases a permit.
        fn gated(responses: Vec<Result<Vec<User>, DomainError>>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                gate: Semaphore::new(0),
                responses: std::sync::Mutex::new(responses.into()),
            }
        }

        fn release(&self, calls: usize) {
            self.gate.add_permits(calls);
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl UserGateway for StubGateway {
        async fn list(&self) -> Result<Vec<User>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let permit = self.gate.acquire().await.unwrap();
            permit.forget();
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn create(&self, _draft: &UserDraft) -> Result<User, DomainError> {
            unimplemented!("stub only lists")
        }

        async fn update(&self, _id: UserId, _draft: &UserDraft) -> Result<User, DomainError> {
            unimplemented!("stub only lists")
        }

        async fn delete(&self, _id: UserId) -> Result<(), DomainError> {
            unimplemented!("stub only lists")
        }
    }

    fn user(id: i64, name: &str) -> User {
        User {
            id: UserId::new(id),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "0123456789".to_string(),
            username: name.to_lowercase(),
            website: String::new(),
            company: Company::default(),
            address: Address {
                street: "Main St 1".to_string(),
                city: "Springfield".to_string(),
            },
        }
    }

    fn store_with(stub: StubGateway) -> (Arc<StubGateway>, QueryStore) {
        let stub = Arc::new(stub);
        let store = QueryStore::new(Arc::clone(&stub) as Arc<dyn UserGateway>);
        (stub, store)
    }

    #[tokio::test]
    async fn test_read_fetches_once_and_settles() {
        let (stub, store) = store_with(StubGateway::open(vec![Ok(vec![user(1, "Jane")])]));

        let state = store.read(USERS_KEY).await.unwrap();
        assert_eq!(state, QueryState::Loading);

        let settled = store.settled(USERS_KEY).await.unwrap();
        assert_eq!(settled, QueryState::Ready(vec![user(1, "Jane")]));

        // Repeated reads without an intervening mutation return the same
        // value and never re-fetch.
        let again = store.read(USERS_KEY).await.unwrap();
        assert_eq!(again, settled);
        assert_eq!(stub.call_count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_reads_share_one_fetch() {
        let (stub, store) = store_with(StubGateway::gated(vec![Ok(vec![user(1, "Jane")])]));

        let first = store.read(USERS_KEY).await.unwrap();
        let second = store.read(USERS_KEY).await.unwrap();
        assert_eq!(first, QueryState::Loading);
        assert_eq!(second, QueryState::Loading);

        stub.release(1);
        let settled = store.settled(USERS_KEY).await.unwrap();
        assert!(settled.is_settled());
        assert_eq!(stub.call_count(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_idle_key_refetches_on_next_read() {
        let (stub, store) = store_with(StubGateway::open(vec![
            Ok(vec![user(1, "Jane")]),
            Ok(vec![user(1, "Jane"), user(2, "John")]),
        ]));

        let before = store.settled(USERS_KEY).await.unwrap();
        assert_eq!(before.users().map(<[User]>::len), Some(1));

        store.invalidate(USERS_KEY).await.unwrap();
        let observed = store.subscribe(USERS_KEY).await.unwrap();
        assert_eq!(*observed.borrow(), QueryState::Absent);

        let after = store.settled(USERS_KEY).await.unwrap();
        assert_eq!(after.users().map(<[User]>::len), Some(2));
        assert_eq!(stub.call_count(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_while_loading_discards_stale_result() {
        let (stub, store) = store_with(StubGateway::gated(vec![
            Ok(vec![user(1, "Stale")]),
            Ok(vec![user(2, "Fresh")]),
        ]));

        let state = store.read(USERS_KEY).await.unwrap();
        assert_eq!(state, QueryState::Loading);

        // Invalidate before the in-flight fetch can settle: its result
        // must be discarded in favor of a fresh fetch.
        store.invalidate(USERS_KEY).await.unwrap();
        stub.release(2);

        let settled = store.settled(USERS_KEY).await.unwrap();
        assert_eq!(settled, QueryState::Ready(vec![user(2, "Fresh")]));
        assert_eq!(stub.call_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_settles_errored() {
        let (_stub, store) = store_with(StubGateway::open(vec![Err(
            DomainError::transport_status(500, "HTTP 500"),
        )]));

        let settled = store.settled(USERS_KEY).await.unwrap();
        match settled {
            QueryState::Errored(reason) => assert!(reason.contains("transport error")),
            other => panic!("expected Errored, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_key_is_cache_inconsistency() {
        let (_stub, store) = store_with(StubGateway::open(Vec::new()));

        let read = store.read("posts").await.unwrap_err();
        assert!(matches!(read, DomainError::CacheInconsistency { .. }));

        let invalidate = store.invalidate("posts").await.unwrap_err();
        assert!(matches!(invalidate, DomainError::CacheInconsistency { .. }));

        let subscribe = store.subscribe("posts").await.unwrap_err();
        assert!(matches!(subscribe, DomainError::CacheInconsistency { .. }));
    }

    #[tokio::test]
    async fn test_reset_returns_keys_to_absent() {
        let (stub, store) = store_with(StubGateway::open(vec![
            Ok(vec![user(1, "Jane")]),
            Ok(vec![user(2, "John")]),
        ]));

        store.settled(USERS_KEY).await.unwrap();
        store.reset().await;

        let observed = store.subscribe(USERS_KEY).await.unwrap();
        assert_eq!(*observed.borrow(), QueryState::Absent);

        let after = store.settled(USERS_KEY).await.unwrap();
        assert_eq!(after, QueryState::Ready(vec![user(2, "John")]));
        assert_eq!(stub.call_count(), 2);
    }
}
