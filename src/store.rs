use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{error, warn};

use crate::config::StorageKeys;
use crate::core::clock::{Clock, IdGenerator, SystemClock};
use crate::core::kv::KeyValue;
use crate::models::models::{FilterState, Post, User};

/// Whether the durable copy still matches memory. `Degraded` maps every
/// record whose last write failed to the reason it failed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Durability {
    #[default]
    Durable,
    Degraded { failures: BTreeMap<String, String> },
}

impl Durability {
    pub fn is_durable(&self) -> bool {
        matches!(self, Durability::Durable)
    }

    pub fn is_degraded_on(&self, key: &str) -> bool {
        match self {
            Durability::Durable => false,
            Durability::Degraded { failures } => failures.contains_key(key),
        }
    }

    fn mark_failed(&mut self, key: &str, reason: String) {
        match self {
            Durability::Durable => {
                let mut failures = BTreeMap::new();
                failures.insert(key.to_string(), reason);
                *self = Durability::Degraded { failures };
            }
            Durability::Degraded { failures } => {
                failures.insert(key.to_string(), reason);
            }
        }
    }

    fn mark_saved(&mut self, key: &str) {
        if let Durability::Degraded { failures } = self {
            failures.remove(key);
            if failures.is_empty() {
                *self = Durability::Durable;
            }
        }
    }
}

/// Single owner of users, session, posts and filter state.
///
/// Every accepted mutation is written back to the key-value surface before the
/// call returns. A failed write is logged and reported through
/// [`PersistedStore::durability`]; the in-memory result stands either way.
pub struct PersistedStore<K: KeyValue> {
    pub(crate) kv: K,
    pub(crate) keys: StorageKeys,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) ids: IdGenerator,
    pub(crate) users: Vec<User>,
    pub(crate) session: Option<User>,
    pub(crate) posts: Vec<Post>,
    pub(crate) filter: FilterState,
    pub(crate) durability: Durability,
}

impl<K: KeyValue> PersistedStore<K> {
    pub fn open(kv: K) -> Self {
        Self::with_keys(kv, StorageKeys::default(), SystemClock)
    }

    pub fn with_clock(kv: K, clock: impl Clock + 'static) -> Self {
        Self::with_keys(kv, StorageKeys::default(), clock)
    }

    pub fn with_keys(kv: K, keys: StorageKeys, clock: impl Clock + 'static) -> Self {
        let mut store = PersistedStore {
            kv,
            keys,
            clock: Box::new(clock),
            ids: IdGenerator::default(),
            users: Vec::new(),
            session: None,
            posts: Vec::new(),
            filter: FilterState::default(),
            durability: Durability::Durable,
        };
        store.load();
        store
    }

    /// Reads every record back from storage, replacing what is in memory.
    /// Missing or unreadable records come back as empty defaults.
    pub fn load(&mut self) {
        self.users = read_record(&self.kv, &self.keys.users).unwrap_or_default();
        let session: Option<User> = read_record(&self.kv, &self.keys.current_user);
        self.session = session.and_then(|s| match self.users.iter().find(|u| u.id == s.id) {
            Some(user) => Some(user.clone()),
            None => {
                warn!(user_id = s.id, "Dropping session for unknown user");
                None
            }
        });
        self.posts = read_record::<Vec<Post>>(&self.kv, &self.keys.posts).unwrap_or_default();
        for post in &mut self.posts {
            post.normalize();
        }

        let highest = self
            .users
            .iter()
            .map(|u| u.id)
            .chain(self.posts.iter().map(|p| p.id))
            .chain(self.posts.iter().flat_map(|p| p.comments.iter().map(|c| c.id)))
            .max()
            .unwrap_or(0);
        self.ids = IdGenerator::starting_after(highest);

        tracing::debug!(
            users = self.users.len(),
            posts = self.posts.len(),
            logged_in = self.session.is_some(),
            "store loaded"
        );
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Posts in storage order (newest created first).
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, id: i64) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn durability(&self) -> &Durability {
        &self.durability
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    pub fn kv_mut(&mut self) -> &mut K {
        &mut self.kv
    }

    pub fn into_kv(self) -> K {
        self.kv
    }

    pub(crate) fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    pub(crate) fn next_id(&mut self) -> i64 {
        let now = self.clock.now_millis();
        self.ids.next(now)
    }

    pub(crate) fn persist_users(&mut self) {
        let key = self.keys.users.clone();
        let result = self.kv.set_json(&key, &self.users);
        self.record_write(&key, result);
    }

    pub(crate) fn persist_posts(&mut self) {
        let key = self.keys.posts.clone();
        let result = self.kv.set_json(&key, &self.posts);
        self.record_write(&key, result);
    }

    pub(crate) fn persist_session(&mut self) {
        let key = self.keys.current_user.clone();
        let result = match &self.session {
            Some(user) => self.kv.set_json(&key, user),
            None => self.kv.delete(&key),
        };
        self.record_write(&key, result);
    }

    fn record_write(&mut self, key: &str, result: anyhow::Result<()>) {
        match result {
            Ok(()) => self.durability.mark_saved(key),
            Err(e) => {
                error!(key, error = %e, "Error saving record to storage");
                self.durability.mark_failed(key, e.to_string());
            }
        }
    }
}

pub(crate) fn read_record<T: DeserializeOwned>(kv: &impl KeyValue, key: &str) -> Option<T> {
    match kv.get_json::<T>(key) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "Error loading record from storage");
            None
        }
    }
}

/// Writes a standalone record outside of the store, failing soft like the
/// store does.
pub(crate) fn write_record<T: Serialize>(kv: &mut impl KeyValue, key: &str, value: &T) -> bool {
    match kv.set_json(key, value) {
        Ok(()) => true,
        Err(e) => {
            error!(key, error = %e, "Error saving record to storage");
            false
        }
    }
}
