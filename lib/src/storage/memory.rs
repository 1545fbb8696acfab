use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Store;
use crate::email::{Email, EmailId};

/// Records kept by `MemoryStore::new`
pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, Default)]
struct Inner {
    emails: HashMap<EmailId, Email>,
    // Insertion order, oldest first
    order: VecDeque<EmailId>,
}

/// Process-local `Store` used when no database is configured.
///
/// Holds at most `capacity` records and evicts the oldest once full.
/// Records are lost on restart.
#[derive(Debug)]
pub struct MemoryStore {
    capacity: usize,
    inner: RwLock<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Default::default()
    }

    /// A capacity of 0 keeps nothing and only logs saves
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            inner: RwLock::new(Inner::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub async fn get(&self, id: &EmailId) -> Option<Email> {
        self.inner.read().await.emails.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.emails.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn save(&self, email: &Email) -> Result<(), String> {
        log::info!("[NO DB CONFIGURED] Saving Email {}...", email.id);

        if self.capacity == 0 {
            return Ok(());
        }

        let mut inner = self.inner.write().await;

        while inner.order.len() >= self.capacity {
            match inner.order.pop_front() {
                Some(oldest) => {
                    log::debug!("Evicting Email {} from memory", oldest);
                    inner.emails.remove(&oldest);
                }
                None => break,
            }
        }

        // Ids are freshly generated per send, so inserts never collide
        inner.order.push_back(email.id.clone());
        inner.emails.insert(email.id.clone(), email.clone());

        Ok(())
    }
}
