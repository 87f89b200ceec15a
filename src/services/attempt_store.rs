use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::models::quiz::Category;
use crate::utils::token::attempt_token;

/// What an attempt token was issued for. A token minted for one quiz (or
/// category) cannot redeem a submission against another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptScope {
    Quiz(Uuid),
    Category(Category),
}

#[derive(Debug)]
struct StoredAttempt {
    scope: AttemptScope,
    visible_ids: Vec<Uuid>,
    issued_at: Instant,
}

/// Server-held Presented Sets keyed by opaque token, so grading does not
/// have to trust a client-echoed id list. Entries expire after the TTL and
/// are consumed on first redemption.
#[derive(Debug)]
pub struct AttemptStore {
    ttl: Duration,
    inner: Mutex<HashMap<String, StoredAttempt>>,
}

impl AttemptStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Mutex::new(HashMap::new()),
        }
    }

    pub fn issue(&self, scope: AttemptScope, visible_ids: Vec<Uuid>) -> String {
        let token = attempt_token();
        let mut guard = self.inner.lock().expect("attempt store mutex poisoned");
        guard.insert(
            token.clone(),
            StoredAttempt {
                scope,
                visible_ids,
                issued_at: Instant::now(),
            },
        );
        token
    }

    /// One-shot redemption: returns the stored id list when the token is
    /// live and was issued for the given scope, removing it either way.
    pub fn take(&self, token: &str, scope: AttemptScope) -> Option<Vec<Uuid>> {
        let mut guard = self.inner.lock().expect("attempt store mutex poisoned");
        let stored = guard.remove(token)?;
        if stored.scope != scope || stored.issued_at.elapsed() > self.ttl {
            return None;
        }
        Some(stored.visible_ids)
    }

    /// Drop expired entries; returns how many were removed.
    pub fn sweep(&self) -> usize {
        let mut guard = self.inner.lock().expect("attempt store mutex poisoned");
        let before = guard.len();
        guard.retain(|_, stored| stored.issued_at.elapsed() <= self.ttl);
        before - guard.len()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("attempt store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
