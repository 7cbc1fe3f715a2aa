//! Session-scoped preview URL cache (made by FontLab https://www.fontlab.com/)
//!
//! At most one fetch is ever in flight per normalized family key: the
//! absent-to-pending reservation happens inside one critical section on the
//! map lock, so concurrent callers for the same key agree on a single loader.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

/// Lifecycle of one cache entry. Absent keys have no entry at all.
///
/// Per key: Absent → Pending → {Resolved | Failed}; Failed → Pending on a
/// later request; Resolved is terminal for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewState {
    /// A fetch for this key is in flight.
    Pending,
    /// The preview URL to use for this family.
    Resolved(String),
    /// The last attempt failed; a later request may retry.
    Failed,
}

/// Where background preview tasks run.
pub trait Spawner: Send + Sync {
    fn spawn(&self, task: Box<dyn FnOnce() + Send + 'static>);
}

/// Default spawner: one OS thread per preview fetch. The task suspends only
/// at the network boundary, so a thread per visible row is cheap enough.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSpawner;

impl Spawner for ThreadSpawner {
    fn spawn(&self, task: Box<dyn FnOnce() + Send + 'static>) {
        std::thread::spawn(task);
    }
}

/// Receives resolved-preview notifications off the requesting thread.
/// Failed attempts produce no notification; shells poll state if they care.
pub trait PreviewListener: Send + Sync {
    fn preview_ready(&self, family: &str, url: &str);
}

/// Listener that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl PreviewListener for NoopListener {
    fn preview_ready(&self, _family: &str, _url: &str) {}
}

/// Normalize a family name into its cache key: lowercase, with runs of
/// whitespace and hyphens collapsed to single `_` separators.
pub fn cache_key(family: &str) -> String {
    let lowered = family.to_lowercase();
    lowered
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Session-scoped map from family key to preview state. Created at session
/// start; entries are never evicted until [`PreviewCache::clear`] at session
/// end.
#[derive(Debug, Default)]
pub struct PreviewCache {
    entries: Mutex<HashMap<String, PreviewState>>,
}

impl PreviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, PreviewState>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Current state for a family, if any request has been made this session.
    pub fn get(&self, family: &str) -> Option<PreviewState> {
        self.lock_entries().get(&cache_key(family)).cloned()
    }

    /// Fire-and-forget preview population for one family.
    ///
    /// Atomically reserves the key (absent or failed becomes pending) and
    /// runs `load` on the spawner. A key that is already pending or resolved
    /// is left untouched and no new fetch is issued. On completion the entry
    /// moves to resolved (notifying `listener`) or to failed.
    pub fn request(
        self: &Arc<Self>,
        family: &str,
        spawner: &dyn Spawner,
        listener: Arc<dyn PreviewListener>,
        load: impl FnOnce(&str) -> Option<String> + Send + 'static,
    ) {
        let key = cache_key(family);
        {
            let mut entries = self.lock_entries();
            let already_active = matches!(
                entries.get(&key),
                Some(PreviewState::Pending) | Some(PreviewState::Resolved(_))
            );
            if already_active {
                return;
            }
            entries.insert(key.clone(), PreviewState::Pending);
        }

        let cache = Arc::clone(self);
        let family = family.to_string();
        spawner.spawn(Box::new(move || {
            let outcome = load(&family);
            cache.complete(&key, &family, outcome, listener.as_ref());
        }));
    }

    fn complete(
        &self,
        key: &str,
        family: &str,
        outcome: Option<String>,
        listener: &dyn PreviewListener,
    ) {
        match outcome {
            Some(url) => {
                debug!(family, url = %url, "preview resolved");
                self.lock_entries()
                    .insert(key.to_string(), PreviewState::Resolved(url.clone()));
                // Notify after the lock is released; listeners may re-enter
                // the cache.
                listener.preview_ready(family, &url);
            }
            None => {
                warn!(family, "preview fetch failed");
                self.lock_entries()
                    .insert(key.to_string(), PreviewState::Failed);
            }
        }
    }

    /// Number of keys requested so far this session.
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }

    /// Drop every entry (session end).
    pub fn clear(&self) {
        self.lock_entries().clear();
    }
}
