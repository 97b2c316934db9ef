// src/clipboard.rs
//! "Copied!" acknowledgments for copy-to-clipboard targets

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

pub const ACK_DURATION: Duration = Duration::from_secs(2);

/// Something the user can copy: one prompt card or the metadata card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum CopyTarget {
    ImagePrompt(usize),
    VideoPrompt(usize),
    Metadata,
}

/// Tracks which targets currently show the acknowledgment. Each target owns at
/// most one reset timer; a new copy of the same target replaces it.
#[derive(Debug, Clone)]
pub struct CopyTracker {
    timers: Arc<Mutex<HashMap<CopyTarget, (u64, JoinHandle<()>)>>>,
    generation: Arc<AtomicU64>,
    duration: Duration,
}

impl Default for CopyTracker {
    fn default() -> Self {
        Self::new(ACK_DURATION)
    }
}

impl CopyTracker {
    pub fn new(duration: Duration) -> Self {
        Self {
            timers: Arc::new(Mutex::new(HashMap::new())),
            generation: Arc::new(AtomicU64::new(0)),
            duration,
        }
    }

    /// Must be called from within a tokio runtime
    pub fn acknowledge(&self, target: CopyTarget) {
        let timers = Arc::clone(&self.timers);
        let duration = self.duration;
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);

        let mut guard = self.timers.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((_, previous)) = guard.remove(&target) {
            previous.abort();
        }

        let handle = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let mut timers = timers.lock().unwrap_or_else(PoisonError::into_inner);
            // A newer copy of the same target owns the entry now
            if timers.get(&target).map_or(false, |(g, _)| *g == generation) {
                timers.remove(&target);
            }
        });
        guard.insert(target, (generation, handle));
    }

    pub fn is_acknowledged(&self, target: CopyTarget) -> bool {
        self.timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&target)
    }

    pub fn acknowledged(&self) -> Vec<CopyTarget> {
        self.timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect()
    }

    /// Drops every acknowledgment, e.g. when the copied content is replaced
    pub fn clear(&self) {
        let mut timers = self.timers.lock().unwrap_or_else(PoisonError::into_inner);
        for (_, (_, handle)) in timers.drain() {
            handle.abort();
        }
    }
}
