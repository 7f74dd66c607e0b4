// src/assessment/ledger.rs

use std::{collections::HashMap, future::Future, sync::Arc};

use tokio::sync::Mutex;

/// What [`SubmissionLedger::submit_once`] did for a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded<T> {
    /// This call graded the attempt and ran its side effects.
    First(T),
    /// The attempt was already graded; the stored result is returned unchanged.
    Repeat(T),
}

impl<T> Recorded<T> {
    pub fn into_inner(self) -> T {
        match self {
            Recorded::First(value) | Recorded::Repeat(value) => value,
        }
    }

    pub fn is_first(&self) -> bool {
        matches!(self, Recorded::First(_))
    }
}

type Slot<T> = Arc<Mutex<Option<T>>>;

/// Remembers the result of every submitted attempt so a submit runs at most
/// once per attempt key.
///
/// Submits for the same key serialize on a per-key lock that is held while the
/// grading closure runs, so a concurrent duplicate waits and then replays the
/// stored result. A failed grading leaves the slot empty and may be retried.
pub struct SubmissionLedger<T> {
    slots: Mutex<HashMap<String, Slot<T>>>,
}

impl<T: Clone> Default for SubmissionLedger<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> SubmissionLedger<T> {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub async fn submit_once<F, Fut, E>(&self, key: String, grade: F) -> Result<Recorded<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let slot = {
            let mut slots = self.slots.lock().await;
            Arc::clone(slots.entry(key).or_default())
        };

        let mut stored = slot.lock().await;
        if let Some(result) = stored.as_ref() {
            return Ok(Recorded::Repeat(result.clone()));
        }

        let result = grade().await?;
        *stored = Some(result.clone());
        Ok(Recorded::First(result))
    }
}
