//! In-flight action tracking
//!
//! Keeps a caller from starting a second action on a record while the first
//! one is still running. The coordinator does not use this itself.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// Set of record ids with an action in flight
#[derive(Debug, Clone, Default)]
pub struct InFlightActions {
    records: Arc<Mutex<HashSet<String>>>,
}

impl InFlightActions {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> MutexGuard<'_, HashSet<String>> {
        // A panic while holding the lock cannot leave the set half-updated
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Claim `record_id`; `None` while another guard for it is alive.
    pub fn try_begin(&self, record_id: &str) -> Option<InFlightGuard> {
        if !self.records().insert(record_id.to_string()) {
            return None;
        }
        Some(InFlightGuard {
            records: Arc::clone(&self.records),
            record_id: record_id.to_string(),
        })
    }

    pub fn is_in_flight(&self, record_id: &str) -> bool {
        self.records().contains(record_id)
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

/// Releases its record when dropped
#[derive(Debug)]
pub struct InFlightGuard {
    records: Arc<Mutex<HashSet<String>>>,
    record_id: String,
}

impl InFlightGuard {
    pub fn record_id(&self) -> &str {
        &self.record_id
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut records = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        records.remove(&self.record_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_claim_refused() {
        let actions = InFlightActions::new();
        let guard = actions.try_begin("loan-1").unwrap();
        assert_eq!(guard.record_id(), "loan-1");
        assert!(actions.try_begin("loan-1").is_none());
        assert!(actions.is_in_flight("loan-1"));

        // Other records are independent
        let other = actions.try_begin("loan-2");
        assert!(other.is_some());
        assert_eq!(actions.len(), 2);
    }

    #[test]
    fn test_drop_releases() {
        let actions = InFlightActions::new();
        {
            let _guard = actions.try_begin("offer-9").unwrap();
            assert!(actions.is_in_flight("offer-9"));
        }
        assert!(!actions.is_in_flight("offer-9"));
        assert!(actions.is_empty());
        assert!(actions.try_begin("offer-9").is_some());
    }

    #[test]
    fn test_clones_share_state() {
        let actions = InFlightActions::new();
        let clone = actions.clone();
        let _guard = actions.try_begin("loan-1").unwrap();
        assert!(clone.try_begin("loan-1").is_none());
    }
}
