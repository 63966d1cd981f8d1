//! Session history of successful lookups.
//!
//! History is append-only. `orchestrate` is the only path that turns a lookup
//! into a history entry; `NotFound` and `CommunicationFailure` never touch it.
//!
//! `most_recent` is gated by an explicit "has shown a result" flag. The flag
//! flips on the first append of the current session and is never persisted, so
//! a restored history stays hidden until a new lookup succeeds.

use crate::core::{AddressLookup, LookupOutcome, SessionStorage};
use crate::domain::model::{HistorySnapshot, ResultGroup};
use crate::utils::error::{AppError, Result};

pub const DEFAULT_SESSION_KEY: &str = "addressStore";

struct Persistence {
    storage: Box<dyn SessionStorage>,
    key: String,
}

pub struct AddressHistoryStore<L: AddressLookup> {
    lookup: L,
    addresses: Vec<ResultGroup>,
    has_shown_result: bool,
    persistence: Option<Persistence>,
}

impl<L: AddressLookup> AddressHistoryStore<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            addresses: Vec::new(),
            has_shown_result: false,
            persistence: None,
        }
    }

    /// Restores history from `storage` under `key` and persists every later append there.
    ///
    /// Restoring never validates or looks anything up. A snapshot that cannot be
    /// decoded is logged and the session starts empty.
    pub fn with_persistence(
        lookup: L,
        storage: Box<dyn SessionStorage>,
        key: impl Into<String>,
    ) -> Result<Self> {
        let key = key.into();
        let addresses = match storage.load(&key)? {
            Some(raw) => match serde_json::from_str::<HistorySnapshot>(&raw) {
                Ok(snapshot) => {
                    tracing::info!(
                        "📂 Restored {} history entries from session '{}'",
                        snapshot.addresses.len(),
                        key
                    );
                    snapshot.addresses
                }
                Err(e) => {
                    tracing::warn!("Ignoring unreadable session snapshot '{}': {}", key, e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        Ok(Self {
            lookup,
            addresses,
            has_shown_result: false,
            persistence: Some(Persistence { storage, key }),
        })
    }

    /// Pushes `group` to the end of history, even when it is empty.
    pub fn append(&mut self, group: ResultGroup) {
        self.addresses.push(group);
        self.has_shown_result = true;
        tracing::debug!("History now holds {} entries", self.addresses.len());
        self.persist();
    }

    fn persist(&self) {
        let Some(persistence) = &self.persistence else {
            return;
        };

        let snapshot = HistorySnapshot {
            addresses: self.addresses.clone(),
        };
        // 寫入失敗只記錄，不影響這次查詢
        let written = serde_json::to_string(&snapshot)
            .map_err(AppError::from)
            .and_then(|json| persistence.storage.save(&persistence.key, &json));
        if let Err(e) = written {
            tracing::warn!("Failed to persist session '{}': {}", persistence.key, e);
        }
    }

    pub fn most_recent(&self) -> Option<&ResultGroup> {
        if !self.has_shown_result {
            return None;
        }
        self.addresses.last()
    }

    pub fn has_shown_result(&self) -> bool {
        self.has_shown_result
    }

    pub fn history(&self) -> &[ResultGroup] {
        &self.addresses
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Looks `postal_code` up and appends the group on success. The caller is
    /// expected to have validated the code already.
    pub async fn orchestrate(&mut self, postal_code: &str) -> LookupOutcome {
        let outcome = self.lookup.lookup(postal_code).await;

        if let LookupOutcome::Success(group) = &outcome {
            self.append(group.clone());
        }

        outcome
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::cli::MemorySessionStorage;
    use crate::domain::model::Address;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    pub(crate) fn address(zipcode: &str, line3: &str) -> Address {
        Address {
            line1: "東京都".to_string(),
            line2: "板橋区".to_string(),
            line3: line3.to_string(),
            kana1: "ﾄｳｷｮｳﾄ".to_string(),
            kana2: "ｲﾀﾊﾞｼｸ".to_string(),
            kana3: "ﾄｷﾜﾀﾞｲ".to_string(),
            region_code: "13".to_string(),
            postal_code: zipcode.to_string(),
        }
    }

    /// 以對照表回應的假查詢，未知代碼視為通訊失敗
    #[derive(Clone, Default)]
    pub(crate) struct StubLookup {
        pub found: HashMap<String, ResultGroup>,
        pub not_found: Vec<String>,
        pub calls: Arc<AtomicUsize>,
    }

    impl StubLookup {
        pub fn with_group(mut self, code: &str, group: ResultGroup) -> Self {
            self.found.insert(code.to_string(), group);
            self
        }

        pub fn with_not_found(mut self, code: &str) -> Self {
            self.not_found.push(code.to_string());
            self
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl AddressLookup for StubLookup {
        async fn lookup(&self, postal_code: &str) -> LookupOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(group) = self.found.get(postal_code) {
                return LookupOutcome::Success(group.clone());
            }
            if self.not_found.iter().any(|c| c == postal_code) {
                return LookupOutcome::NotFound(postal_code.to_string());
            }
            LookupOutcome::CommunicationFailure {
                message: "stub transport down".to_string(),
                cause: None,
            }
        }
    }

    #[test]
    fn test_starts_empty() {
        let store = AddressHistoryStore::new(StubLookup::default());
        assert!(store.is_empty());
        assert_eq!(store.most_recent(), None);
    }

    #[tokio::test]
    async fn test_orchestrate_success_appends() {
        let group = vec![address("1740071", "常盤台")];
        let lookup = StubLookup::default().with_group("174-0071", group.clone());
        let mut store = AddressHistoryStore::new(lookup.clone());

        let outcome = store.orchestrate("174-0071").await;

        assert!(outcome.is_success());
        assert_eq!(store.len(), 1);
        assert_eq!(store.most_recent(), Some(&group));
        assert_eq!(lookup.call_count(), 1);
    }

    #[tokio::test]
    async fn test_orchestrate_not_found_leaves_history() {
        let lookup = StubLookup::default().with_not_found("999-9999");
        let mut store = AddressHistoryStore::new(lookup);

        let outcome = store.orchestrate("999-9999").await;

        assert!(matches!(outcome, LookupOutcome::NotFound(ref code) if code == "999-9999"));
        assert_eq!(store.len(), 0);
        assert!(!store.has_shown_result());
    }

    #[tokio::test]
    async fn test_orchestrate_failure_leaves_history() {
        let group = vec![address("1740071", "常盤台")];
        let lookup = StubLookup::default().with_group("1740071", group.clone());
        let mut store = AddressHistoryStore::new(lookup);

        store.orchestrate("1740071").await;
        let outcome = store.orchestrate("1000001").await;

        assert!(matches!(outcome, LookupOutcome::CommunicationFailure { .. }));
        assert_eq!(store.len(), 1);
        assert_eq!(store.most_recent(), Some(&group));
    }

    #[test]
    fn test_append_keeps_order_and_empty_groups() {
        let mut store = AddressHistoryStore::new(StubLookup::default());
        let first = vec![address("1000001", "丸の内")];
        let second = vec![address("5300001", "梅田")];

        store.append(first.clone());
        store.append(vec![]);
        store.append(second.clone());

        assert_eq!(store.history(), &[first, vec![], second.clone()]);
        assert_eq!(store.most_recent(), Some(&second));
    }

    #[test]
    fn test_restore_does_not_open_gate() {
        let storage = MemorySessionStorage::new();
        let snapshot = HistorySnapshot {
            addresses: vec![vec![address("1740071", "常盤台")]],
        };
        storage
            .save(DEFAULT_SESSION_KEY, &serde_json::to_string(&snapshot).unwrap())
            .unwrap();

        let lookup = StubLookup::default();
        let store = AddressHistoryStore::with_persistence(
            lookup.clone(),
            Box::new(storage),
            DEFAULT_SESSION_KEY,
        )
        .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.most_recent(), None);
        assert_eq!(lookup.call_count(), 0);
    }

    #[test]
    fn test_append_persists_only_addresses() {
        let storage = MemorySessionStorage::new();
        let mut store = AddressHistoryStore::with_persistence(
            StubLookup::default(),
            Box::new(storage.clone()),
            DEFAULT_SESSION_KEY,
        )
        .unwrap();

        store.append(vec![address("1740071", "常盤台")]);

        let raw = storage.load(DEFAULT_SESSION_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["addresses"][0][0]["zipcode"], "1740071");
        assert_eq!(object["addresses"][0][0]["address3"], "常盤台");
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty() {
        let storage = MemorySessionStorage::new();
        storage.save(DEFAULT_SESSION_KEY, "{not json").unwrap();

        let store = AddressHistoryStore::with_persistence(
            StubLookup::default(),
            Box::new(storage),
            DEFAULT_SESSION_KEY,
        )
        .unwrap();

        assert!(store.is_empty());
    }

    /// 讀取正常、寫入永遠失敗的儲存
    struct ReadOnlyStorage;

    impl SessionStorage for ReadOnlyStorage {
        fn load(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn save(&self, _key: &str, _value: &str) -> Result<()> {
            Err(AppError::StorageError {
                message: "disk full".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_failed_save_does_not_fail_lookup() {
        let group = vec![address("1740071", "常盤台")];
        let lookup = StubLookup::default().with_group("1740071", group.clone());
        let mut store = AddressHistoryStore::with_persistence(
            lookup,
            Box::new(ReadOnlyStorage),
            DEFAULT_SESSION_KEY,
        )
        .unwrap();

        let outcome = store.orchestrate("1740071").await;

        assert!(outcome.is_success());
        assert_eq!(store.len(), 1);
        assert_eq!(store.most_recent(), Some(&group));
    }
}
