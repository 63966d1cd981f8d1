//! Submit flow: validate, normalize, look up, then refresh pagination.

use crate::core::history::AddressHistoryStore;
use crate::core::paginator::Paginator;
use crate::core::postal_code::{self, PostalCodeError};
use crate::core::{AddressLookup, LookupOutcome};
use crate::domain::model::ResultGroup;

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed; no lookup was made.
    Invalid(PostalCodeError),
    Lookup(LookupOutcome),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Lookup(LookupOutcome::Success(_)))
    }

    /// 一次提交最多一則訊息，驗證錯誤優先
    pub fn error_message(&self) -> Option<String> {
        match self {
            SubmitOutcome::Invalid(error) => Some(error.to_string()),
            SubmitOutcome::Lookup(outcome) => outcome.user_message().map(str::to_string),
        }
    }
}

/// Submission is disabled while the input is blank.
pub fn can_submit(raw: &str) -> bool {
    !raw.trim().is_empty()
}

pub struct LookupSession<L: AddressLookup> {
    store: AddressHistoryStore<L>,
    paginator: Paginator,
}

impl<L: AddressLookup> LookupSession<L> {
    pub fn new(store: AddressHistoryStore<L>) -> Self {
        let paginator = Paginator::new(store.len());
        Self { store, paginator }
    }

    pub async fn submit(&mut self, raw: &str) -> SubmitOutcome {
        if let Err(error) = postal_code::validate(raw).into_result() {
            tracing::debug!("Rejected input {:?}: {}", raw, error);
            return SubmitOutcome::Invalid(error);
        }

        let code = postal_code::normalize(raw);
        let outcome = self.store.orchestrate(&code).await;
        self.paginator.set_total_items(self.store.len());

        SubmitOutcome::Lookup(outcome)
    }

    pub fn store(&self) -> &AddressHistoryStore<L> {
        &self.store
    }

    pub fn most_recent(&self) -> Option<&ResultGroup> {
        self.store.most_recent()
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn current_page(&self) -> &[ResultGroup] {
        self.paginator.page_slice(self.store.history())
    }

    pub fn next_page(&mut self) {
        self.paginator.next();
    }

    pub fn prev_page(&mut self) {
        self.paginator.prev();
    }

    pub fn go_to_page(&mut self, page_index: usize) {
        self.paginator.go_to(page_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::history::tests::{address, StubLookup};
    use crate::domain::model::{COMMUNICATION_FAILURE_MESSAGE, NOT_FOUND_MESSAGE};

    fn session(lookup: StubLookup) -> LookupSession<StubLookup> {
        LookupSession::new(AddressHistoryStore::new(lookup))
    }

    #[test]
    fn test_can_submit() {
        assert!(!can_submit(""));
        assert!(!can_submit("  "));
        assert!(can_submit("174-0071"));
        assert!(can_submit("abc"));
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_lookup() {
        let lookup = StubLookup::default();
        let mut session = session(lookup.clone());

        let outcome = session.submit("invalid").await;

        assert!(matches!(
            outcome,
            SubmitOutcome::Invalid(PostalCodeError::InvalidCharacters)
        ));
        assert_eq!(
            outcome.error_message().as_deref(),
            Some("digits and hyphen only")
        );
        assert_eq!(lookup.call_count(), 0);
    }

    #[tokio::test]
    async fn test_hyphenated_and_plain_input_look_up_same_code() {
        let group = vec![address("1740071", "常盤台")];
        let lookup = StubLookup::default().with_group("1740071", group.clone());
        let mut session = session(lookup.clone());

        assert!(session.submit("174-0071").await.is_success());
        assert!(session.submit("1740071").await.is_success());

        assert_eq!(lookup.call_count(), 2);
        assert_eq!(session.store().len(), 2);
        assert_eq!(session.most_recent(), Some(&group));
    }

    #[tokio::test]
    async fn test_lookup_failures_map_to_messages() {
        let lookup = StubLookup::default().with_not_found("9999999");
        let mut session = session(lookup);

        let not_found = session.submit("999-9999").await;
        assert_eq!(not_found.error_message().as_deref(), Some(NOT_FOUND_MESSAGE));

        let failure = session.submit("1000001").await;
        assert_eq!(
            failure.error_message().as_deref(),
            Some(COMMUNICATION_FAILURE_MESSAGE)
        );

        assert!(session.store().is_empty());
        assert_eq!(session.paginator().page_count(), 1);
    }

    #[tokio::test]
    async fn test_four_results_paginate_into_two_pages() {
        let codes = ["1000001", "1000002", "1000003", "1000004"];
        let lookup = codes.iter().fold(StubLookup::default(), |stub, code| {
            stub.with_group(code, vec![address(code, "丸の内")])
        });
        let mut session = session(lookup);

        for code in codes {
            assert!(session.submit(code).await.is_success());
        }

        assert_eq!(session.paginator().page_count(), 2);
        assert_eq!(session.paginator().page_index(), 0);
        assert_eq!(session.current_page().len(), 3);

        session.go_to_page(1);
        session.next_page();
        assert_eq!(session.paginator().page_index(), 1);
        assert_eq!(session.current_page().len(), 1);
        assert_eq!(session.current_page()[0][0].postal_code, "1000004");

        session.prev_page();
        session.prev_page();
        assert_eq!(session.paginator().page_index(), 0);
    }
}
