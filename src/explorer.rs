//! The explorer facade: fetch lifecycle, status, and ownership of the
//! catalog and selection state.
//!
//! All mutation happens on the single control thread that owns the
//! [`Explorer`]; the blocking fetch inside [`Explorer::fetch`] is the only
//! suspension point. Overlapping fetches are serialized by a generation
//! token: each `begin_fetch` invalidates every earlier token, and
//! `apply_fetch` discards results carrying a stale one, so a slow first
//! request can never overwrite the result of a faster second one.

use crate::catalog::{Catalog, SortPolicy};
use crate::fetch::{FetchError, Fetcher};
use crate::location::{LocationProvider, RandomSource};
use crate::record::{AttractionRecord, RecordId};
use crate::selection::SelectionSync;

/// Token tying a fetch invocation to the state of the world when it
/// started. Only the latest issued token is accepted back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchGeneration(u64);

/// Outcome of the most recent fetch attempt.
///
/// `Loaded { record_count: 0 }` is the distinct "loaded successfully,
/// nothing returned" state, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Loaded {
        record_count: usize,
    },
    Failed {
        message: String,
    },
}

/// Owner of the catalog, the selection state machine, and the fetch
/// pipeline's observable status.
#[derive(Debug, Default)]
pub struct Explorer {
    catalog: Catalog,
    selection: SelectionSync,
    status: FetchStatus,
    latest_generation: u64,
}

impl Explorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Mutable access for filter/sort policy changes.
    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    pub fn selection(&self) -> &SelectionSync {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionSync {
        &mut self.selection
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    /// The message of the most recent failed fetch, if the latest attempt
    /// failed. Decode diagnostics come through verbatim.
    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Starts a fetch attempt: marks the pipeline loading and issues a
    /// token that invalidates all earlier ones.
    pub fn begin_fetch(&mut self) -> FetchGeneration {
        self.latest_generation += 1;
        self.status = FetchStatus::Loading;
        FetchGeneration(self.latest_generation)
    }

    /// Hands a fetch result back to the control thread. Results carrying a
    /// stale generation are discarded without touching any state; returns
    /// whether the result was applied.
    ///
    /// On an applied success the catalog is replaced wholesale; on an
    /// applied failure it is cleared and the error recorded.
    pub fn apply_fetch(
        &mut self,
        generation: FetchGeneration,
        result: Result<Vec<AttractionRecord>, FetchError>,
    ) -> bool {
        if generation.0 != self.latest_generation {
            tracing::debug!(
                stale = generation.0,
                latest = self.latest_generation,
                "discarding stale fetch result"
            );
            return false;
        }
        match result {
            Ok(records) => {
                let record_count = records.len();
                self.catalog.replace(records);
                self.status = FetchStatus::Loaded { record_count };
            }
            Err(err) => {
                tracing::warn!(error = %err, "fetch failed");
                self.catalog.clear();
                self.status = FetchStatus::Failed {
                    message: err.to_string(),
                };
            }
        }
        true
    }

    /// Runs a full fetch cycle against `endpoint` on the calling thread.
    pub fn fetch(&mut self, fetcher: &Fetcher, endpoint: &str) -> bool {
        let generation = self.begin_fetch();
        let result = fetcher.fetch(endpoint);
        self.apply_fetch(generation, result)
    }

    /// See [`SelectionSync::select_active`].
    pub fn select_active(&mut self, id: Option<RecordId>) -> bool {
        self.selection.select_active(id)
    }

    /// See [`SelectionSync::sync_from_navigation`].
    pub fn sync_from_navigation(&mut self, stack: Vec<RecordId>) -> bool {
        self.selection.sync_from_navigation(stack)
    }

    /// Switches the list to distance ordering from wherever the provider
    /// says the user is. With no known position the order stays as fetched.
    pub fn sort_by_distance_from(&mut self, provider: &dyn LocationProvider) {
        self.catalog
            .set_sort_policy(SortPolicy::ByDistance(provider.current_coordinate()));
    }

    /// Picks a random record and makes it the active selection. Returns
    /// whether anything changed.
    pub fn select_random(&mut self, source: &mut dyn RandomSource) -> bool {
        let picked = self
            .catalog
            .pick_random(source)
            .map(|record| record.id.clone());
        match picked {
            Some(id) => self.selection.select_active(Some(id)),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> AttractionRecord {
        AttractionRecord {
            id: RecordId::from(id),
            name: None,
            text: None,
            image: None,
            url: None,
            address: None,
            street: None,
            city: None,
            phone: None,
            email: None,
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn successful_fetch_replaces_the_catalog() {
        let mut explorer = Explorer::new();
        let generation = explorer.begin_fetch();
        assert!(explorer.is_loading());
        assert!(explorer.apply_fetch(generation, Ok(vec![record("a"), record("b")])));
        assert!(!explorer.is_loading());
        assert_eq!(explorer.catalog().len(), 2);
        assert_eq!(explorer.status(), &FetchStatus::Loaded { record_count: 2 });
        assert_eq!(explorer.error_message(), None);
    }

    #[test]
    fn empty_success_is_distinct_from_failure() {
        let mut explorer = Explorer::new();
        let generation = explorer.begin_fetch();
        assert!(explorer.apply_fetch(generation, Ok(Vec::new())));
        assert_eq!(explorer.status(), &FetchStatus::Loaded { record_count: 0 });
        assert_eq!(explorer.error_message(), None);
    }

    #[test]
    fn failure_clears_the_catalog_and_records_the_message() {
        let mut explorer = Explorer::new();
        let generation = explorer.begin_fetch();
        explorer.apply_fetch(generation, Ok(vec![record("a")]));

        let generation = explorer.begin_fetch();
        let diagnostic = "missing field `features` at line 1 column 12";
        assert!(explorer.apply_fetch(
            generation,
            Err(FetchError::Decode(diagnostic.to_owned()))
        ));
        assert!(explorer.catalog().is_empty());
        let message = explorer.error_message().expect("failure message");
        assert!(
            message.contains(diagnostic),
            "diagnostic must be preserved verbatim, got: {message}"
        );
    }

    #[test]
    fn stale_generation_is_discarded_when_it_finishes_last() {
        let mut explorer = Explorer::new();
        let slow = explorer.begin_fetch();
        let fast = explorer.begin_fetch();

        assert!(explorer.apply_fetch(fast, Ok(vec![record("fresh")])));
        assert!(!explorer.apply_fetch(slow, Ok(vec![record("stale")])));

        assert_eq!(explorer.catalog().len(), 1);
        assert_eq!(explorer.catalog().records()[0].id.as_str(), "fresh");
        assert_eq!(explorer.status(), &FetchStatus::Loaded { record_count: 1 });
    }

    #[test]
    fn stale_generation_is_discarded_when_it_finishes_first() {
        let mut explorer = Explorer::new();
        let slow = explorer.begin_fetch();
        let fast = explorer.begin_fetch();

        assert!(!explorer.apply_fetch(slow, Ok(vec![record("stale")])));
        assert!(explorer.is_loading(), "latest fetch is still in flight");
        assert!(explorer.catalog().is_empty());

        assert!(explorer.apply_fetch(fast, Ok(vec![record("fresh")])));
        assert_eq!(explorer.catalog().records()[0].id.as_str(), "fresh");
    }

    #[test]
    fn stale_failure_does_not_clear_a_fresh_catalog() {
        let mut explorer = Explorer::new();
        let slow = explorer.begin_fetch();
        let fast = explorer.begin_fetch();

        explorer.apply_fetch(fast, Ok(vec![record("fresh")]));
        assert!(!explorer.apply_fetch(
            slow,
            Err(FetchError::Decode("late breakage".to_owned()))
        ));
        assert_eq!(explorer.catalog().len(), 1);
        assert_eq!(explorer.error_message(), None);
    }

    #[test]
    fn select_random_activates_a_catalog_record() {
        struct AlwaysFirst;
        impl RandomSource for AlwaysFirst {
            fn pick_index(&mut self, _len: usize) -> usize {
                0
            }
        }

        let mut explorer = Explorer::new();
        let generation = explorer.begin_fetch();
        explorer.apply_fetch(generation, Ok(vec![record("a"), record("b")]));

        assert!(explorer.select_random(&mut AlwaysFirst));
        assert_eq!(explorer.selection().active(), Some(&RecordId::from("a")));
        // Picking the same record again changes nothing.
        assert!(!explorer.select_random(&mut AlwaysFirst));
    }

    #[test]
    fn select_random_on_empty_catalog_changes_nothing() {
        struct Unreachable;
        impl RandomSource for Unreachable {
            fn pick_index(&mut self, _len: usize) -> usize {
                panic!("must not be consulted");
            }
        }
        let mut explorer = Explorer::new();
        assert!(!explorer.select_random(&mut Unreachable));
        assert_eq!(explorer.selection().active(), None);
    }
}
