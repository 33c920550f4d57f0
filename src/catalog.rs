//! The catalog: current record set plus its derived filtered/sorted views.
//!
//! The stored sequence keeps server response order and is only ever replaced
//! wholesale (successful fetch) or cleared (failed fetch). Views are pure
//! projections; they never reorder the stored records.

use std::cmp::Ordering;

use crate::geo::{haversine_distance, Coordinate};
use crate::location::RandomSource;
use crate::record::{AttractionRecord, RecordId};

/// Predicate over coordinate presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterPolicy {
    #[default]
    All,
    WithCoordinate,
    WithoutCoordinate,
}

impl FilterPolicy {
    pub fn matches(self, record: &AttractionRecord) -> bool {
        match self {
            Self::All => true,
            Self::WithCoordinate => record.coordinate().is_some(),
            Self::WithoutCoordinate => record.coordinate().is_none(),
        }
    }
}

/// Ordering applied to the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SortPolicy {
    /// Stable fetch order.
    #[default]
    Default,
    /// Ascending by name, case-folded; an absent name sorts as the empty
    /// string.
    AlphabeticalByName,
    /// Ascending by great-circle distance from the reference coordinate.
    /// With no reference available this degrades to fetch order.
    ByDistance(Option<Coordinate>),
}

/// Holder of the current full record set.
#[derive(Debug, Default)]
pub struct Catalog {
    records: Vec<AttractionRecord>,
    filter_policy: FilterPolicy,
    sort_policy: SortPolicy,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored sequence in server response order.
    pub fn records(&self) -> &[AttractionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<&AttractionRecord> {
        self.records.iter().find(|record| record.id == *id)
    }

    /// Replaces the whole record set. No merge with the previous contents.
    pub fn replace(&mut self, records: Vec<AttractionRecord>) {
        self.records = records;
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn filter_policy(&self) -> FilterPolicy {
        self.filter_policy
    }

    pub fn set_filter_policy(&mut self, policy: FilterPolicy) {
        self.filter_policy = policy;
    }

    pub fn sort_policy(&self) -> SortPolicy {
        self.sort_policy
    }

    pub fn set_sort_policy(&mut self, policy: SortPolicy) {
        self.sort_policy = policy;
    }

    /// The list view: filter policy applied, then sort policy, over a fresh
    /// projection of the stored sequence.
    pub fn derived_view(&self) -> Vec<&AttractionRecord> {
        let mut view: Vec<&AttractionRecord> = self
            .records
            .iter()
            .filter(|record| self.filter_policy.matches(record))
            .collect();
        match self.sort_policy {
            SortPolicy::Default | SortPolicy::ByDistance(None) => {}
            SortPolicy::AlphabeticalByName => {
                view.sort_by(|a, b| compare_names(a, b));
            }
            SortPolicy::ByDistance(Some(reference)) => {
                view.sort_by(|a, b| {
                    distance_key(reference, a).total_cmp(&distance_key(reference, b))
                });
            }
        }
        view
    }

    /// The map view: always coordinate-filtered, independent of the list's
    /// filter policy, in fetch order.
    pub fn map_view(&self) -> Vec<&AttractionRecord> {
        self.records
            .iter()
            .filter(|record| record.coordinate().is_some())
            .collect()
    }

    /// Uniform pick over the full stored set via the injected source.
    pub fn pick_random(&self, source: &mut dyn RandomSource) -> Option<&AttractionRecord> {
        if self.records.is_empty() {
            return None;
        }
        let index = source.pick_index(self.records.len());
        self.records.get(index)
    }
}

fn compare_names(a: &AttractionRecord, b: &AttractionRecord) -> Ordering {
    let left = a.name_or_empty();
    let right = b.name_or_empty();
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

/// Sort key under the distance policy; records without a coordinate sink to
/// the end, keeping their relative order.
fn distance_key(reference: Coordinate, record: &AttractionRecord) -> f64 {
    record
        .coordinate()
        .map_or(f64::INFINITY, |coordinate| {
            haversine_distance(reference, coordinate)
        })
}
