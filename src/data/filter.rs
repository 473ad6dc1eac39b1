use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use super::model::{Dimension, EventDataset, EventRecord};

// ---------------------------------------------------------------------------
// Filter predicate: which values are selected per dimension
// ---------------------------------------------------------------------------

/// Per-dimension selection state: maps dimension → set of selected values.
/// If a dimension is absent or its set is empty, it means "no filter".
pub type FilterState = BTreeMap<Dimension, BTreeSet<String>>;

/// Zero-result options per dimension.
pub type Availability = BTreeMap<Dimension, BTreeSet<String>>;

/// Whether `record` passes every active selection, optionally ignoring one
/// dimension.
///
/// Single-valued dimensions pass on equality, keywords on a non-empty
/// intersection.
pub fn matches_selection(
    record: &EventRecord,
    filters: &FilterState,
    skip: Option<Dimension>,
) -> bool {
    filters.iter().all(|(dimension, selected)| {
        Some(*dimension) == skip
            || selected.is_empty()
            || record.values(*dimension).iter().any(|v| selected.contains(v))
    })
}

/// Return indices of records that pass all active filters, in source order.
pub fn filtered_indices(dataset: &EventDataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_selection(record, filters, None))
        .map(|(i, _)| i)
        .collect()
}

/// For every dimension, the unselected options that would match no record
/// given the other dimensions' selections.
pub fn zero_result_options(dataset: &EventDataset, filters: &FilterState) -> Availability {
    let mut flagged = Availability::new();
    for dimension in Dimension::ALL {
        let reachable: HashSet<&str> = dataset
            .records
            .iter()
            .filter(|record| matches_selection(record, filters, Some(dimension)))
            .flat_map(|record| record.values(dimension))
            .map(String::as_str)
            .collect();
        let selected = filters.get(&dimension);

        let zero: BTreeSet<String> = dataset
            .options(dimension)
            .iter()
            .filter(|o| !selected.is_some_and(|s| s.contains(&o.value)))
            .filter(|o| !reachable.contains(o.value.as_str()))
            .map(|o| o.value.clone())
            .collect();
        flagged.insert(dimension, zero);
    }
    flagged
}

// ---------------------------------------------------------------------------
// Availability policy
// ---------------------------------------------------------------------------

/// How options that would produce zero results are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum AvailabilityPolicy {
    /// No availability computation at all.
    Off,
    /// Zero-result options are styled but stay clickable.
    Highlight,
    /// Zero-result options cannot be selected.
    #[default]
    Disable,
}

impl AvailabilityPolicy {
    pub const ALL: [AvailabilityPolicy; 3] = [
        AvailabilityPolicy::Off,
        AvailabilityPolicy::Highlight,
        AvailabilityPolicy::Disable,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AvailabilityPolicy::Off => "Off",
            AvailabilityPolicy::Highlight => "Highlight",
            AvailabilityPolicy::Disable => "Disable",
        }
    }
}

impl fmt::Display for AvailabilityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// FilterEngine
// ---------------------------------------------------------------------------

/// What a call to [`FilterEngine::toggle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The value is a zero-result option under [`AvailabilityPolicy::Disable`].
    Rejected,
}

/// Owns the loaded events and the current selections.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    dataset: EventDataset,
    selected: FilterState,
    policy: AvailabilityPolicy,
}

impl FilterEngine {
    pub fn new(policy: AvailabilityPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// Replace the held records and clear every selection.
    pub fn load(&mut self, records: Vec<EventRecord>) {
        self.dataset = EventDataset::from_records(records);
        self.selected.clear();
    }

    pub fn dataset(&self) -> &EventDataset {
        &self.dataset
    }

    pub fn policy(&self) -> AvailabilityPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: AvailabilityPolicy) {
        self.policy = policy;
    }

    pub fn filters(&self) -> &FilterState {
        &self.selected
    }

    /// Selected values of one dimension.
    pub fn selection(&self, dimension: Dimension) -> Option<&BTreeSet<String>> {
        self.selected.get(&dimension)
    }

    pub fn is_selected(&self, dimension: Dimension, value: &str) -> bool {
        self.selected
            .get(&dimension)
            .is_some_and(|s| s.contains(value))
    }

    /// Whether any dimension constrains the result.
    pub fn has_selection(&self) -> bool {
        self.selected.values().any(|s| !s.is_empty())
    }

    /// Add `value` to the dimension's selection, or remove it if present.
    pub fn toggle(&mut self, dimension: Dimension, value: &str) -> ToggleOutcome {
        if let Some(selected) = self.selected.get_mut(&dimension) {
            if selected.remove(value) {
                if selected.is_empty() {
                    self.selected.remove(&dimension);
                }
                return ToggleOutcome::Removed;
            }
        }

        if self.policy == AvailabilityPolicy::Disable && self.is_zero_result(dimension, value) {
            log::debug!("Ignoring zero-result option {dimension}={value:?}");
            return ToggleOutcome::Rejected;
        }

        self.selected
            .entry(dimension)
            .or_default()
            .insert(value.to_string());
        ToggleOutcome::Added
    }

    /// Empty every selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Empty one dimension's selection.
    pub fn clear_dimension(&mut self, dimension: Dimension) {
        self.selected.remove(&dimension);
    }

    /// Indices of the records passing the current selection.
    pub fn visible_indices(&self) -> Vec<usize> {
        filtered_indices(&self.dataset, &self.selected)
    }

    pub fn visible_records(&self) -> impl Iterator<Item = &EventRecord> + '_ {
        self.dataset
            .records
            .iter()
            .filter(|record| matches_selection(record, &self.selected, None))
    }

    pub fn result_count(&self) -> usize {
        self.visible_records().count()
    }

    /// Zero-result options, or nothing when the policy is [`AvailabilityPolicy::Off`].
    pub fn zero_result_options(&self) -> Availability {
        match self.policy {
            AvailabilityPolicy::Off => Availability::new(),
            AvailabilityPolicy::Highlight | AvailabilityPolicy::Disable => {
                zero_result_options(&self.dataset, &self.selected)
            }
        }
    }

    /// Whether adding `value` to `dimension` would match no record.
    /// Selected values are never zero-result.
    pub fn is_zero_result(&self, dimension: Dimension, value: &str) -> bool {
        if self.is_selected(dimension, value) {
            return false;
        }
        !self.dataset.records.iter().any(|record| {
            matches_selection(record, &self.selected, Some(dimension))
                && record.has_value(dimension, value)
        })
    }
}
