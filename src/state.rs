use crate::color::ColorMap;
use crate::data::filter::{Availability, AvailabilityPolicy, FilterEngine, ToggleOutcome};
use crate::data::loader;
use crate::data::model::{Dimension, EventRecord};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded events and current selections.
    pub engine: FilterEngine,

    /// Where the current events came from (None until something loads).
    pub source: Option<String>,

    /// Indices of events passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Zero-result options under the current filters (cached).
    pub zero_result: Availability,

    /// Category badge colours.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AvailabilityPolicy::default())
    }
}

impl AppState {
    pub fn new(policy: AvailabilityPolicy) -> Self {
        Self {
            engine: FilterEngine::new(policy),
            source: None,
            visible_indices: Vec::new(),
            zero_result: Availability::new(),
            color_map: ColorMap::default(),
            status_message: None,
        }
    }

    /// Load events from a path or URL. Failures are logged and reported in
    /// the status line; the previous events are dropped either way.
    pub fn load_from(&mut self, source: &str) {
        match loader::load_source(source) {
            Ok(records) => {
                log::info!("Loaded {} events from {source}", records.len());
                self.set_records(records, source);
            }
            Err(e) => {
                log::error!("Failed to load {source}: {e:#}");
                self.set_records(Vec::new(), source);
                self.source = None;
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest newly loaded events, reset filters and colours.
    pub fn set_records(&mut self, records: Vec<EventRecord>, source: &str) {
        self.engine.load(records);
        self.color_map = ColorMap::new(
            self.engine
                .dataset()
                .options(Dimension::Category)
                .iter()
                .map(|o| o.value.as_str()),
        );
        self.source = Some(source.to_string());
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the cached view after any filter change.
    pub fn refilter(&mut self) {
        self.visible_indices = self.engine.visible_indices();
        self.zero_result = self.engine.zero_result_options();
    }

    /// Toggle a single value in a dimension's filter.
    pub fn toggle_filter_value(&mut self, dimension: Dimension, value: &str) {
        if self.engine.toggle(dimension, value) != ToggleOutcome::Rejected {
            self.refilter();
        }
    }

    pub fn clear_filters(&mut self) {
        self.engine.clear();
        self.refilter();
    }

    pub fn clear_dimension(&mut self, dimension: Dimension) {
        self.engine.clear_dimension(dimension);
        self.refilter();
    }

    pub fn set_policy(&mut self, policy: AvailabilityPolicy) {
        self.engine.set_policy(policy);
        self.refilter();
    }

    pub fn is_zero_result(&self, dimension: Dimension, value: &str) -> bool {
        self.zero_result
            .get(&dimension)
            .is_some_and(|values| values.contains(value))
    }

    pub fn result_count(&self) -> usize {
        self.visible_indices.len()
    }

    /// Visible events in source order.
    pub fn visible_records(&self) -> impl Iterator<Item = &EventRecord> + '_ {
        let records = &self.engine.dataset().records;
        self.visible_indices.iter().map(move |&i| &records[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::event;

    fn loaded(policy: AvailabilityPolicy) -> AppState {
        let mut state = AppState::new(policy);
        state.set_records(
            vec![
                event("Anime", "Austin", "June", &["cosplay"]),
                event("Comics", "Dallas", "July", &["cosplay", "signing"]),
            ],
            "test",
        );
        state
    }

    #[test]
    fn test_set_records_shows_everything() {
        let state = loaded(AvailabilityPolicy::Disable);
        assert_eq!(state.result_count(), 2);
        assert_eq!(state.source.as_deref(), Some("test"));
        assert!(!state.is_zero_result(Dimension::Keyword, "signing"));
    }

    #[test]
    fn test_toggle_refreshes_cached_view() {
        let mut state = loaded(AvailabilityPolicy::Highlight);
        state.toggle_filter_value(Dimension::Category, "Anime");
        assert_eq!(state.result_count(), 1);
        assert!(state.is_zero_result(Dimension::Keyword, "signing"));
        let names: Vec<&str> = state.visible_records().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Anime in Austin"]);

        state.clear_filters();
        assert_eq!(state.result_count(), 2);
        assert!(!state.is_zero_result(Dimension::Keyword, "signing"));
    }

    #[test]
    fn test_switching_policy_off_clears_hints() {
        let mut state = loaded(AvailabilityPolicy::Highlight);
        state.toggle_filter_value(Dimension::Category, "Anime");
        state.set_policy(AvailabilityPolicy::Off);
        assert!(!state.is_zero_result(Dimension::Keyword, "signing"));
    }

    #[test]
    fn test_failed_load_leaves_empty_state() {
        let mut state = loaded(AvailabilityPolicy::Disable);
        state.load_from("/no/such/dir/events.json");
        assert!(state.source.is_none());
        assert_eq!(state.result_count(), 0);
        assert!(state.engine.dataset().is_empty());
        assert!(state.status_message.is_some());
    }
}
