use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Dimension – one filter axis
// ---------------------------------------------------------------------------

/// The four independent filter axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Category,
    Keyword,
    City,
    Month,
}

impl Dimension {
    /// Fixed display and iteration order.
    pub const ALL: [Dimension; 4] = [
        Dimension::Category,
        Dimension::Keyword,
        Dimension::City,
        Dimension::Month,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Category => "Category",
            Dimension::Keyword => "Keywords",
            Dimension::City => "City",
            Dimension::Month => "Month",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Calendar month names; the month filter lists options in this order.
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Zero-based calendar position of an exact month name.
pub fn month_position(name: &str) -> Option<usize> {
    MONTHS.iter().position(|m| *m == name)
}

// ---------------------------------------------------------------------------
// EventRecord – one event
// ---------------------------------------------------------------------------

/// A single event. Only `category`, `keywords`, `city` and `month` take part
/// in filtering; everything else is carried through to the cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventRecord {
    /// Opaque identifier some sources attach; never interpreted.
    pub uid: Option<String>,
    pub name: String,
    pub category: String,
    /// Insertion order is kept for display.
    pub keywords: Vec<String>,
    pub city: String,
    pub month: String,
    pub description: String,
    pub zip_code: String,
    pub website: Option<String>,
    /// Platform name (lowercase, e.g. `instagram`) → URL.
    pub social_media: BTreeMap<String, String>,
}

impl EventRecord {
    /// The record's value(s) along a dimension. Single-valued dimensions
    /// yield a one-element slice.
    pub fn values(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Category => std::slice::from_ref(&self.category),
            Dimension::Keyword => &self.keywords,
            Dimension::City => std::slice::from_ref(&self.city),
            Dimension::Month => std::slice::from_ref(&self.month),
        }
    }

    /// Whether the record carries `value` along `dimension` (equality for
    /// single-valued dimensions, containment for keywords).
    pub fn has_value(&self, dimension: Dimension, value: &str) -> bool {
        self.values(dimension).iter().any(|v| v == value)
    }
}

/// Drop repeated keywords, keeping the first occurrence.
fn dedup_keywords(keywords: &mut Vec<String>) {
    let mut seen = HashSet::new();
    keywords.retain(|k| seen.insert(k.clone()));
}

// ---------------------------------------------------------------------------
// EventDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// One selectable value within a dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    /// Number of records carrying the value.
    pub count: usize,
}

/// The loaded events with pre-computed option lists.
#[derive(Debug, Clone, Default)]
pub struct EventDataset {
    /// All events, in source order.
    pub records: Vec<EventRecord>,
    /// Options per dimension, already in display order.
    pub options: BTreeMap<Dimension, Vec<FilterOption>>,
}

impl EventDataset {
    /// Build the option lists from the loaded records.
    ///
    /// * category, city: ascending lexicographic
    /// * keyword: descending frequency, ties in discovery order
    /// * month: calendar order, only recognised month names
    pub fn from_records(mut records: Vec<EventRecord>) -> Self {
        for record in &mut records {
            dedup_keywords(&mut record.keywords);
        }

        let mut options = BTreeMap::new();
        for dimension in Dimension::ALL {
            let mut tally = tally(records.iter().flat_map(|r| r.values(dimension)));
            match dimension {
                Dimension::Category | Dimension::City => {
                    tally.sort_by(|a, b| a.value.cmp(&b.value));
                }
                Dimension::Keyword => {
                    // `sort_by` is stable, so equal counts keep discovery order.
                    tally.sort_by(|a, b| b.count.cmp(&a.count));
                }
                Dimension::Month => {
                    tally.retain(|o| month_position(&o.value).is_some());
                    tally.sort_by_key(|o| month_position(&o.value));
                }
            }
            options.insert(dimension, tally);
        }

        EventDataset { records, options }
    }

    /// Options for a dimension in display order.
    pub fn options(&self, dimension: Dimension) -> &[FilterOption] {
        self.options
            .get(&dimension)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Count distinct non-empty values in discovery order.
fn tally<'a>(values: impl Iterator<Item = &'a String>) -> Vec<FilterOption> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut out: Vec<FilterOption> = Vec::new();
    for value in values {
        if value.is_empty() {
            continue;
        }
        match index.get(value.as_str()) {
            Some(&i) => out[i].count += 1,
            None => {
                index.insert(value.as_str(), out.len());
                out.push(FilterOption {
                    value: value.clone(),
                    count: 1,
                });
            }
        }
    }
    out
}
