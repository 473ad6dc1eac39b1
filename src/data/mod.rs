/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .json / .csv / http(s) URL
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse source → Vec<EventRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ EventDataset  │  Vec<EventRecord>, option lists per dimension
///   └──────────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ FilterEngine  │  selections → visible indices, zero-result options
///   └──────────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
