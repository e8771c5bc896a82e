/// Data layer: records, filter structure, and the query engine.
///
/// Architecture:
/// ```text
///  data.json / .csv / .parquet        ordering.json (optional)
///        │                                   │
///        ▼                                   ▼
///   ┌──────────┐  (loaded concurrently)  ┌──────────┐
///   │  loader   │ ─────────────────────── │  loader   │
///   └──────────┘                         └──────────┘
///        │                                   │
///        ▼                                   ▼
///   ┌──────────┐                      ┌───────────┐
///   │ Dataset   │ ──────────────────▶ │ ordering   │  → Vec<FilterGroup>
///   └──────────┘                      └───────────┘
///        │
///        ▼
///   ┌──────────┐   Selection   ┌──────────┐
///   │  filter   │ ◀─────────── │ state    │  also: disabled pairs
///   └──────────┘               └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  sort     │  → visible rows
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod highlight;
pub mod loader;
pub mod model;
pub mod ordering;
pub mod selection;
pub mod sort;
