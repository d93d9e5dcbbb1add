/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///    .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + clean file → SalesDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SalesDataset  │  Vec<SaleRecord>, per-dimension value sets
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply dimension selections → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  pure rollups over the filtered view
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  present  │  chart-ready label/value series
///   └──────────┘
/// ```
pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod present;
