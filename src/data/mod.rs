/// Data layer: core types, loading, caching, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .xlsx / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  sheet layout → SalesDataset (hour derived)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  OnceLock<Arc<SalesDataset>>, read once per process
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSelection: three membership checks ANDed
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ aggregate │  KPIs + sales by product line / by hour
///   └──────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
