/// Data layer: season records, loading, and the stats pipeline.
///
/// Architecture:
/// ```text
///  Batting / Pitching / Teams  (.csv / .json / .parquet)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<record>, report missing files
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year range + league/division/team/player → new Vec
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ metrics   │  batting average, winning %, run differential
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  group by year → sum / mean
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  trend    │  least-squares fit → next N seasons
///   └──────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod trend;
