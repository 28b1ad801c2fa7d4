/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, drop incomplete rows → PitchTable
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ PitchTable  │  Vec<PitchRecord>, immutable after load
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  pitcher → records → (matching, complement)
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
