/// Data layer: dataset sources, core types, loading and target parsing.
///
/// Architecture:
/// ```text
///   file / memory
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  DatasetSource → raw CSV text
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  metadata rows + headers + samples → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  targets  │  "[0, 1]" → ["0", "1"]
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod source;
pub mod targets;
