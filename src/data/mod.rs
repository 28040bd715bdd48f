/// Data layer: core types and persistence.
///
/// Architecture:
/// ```text
///      .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read file → Convertible
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ document  │  serde mirror types, type sniffing
///   └──────────┘
///        │
///        ▼
///   ┌───────────────────────────┐
///   │ model                     │  Dataset / ResultContainer
///   └───────────────────────────┘
/// ```

pub mod document;
pub mod loader;
pub mod model;
