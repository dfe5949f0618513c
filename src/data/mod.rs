//! Data layer: core types, normalization, loading, and the derived views.
//!
//! Architecture:
//! ```text
//!  colleges.json (key → record)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  read + parse → normalize
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Dataset  │  Vec<Institution>, key index, immutable
//!   └──────────┘
//!        │
//!   ┌────┴─────────┬─────────────┐
//!   ▼              ▼             ▼
//! query        compare        trend
//! (listing)    (flat table)   (per-branch series)
//! ```

pub mod compare;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod query;
pub mod trend;
