//! Data layer: core types, loading, Hall of Fame extraction and filtering.
//!
//! Architecture:
//! ```text
//!  part1*chunk*.csv … part4*chunk*.csv      metadata (.feather)
//!        │                                      │
//!        ▼                                      ▼
//!   ┌──────────┐                          ┌──────────┐
//!   │  loader   │  concat + dedup          │  loader   │  normalize columns
//!   └──────────┘                          └──────────┘
//!        │                                      │
//!        └──────────────┬───────────────────────┘
//!                       ▼
//!              ┌────────────────┐
//!              │  hall_of_fame  │  HOF ids → base records → merged metadata
//!              └────────────────┘
//!                       │
//!                       ▼
//!              ┌────────────────┐
//!              │ EnhancerDataset│
//!              └────────────────┘
//!                       │
//!        ┌──────────────┼───────────────┐
//!        ▼              ▼               ▼
//!   ┌──────────┐  ┌──────────┐   ┌──────────┐
//!   │  filter   │  │ summary  │   │ imaging  │
//!   └──────────┘  └──────────┘   └──────────┘
//! ```

pub mod error;
pub mod filter;
pub mod hall_of_fame;
pub mod imaging;
pub mod loader;
pub mod model;
pub mod staging;
pub mod summary;

#[cfg(test)]
pub(crate) mod fixtures;
