//! Bulk-load nested source documents into the catalog database.
//!
//! This crate owns the flattening of brand → model → generation →
//! configuration → modification documents into foreign-key rows, the
//! synthetic price strategy, and load progress reporting.

pub mod loader;
pub mod price;
pub mod progress;

pub use loader::{LoadError, LoadStats, load_catalog};
pub use price::{FixedPrice, PriceGenerator, RandomPrice};
pub use progress::{LoadProgress, LogProgress, SilentProgress};
