//! Transform implementations for inspection records
//!
//! `IdentityMap` is the deduplication primitive; `InspectionTransformer`
//! drives it once per source record.

mod identity;
mod inspections;

pub use identity::IdentityMap;
pub use inspections::{InspectionTransformer, NormalizedRow, TransformStats, columns};
