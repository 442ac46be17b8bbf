//! Layer 6: Adapters
//!
//! This layer provides the user-facing batch adapter with parallel
//! cross-fitting.

// Batch adapter with parallel cross-fitting.
pub mod batch;
