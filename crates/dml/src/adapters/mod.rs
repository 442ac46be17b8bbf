//! Layer 6: Adapters
//!
//! # Purpose
//!
//! This layer adapts caller data and configuration to the engine:
//!
//! - **Dataset**: validates a columnar table against column roles
//! - **Batch**: configures and runs a complete in-memory estimation
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters ← You are here
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Tabular input and validated datasets.
pub mod dataset;

/// Batch adapter for in-memory estimation.
pub mod batch;
