//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates a complete estimation run:
//! - Validation of configuration and data-dependent parameters
//! - Execution of repeated cross-fitting, scoring, solving and inference
//! - Result structures returned to the caller
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Repeated cross-fitting execution.
pub mod executor;

/// Estimation result structures.
pub mod output;

/// Configuration and input validation.
pub mod validator;
