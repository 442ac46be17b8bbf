//! Layer 5: Engine
//!
//! This layer provides the parallel execution engine for cross-fitting.
//! It distributes fold fits and nuisance passes across CPU cores.

// Parallel nuisance passes using CPU threads
pub mod executor;
