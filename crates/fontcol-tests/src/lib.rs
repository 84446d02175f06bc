//! fontcol End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the generation flows:
//!
//! - Generation: manifest -> descriptor -> C source and report
//! - Failure handling: fatal descriptor or table errors leave no output
//! - **Determinism**: byte-identical output across runs
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p fontcol-tests
//! ```
//!
//! ## Determinism Testing
//!
//! ```rust,ignore
//! use fontcol_tests::determinism::verify_determinism;
//!
//! let result = verify_determinism(|| render(&manifest, &text), 3);
//! result.assert_deterministic();
//! ```

pub mod determinism;
pub mod fixtures;

pub use determinism::{verify_determinism, DeterminismResult, DiffInfo};
