//! # DAG-CBOR Testkit
//!
//! Test utilities for the DAG-CBOR codec.
//!
//! This crate provides:
//! - Property-based test generators using proptest
//! - Shared wire-format test vectors for cross-implementation checks
//! - Fuzz testing harnesses
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dagcbor_testkit::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn roundtrip(value in value_strategy()) {
//!         let bytes = encode(&value).unwrap();
//!         prop_assert_eq!(decode(&bytes).unwrap(), value);
//!     }
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fuzz;
pub mod generators;
pub mod vectors;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::fuzz::*;
    pub use crate::generators::*;
    pub use crate::vectors::*;
}

pub use fuzz::*;
pub use generators::*;
pub use vectors::*;
