//! Tolerance-aware fingerprints for small image icons.
//!
//! This library provides the building blocks for near-duplicate lookup:
//! - Icon access and 3x3 macroblock luma features
//! - Discretization of the feature space into buckets
//! - Central hashes and covering hash sets
//! - Parallel batch fingerprinting
//!
//! A central hash computed from one icon equals at least one member of the
//! hash set computed from a near-duplicate of it, so either side can be the
//! stored record while the other is the query.

// -- Internal Modules --
mod error;

// -- Public Re-exports --
pub use batch::{central_hashes, hash_sets, is_match};
pub use config::{Config, LogLevel};
pub use discretize::{Cube, Params};
pub use error::{Error, Result};
pub use features::{extract_features, FeatureVector, FEATURE_LEN};
pub use fingerprint::{central_fingerprint, central_hash, fingerprint_set, hash_set, Encoding};
pub use icon::{Icon, LumaGrid, ICON_SIZE};

// -- Public Modules --
pub mod batch;
pub mod config;
pub mod discretize;
pub mod features;
pub mod fingerprint;
pub mod icon;
pub mod logging;
