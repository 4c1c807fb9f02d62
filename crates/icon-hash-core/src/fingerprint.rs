//! # Fingerprint generation
//!
//! Turns a feature vector into either one fingerprint (the central hash) or
//! the covering set of fingerprints of every bucket within tolerance (the
//! hash set).
//!
//! ## Matching
//!
//! Store one side as a central hash and the other as a hash set; two icons
//! match when the central hash is a member of the set. The roles can be
//! swapped freely as long as both sides use the same `epsilon_percent` and
//! `num_buckets`.
//!
//! ## Encoding
//!
//! - `num_buckets <= 10`: positional packing of the bucket indices, exact
//! - `num_buckets > 10`: FNV-1a over the bucket indices

use crate::discretize::{central_cube, cube_set, Cube, Params};
use crate::error::Result;
use crate::features::{extract_features, FeatureVector, FEATURE_LEN};
use crate::icon::LumaGrid;
use log::debug;

/// Largest bucket count that still uses positional packing
pub const POSITIONAL_MAX_BUCKETS: usize = 10;

/// How a cube is reduced to a fingerprint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Base-`num_buckets` packing of the bucket indices
    Positional,

    /// FNV-1a hash of the bucket indices
    Fnv1a,
}

impl Encoding {
    /// Encoding used for a given number of buckets per dimension
    pub fn for_buckets(num_buckets: usize) -> Self {
        if num_buckets > POSITIONAL_MAX_BUCKETS {
            Encoding::Fnv1a
        } else {
            Encoding::Positional
        }
    }

    /// Reduce one cube to a fingerprint
    pub fn encode(&self, cube: &Cube, num_buckets: usize) -> Result<u64> {
        match self {
            Encoding::Positional => cube.positional_hash(num_buckets),
            Encoding::Fnv1a => Ok(cube.fnv1a_hash()),
        }
    }
}

/// Fingerprint of the bucket containing `vector`
pub fn central_fingerprint(vector: &FeatureVector, params: &Params) -> Result<u64> {
    debug_assert_eq!(vector.len(), FEATURE_LEN);

    let cube = central_cube(vector, params)?;
    let encoding = Encoding::for_buckets(params.num_buckets);
    let hash = encoding.encode(&cube, params.num_buckets)?;

    debug!(
        "Central fingerprint {:#018x} ({:?}, {} buckets)",
        hash, encoding, params.num_buckets
    );
    Ok(hash)
}

/// Fingerprints of every bucket within tolerance of `vector`, in the order
/// the discretization yields them.
pub fn fingerprint_set(vector: &FeatureVector, params: &Params) -> Result<Vec<u64>> {
    debug_assert_eq!(vector.len(), FEATURE_LEN);

    let cubes = cube_set(vector, params)?;
    let encoding = Encoding::for_buckets(params.num_buckets);
    let hashes = cubes
        .iter()
        .map(|cube| encoding.encode(cube, params.num_buckets))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "Fingerprint set of {} hashes ({:?}, {} buckets)",
        hashes.len(),
        encoding,
        params.num_buckets
    );
    Ok(hashes)
}

/// Central hash of an icon, for use as a record or a query.
///
/// `epsilon_percent` is a fraction of the luma range `[0, 255]`.
pub fn central_hash<G: LumaGrid + ?Sized>(
    icon: &G,
    epsilon_percent: f64,
    num_buckets: usize,
) -> Result<u64> {
    let vector = extract_features(icon);
    central_fingerprint(&vector, &Params::for_luma(epsilon_percent, num_buckets))
}

/// Hash set of an icon, the counterpart of [`central_hash`]
pub fn hash_set<G: LumaGrid + ?Sized>(
    icon: &G,
    epsilon_percent: f64,
    num_buckets: usize,
) -> Result<Vec<u64>> {
    let vector = extract_features(icon);
    fingerprint_set(&vector, &Params::for_luma(epsilon_percent, num_buckets))
}
