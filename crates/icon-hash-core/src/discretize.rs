//! # N-dimensional space discretization
//!
//! Splits every axis of the value range `[min, max]` into `num_buckets`
//! equal buckets, which turns a real vector into an integer coordinate in a
//! hypercube grid ("cube"). Two operations are offered:
//!
//! - [`central_cube`]: the single cube containing the vector
//! - [`cube_set`]: every cube the vector could fall in if each component
//!   were moved by up to `epsilon` in either direction
//!
//! Any vector within `epsilon` (per component) of `v` has its central cube
//! inside `cube_set(v)`. That is what lets one side of a comparison store a
//! single hash while the other side queries a handful.
//!
//! ## Hashing
//!
//! Cubes are reduced to `u64` either by positional packing (exact, only
//! viable while `num_buckets ^ dims` fits in 64 bits) or by FNV-1a over the
//! bucket indices.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// Largest number of cubes [`cube_set`] will produce.
///
/// A tolerance of up to one bucket width covers at most 3 buckets per
/// axis, so 9-dimensional luma vectors stay under `3^9 = 19683`.
pub const MAX_CUBE_SET_LEN: usize = 1 << 16;

/// Discretization parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Lower bound of every vector component
    pub min: f64,

    /// Upper bound of every vector component
    pub max: f64,

    /// Tolerance as a fraction of `max - min` (0.05 = 5%)
    pub epsilon_percent: f64,

    /// Buckets per dimension
    pub num_buckets: usize,
}

impl Params {
    /// Parameters over the luma range `[0, 255]`
    pub fn for_luma(epsilon_percent: f64, num_buckets: usize) -> Self {
        Self {
            min: 0.0,
            max: 255.0,
            epsilon_percent,
            num_buckets,
        }
    }

    /// Width of one bucket along any axis
    pub fn bucket_width(&self) -> f64 {
        (self.max - self.min) / self.num_buckets as f64
    }

    /// Absolute tolerance in vector units
    pub fn epsilon(&self) -> f64 {
        self.epsilon_percent * (self.max - self.min)
    }

    /// Check that the parameters describe a usable grid
    pub fn validate(&self) -> Result<()> {
        if self.num_buckets == 0 {
            return Err(Error::InvalidParams(
                "number of buckets must be at least 1".to_string(),
            ));
        }

        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(Error::InvalidParams(format!(
                "value range [{}, {}] is empty or not finite",
                self.min, self.max
            )));
        }

        if !self.epsilon_percent.is_finite() || self.epsilon_percent < 0.0 {
            return Err(Error::InvalidParams(format!(
                "epsilon percent must be a non-negative number, got {}",
                self.epsilon_percent
            )));
        }

        Ok(())
    }
}

/// A cell of the discretized space: one bucket index per dimension
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cube(Vec<usize>);

impl Cube {
    #[cfg(test)]
    pub(crate) fn from_indices(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Number of dimensions
    pub fn dims(&self) -> usize {
        self.0.len()
    }

    /// Bucket indices, one per dimension
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// FNV-1a hash over the little-endian bytes of each bucket index
    pub fn fnv1a_hash(&self) -> u64 {
        let mut hash = FNV_OFFSET_BASIS;
        for &index in &self.0 {
            for byte in (index as u64).to_le_bytes() {
                hash ^= byte as u64;
                hash = hash.wrapping_mul(FNV_PRIME);
            }
        }
        hash
    }

    /// Read the cube as a base-`num_buckets` number, first dimension most
    /// significant. Distinct cubes always give distinct values.
    pub fn positional_hash(&self, num_buckets: usize) -> Result<u64> {
        if num_buckets == 0 {
            return Err(Error::InvalidParams(
                "number of buckets must be at least 1".to_string(),
            ));
        }

        let overflow = || Error::HashOverflow {
            num_buckets,
            dims: self.dims(),
        };

        let base = num_buckets as u64;
        let mut hash: u64 = 0;
        for &index in &self.0 {
            debug_assert!(index < num_buckets, "bucket index outside the grid");
            hash = hash
                .checked_mul(base)
                .and_then(|h| h.checked_add(index as u64))
                .ok_or_else(overflow)?;
        }
        Ok(hash)
    }
}

/// Bucket holding `value`, clamped into `0..num_buckets`
pub fn bucket_index(value: f64, params: &Params) -> usize {
    let position = ((value - params.min) / params.bucket_width()).floor();
    if position <= 0.0 {
        0
    } else if position >= params.num_buckets as f64 {
        params.num_buckets - 1
    } else {
        position as usize
    }
}

fn check_vector(vector: &[f64]) -> Result<()> {
    if let Some(position) = vector.iter().position(|v| !v.is_finite()) {
        return Err(Error::InvalidVector(format!(
            "component {} is not finite ({})",
            position, vector[position]
        )));
    }
    Ok(())
}

/// The cube containing `vector`
pub fn central_cube(vector: &[f64], params: &Params) -> Result<Cube> {
    params.validate()?;
    check_vector(vector)?;

    Ok(Cube(
        vector.iter().map(|&v| bucket_index(v, params)).collect(),
    ))
}

/// Every cube reachable by moving each component of `vector` by at most
/// `epsilon`.
///
/// Cubes come out in lexicographic order of their indices. The central
/// cube is always a member, and with a zero tolerance it is the only one.
/// Sets larger than [`MAX_CUBE_SET_LEN`] are refused with
/// [`Error::SetTooLarge`] before anything is allocated.
pub fn cube_set(vector: &[f64], params: &Params) -> Result<Vec<Cube>> {
    params.validate()?;
    check_vector(vector)?;

    let eps = params.epsilon();
    let ranges: Vec<(usize, usize)> = vector
        .iter()
        .map(|&v| (bucket_index(v - eps, params), bucket_index(v + eps, params)))
        .collect();

    let len = ranges
        .iter()
        .try_fold(1usize, |len, (low, high)| len.checked_mul(high - low + 1))
        .unwrap_or(usize::MAX);
    if len > MAX_CUBE_SET_LEN {
        return Err(Error::SetTooLarge {
            len,
            limit: MAX_CUBE_SET_LEN,
        });
    }

    let mut set: Vec<Vec<usize>> = vec![Vec::with_capacity(vector.len())];

    for &(low, high) in &ranges {
        let mut next = Vec::with_capacity(set.len() * (high - low + 1));
        for prefix in &set {
            for index in low..=high {
                let mut cube = prefix.clone();
                cube.push(index);
                next.push(cube);
            }
        }
        set = next;
    }

    Ok(set.into_iter().map(Cube).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(epsilon_percent: f64, num_buckets: usize) -> Params {
        Params::for_luma(epsilon_percent, num_buckets)
    }

    #[test]
    fn test_bucket_index_clamps() {
        let p = params(0.0, 4);
        assert_eq!(bucket_index(-10.0, &p), 0);
        assert_eq!(bucket_index(0.0, &p), 0);
        assert_eq!(bucket_index(63.0, &p), 0);
        assert_eq!(bucket_index(64.0, &p), 1);
        assert_eq!(bucket_index(254.9, &p), 3);
        assert_eq!(bucket_index(255.0, &p), 3);
        assert_eq!(bucket_index(400.0, &p), 3);
    }

    #[test]
    fn test_central_cube() {
        let cube = central_cube(&[10.0, 100.0, 200.0], &params(0.01, 4)).unwrap();
        assert_eq!(cube.as_slice(), &[0, 1, 3]);
        assert_eq!(cube.dims(), 3);
    }

    #[test]
    fn test_cube_set_zero_epsilon_is_central() {
        let p = params(0.0, 4);
        let vector = [63.75, 10.0, 191.25];
        let set = cube_set(&vector, &p).unwrap();
        assert_eq!(set, vec![central_cube(&vector, &p).unwrap()]);
    }

    #[test]
    fn test_cube_set_near_boundary() {
        // Width 63.75, epsilon 2.55: 62.0 sits near the 0|1 boundary,
        // 100.0 is well inside bucket 1.
        let p = params(0.01, 4);
        let set = cube_set(&[62.0, 100.0], &p).unwrap();
        let indices: Vec<&[usize]> = set.iter().map(|c| c.as_slice()).collect();
        assert_eq!(indices, vec![&[0, 1][..], &[1, 1][..]]);
    }

    #[test]
    fn test_cube_set_product_order() {
        let p = params(0.01, 4);
        let set = cube_set(&[62.0, 65.0], &p).unwrap();
        let indices: Vec<Vec<usize>> = set.iter().map(|c| c.as_slice().to_vec()).collect();
        assert_eq!(
            indices,
            vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]
        );
    }

    #[test]
    fn test_cube_set_contains_central() {
        let p = params(0.02, 7);
        let vector = [0.0, 36.0, 37.0, 128.0, 255.0];
        let central = central_cube(&vector, &p).unwrap();
        assert!(cube_set(&vector, &p).unwrap().contains(&central));
    }

    #[test]
    fn test_invalid_params() {
        assert!(matches!(
            central_cube(&[1.0], &params(0.01, 0)),
            Err(Error::InvalidParams(_))
        ));
        assert!(matches!(
            cube_set(&[1.0], &params(-0.5, 4)),
            Err(Error::InvalidParams(_))
        ));
        let inverted = Params {
            min: 10.0,
            max: 0.0,
            epsilon_percent: 0.0,
            num_buckets: 4,
        };
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn test_cube_set_one_bucket_tolerance_is_bounded() {
        // Tolerance equal to a bucket width: at most 3 buckets per axis.
        let p = params(1.0 / 8.0, 8);
        let vector = [100.0; 9];
        let set = cube_set(&vector, &p).unwrap();
        assert!(set.len() <= 3usize.pow(9));
        assert!(set.contains(&central_cube(&vector, &p).unwrap()));
    }

    #[test]
    fn test_cube_set_too_large() {
        // Width ~7.97, epsilon 25.5: buckets 12..=19 on every axis, 8^9 cubes.
        match cube_set(&[128.0; 9], &params(0.10, 32)) {
            Err(Error::SetTooLarge { len, limit }) => {
                assert_eq!(len, 8usize.pow(9));
                assert_eq!(limit, MAX_CUBE_SET_LEN);
            }
            other => panic!("expected SetTooLarge, got {:?}", other.map(|s| s.len())),
        }
    }

    #[test]
    fn test_cube_set_size_overflow_is_refused() {
        let vector = vec![128.0; 64];
        let result = cube_set(&vector, &params(1.0, 1000));
        assert!(matches!(
            result,
            Err(Error::SetTooLarge { len: usize::MAX, .. })
        ));
    }

    #[test]
    fn test_non_finite_vector() {
        let result = cube_set(&[1.0, f64::NAN], &params(0.01, 4));
        assert!(matches!(result, Err(Error::InvalidVector(_))));
    }

    #[test]
    fn test_positional_hash_is_base_n() {
        let cube = Cube::from_indices(vec![1, 2, 3]);
        assert_eq!(cube.positional_hash(10).unwrap(), 123);
        assert_eq!(cube.positional_hash(4).unwrap(), 16 + 2 * 4 + 3);
    }

    #[test]
    fn test_positional_hash_overflow() {
        let cube = Cube::from_indices(vec![9; 20]);
        assert!(matches!(
            cube.positional_hash(10),
            Err(Error::HashOverflow { num_buckets: 10, dims: 20 })
        ));
    }

    #[test]
    fn test_fnv1a_known_value() {
        // FNV-1a of eight zero bytes.
        let cube = Cube::from_indices(vec![0]);
        let mut expected = FNV_OFFSET_BASIS;
        for _ in 0..8 {
            expected = expected.wrapping_mul(FNV_PRIME);
        }
        assert_eq!(cube.fnv1a_hash(), expected);
        assert_ne!(cube.fnv1a_hash(), Cube::from_indices(vec![1]).fnv1a_hash());
    }
}
