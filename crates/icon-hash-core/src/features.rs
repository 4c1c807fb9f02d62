//! Feature extraction.
//!
//! Reduces an icon to a 9-dimensional luma vector: the inner 9x9 region is
//! split into nine non-overlapping 3x3 macroblocks and each block is
//! replaced by its mean. The outer 1 pixel frame is skipped because it
//! often carries watermarks and padding rather than image content.

use crate::icon::{LumaGrid, ICON_SIZE};
use log::trace;

/// Width of the skipped icon frame
pub const BORDER: usize = 1;

/// Macroblocks along each icon axis
pub const BLOCKS_PER_SIDE: usize = 3;

/// Pixels along each macroblock side
pub const BLOCK_SIZE: usize = 3;

/// Length of every feature vector
pub const FEATURE_LEN: usize = BLOCKS_PER_SIDE * BLOCKS_PER_SIDE;

const BLOCK_PIXELS: f64 = (BLOCK_SIZE * BLOCK_SIZE) as f64;

// Frame plus blocks must tile the icon exactly.
const _: () = assert!(2 * BORDER + BLOCKS_PER_SIDE * BLOCK_SIZE == ICON_SIZE);

/// Mean luma of each macroblock, row-major over block position `(i, j)`
pub type FeatureVector = [f64; FEATURE_LEN];

/// Compute the macroblock luma vector of an icon.
///
/// Element `i * 3 + j` is the mean of the pixels at
/// `(1 + 3i + m, 1 + 3j + n)` for `m, n` in `0..3`.
pub fn extract_features<G: LumaGrid + ?Sized>(icon: &G) -> FeatureVector {
    let mut vector = [0.0; FEATURE_LEN];

    for i in 0..BLOCKS_PER_SIDE {
        for j in 0..BLOCKS_PER_SIDE {
            let mut sum = 0.0;
            for m in 0..BLOCK_SIZE {
                for n in 0..BLOCK_SIZE {
                    sum += icon.luma(
                        BORDER + BLOCK_SIZE * i + m,
                        BORDER + BLOCK_SIZE * j + n,
                    );
                }
            }
            vector[i * BLOCKS_PER_SIDE + j] = sum / BLOCK_PIXELS;
        }
    }

    trace!("Extracted luma vector: {:?}", vector);
    vector
}
