#![allow(dead_code)]

use icon_hash_core::{Icon, ICON_SIZE};

/// Luma samples of the reference icon, laid out `x * ICON_SIZE + y`
pub const FIXTURE_LUMA: [f64; ICON_SIZE * ICON_SIZE] = [
    47., 14., 44., 4., 41., 35., 28., 21., 35., 14., 30.,
    27., 6., 20., 26., 9., 45., 47., 43., 43., 0., 18.,
    3., 47., 44., 5., 28., 2., 21., 4., 18., 8., 8.,
    13., 20., 25., 47., 7., 22., 40., 50., 32., 35., 16.,
    13., 13., 15., 36., 29., 37., 42., 9., 3., 5., 45.,
    22., 26., 14., 50., 49., 10., 48., 4., 21., 7., 45.,
    41., 48., 37., 2., 49., 3., 48., 47., 12., 46., 37.,
    31., 42., 46., 42., 21., 28., 19., 29., 19., 17., 18.,
    0., 20., 6., 14., 48., 21., 21., 13., 33., 25., 50.,
    3., 11., 27., 1., 6., 32., 31., 25., 0., 12., 25.,
    50., 35., 14., 3., 11., 19., 37., 27., 42., 19., 30.,
];

/// Macroblock means of the reference icon
pub const FIXTURE_FEATURES: [f64; 9] = [
    26.666666666666664, 24.555555555555554, 25.888888888888886,
    26.777777777777775, 35.0, 17.11111111111111,
    23.22222222222222, 25.22222222222222, 19.22222222222222,
];

/// The reference icon
pub fn fixture_icon() -> Icon {
    Icon::from_fn(|x, y| FIXTURE_LUMA[x * ICON_SIZE + y])
}

/// Icon whose nine macroblocks are filled with the given constant values,
/// with a noisy frame that must not influence the features
pub fn block_icon(blocks: &[f64; 9]) -> Icon {
    Icon::from_fn(|x, y| {
        if x == 0 || y == 0 || x == ICON_SIZE - 1 || y == ICON_SIZE - 1 {
            return ((x * 37 + y * 11) % 256) as f64;
        }
        let i = (x - 1) / 3;
        let j = (y - 1) / 3;
        blocks[i * 3 + j]
    })
}
