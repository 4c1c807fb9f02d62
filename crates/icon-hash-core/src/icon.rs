//! Icon access.
//!
//! An icon is a fixed 11x11 grid of primary-channel (luma) samples in
//! `[0, 255]`. Producing icons from arbitrary images (decoding, resizing)
//! belongs to whichever icon module the caller uses; this module only
//! defines the access seam, [`LumaGrid`], and a plain owned grid, [`Icon`].

use crate::error::{Error, Result};
use image::{GrayImage, RgbImage};
use serde::{Deserialize, Serialize};

/// Side of the square icon grid
pub const ICON_SIZE: usize = 11;

const ICON_PIXELS: usize = ICON_SIZE * ICON_SIZE;

/// Read access to the primary channel of an icon-sized pixel grid.
///
/// Implementations must answer for every `x, y` in `0..ICON_SIZE`.
pub trait LumaGrid {
    fn luma(&self, x: usize, y: usize) -> f64;
}

/// Owned 11x11 luma grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawIcon")]
pub struct Icon {
    /// Luma samples laid out `x * ICON_SIZE + y`
    luma: Vec<f64>,
}

#[derive(Deserialize)]
struct RawIcon {
    luma: Vec<f64>,
}

impl TryFrom<RawIcon> for Icon {
    type Error = Error;

    fn try_from(raw: RawIcon) -> Result<Self> {
        Icon::from_luma(&raw.luma)
    }
}

impl Icon {
    /// An all-black icon
    pub fn empty() -> Self {
        Self {
            luma: vec![0.0; ICON_PIXELS],
        }
    }

    /// Build an icon by evaluating `f(x, y)` at every coordinate
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut icon = Self::empty();
        for x in 0..ICON_SIZE {
            for y in 0..ICON_SIZE {
                icon.set(x, y, f(x, y));
            }
        }
        icon
    }

    /// Build an icon from 121 samples laid out `x * ICON_SIZE + y`
    pub fn from_luma(values: &[f64]) -> Result<Self> {
        if values.len() != ICON_PIXELS {
            return Err(Error::InvalidIcon {
                samples: values.len(),
            });
        }
        Ok(Self {
            luma: values.to_vec(),
        })
    }

    /// Overwrite the luma sample at `(x, y)`
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        assert!(x < ICON_SIZE && y < ICON_SIZE, "icon coordinate out of range");
        self.luma[x * ICON_SIZE + y] = value;
    }

    /// Raw samples, `x * ICON_SIZE + y`
    pub fn as_slice(&self) -> &[f64] {
        &self.luma
    }
}

impl Default for Icon {
    fn default() -> Self {
        Self::empty()
    }
}

impl LumaGrid for Icon {
    #[inline]
    fn luma(&self, x: usize, y: usize) -> f64 {
        assert!(x < ICON_SIZE && y < ICON_SIZE, "icon coordinate out of range");
        self.luma[x * ICON_SIZE + y]
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width as usize != ICON_SIZE || height as usize != ICON_SIZE {
        return Err(Error::IconSize { width, height });
    }
    Ok(())
}

impl TryFrom<&GrayImage> for Icon {
    type Error = Error;

    fn try_from(img: &GrayImage) -> Result<Self> {
        check_dimensions(img.width(), img.height())?;
        Ok(Icon::from_fn(|x, y| img.get_pixel(x as u32, y as u32)[0] as f64))
    }
}

impl TryFrom<&RgbImage> for Icon {
    type Error = Error;

    fn try_from(img: &RgbImage) -> Result<Self> {
        check_dimensions(img.width(), img.height())?;
        Ok(Icon::from_fn(|x, y| {
            let pixel = img.get_pixel(x as u32, y as u32);
            // Grayscale formula: 0.299*R + 0.587*G + 0.114*B
            0.299 * pixel[0] as f64 + 0.587 * pixel[1] as f64 + 0.114 * pixel[2] as f64
        }))
    }
}
