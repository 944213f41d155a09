use crate::foundation::core::Argb;
use crate::foundation::error::{StackcompError, StackcompResult};
use crate::source::transparency::float_to_channel_bits;

/// Row-oriented read access to one rendered source, aligned to the output raster.
///
/// Each render worker reads whole rows into buffers it owns, so implementations only need shared
/// (`&self`) access. A failed read aborts the whole render pass.
pub trait PixelSource: Sync {
    /// Raster size as `(width, height)`.
    fn dims(&self) -> (u32, u32);

    /// Copy row `y` into `dst`, which holds exactly `width` samples.
    fn read_row(&self, y: u32, dst: &mut [u32]) -> StackcompResult<()>;
}

/// Owned row-major raster of packed [`Argb`] samples.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgbBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl ArgbBuffer {
    /// Raster filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Argb) -> StackcompResult<Self> {
        let len = pixel_len(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![fill.0; len],
        })
    }

    /// Wrap existing row-major samples.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> StackcompResult<Self> {
        if pixels.len() != pixel_len(width, height)? {
            return Err(StackcompError::validation(format!(
                "expected {}x{} samples, got {}",
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Companion raster carrying one transparency value per pixel.
    pub fn from_alpha_mask(width: u32, height: u32, alpha: &[f32]) -> StackcompResult<Self> {
        let pixels = alpha.iter().copied().map(float_to_channel_bits).collect();
        Self::from_pixels(width, height, pixels)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// All samples, row-major.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Consume the raster and return its samples.
    pub fn into_pixels(self) -> Vec<u32> {
        self.pixels
    }

    /// Sample at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> Option<Argb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize) * (self.width as usize) + (x as usize);
        Some(Argb(self.pixels[i]))
    }

    /// Samples of row `y`.
    pub fn row(&self, y: u32) -> Option<&[u32]> {
        if y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = (y as usize) * w;
        Some(&self.pixels[start..start + w])
    }
}

impl PixelSource for ArgbBuffer {
    fn dims(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn read_row(&self, y: u32, dst: &mut [u32]) -> StackcompResult<()> {
        let row = self.row(y).ok_or_else(|| {
            StackcompError::sample(format!("row {y} outside raster of height {}", self.height))
        })?;
        if dst.len() != row.len() {
            return Err(StackcompError::sample(format!(
                "row buffer holds {} samples, raster width is {}",
                dst.len(),
                row.len()
            )));
        }
        dst.copy_from_slice(row);
        Ok(())
    }
}

fn pixel_len(width: u32, height: u32) -> StackcompResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| StackcompError::validation("raster size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
