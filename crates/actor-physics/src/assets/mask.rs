//! Per-pixel alpha masks used by the narrow phase.
//!
//! A mask covers a whole sprite sheet laid out as a grid of equally sized
//! frames. Frame `n` lives at column `n % columns`, row `n / columns`.

use bytemuck::{Pod, Zeroable};
use glam::IVec2;

use crate::assets::error::AssetError;

/// One RGBA8 texel as decoded from a sprite sheet.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Immutable alpha bitmap for a sprite sheet, one byte per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionMask {
    frame_dimensions: IVec2,
    frame_configuration: IVec2,
    alpha: Vec<u8>,
}

impl CollisionMask {
    /// Build from a row-major alpha buffer covering the whole frame grid.
    pub fn from_alpha(
        frame_dimensions: IVec2,
        frame_configuration: IVec2,
        alpha: Vec<u8>,
    ) -> Result<Self, AssetError> {
        let expected = sheet_pixels(frame_dimensions, frame_configuration)?;
        if alpha.len() != expected {
            return Err(AssetError::MaskSize {
                expected,
                actual: alpha.len(),
            });
        }
        Ok(Self {
            frame_dimensions,
            frame_configuration,
            alpha,
        })
    }

    /// Build from decoded RGBA8 sheet bytes, keeping only the alpha channel.
    pub fn from_rgba8(
        frame_dimensions: IVec2,
        frame_configuration: IVec2,
        bytes: &[u8],
    ) -> Result<Self, AssetError> {
        let expected = sheet_pixels(frame_dimensions, frame_configuration)?;
        let texels: &[Rgba8] = bytemuck::try_cast_slice(bytes).map_err(|_| AssetError::MaskSize {
            expected: expected * 4,
            actual: bytes.len(),
        })?;
        let alpha = texels.iter().map(|t| t.a).collect();
        Self::from_alpha(frame_dimensions, frame_configuration, alpha)
    }

    /// Fully opaque mask, handy for box-shaped sprites.
    pub fn opaque(frame_dimensions: IVec2, frame_configuration: IVec2) -> Result<Self, AssetError> {
        let len = sheet_pixels(frame_dimensions, frame_configuration)?;
        Self::from_alpha(frame_dimensions, frame_configuration, vec![u8::MAX; len])
    }

    pub fn frame_dimensions(&self) -> IVec2 {
        self.frame_dimensions
    }

    pub fn frame_configuration(&self) -> IVec2 {
        self.frame_configuration
    }

    /// Number of frames in the grid.
    pub fn frame_count(&self) -> usize {
        (self.frame_configuration.x * self.frame_configuration.y) as usize
    }

    /// Row length of the whole sheet in pixels.
    pub fn stride(&self) -> i32 {
        self.frame_configuration.x * self.frame_dimensions.x
    }

    /// Top-left pixel of `frame` within the sheet.
    pub fn frame_origin(&self, frame: usize) -> IVec2 {
        let columns = self.frame_configuration.x.max(1) as usize;
        IVec2::new(
            (frame % columns) as i32 * self.frame_dimensions.x,
            (frame / columns) as i32 * self.frame_dimensions.y,
        )
    }

    /// Alpha at frame-local `(x, y)`. Samples outside the frame read as transparent.
    pub fn alpha(&self, frame: usize, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= self.frame_dimensions.x || y >= self.frame_dimensions.y {
            return 0;
        }
        let origin = self.frame_origin(frame);
        let index = (origin.y + y) as usize * self.stride() as usize + (origin.x + x) as usize;
        self.alpha.get(index).copied().unwrap_or(0)
    }

    /// Whether the frame-local sample is solid for collision purposes.
    pub fn is_solid(&self, frame: usize, x: i32, y: i32, threshold: u8) -> bool {
        self.alpha(frame, x, y) > threshold
    }
}

fn sheet_pixels(frame_dimensions: IVec2, frame_configuration: IVec2) -> Result<usize, AssetError> {
    if frame_dimensions.cmple(IVec2::ZERO).any() || frame_configuration.cmple(IVec2::ZERO).any() {
        return Err(AssetError::InvalidGeometry {
            frame_dimensions,
            frame_configuration,
        });
    }
    let size = frame_dimensions * frame_configuration;
    Ok(size.x as usize * size.y as usize)
}
