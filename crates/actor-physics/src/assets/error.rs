use std::fmt;

use glam::IVec2;

/// Failure while building collision data from asset descriptors.
#[derive(Debug)]
pub enum AssetError {
    /// Descriptor JSON could not be parsed.
    Json(serde_json::Error),
    /// Pixel buffer length does not match the frame grid.
    MaskSize { expected: usize, actual: usize },
    /// Frame size or grid has a non-positive extent.
    InvalidGeometry {
        frame_dimensions: IVec2,
        frame_configuration: IVec2,
    },
    /// A graphic references a sprite sheet that was not supplied.
    MissingSheet(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Json(err) => write!(f, "invalid descriptor: {}", err),
            AssetError::MaskSize { expected, actual } => {
                write!(f, "mask has {} bytes, expected {}", actual, expected)
            }
            AssetError::InvalidGeometry {
                frame_dimensions,
                frame_configuration,
            } => write!(
                f,
                "invalid frame geometry: size {:?}, grid {:?}",
                frame_dimensions, frame_configuration
            ),
            AssetError::MissingSheet(name) => write!(f, "sprite sheet \"{}\" not found", name),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AssetError {
    fn from(err: serde_json::Error) -> Self {
        AssetError::Json(err)
    }
}
