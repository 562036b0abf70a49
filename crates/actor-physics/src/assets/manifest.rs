use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Collision-relevant metadata for one actor kind.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataDescriptor {
    /// Hitbox width and height in world units.
    pub bounding_box: [i32; 2],
    /// Named animations: name → sheet geometry.
    #[serde(default)]
    pub graphics: HashMap<String, GraphicDescriptor>,
}

/// Describes one animation inside a sprite sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphicDescriptor {
    /// Key of the sprite sheet whose alpha channel becomes the collision mask.
    pub sheet: String,
    /// Size of a single frame in pixels.
    pub frame_dimensions: [i32; 2],
    /// Columns and rows of the frame grid.
    pub frame_configuration: [i32; 2],
    /// Pixel inside the frame that sits on the actor position.
    pub hotspot: [i32; 2],
    /// Optional anchor for the bottom-center of the hitbox.
    #[serde(default)]
    pub coldspot: Option<[i32; 2]>,
    /// First frame of this animation within the sheet.
    #[serde(default)]
    pub frame_offset: usize,
    /// Number of frames (default: 1).
    #[serde(default = "default_frame_count")]
    pub frame_count: usize,
}

fn default_frame_count() -> usize {
    1
}

impl MetadataDescriptor {
    /// Parse a descriptor from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
