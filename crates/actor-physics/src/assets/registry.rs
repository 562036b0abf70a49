use std::collections::HashMap;
use std::sync::Arc;

use glam::IVec2;

use crate::assets::error::AssetError;
use crate::assets::manifest::{GraphicDescriptor, MetadataDescriptor};
use crate::assets::mask::CollisionMask;

/// Sheet-level geometry shared by every animation cut from the same sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicBase {
    pub hotspot: IVec2,
    pub coldspot: Option<IVec2>,
    pub mask: CollisionMask,
}

/// One animation: a run of frames inside a [`GraphicBase`].
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicResource {
    pub base: Arc<GraphicBase>,
    pub frame_offset: usize,
    pub frame_count: usize,
}

impl GraphicResource {
    pub fn new(base: Arc<GraphicBase>, frame_offset: usize, frame_count: usize) -> Self {
        Self {
            base,
            frame_offset,
            frame_count,
        }
    }

    /// Build from a descriptor and the sheet's alpha channel.
    pub fn from_descriptor(desc: &GraphicDescriptor, alpha: Vec<u8>) -> Result<Self, AssetError> {
        let mask = CollisionMask::from_alpha(
            IVec2::from_array(desc.frame_dimensions),
            IVec2::from_array(desc.frame_configuration),
            alpha,
        )?;
        let base = GraphicBase {
            hotspot: IVec2::from_array(desc.hotspot),
            coldspot: desc.coldspot.map(IVec2::from_array),
            mask,
        };
        Ok(Self::new(Arc::new(base), desc.frame_offset, desc.frame_count.max(1)))
    }

    pub fn frame_dimensions(&self) -> IVec2 {
        self.base.mask.frame_dimensions()
    }

    pub fn hotspot(&self) -> IVec2 {
        self.base.hotspot
    }

    /// Sheet frame sampled for an animation-relative frame index.
    /// Indices past the end clamp to the last frame.
    pub fn sheet_frame(&self, current_frame: usize) -> usize {
        self.frame_offset + current_frame.min(self.frame_count.saturating_sub(1))
    }
}

/// Hitbox size plus named animations for one actor kind.
#[derive(Debug, Clone, Default)]
pub struct ActorMetadata {
    pub bounding_box: IVec2,
    graphics: HashMap<String, Arc<GraphicResource>>,
}

impl ActorMetadata {
    pub fn new(bounding_box: IVec2) -> Self {
        Self {
            bounding_box,
            graphics: HashMap::new(),
        }
    }

    /// Build from a parsed descriptor. `sheet_alpha` supplies the alpha
    /// channel for each sheet key the descriptor references.
    pub fn from_descriptor(
        desc: &MetadataDescriptor,
        mut sheet_alpha: impl FnMut(&str) -> Option<Vec<u8>>,
    ) -> Result<Self, AssetError> {
        let mut metadata = Self::new(IVec2::from_array(desc.bounding_box));
        for (name, graphic) in &desc.graphics {
            let alpha = sheet_alpha(&graphic.sheet)
                .ok_or_else(|| AssetError::MissingSheet(graphic.sheet.clone()))?;
            metadata.insert_graphic(name.clone(), GraphicResource::from_descriptor(graphic, alpha)?);
        }
        Ok(metadata)
    }

    pub fn with_graphic(mut self, name: impl Into<String>, graphic: GraphicResource) -> Self {
        self.insert_graphic(name, graphic);
        self
    }

    pub fn insert_graphic(&mut self, name: impl Into<String>, graphic: GraphicResource) {
        self.graphics.insert(name.into(), Arc::new(graphic));
    }

    /// Look up an animation by name.
    pub fn graphic(&self, name: &str) -> Option<&Arc<GraphicResource>> {
        self.graphics.get(name)
    }
}

/// Registry of shared actor metadata keyed by path.
/// Many actors hold the same `Arc`, so masks are loaded once and read by all.
pub struct MetadataRegistry {
    metadata: HashMap<String, Arc<ActorMetadata>>,
}

impl MetadataRegistry {
    pub fn new() -> Self {
        Self {
            metadata: HashMap::new(),
        }
    }

    /// Register metadata under `path`, replacing any previous entry.
    pub fn insert(&mut self, path: impl Into<String>, metadata: ActorMetadata) -> Arc<ActorMetadata> {
        let metadata = Arc::new(metadata);
        self.metadata.insert(path.into(), Arc::clone(&metadata));
        metadata
    }

    /// Look up metadata by path. Returns None if it has not been loaded yet.
    pub fn get(&self, path: &str) -> Option<Arc<ActorMetadata>> {
        self.metadata.get(path).cloned()
    }
}

impl Default for MetadataRegistry {
    fn default() -> Self {
        Self::new()
    }
}
