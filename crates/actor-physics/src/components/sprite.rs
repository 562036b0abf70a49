/// Visual state the collision kernel reads to project an actor into mask space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpriteState {
    /// Rotation in radians around the hotspot.
    pub rotation: f32,
    /// Frame index relative to the active animation.
    pub current_frame: usize,
    /// Draw layer, carried through activation.
    pub layer: u16,
    /// Animation playback halted (set while frozen).
    pub anim_paused: bool,
}

impl SpriteState {
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_frame(mut self, current_frame: usize) -> Self {
        self.current_frame = current_frame;
        self
    }

    /// Whether the rotation exceeds `epsilon`, so the rotated collision paths apply.
    pub fn is_rotated(&self, epsilon: f32) -> bool {
        self.rotation.abs() > epsilon
    }
}
