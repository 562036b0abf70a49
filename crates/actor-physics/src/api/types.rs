/// Stable reference to an actor slot in a [`Scene`](crate::core::scene::Scene).
///
/// The generation changes every time a slot is reused, so a stale handle
/// never resolves to a different actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorHandle {
    pub index: u32,
    pub generation: u32,
}

impl ActorHandle {
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

/// Two actors whose collision was confirmed this frame. `a` has the lower slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub a: ActorHandle,
    pub b: ActorHandle,
}
