use bitflags::bitflags;

bitflags! {
    /// Boolean state carried by every actor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ActorState: u32 {
        /// Set once activation has finished.
        const INITIALIZED = 0x0000_0100;
        const IS_INVULNERABLE = 0x0000_0200;
        /// Standing on something; movement uses slope-following.
        const CAN_JUMP = 0x0000_0400;
        const CAN_BE_FROZEN = 0x0000_0800;
        const IS_FACING_LEFT = 0x0000_1000;

        /// Collide with tiles.
        const COLLIDE_WITH_TILESET = 0x0001_0000;
        /// Collide with other non-solid actors (collision reactions fire).
        const COLLIDE_WITH_OTHER_ACTORS = 0x0002_0000;
        /// Blocked by actors flagged `IS_SOLID_OBJECT`.
        const COLLIDE_WITH_SOLID_OBJECTS = 0x0004_0000;
        /// Never enters the broad phase; movement does not mark it dirty.
        const FORCE_DISABLE_COLLISIONS = 0x0008_0000;

        /// Position or visuals changed; outer AABB must be resynced.
        const IS_DIRTY = 0x0010_0000;
        /// Removed at the end of the frame.
        const IS_DESTROYED = 0x0020_0000;

        const APPLY_GRAVITATION = 0x0040_0000;
        const IS_SOLID_OBJECT = 0x0080_0000;
        /// Hitbox-only collisions, no mask sampling.
        const SKIP_PER_PIXEL_COLLISIONS = 0x0100_0000;

        /// Tall hitboxes test only their feet (and head while moving up) against tiles.
        const COLLIDE_WITH_TILESET_REDUCED = 0x0200_0000;
        /// Solid objects block only when this actor is above their center.
        const COLLIDE_WITH_SOLID_OBJECTS_BELOW = 0x0400_0000;

        /// Flags a caller may pass through activation details.
        const INSTANTIATION_FLAGS = Self::IS_INVULNERABLE.bits()
            | Self::IS_FACING_LEFT.bits()
            | Self::SKIP_PER_PIXEL_COLLISIONS.bits();
    }
}

bitflags! {
    /// How a [`MoveRequest`](crate::core::movement::MoveRequest) target is interpreted.
    ///
    /// Without `RELATIVE` the target is an absolute position.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MoveType: u8 {
        const RELATIVE = 0x01;
        /// Commit without consulting the level.
        const FORCE = 0x02;
    }
}

impl MoveType {
    pub const ABSOLUTE: MoveType = MoveType::empty();
}
