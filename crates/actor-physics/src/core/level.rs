//! Interface to static level geometry and the surrounding world.
//!
//! The kernel never looks at tiles or other actors directly. Every candidate
//! position is validated through [`LevelQuery`], which may also consume
//! destructible tiles as a side effect.

use bitflags::bitflags;

use crate::api::types::ActorHandle;
use crate::components::aabb::Aabb;
use crate::components::actor::ActorBody;

bitflags! {
    /// Which destructible tiles a query may consume.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TileDestructType: u8 {
        const WEAPON = 0x01;
        const SPEED = 0x02;
        const COLLAPSE = 0x04;
        const SPECIAL = 0x08;
        /// Pass through solid tiles while still consuming destructibles.
        const IGNORE_SOLID_TILES = 0x10;
    }
}

impl TileDestructType {
    pub const NONE: TileDestructType = TileDestructType::empty();
}

/// Scratch state threaded through every tile query of one movement step.
///
/// Weapon strength is spent as tiles are destroyed, so one shot loses
/// strength across all the tiles it breaks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TileCollisionParams {
    pub destruct_type: TileDestructType,
    /// Moving down: one-way platforms block.
    pub downwards: bool,
    /// Weapon index tested against a tile's weapon mask.
    pub used_weapon: u8,
    pub weapon_strength: i32,
    /// Speed compared against speed-gated tiles.
    pub speed: f32,
    pub tiles_destroyed: u32,
}

impl TileCollisionParams {
    pub fn new(destruct_type: TileDestructType, downwards: bool) -> Self {
        Self {
            destruct_type,
            downwards,
            ..Self::default()
        }
    }

    /// Params for a weapon shot of the given type and strength.
    pub fn weapon(used_weapon: u8, weapon_strength: i32, downwards: bool) -> Self {
        Self {
            destruct_type: TileDestructType::WEAPON,
            downwards,
            used_weapon,
            weapon_strength,
            ..Self::default()
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }
}

/// Climbable surface under a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuspendType {
    #[default]
    None,
    Vine,
    Hook,
    SwingingVine,
}

/// What stopped a candidate position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Obstruction {
    Tiles,
    Solid(ActorHandle),
}

/// Everything the kernel asks of the level.
pub trait LevelQuery {
    /// First thing blocking `aabb` for `actor`, or `None` when the box is free.
    /// May consume destructible tiles according to `params`.
    fn find_obstruction(
        &mut self,
        actor: &ActorBody,
        aabb: &Aabb,
        params: &mut TileCollisionParams,
    ) -> Option<Obstruction>;

    fn is_position_empty(&mut self, actor: &ActorBody, aabb: &Aabb, params: &mut TileCollisionParams) -> bool {
        self.find_obstruction(actor, aabb, params).is_none()
    }

    /// Read-only tile probe. Never destroys anything.
    fn is_tile_empty(&self, aabb: &Aabb, params: &TileCollisionParams) -> bool;

    fn tile_suspend_state(&self, _x: f32, _y: f32) -> SuspendType {
        SuspendType::None
    }

    fn gravity(&self) -> f32;

    /// Y of the liquid surface. Positions at or below it are submerged.
    fn water_level(&self) -> f32 {
        f32::MAX
    }

    fn is_reforged(&self) -> bool {
        true
    }
}
