//! Fixtures shared by the kernel's unit tests.

use std::sync::Arc;

use glam::{IVec2, Vec2};

use crate::api::behavior::ActorBehavior;
use crate::assets::mask::CollisionMask;
use crate::assets::registry::{ActorMetadata, GraphicBase, GraphicResource};
use crate::components::aabb::Aabb;
use crate::components::actor::{ActivationDetails, ActorBody};
use crate::core::level::{LevelQuery, Obstruction, TileCollisionParams, TileDestructType};

/// Level made of solid boxes. Counts queries and spends one weapon strength per query.
pub(crate) struct BlockLevel {
    pub blocks: Vec<Aabb>,
    pub gravity: f32,
    pub water_level: f32,
    pub queries: usize,
}

impl BlockLevel {
    pub fn open() -> Self {
        Self::with_blocks(Vec::new())
    }

    pub fn with_blocks(blocks: Vec<Aabb>) -> Self {
        Self {
            blocks,
            gravity: 0.0,
            water_level: f32::MAX,
            queries: 0,
        }
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Open level with a floor whose top edge is at `y`.
    pub fn floor_at(y: f32) -> Self {
        Self::with_blocks(vec![Aabb::new(-1000.0, y, 1000.0, y + 100.0)])
    }
}

impl LevelQuery for BlockLevel {
    fn find_obstruction(
        &mut self,
        _actor: &ActorBody,
        aabb: &Aabb,
        params: &mut TileCollisionParams,
    ) -> Option<Obstruction> {
        self.queries += 1;
        if params.destruct_type.contains(TileDestructType::WEAPON) && params.weapon_strength > 0 {
            params.weapon_strength -= 1;
        }
        if self.is_tile_empty(aabb, params) {
            None
        } else {
            Some(Obstruction::Tiles)
        }
    }

    fn is_tile_empty(&self, aabb: &Aabb, _params: &TileCollisionParams) -> bool {
        !self.blocks.iter().any(|block| block.overlaps(aabb))
    }

    fn gravity(&self) -> f32 {
        self.gravity
    }

    fn water_level(&self) -> f32 {
        self.water_level
    }
}

/// Metadata with one fully opaque animation named "idle". The hotspot sits at
/// the bottom center of the frame and the hitbox matches the frame.
pub(crate) fn box_metadata(size: IVec2) -> Arc<ActorMetadata> {
    let base = Arc::new(GraphicBase {
        hotspot: IVec2::new(size.x / 2, size.y),
        coldspot: None,
        mask: CollisionMask::opaque(size, IVec2::ONE).unwrap(),
    });
    Arc::new(ActorMetadata::new(size).with_graphic("idle", GraphicResource::new(base, 0, 1)))
}

/// Activated 16×16 box actor whose position is its bottom center.
pub(crate) fn spawn_box(pos: Vec2) -> ActorBody {
    spawn_sized(pos, IVec2::new(16, 16))
}

pub(crate) fn spawn_sized(pos: Vec2, size: IVec2) -> ActorBody {
    let mut body = ActorBody::new().with_metadata(box_metadata(size));
    body.set_animation("idle");
    body.activate(ActivationDetails::at(pos));
    body
}

/// Counts reaction callbacks.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub floor: u32,
    pub ceiling: u32,
    pub wall: u32,
    pub collisions: u32,
}

impl ActorBehavior for Recorder {
    fn on_hit_floor(&mut self, _body: &mut ActorBody, _time_mult: f32) {
        self.floor += 1;
    }

    fn on_hit_ceiling(&mut self, _body: &mut ActorBody, _time_mult: f32) {
        self.ceiling += 1;
    }

    fn on_hit_wall(&mut self, _body: &mut ActorBody, _time_mult: f32) {
        self.wall += 1;
    }

    fn on_handle_collision(&mut self, _body: &mut ActorBody, _other: &crate::components::actor::Actor) -> bool {
        self.collisions += 1;
        false
    }
}
