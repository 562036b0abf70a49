use crate::components::actor::{Actor, ActorBody};
use crate::core::level::{TileCollisionParams, TileDestructType};

/// Per-kind reactions to movement and collision events.
///
/// Every method has a no-op default. Reactions may change the actor's own
/// state (speed, forces, health, flags) but never move it.
pub trait ActorBehavior {
    /// Tile rules for this frame's movement. Default: destroy nothing,
    /// one-way platforms block while not moving up.
    fn tile_params(&self, body: &ActorBody) -> TileCollisionParams {
        TileCollisionParams::new(TileDestructType::NONE, body.speed.y >= 0.0)
    }

    /// Landed on something, or struck it while moving down.
    fn on_hit_floor(&mut self, _body: &mut ActorBody, _time_mult: f32) {}

    fn on_hit_ceiling(&mut self, _body: &mut ActorBody, _time_mult: f32) {}

    fn on_hit_wall(&mut self, _body: &mut ActorBody, _time_mult: f32) {}

    /// Confirmed overlap with `other`. Return true if the collision was handled.
    fn on_handle_collision(&mut self, _body: &mut ActorBody, _other: &Actor) -> bool {
        false
    }
}

/// Reactions for actors that need none.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBehavior;

impl ActorBehavior for DefaultBehavior {}
