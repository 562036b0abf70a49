use glam::Vec2;

use crate::components::actor::ActorBody;
use crate::components::state::MoveType;
use crate::core::level::{LevelQuery, TileCollisionParams, TileDestructType};

/// A single attempt to relocate an actor.
#[derive(Debug)]
pub struct MoveRequest<'a> {
    /// Delta for relative moves, destination otherwise.
    pub target: Vec2,
    pub move_type: MoveType,
    /// Tile rules to validate against. Without them nothing is destroyed and
    /// one-way platforms block unless the actor is moving up.
    pub params: Option<&'a mut TileCollisionParams>,
}

impl<'a> MoveRequest<'a> {
    pub fn relative(delta: Vec2) -> Self {
        Self {
            target: delta,
            move_type: MoveType::RELATIVE,
            params: None,
        }
    }

    pub fn absolute(pos: Vec2) -> Self {
        Self {
            target: pos,
            move_type: MoveType::ABSOLUTE,
            params: None,
        }
    }

    /// Commit without asking the level.
    pub fn forced(mut self) -> Self {
        self.move_type |= MoveType::FORCE;
        self
    }

    pub fn with_params(mut self, params: &'a mut TileCollisionParams) -> Self {
        self.params = Some(params);
        self
    }
}

impl ActorBody {
    /// Move to the requested position if the level allows it.
    ///
    /// Position and hitbox are committed together or not at all. A zero
    /// relative delta succeeds without consulting the level.
    pub fn move_instantly<L: LevelQuery + ?Sized>(&mut self, request: MoveRequest<'_>, level: &mut L) -> bool {
        let (new_pos, aabb) = if request.move_type.contains(MoveType::RELATIVE) {
            if request.target == Vec2::ZERO {
                return true;
            }
            (self.pos + request.target, self.aabb_inner.translated(request.target))
        } else {
            (request.target, self.aabb_inner.translated(request.target - self.pos))
        };

        let free = request.move_type.contains(MoveType::FORCE)
            || match request.params {
                Some(params) => level.is_position_empty(self, &aabb, params),
                None => {
                    let mut params = TileCollisionParams::new(TileDestructType::NONE, self.speed.y >= 0.0);
                    level.is_position_empty(self, &aabb, &mut params)
                }
            };

        if free {
            self.aabb_inner = aabb;
            self.pos = new_pos;
            self.mark_dirty();
        }
        free
    }
}
