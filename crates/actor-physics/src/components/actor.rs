use std::sync::Arc;

use glam::{IVec2, Vec2};

use crate::api::behavior::ActorBehavior;
use crate::api::types::ActorHandle;
use crate::assets::registry::{ActorMetadata, GraphicResource};
use crate::components::aabb::Aabb;
use crate::components::sprite::SpriteState;
use crate::components::state::ActorState;
use crate::components::tilemap::TILE_SIZE;

/// What a freezing or thawing shot does to actors it touches.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ShotEffect {
    #[default]
    None,
    /// Freeze the target for this many frames.
    Freeze(f32),
    /// Cut any remaining frozen time to at most one frame.
    Thaw,
}

/// Kind of actor, with the payload collision reactions need.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ActorKind {
    #[default]
    Generic,
    Player,
    Enemy,
    Shot {
        owner: Option<ActorHandle>,
        effect: ShotEffect,
    },
    /// Blocks actors that collide with solid objects.
    SolidObject {
        one_way: bool,
    },
}

impl ActorKind {
    pub fn is_shot(&self) -> bool {
        matches!(self, ActorKind::Shot { .. })
    }

    /// One-way solids only block actors moving down.
    pub fn is_one_way(&self) -> bool {
        matches!(self, ActorKind::SolidObject { one_way: true })
    }
}

/// Spawn payload.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActivationDetails {
    pub pos: Vec2,
    pub layer: u16,
    /// Only [`ActorState::INSTANTIATION_FLAGS`] are honored.
    pub state: ActorState,
}

impl ActivationDetails {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            ..Self::default()
        }
    }

    pub fn with_state(mut self, state: ActorState) -> Self {
        self.state = state;
        self
    }
}

/// Physical state of one actor.
///
/// Position and the inner hitbox are only written by the movement resolver
/// and the hitbox routines, so they never disagree.
#[derive(Debug, Clone)]
pub struct ActorBody {
    pub(crate) pos: Vec2,
    pub(crate) aabb_inner: Aabb,
    pub(crate) aabb: Aabb,
    pub speed: Vec2,
    pub external_force: Vec2,
    /// Vertical lift used by jumps and springs.
    pub internal_force_y: f32,
    pub elasticity: f32,
    pub friction: f32,
    pub state: ActorState,
    pub sprite: SpriteState,
    pub(crate) unstuck_cooldown: f32,
    pub(crate) frozen_time_left: f32,
    pub(crate) health: i32,
    pub(crate) max_health: i32,
    origin_tile: IVec2,
    metadata: Option<Arc<ActorMetadata>>,
    current_animation: Option<Arc<GraphicResource>>,
    current_transition: Option<Arc<GraphicResource>>,
    transition_cancellable: bool,
    pub(crate) missing_resource_reported: bool,
}

impl Default for ActorBody {
    fn default() -> Self {
        Self::new()
    }
}

impl ActorBody {
    pub fn new() -> Self {
        Self {
            pos: Vec2::ZERO,
            aabb_inner: Aabb::default(),
            aabb: Aabb::default(),
            speed: Vec2::ZERO,
            external_force: Vec2::ZERO,
            internal_force_y: 0.0,
            elasticity: 0.0,
            friction: 1.5,
            state: ActorState::empty(),
            sprite: SpriteState::default(),
            unstuck_cooldown: 0.0,
            frozen_time_left: 0.0,
            health: 1,
            max_health: 1,
            origin_tile: IVec2::ZERO,
            metadata: None,
            current_animation: None,
            current_transition: None,
            transition_cancellable: false,
            missing_resource_reported: false,
        }
    }

    // -- Builder pattern --

    pub fn with_metadata(mut self, metadata: Arc<ActorMetadata>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_elasticity(mut self, elasticity: f32) -> Self {
        self.elasticity = elasticity;
        self
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self.max_health = health;
        self
    }

    /// Place the actor and reset its flags to the spawn defaults plus any
    /// instantiation flags from `details`. Recomputes both boxes.
    pub fn activate(&mut self, details: ActivationDetails) {
        self.pos = details.pos;
        self.aabb_inner = Aabb::new(details.pos.x, details.pos.y, details.pos.x, details.pos.y);
        self.origin_tile = (details.pos / TILE_SIZE as f32).floor().as_ivec2();
        self.sprite.layer = details.layer;
        self.state = ActorState::CAN_BE_FROZEN
            | ActorState::COLLIDE_WITH_TILESET
            | ActorState::COLLIDE_WITH_OTHER_ACTORS
            | ActorState::APPLY_GRAVITATION
            | (details.state & ActorState::INSTANTIATION_FLAGS);
        self.on_update_hitbox();
        self.mark_dirty();
        self.state |= ActorState::INITIALIZED;
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Tight gameplay hitbox.
    pub fn aabb_inner(&self) -> Aabb {
        self.aabb_inner
    }

    /// Loose, rotation-aware box used by the broad phase.
    pub fn aabb(&self) -> Aabb {
        self.aabb
    }

    /// Tile the actor was activated in.
    pub fn origin_tile(&self) -> IVec2 {
        self.origin_tile
    }

    pub fn metadata(&self) -> Option<&Arc<ActorMetadata>> {
        self.metadata.as_ref()
    }

    pub fn is_facing_left(&self) -> bool {
        self.state.contains(ActorState::IS_FACING_LEFT)
    }

    pub fn set_facing_left(&mut self, value: bool) {
        if self.is_facing_left() == value {
            return;
        }
        self.state.set(ActorState::IS_FACING_LEFT, value);
        self.mark_dirty();
    }

    pub fn can_jump(&self) -> bool {
        self.state.contains(ActorState::CAN_JUMP)
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.contains(ActorState::IS_DESTROYED)
    }

    /// Whether the narrow phase samples this actor's mask.
    pub fn is_per_pixel(&self) -> bool {
        !self.state.contains(ActorState::SKIP_PER_PIXEL_COLLISIONS)
    }

    /// Flag the outer box for resync, unless collisions are force-disabled.
    pub(crate) fn mark_dirty(&mut self) {
        if !self.state.contains(ActorState::FORCE_DISABLE_COLLISIONS) {
            self.state |= ActorState::IS_DIRTY;
        }
    }

    pub fn add_external_force(&mut self, x: f32, y: f32) {
        self.external_force += Vec2::new(x, y);
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    /// Subtract `amount` health. Returns true if the actor perished.
    pub fn decrease_health(&mut self, amount: i32) -> bool {
        if amount == 0 {
            return false;
        }
        self.health = if amount > self.health { 0 } else { self.health - amount };
        if self.health <= 0 {
            self.perish();
            return true;
        }
        false
    }

    fn perish(&mut self) {
        log::debug!("actor at ({}, {}) perished", self.pos.x, self.pos.y);
        self.state |= ActorState::IS_DESTROYED | ActorState::SKIP_PER_PIXEL_COLLISIONS;
    }

    pub fn frozen_time_left(&self) -> f32 {
        self.frozen_time_left
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen_time_left > 0.0
    }

    /// Freeze for `duration` frames.
    pub fn freeze(&mut self, duration: f32) {
        self.frozen_time_left = duration;
        self.sprite.anim_paused = true;
    }

    /// Leave at most one frame of frozen time.
    pub fn thaw(&mut self) {
        self.frozen_time_left = self.frozen_time_left.min(1.0);
    }

    /// Count down frozen time. Playback resumes once it runs out.
    pub fn update_frozen_state(&mut self, time_mult: f32) {
        if self.frozen_time_left <= 0.0 {
            return;
        }
        self.frozen_time_left -= time_mult;
        if self.frozen_time_left <= 0.0 {
            self.sprite.anim_paused = false;
            log::debug!("actor at ({}, {}) thawed", self.pos.x, self.pos.y);
        }
    }

    /// Graphic whose mask collisions sample: the transition if one runs, else the animation.
    pub fn active_resource(&self) -> Option<&Arc<GraphicResource>> {
        self.current_transition.as_ref().or(self.current_animation.as_ref())
    }

    pub fn current_animation(&self) -> Option<&Arc<GraphicResource>> {
        self.current_animation.as_ref()
    }

    /// Sheet frame currently shown, if any graphic is active.
    pub fn sheet_frame(&self) -> Option<usize> {
        self.active_resource()
            .map(|res| res.sheet_frame(self.sprite.current_frame))
    }

    /// Switch to the named animation. Returns false if it does not exist.
    pub fn set_animation(&mut self, name: &str) -> bool {
        let Some(graphic) = self.lookup_graphic(name) else {
            return false;
        };
        if self
            .current_animation
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &graphic))
        {
            return true;
        }
        self.current_animation = Some(graphic);
        if self.current_transition.is_none() {
            self.refresh_animation();
        }
        true
    }

    /// Play the named animation over the current one until cancelled.
    pub fn set_transition(&mut self, name: &str, cancellable: bool) -> bool {
        let Some(graphic) = self.lookup_graphic(name) else {
            return false;
        };
        self.current_transition = Some(graphic);
        self.transition_cancellable = cancellable;
        self.refresh_animation();
        true
    }

    /// End a cancellable transition. Returns false if none was cancelled.
    pub fn cancel_transition(&mut self) -> bool {
        if self.current_transition.is_none() || !self.transition_cancellable {
            return false;
        }
        self.force_cancel_transition();
        true
    }

    pub fn force_cancel_transition(&mut self) {
        if self.current_transition.take().is_some() {
            self.transition_cancellable = false;
            self.refresh_animation();
        }
    }

    pub fn has_transition(&self) -> bool {
        self.current_transition.is_some()
    }

    fn lookup_graphic(&self, name: &str) -> Option<Arc<GraphicResource>> {
        let Some(metadata) = &self.metadata else {
            log::warn!("no metadata loaded, cannot play \"{}\"", name);
            return None;
        };
        let graphic = metadata.graphic(name).cloned();
        if graphic.is_none() {
            log::warn!("animation \"{}\" not found", name);
        }
        graphic
    }

    fn refresh_animation(&mut self) {
        self.sprite.current_frame = 0;
        self.missing_resource_reported = false;
        self.mark_dirty();
    }
}

/// An actor slot in the scene: identity, kind, physical state and reactions.
pub struct Actor {
    pub handle: ActorHandle,
    pub kind: ActorKind,
    pub body: ActorBody,
    pub behavior: Box<dyn ActorBehavior>,
}

impl Actor {
    pub fn new(handle: ActorHandle, kind: ActorKind, body: ActorBody, behavior: Box<dyn ActorBehavior>) -> Self {
        Self {
            handle,
            kind,
            body,
            behavior,
        }
    }
}

impl std::fmt::Debug for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actor")
            .field("handle", &self.handle)
            .field("kind", &self.kind)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}
