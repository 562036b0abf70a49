use crate::api::behavior::ActorBehavior;
use crate::api::types::{ActorHandle, CollisionPair};
use crate::components::aabb::Aabb;
use crate::components::actor::{Actor, ActorBody, ActorKind, ShotEffect};
use crate::components::state::ActorState;
use crate::components::tilemap::TileMap;
use crate::core::config::{Environment, PhysicsConfig};
use crate::core::integrator;
use crate::core::level::{LevelQuery, Obstruction, SuspendType, TileCollisionParams};

/// Tall hitboxes with reduced tileset collision test only these strips.
const REDUCED_MIN_HEIGHT: f32 = 20.0;
const REDUCED_FEET_HEIGHT: f32 = 14.0;
const REDUCED_HEAD_HEIGHT: f32 = 6.0;

struct Slot {
    generation: u32,
    actor: Option<Actor>,
}

/// Actor storage with generational handles.
/// Designed for small-to-medium actor counts (hundreds, not millions).
pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
    config: PhysicsConfig,
}

impl Scene {
    pub fn new(config: PhysicsConfig) -> Self {
        Self::with_capacity(config, 256)
    }

    /// Create a scene with a specific actor capacity.
    pub fn with_capacity(config: PhysicsConfig, capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
            config,
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Add an activated actor. Solid-object kinds get `IS_SOLID_OBJECT`, and
    /// the outer box is computed right away unless collisions are disabled.
    pub fn spawn(&mut self, kind: ActorKind, mut body: ActorBody, behavior: Box<dyn ActorBehavior>) -> ActorHandle {
        if matches!(kind, ActorKind::SolidObject { .. }) {
            body.state |= ActorState::IS_SOLID_OBJECT;
        }
        if !body.state.contains(ActorState::FORCE_DISABLE_COLLISIONS) {
            body.update_aabb(&self.config);
            body.state.remove(ActorState::IS_DIRTY);
        }

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    actor: None,
                });
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        let handle = ActorHandle::new(index, slot.generation);
        slot.actor = Some(Actor::new(handle, kind, body, behavior));
        self.len += 1;
        handle
    }

    /// Remove an actor. Its handle never resolves again.
    pub fn despawn(&mut self, handle: ActorHandle) -> Option<Actor> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation || slot.actor.is_none() {
            return None;
        }
        let actor = slot.actor.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        actor
    }

    pub fn get(&self, handle: ActorHandle) -> Option<&Actor> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)?
            .actor
            .as_ref()
    }

    pub fn get_mut(&mut self, handle: ActorHandle) -> Option<&mut Actor> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)?
            .actor
            .as_mut()
    }

    /// Iterate over live actors in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.slots.iter().filter_map(|slot| slot.actor.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.slots.iter_mut().filter_map(|slot| slot.actor.as_mut())
    }

    /// Number of live actors.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Run one frame: movement, outer-box resync, collision detection and
    /// reactions, then removal of destroyed actors. Returns the confirmed pairs.
    pub fn step(&mut self, tiles: &mut TileMap, env: &Environment, time_mult: f32) -> Vec<CollisionPair> {
        self.update(tiles, env, time_mult);
        self.sync_aabbs();
        let pairs = self.collect_collisions();
        self.dispatch_collisions(&pairs);
        self.remove_destroyed();
        pairs
    }

    /// Integrate every live actor once, in ascending slot order.
    ///
    /// The actor being updated is taken out of its slot, so the level it
    /// queries sees every other actor but never itself.
    pub fn update(&mut self, tiles: &mut TileMap, env: &Environment, time_mult: f32) {
        for index in 0..self.slots.len() {
            let Some(mut actor) = self.slots[index].actor.take() else {
                continue;
            };
            if !actor.body.is_destroyed() {
                let mut level = SceneLevel {
                    tiles: &mut *tiles,
                    env,
                    slots: &self.slots,
                    config: &self.config,
                };
                integrator::update(
                    &mut actor.body,
                    actor.behavior.as_mut(),
                    &mut level,
                    &self.config,
                    time_mult,
                );
            }
            self.slots[index].actor = Some(actor);
        }
    }

    /// Recompute the outer box of every dirty actor and clear the flag.
    pub fn sync_aabbs(&mut self) {
        let config = &self.config;
        for slot in &mut self.slots {
            let Some(actor) = slot.actor.as_mut() else {
                continue;
            };
            let body = &mut actor.body;
            if body.state.contains(ActorState::IS_DIRTY) {
                body.update_aabb(config);
                body.state.remove(ActorState::IS_DIRTY);
            }
        }
    }

    /// Pairs whose outer boxes overlap and whose narrow phase confirms a hit,
    /// ordered by handle.
    pub fn collect_collisions(&self) -> Vec<CollisionPair> {
        let mut candidates: Vec<&Actor> = self.iter().filter(|actor| takes_part(&actor.body)).collect();
        candidates.sort_by(|a, b| a.body.aabb().l.total_cmp(&b.body.aabb().l));

        let mut pairs = Vec::new();
        for (n, first) in candidates.iter().enumerate() {
            let first_box = first.body.aabb();
            for second in &candidates[n + 1..] {
                let second_box = second.body.aabb();
                if second_box.l >= first_box.r {
                    break;
                }
                if !first_box.overlaps(&second_box) {
                    continue;
                }
                let (a, b) = if first.handle < second.handle {
                    (first, second)
                } else {
                    (second, first)
                };
                if a.body.is_colliding_with(&b.body, &self.config) {
                    pairs.push(CollisionPair {
                        a: a.handle,
                        b: b.handle,
                    });
                }
            }
        }
        pairs.sort_by_key(|pair| (pair.a, pair.b));
        pairs
    }

    /// Apply shot effects and give each pair's reactions a chance to run.
    /// The second actor reacts only if the first did not handle the collision.
    pub fn dispatch_collisions(&mut self, pairs: &[CollisionPair]) {
        for pair in pairs {
            let Some((a, b)) = self.pair_mut(pair.a, pair.b) else {
                continue;
            };
            if a.body.is_destroyed() || b.body.is_destroyed() {
                continue;
            }
            apply_shot_effect(a, b);
            apply_shot_effect(b, a);
            if !a.behavior.on_handle_collision(&mut a.body, b) {
                b.behavior.on_handle_collision(&mut b.body, a);
            }
        }
    }

    /// Drop every destroyed actor. Returns how many were removed.
    pub fn remove_destroyed(&mut self) -> usize {
        let destroyed: Vec<ActorHandle> = self
            .iter()
            .filter(|actor| actor.body.is_destroyed())
            .map(|actor| actor.handle)
            .collect();
        for handle in &destroyed {
            self.despawn(*handle);
        }
        if !destroyed.is_empty() {
            log::debug!("removed {} destroyed actors", destroyed.len());
        }
        destroyed.len()
    }

    /// Both actors of an ordered pair, mutably.
    fn pair_mut(&mut self, a: ActorHandle, b: ActorHandle) -> Option<(&mut Actor, &mut Actor)> {
        if a.index >= b.index {
            return None;
        }
        let (low, high) = self.slots.split_at_mut(b.index as usize);
        let first = low
            .get_mut(a.index as usize)?
            .actor
            .as_mut()
            .filter(|actor| actor.handle == a)?;
        let second = high
            .first_mut()?
            .actor
            .as_mut()
            .filter(|actor| actor.handle == b)?;
        Some((first, second))
    }
}

/// Whether an actor enters the actor-vs-actor broad phase.
fn takes_part(body: &ActorBody) -> bool {
    let mask = ActorState::COLLIDE_WITH_OTHER_ACTORS | ActorState::FORCE_DISABLE_COLLISIONS | ActorState::IS_DESTROYED;
    body.state & mask == ActorState::COLLIDE_WITH_OTHER_ACTORS
}

/// Freeze or thaw `target` if `shot` carries such an effect.
fn apply_shot_effect(shot: &mut Actor, target: &mut Actor) {
    let ActorKind::Shot { owner, effect } = shot.kind else {
        return;
    };
    if !target.body.state.contains(ActorState::CAN_BE_FROZEN) {
        return;
    }
    match effect {
        ShotEffect::Freeze(duration) => {
            if owner == Some(target.handle) {
                return;
            }
            target.body.freeze(duration);
            shot.body.decrease_health(i32::MAX);
            log::debug!("actor {:?} frozen for {} frames", target.handle, duration);
        }
        ShotEffect::Thaw => target.body.thaw(),
        ShotEffect::None => {}
    }
}

/// The level as seen by one moving actor: tiles plus every other actor.
struct SceneLevel<'a> {
    tiles: &'a mut TileMap,
    env: &'a Environment,
    slots: &'a [Slot],
    config: &'a PhysicsConfig,
}

impl SceneLevel<'_> {
    fn tiles_clear(&mut self, actor: &ActorBody, aabb: &Aabb, params: &mut TileCollisionParams) -> bool {
        let reduced = actor.state.contains(ActorState::COLLIDE_WITH_TILESET_REDUCED) && aabb.height() >= REDUCED_MIN_HEIGHT;
        if !reduced {
            return self.tiles.try_clear(aabb, params);
        }

        let feet = Aabb::new(aabb.l, aabb.b - REDUCED_FEET_HEIGHT, aabb.r, aabb.b);
        if !self.tiles.try_clear(&feet, params) {
            return false;
        }
        // Head only matters while moving up.
        if !params.downwards {
            let head = Aabb::new(aabb.l, aabb.t, aabb.r, aabb.t + REDUCED_HEAD_HEIGHT);
            return self.tiles.try_clear(&head, params);
        }
        true
    }

    /// First solid actor blocking `aabb`. Solids block without asking either
    /// party's collision reaction.
    fn blocking_solid(&self, actor: &ActorBody, aabb: &Aabb, params: &TileCollisionParams) -> Option<ActorHandle> {
        self.slots
            .iter()
            .filter_map(|slot| slot.actor.as_ref())
            .find(|other| {
                let state = other.body.state;
                if state & (ActorState::IS_SOLID_OBJECT | ActorState::IS_DESTROYED) != ActorState::IS_SOLID_OBJECT
                    || !state.contains(ActorState::COLLIDE_WITH_OTHER_ACTORS)
                {
                    return false;
                }
                if actor.state.contains(ActorState::COLLIDE_WITH_SOLID_OBJECTS_BELOW)
                    && actor.aabb_inner().b > other.body.aabb_inner().center().y
                {
                    return false;
                }
                if other.kind.is_one_way() && !params.downwards {
                    return false;
                }
                other.body.aabb().overlaps(aabb) && other.body.is_colliding_with_aabb(aabb, self.config)
            })
            .map(|other| other.handle)
    }
}

impl LevelQuery for SceneLevel<'_> {
    fn find_obstruction(
        &mut self,
        actor: &ActorBody,
        aabb: &Aabb,
        params: &mut TileCollisionParams,
    ) -> Option<Obstruction> {
        if actor.state.contains(ActorState::COLLIDE_WITH_TILESET) && !self.tiles_clear(actor, aabb, params) {
            return Some(Obstruction::Tiles);
        }
        if actor.state.contains(ActorState::COLLIDE_WITH_SOLID_OBJECTS) {
            if let Some(handle) = self.blocking_solid(actor, aabb, params) {
                return Some(Obstruction::Solid(handle));
            }
        }
        None
    }

    fn is_tile_empty(&self, aabb: &Aabb, params: &TileCollisionParams) -> bool {
        self.tiles.is_tile_empty(aabb, params)
    }

    fn tile_suspend_state(&self, x: f32, y: f32) -> SuspendType {
        self.tiles.tile_suspend_state(x, y)
    }

    fn gravity(&self) -> f32 {
        self.env.gravity()
    }

    fn water_level(&self) -> f32 {
        self.env.water_level
    }

    fn is_reforged(&self) -> bool {
        self.env.reforged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use glam::Vec2;

    use crate::api::behavior::DefaultBehavior;
    use crate::components::tilemap::{Tile, TILE_SIZE};
    use crate::core::level::TileDestructType;
    use crate::core::test_support::{spawn_box, Recorder};

    fn scene() -> Scene {
        Scene::new(PhysicsConfig::default())
    }

    fn spawn_generic(scene: &mut Scene, pos: Vec2) -> ActorHandle {
        scene.spawn(ActorKind::Generic, spawn_box(pos), Box::new(DefaultBehavior))
    }

    /// Counts collisions into a shared cell and optionally claims them.
    struct Counter {
        hits: Rc<Cell<u32>>,
        handles: bool,
    }

    impl ActorBehavior for Counter {
        fn on_handle_collision(&mut self, _body: &mut ActorBody, _other: &Actor) -> bool {
            self.hits.set(self.hits.get() + 1);
            self.handles
        }
    }

    /// 10×10 tile level with a solid floor row at the bottom.
    fn floored_level() -> TileMap {
        let mut tiles = TileMap::new(10, 10);
        tiles.fill_rect(0, 9, 10, 1, Tile::Solid);
        tiles
    }

    #[test]
    fn spawn_and_get() {
        let mut scene = scene();
        let handle = spawn_generic(&mut scene, Vec2::new(10.0, 20.0));
        let actor = scene.get(handle).unwrap();
        assert_eq!(actor.body.pos(), Vec2::new(10.0, 20.0));
        assert_eq!(actor.handle, handle);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn spawn_computes_outer_box() {
        let mut scene = scene();
        let handle = spawn_generic(&mut scene, Vec2::new(50.0, 50.0));
        let body = &scene.get(handle).unwrap().body;
        assert_eq!(body.aabb(), Aabb::new(42.0, 34.0, 58.0, 50.0));
        assert!(!body.state.contains(ActorState::IS_DIRTY));
    }

    #[test]
    fn stale_handle_does_not_resolve() {
        let mut scene = scene();
        let old = spawn_generic(&mut scene, Vec2::ZERO);
        assert!(scene.despawn(old).is_some());
        assert!(scene.is_empty());

        let new = spawn_generic(&mut scene, Vec2::ZERO);
        assert_eq!(new.index, old.index);
        assert_ne!(new.generation, old.generation);
        assert!(scene.get(old).is_none());
        assert!(scene.despawn(old).is_none());
        assert!(scene.get(new).is_some());
    }

    #[test]
    fn actors_fall_onto_tile_floor() {
        let mut scene = scene();
        let mut tiles = floored_level();
        let env = Environment::default();
        let floor_y = (9 * TILE_SIZE) as f32;
        let handle = spawn_generic(&mut scene, Vec2::new(100.0, floor_y - 40.0));

        for _ in 0..120 {
            scene.step(&mut tiles, &env, 1.0);
        }

        let body = &scene.get(handle).unwrap().body;
        assert!(body.can_jump());
        assert!(body.pos().y < floor_y);
        assert!(body.pos().y > floor_y - 2.0, "resting at {}", body.pos().y);
        // The outer box followed the actor down.
        assert!((body.aabb().b - body.pos().y).abs() < 0.01, "{:?}", body.aabb());
    }

    #[test]
    fn solid_object_blocks_colliding_actors() {
        let mut scene = scene();
        let mut tiles = TileMap::new(20, 20);
        let env = Environment::default().with_gravity(0.0);

        let mut crate_body = spawn_box(Vec2::new(80.0, 100.0));
        crate_body.state.remove(ActorState::APPLY_GRAVITATION);
        scene.spawn(ActorKind::SolidObject { one_way: false }, crate_body, Box::new(DefaultBehavior));

        let mut walker = spawn_box(Vec2::new(50.0, 100.0));
        walker.state |= ActorState::COLLIDE_WITH_SOLID_OBJECTS;
        walker.state.remove(ActorState::APPLY_GRAVITATION);
        walker.speed.x = 4.0;
        let handle = scene.spawn(ActorKind::Player, walker, Box::new(DefaultBehavior));

        for _ in 0..30 {
            scene.update(&mut tiles, &env, 1.0);
        }
        let body = &scene.get(handle).unwrap().body;
        // Crate's left edge is at 72.
        assert!(body.aabb_inner().r <= 72.0, "{:?}", body.aabb_inner());
        assert!(body.aabb_inner().r > 70.0, "{:?}", body.aabb_inner());
    }

    #[test]
    fn one_way_solid_lets_rising_actors_through() {
        let mut scene = scene();
        let mut tiles = TileMap::new(20, 20);
        let env = Environment::default().with_gravity(0.0);

        let mut platform = spawn_box(Vec2::new(100.0, 100.0));
        platform.state.remove(ActorState::APPLY_GRAVITATION);
        scene.spawn(ActorKind::SolidObject { one_way: true }, platform, Box::new(DefaultBehavior));

        let mut riser = spawn_box(Vec2::new(100.0, 130.0));
        riser.state |= ActorState::COLLIDE_WITH_SOLID_OBJECTS;
        riser.state.remove(ActorState::APPLY_GRAVITATION);
        riser.speed.y = -4.0;
        let handle = scene.spawn(ActorKind::Player, riser, Box::new(DefaultBehavior));

        for _ in 0..15 {
            scene.update(&mut tiles, &env, 1.0);
        }
        assert!(scene.get(handle).unwrap().body.pos().y < 80.0);
    }

    #[test]
    fn reduced_tileset_ignores_middle_of_tall_hitbox() {
        let mut tiles = TileMap::new(10, 10);
        tiles.set(3, 3, Tile::Solid);
        let env = Environment::default();
        let config = PhysicsConfig::default();
        let slots: Vec<Slot> = Vec::new();
        let mut level = SceneLevel {
            tiles: &mut tiles,
            env: &env,
            slots: &slots,
            config: &config,
        };

        // 90 units tall; the tile row 96..128 sits between head and feet.
        let aabb = Aabb::new(100.0, 60.0, 120.0, 150.0);
        let mut actor = spawn_box(Vec2::new(110.0, 150.0));
        let mut params = TileCollisionParams::new(TileDestructType::NONE, true);
        assert!(level.find_obstruction(&actor, &aabb, &mut params).is_some());

        actor.state |= ActorState::COLLIDE_WITH_TILESET_REDUCED;
        assert!(level.find_obstruction(&actor, &aabb, &mut params).is_none());
    }

    #[test]
    fn broad_phase_rejects_distant_actors() {
        let mut scene = scene();
        let a = spawn_generic(&mut scene, Vec2::new(50.0, 50.0));
        let b = spawn_generic(&mut scene, Vec2::new(58.0, 54.0));
        assert_eq!(scene.collect_collisions(), vec![CollisionPair { a, b }]);

        let moved = scene.get_mut(b).unwrap();
        moved.body.pos.x += 20.0;
        moved.body.mark_dirty();
        scene.sync_aabbs();
        assert!(scene.collect_collisions().is_empty());
    }

    #[test]
    fn pairs_are_ordered_by_handle() {
        let mut scene = scene();
        let right = spawn_generic(&mut scene, Vec2::new(60.0, 50.0));
        let left = spawn_generic(&mut scene, Vec2::new(50.0, 50.0));
        let pairs = scene.collect_collisions();
        assert_eq!(pairs, vec![CollisionPair { a: right, b: left }]);
    }

    #[test]
    fn excluded_actors_skip_broad_phase() {
        let mut scene = scene();
        spawn_generic(&mut scene, Vec2::new(50.0, 50.0));
        let b = spawn_generic(&mut scene, Vec2::new(52.0, 50.0));

        scene.get_mut(b).unwrap().body.state.remove(ActorState::COLLIDE_WITH_OTHER_ACTORS);
        assert!(scene.collect_collisions().is_empty());

        let body = &mut scene.get_mut(b).unwrap().body;
        body.state |= ActorState::COLLIDE_WITH_OTHER_ACTORS | ActorState::FORCE_DISABLE_COLLISIONS;
        assert!(scene.collect_collisions().is_empty());

        let body = &mut scene.get_mut(b).unwrap().body;
        body.state.remove(ActorState::FORCE_DISABLE_COLLISIONS);
        body.decrease_health(i32::MAX);
        assert!(scene.collect_collisions().is_empty());
    }

    #[test]
    fn second_actor_reacts_only_when_first_declines() {
        let hits_a = Rc::new(Cell::new(0));
        let hits_b = Rc::new(Cell::new(0));
        let mut scene = scene();
        let a = scene.spawn(
            ActorKind::Generic,
            spawn_box(Vec2::new(50.0, 50.0)),
            Box::new(Counter { hits: Rc::clone(&hits_a), handles: true }),
        );
        let b = scene.spawn(
            ActorKind::Generic,
            spawn_box(Vec2::new(55.0, 50.0)),
            Box::new(Counter { hits: Rc::clone(&hits_b), handles: false }),
        );

        scene.dispatch_collisions(&[CollisionPair { a, b }]);
        assert_eq!((hits_a.get(), hits_b.get()), (1, 0));

        scene.get_mut(a).unwrap().behavior = Box::new(Recorder::default());
        scene.dispatch_collisions(&[CollisionPair { a, b }]);
        assert_eq!(hits_b.get(), 1);
    }

    #[test]
    fn freezing_shot_freezes_target_and_perishes() {
        let mut scene = scene();
        let target = spawn_generic(&mut scene, Vec2::new(50.0, 50.0));
        let shot = scene.spawn(
            ActorKind::Shot {
                owner: None,
                effect: ShotEffect::Freeze(90.0),
            },
            spawn_box(Vec2::new(54.0, 50.0)),
            Box::new(DefaultBehavior),
        );

        scene.dispatch_collisions(&[CollisionPair { a: target, b: shot }]);
        assert_eq!(scene.get(target).unwrap().body.frozen_time_left(), 90.0);
        assert!(scene.get(shot).unwrap().body.is_destroyed());

        assert_eq!(scene.remove_destroyed(), 1);
        assert!(scene.get(shot).is_none());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn freezing_shot_spares_its_owner() {
        let mut scene = scene();
        let owner = spawn_generic(&mut scene, Vec2::new(50.0, 50.0));
        let shot = scene.spawn(
            ActorKind::Shot {
                owner: Some(owner),
                effect: ShotEffect::Freeze(90.0),
            },
            spawn_box(Vec2::new(54.0, 50.0)),
            Box::new(DefaultBehavior),
        );

        scene.dispatch_collisions(&[CollisionPair { a: owner, b: shot }]);
        assert!(!scene.get(owner).unwrap().body.is_frozen());
        assert!(!scene.get(shot).unwrap().body.is_destroyed());
    }

    #[test]
    fn thawing_shot_cuts_frozen_time() {
        let mut scene = scene();
        let target = spawn_generic(&mut scene, Vec2::new(50.0, 50.0));
        scene.get_mut(target).unwrap().body.freeze(200.0);
        let shot = scene.spawn(
            ActorKind::Shot {
                owner: None,
                effect: ShotEffect::Thaw,
            },
            spawn_box(Vec2::new(54.0, 50.0)),
            Box::new(DefaultBehavior),
        );

        scene.dispatch_collisions(&[CollisionPair { a: target, b: shot }]);
        assert_eq!(scene.get(target).unwrap().body.frozen_time_left(), 1.0);
    }

    #[test]
    fn step_runs_the_whole_frame() {
        let hits = Rc::new(Cell::new(0));
        let mut scene = scene();
        let mut tiles = floored_level();
        let env = Environment::default();
        let floor_y = (9 * TILE_SIZE) as f32;

        scene.spawn(
            ActorKind::Enemy,
            spawn_box(Vec2::new(100.0, floor_y)),
            Box::new(Counter { hits: Rc::clone(&hits), handles: false }),
        );
        scene.spawn(
            ActorKind::Shot {
                owner: None,
                effect: ShotEffect::Freeze(30.0),
            },
            spawn_box(Vec2::new(104.0, floor_y)),
            Box::new(DefaultBehavior),
        );

        let pairs = scene.step(&mut tiles, &env, 1.0);
        assert_eq!(pairs.len(), 1);
        assert_eq!(hits.get(), 1);
        // The shot perished and was removed in the same frame.
        assert_eq!(scene.len(), 1);
        assert!(scene.iter().all(|actor| actor.body.is_frozen()));
    }
}
