//! Per-frame motion integration.
//!
//! Forces and gravity become an effective displacement, which is then
//! resolved against the level through a bounded series of sub-step moves.
//! Grounded actors follow slopes; airborne actors decompose a blocked move
//! into horizontal and vertical parts. Whatever could not be consumed turns
//! into wall, floor and ceiling reactions.

use glam::Vec2;

use crate::api::behavior::ActorBehavior;
use crate::components::actor::ActorBody;
use crate::components::state::ActorState;
use crate::core::config::PhysicsConfig;
use crate::core::level::{LevelQuery, TileCollisionParams, TileDestructType};
use crate::core::movement::MoveRequest;

/// Run one frame for `body`: movement with the behavior's tile rules, then
/// hitbox refresh and the frozen countdown.
///
/// Actors without an active graphic are skipped until one is set.
pub fn update<L: LevelQuery + ?Sized>(
    body: &mut ActorBody,
    behavior: &mut dyn ActorBehavior,
    level: &mut L,
    config: &PhysicsConfig,
    time_mult: f32,
) {
    if body.active_resource().is_none() {
        if !body.missing_resource_reported {
            log::warn!(
                "actor at ({}, {}) has no graphic resource, skipping update",
                body.pos.x,
                body.pos.y
            );
            body.missing_resource_reported = true;
        }
        return;
    }

    let mut params = behavior.tile_params(body);
    try_standard_movement(body, behavior, level, config, time_mult, &mut params);
    body.on_update_hitbox();
    body.update_frozen_state(time_mult);
}

/// Apply forces and gravity, then move as far as the level allows.
/// `params` is shared by every sub-step, so destructible tiles are consumed cumulatively.
pub fn try_standard_movement<L: LevelQuery + ?Sized>(
    body: &mut ActorBody,
    behavior: &mut dyn ActorBehavior,
    level: &mut L,
    config: &PhysicsConfig,
    time_mult: f32,
    params: &mut TileCollisionParams,
) {
    let max_speed = config.max_speed;

    if body.unstuck_cooldown > 0.0 {
        body.unstuck_cooldown -= time_mult;
    }

    let applies_gravity = body.state.contains(ActorState::APPLY_GRAVITATION);
    let mut gravity = 0.0;
    let mut elasticity = body.elasticity;
    if applies_gravity {
        gravity = level.gravity();
        if body.pos.y >= level.water_level() {
            gravity *= 0.5;
            elasticity *= 0.7;
        }
    }

    let accel_y = (body.internal_force_y + body.external_force.y) * time_mult;
    body.speed.x = body.speed.x.clamp(-max_speed, max_speed);
    body.speed.y = (body.speed.y + accel_y).clamp(-max_speed, max_speed);

    let effective = (if body.is_frozen() {
        let x = (body.external_force.x * time_mult).clamp(-max_speed, max_speed);
        let y = if applies_gravity {
            body.speed.y + 0.5 * accel_y
        } else {
            ((gravity * 2.0 + body.internal_force_y) * time_mult).clamp(-max_speed, max_speed)
        };
        Vec2::new(x, y)
    } else {
        Vec2::new(
            body.speed.x + body.external_force.x * time_mult,
            body.speed.y + 0.5 * accel_y,
        )
    }) * time_mult;

    let mut step = Step {
        body,
        behavior,
        level,
        params,
        check_step: config.check_step(),
        elasticity,
        time_mult,
    };

    if effective.x.abs() > f32::EPSILON || effective.y.abs() > f32::EPSILON {
        if step.body.state.contains(ActorState::CAN_JUMP | ActorState::APPLY_GRAVITATION) {
            step.move_grounded(effective, config);
        } else {
            step.move_airborne(effective, gravity);
        }
    }

    step.apply_friction();

    if gravity > 0.0 {
        step.apply_gravity(effective.y, gravity, max_speed);
    }
}

/// Borrowed state for one integration step.
struct Step<'a, L: LevelQuery + ?Sized> {
    body: &'a mut ActorBody,
    behavior: &'a mut dyn ActorBehavior,
    level: &'a mut L,
    params: &'a mut TileCollisionParams,
    check_step: f32,
    elasticity: f32,
    time_mult: f32,
}

impl<L: LevelQuery + ?Sized> Step<'_, L> {
    fn try_move(&mut self, delta: Vec2) -> bool {
        self.body
            .move_instantly(MoveRequest::relative(delta).with_params(&mut *self.params), &mut *self.level)
    }

    /// Slope-following for actors standing on something.
    fn move_grounded(&mut self, effective: Vec2, config: &PhysicsConfig) {
        // Offsets a bit past 45° both ways, largest first. The first free one wins.
        let max_y_diff = (effective.x.abs() + 2.5).max(3.0);
        let top = max_y_diff + effective.y;
        let candidates = (2.0 * max_y_diff / self.check_step).floor() as u32;
        for i in 0..=candidates {
            let y_diff = top - i as f32 * self.check_step;
            if self.try_move(Vec2::new(effective.x, y_diff)) {
                return;
            }
        }

        let x_abs = effective.x.abs();
        let sign = if effective.x > 0.0 { 1.0 } else { -1.0 };
        let mut slid = 0.0;
        for x_diff in descending(x_abs, self.check_step, 0.0) {
            if self.try_move(Vec2::new(x_diff * sign, 0.0)) {
                slid = x_diff;
                break;
            }
        }

        if slid <= 0.0 && self.unstuck(config) {
            return;
        }

        // Whatever the slide could not cover was stopped by a wall.
        let gap = x_abs - slid;
        if gap > f32::EPSILON {
            self.bounce_off_wall(gap);
            self.behavior.on_hit_wall(self.body, self.time_mult);
        }
    }

    /// Nudge a wedged actor vertically, up first. Only tried when the bottom
    /// of its hitbox is inside something and the cooldown has expired.
    fn unstuck(&mut self, config: &PhysicsConfig) -> bool {
        if self.body.unstuck_cooldown > 0.0 {
            return false;
        }

        let mut probe = self.body.aabb_inner;
        probe.t = probe.t.max(probe.b - config.unstuck_probe_height);
        let mut probe_params = TileCollisionParams::new(TileDestructType::NONE, true);
        if self.level.is_position_empty(self.body, &probe, &mut probe_params) {
            return false;
        }

        let up = (1..=6).map(|i| -2.0 * i as f32);
        let down = (1..=7).map(|i| 2.0 * i as f32);
        for y_diff in up.chain(down) {
            if self.try_move(Vec2::new(0.0, y_diff)) {
                log::debug!(
                    "unstuck actor at ({}, {}) by {}",
                    self.body.pos.x,
                    self.body.pos.y,
                    y_diff
                );
                self.body.unstuck_cooldown = config.unstuck_cooldown;
                return true;
            }
        }
        false
    }

    fn move_airborne(&mut self, effective: Vec2, gravity: f32) {
        if self.try_move(effective) {
            return;
        }

        let x_abs = effective.x.abs();
        let x_sign = if effective.x > 0.0 { 1.0 } else { -1.0 };
        let mut x_done = 0.0;
        for x_diff in descending(x_abs, self.check_step, f32::EPSILON) {
            if self.try_move(Vec2::new(x_diff * x_sign, 0.0)) {
                x_done = x_diff;
                break;
            }
        }

        // Vertical moves tolerate a little horizontal drift to slip past edges.
        let y_abs = effective.y.abs();
        let y_sign = if effective.y > 0.0 { 1.0 } else { -1.0 };
        let mut y_done = 0.0;
        for y_diff in descending(y_abs, self.check_step, f32::EPSILON) {
            let y = y_diff * y_sign;
            if self.try_move(Vec2::new(0.0, y))
                || self.try_move(Vec2::new(y_diff * 0.2, y))
                || self.try_move(Vec2::new(y_diff * -0.2, y))
            {
                y_done = y_diff;
                break;
            }
        }

        if y_done < y_abs {
            if effective.y < 0.0 {
                self.body.speed.y = 0.0;
                self.body.internal_force_y = 0.0;
                self.behavior.on_hit_ceiling(self.body, self.time_mult);
            } else if gravity <= 0.0 {
                // Gravity-bound actors land in the gravity phase instead.
                self.body.speed.y = -(self.elasticity * effective.y / self.time_mult);
                self.behavior.on_hit_floor(self.body, self.time_mult);
                if self.body.speed.y > -self.check_step {
                    self.body.speed.y = 0.0;
                    self.body.state.insert(ActorState::CAN_JUMP);
                }
            }
        }

        if x_done < x_abs * 0.3 {
            self.bounce_off_wall(x_abs - x_done);
            if y_done >= y_abs {
                self.behavior.on_hit_wall(self.body, self.time_mult);
            }
        }
    }

    /// Reflect horizontal speed when a real gap to the wall remained.
    fn bounce_off_wall(&mut self, gap: f32) {
        if gap > self.check_step || (gap > 0.0 && self.elasticity > 0.0) {
            self.body.speed.x = -(self.elasticity * self.body.speed.x);
            self.body.external_force.x = 0.0;
        }
    }

    fn apply_friction(&mut self) {
        let decay = self.body.friction * self.time_mult;
        let force = &mut self.body.external_force.x;
        if *force > 0.0 {
            *force = (*force - decay).max(0.0);
        } else if *force < 0.0 {
            *force = (*force + decay).min(0.0);
        }
    }

    fn apply_gravity(&mut self, effective_y: f32, gravity: f32, max_speed: f32) {
        let time_mult = self.time_mult;
        if self.body.speed.y >= 0.0 {
            let mut below = self.body.aabb_inner;
            below.b += self.check_step;
            if self.level.is_position_empty(self.body, &below, self.params) {
                self.body.speed.y = (self.body.speed.y + gravity * time_mult).min(max_speed);
                self.body.state.remove(ActorState::CAN_JUMP);
            } else {
                self.body.speed.y = -(self.elasticity * effective_y.max(0.0) / time_mult);
                if self.body.speed.y > -self.check_step {
                    self.body.speed.y = 0.0;
                    self.body.state.insert(ActorState::CAN_JUMP);
                } else {
                    self.body.state.remove(ActorState::CAN_JUMP);
                }
                self.behavior.on_hit_floor(self.body, time_mult);
            }
        } else {
            self.body.speed.y += gravity * time_mult;
            self.body.state.remove(ActorState::CAN_JUMP);
        }

        let damping = gravity * 0.33 * time_mult;
        self.body.external_force.y = (self.body.external_force.y + damping).min(0.0);
        self.body.internal_force_y = (self.body.internal_force_y + damping).min(0.0);
    }
}

/// `from`, `from - step`, ... while the value stays above `floor`.
fn descending(from: f32, step: f32, floor: f32) -> impl Iterator<Item = f32> {
    let count = if from > floor { ((from - floor) / step).ceil() as u32 } else { 0 };
    (0..count)
        .map(move |i| from - i as f32 * step)
        .filter(move |value| *value > floor)
}
