//! Per-pixel collision tests between actors, and between an actor and a box.
//!
//! Callers are expected to have established a broad-phase overlap of the
//! outer boxes first. Every test walks a fixed grid (stride
//! `per_pixel_collision_step`) in the same order and stops at the first
//! sample that is solid on all required sides, so the answer is an
//! "any pixel pair" predicate rather than an overlap measure.
//!
//! Rotated actor pairs are sampled forward only: A's grid is mapped into B.

use glam::{Affine2, IVec2};

use crate::assets::registry::GraphicResource;
use crate::components::aabb::Aabb;
use crate::components::actor::ActorBody;
use crate::core::config::PhysicsConfig;
use crate::core::hitbox::projected_corners;

/// World-aligned view of one actor's mask for the unrotated tests.
struct MaskSampler<'a> {
    res: &'a GraphicResource,
    frame: usize,
    origin: IVec2,
    facing_left: bool,
    threshold: u8,
}

impl<'a> MaskSampler<'a> {
    fn new(body: &ActorBody, res: &'a GraphicResource, sprite_box: &Aabb, threshold: u8) -> Self {
        Self {
            res,
            frame: res.sheet_frame(body.sprite.current_frame),
            origin: IVec2::new(sprite_box.l as i32, sprite_box.t as i32),
            facing_left: body.is_facing_left(),
            threshold,
        }
    }

    /// Whether the world pixel (x, y) is solid.
    fn solid_at(&self, x: i32, y: i32) -> bool {
        let mut local_x = x - self.origin.x;
        if self.facing_left {
            local_x = self.res.frame_dimensions().x - local_x - 1;
        }
        self.res
            .base
            .mask
            .is_solid(self.frame, local_x, y - self.origin.y, self.threshold)
    }
}

/// Walk `[x1, x2) × [y1, y2)` column by column and report the first hit.
fn any_sample(x1: i32, y1: i32, x2: i32, y2: i32, step: usize, mut hit: impl FnMut(i32, i32) -> bool) -> bool {
    for i in (x1..x2).step_by(step) {
        for j in (y1..y2).step_by(step) {
            if hit(i, j) {
                return true;
            }
        }
    }
    false
}

impl ActorBody {
    /// Exact collision with another actor.
    pub fn is_colliding_with(&self, other: &ActorBody, config: &PhysicsConfig) -> bool {
        let per_pixel1 = self.is_per_pixel();
        let per_pixel2 = other.is_per_pixel();
        let rotated1 = self.sprite.is_rotated(config.rotation_epsilon);
        let rotated2 = other.sprite.is_rotated(config.rotation_epsilon);

        if (per_pixel1 && rotated1) || (per_pixel2 && rotated2) {
            if !per_pixel1 && rotated2 {
                return other.is_colliding_with_aabb_angled(&self.aabb_inner, config);
            }
            if !per_pixel2 && rotated1 {
                return self.is_colliding_with_aabb_angled(&other.aabb_inner, config);
            }
            return self.is_colliding_with_angled(other, config);
        }

        let (res1, res2) = match (self.active_resource(), other.active_resource()) {
            (Some(res1), Some(res2)) => (res1, res2),
            (Some(_), None) => return self.is_colliding_with_aabb(&other.aabb_inner, config),
            (None, Some(_)) => return other.is_colliding_with_aabb(&self.aabb_inner, config),
            (None, None) => return false,
        };

        let aabb1 = if per_pixel1 { self.sprite_box(res1) } else { self.aabb_inner };
        let aabb2 = if per_pixel2 { other.sprite_box(res2) } else { other.aabb_inner };
        let Some(inter) = aabb1.intersection(&aabb2) else {
            return false;
        };

        let step = config.pixel_step() as usize;
        let threshold = config.alpha_threshold;

        if !per_pixel1 || !per_pixel2 {
            if per_pixel1 == per_pixel2 {
                return true;
            }
            // Sample the mask side, clipped to the other side's hitbox.
            let (sampler, clip) = if per_pixel1 {
                (MaskSampler::new(self, res1, &aabb1, threshold), other.aabb_inner)
            } else {
                (MaskSampler::new(other, res2, &aabb2, threshold), self.aabb_inner)
            };
            return any_sample(
                inter.l.max(clip.l) as i32,
                inter.t.max(clip.t) as i32,
                inter.r.min(clip.r) as i32,
                inter.b.min(clip.b) as i32,
                step,
                |x, y| sampler.solid_at(x, y),
            );
        }

        let sampler1 = MaskSampler::new(self, res1, &aabb1, threshold);
        let sampler2 = MaskSampler::new(other, res2, &aabb2, threshold);
        any_sample(
            inter.l as i32,
            inter.t as i32,
            inter.r as i32,
            inter.b as i32,
            step,
            |x, y| sampler1.solid_at(x, y) && sampler2.solid_at(x, y),
        )
    }

    /// Exact collision with a world box. Without per-pixel collisions this
    /// is a plain hitbox overlap.
    pub fn is_colliding_with_aabb(&self, aabb: &Aabb, config: &PhysicsConfig) -> bool {
        if !self.is_per_pixel() {
            return self.aabb_inner.intersection(aabb).is_some();
        }
        if self.sprite.is_rotated(config.rotation_epsilon) {
            return self.is_colliding_with_aabb_angled(aabb, config);
        }

        let Some(res) = self.active_resource() else {
            return false;
        };
        let own = self.sprite_box(res);
        let Some(inter) = aabb.intersection(&own) else {
            return false;
        };

        let sampler = MaskSampler::new(self, res, &own, config.alpha_threshold);
        any_sample(
            inter.l as i32,
            inter.t as i32,
            inter.r as i32,
            inter.b as i32,
            config.pixel_step() as usize,
            |x, y| sampler.solid_at(x, y),
        )
    }

    /// Collision with another actor when at least one of them is rotated.
    pub fn is_colliding_with_angled(&self, other: &ActorBody, config: &PhysicsConfig) -> bool {
        let (Some(res1), Some(res2)) = (self.active_resource(), other.active_resource()) else {
            return false;
        };

        let transform1 = self.sprite_transform(res1);
        let transform2 = other.sprite_transform(res2);
        let size1 = res1.frame_dimensions();
        let size2 = res2.frame_dimensions();

        let aabb1 = projected_corners(&transform1, size1.as_vec2()).rounded_out();
        let aabb2 = projected_corners(&transform2, size2.as_vec2()).rounded_out();
        if !aabb1.overlaps(&aabb2) {
            return false;
        }

        let step = config.pixel_step();
        let threshold = config.alpha_threshold;
        let a_to_b: Affine2 = transform2.inverse() * transform1;
        let step_x = a_to_b.matrix2.x_axis * step as f32;
        let step_y = a_to_b.matrix2.y_axis * step as f32;

        let frame1 = res1.sheet_frame(self.sprite.current_frame);
        let frame2 = res2.sheet_frame(other.sprite.current_frame);
        let mask1 = &res1.base.mask;
        let mask2 = &res2.base.mask;

        let mut row_in_b = a_to_b.translation;
        for y1 in (0..size1.y).step_by(step as usize) {
            let mut pos_in_b = row_in_b;
            for x1 in (0..size1.x).step_by(step as usize) {
                let x2 = pos_in_b.x.round() as i32;
                let y2 = pos_in_b.y.round() as i32;
                if x2 >= 0
                    && x2 < size2.x
                    && y2 >= 0
                    && y2 < size2.y
                    && mask1.is_solid(frame1, x1, y1, threshold)
                    && mask2.is_solid(frame2, x2, y2, threshold)
                {
                    return true;
                }
                pos_in_b += step_x;
            }
            row_in_b += step_y;
        }
        false
    }

    /// Collision between a rotated actor and a world box.
    pub fn is_colliding_with_aabb_angled(&self, aabb: &Aabb, config: &PhysicsConfig) -> bool {
        let Some(res) = self.active_resource() else {
            return false;
        };

        let transform = self.sprite_transform(res);
        let size = res.frame_dimensions();
        let own = projected_corners(&transform, size.as_vec2()).rounded_out();
        if !aabb.overlaps(&own) {
            return false;
        }

        let step = config.pixel_step();
        let step_x = transform.matrix2.x_axis * step as f32;
        let step_y = transform.matrix2.y_axis * step as f32;
        let frame = res.sheet_frame(self.sprite.current_frame);
        let mask = &res.base.mask;

        let mut row_in_world = transform.translation;
        for y1 in (0..size.y).step_by(step as usize) {
            let mut pos = row_in_world;
            for x1 in (0..size.x).step_by(step as usize) {
                let x2 = pos.x.round();
                let y2 = pos.y.round();
                if mask.is_solid(frame, x1, y1, config.alpha_threshold) && aabb.contains(x2, y2) {
                    return true;
                }
                pos += step_x;
            }
            row_in_world += step_y;
        }
        false
    }
}
