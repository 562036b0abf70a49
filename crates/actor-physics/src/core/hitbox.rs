//! Inner hitbox and outer bounding box maintenance.

use glam::{Affine2, Vec2};

use crate::assets::registry::GraphicResource;
use crate::components::aabb::Aabb;
use crate::components::actor::ActorBody;
use crate::core::config::PhysicsConfig;

impl ActorBody {
    /// Place a `w`×`h` hitbox under the active animation.
    ///
    /// With a coldspot the box is centered on it and sits on top of it.
    /// Otherwise it is centered on the position and rests on the bottom edge of the frame.
    pub fn update_hitbox(&mut self, w: i32, h: i32) {
        // Follows the base animation, never a transition.
        let Some(res) = self.current_animation().cloned() else {
            return;
        };
        let hotspot = res.hotspot().as_vec2();
        let half_w = (w / 2) as f32;
        let h = h as f32;

        self.aabb_inner = match res.base.coldspot {
            Some(coldspot) => {
                let anchor = self.pos - hotspot + coldspot.as_vec2();
                Aabb::new(anchor.x - half_w, anchor.y - h, anchor.x + half_w, anchor.y)
            }
            None => {
                let bottom = self.pos.y - hotspot.y + res.frame_dimensions().y as f32;
                Aabb::new(self.pos.x - half_w, bottom - h, self.pos.x + half_w, bottom)
            }
        };
    }

    /// Recompute the hitbox from the metadata bounding box.
    pub fn on_update_hitbox(&mut self) {
        if let Some(size) = self.metadata().map(|m| m.bounding_box) {
            self.update_hitbox(size.x, size.y);
        }
    }

    /// Recompute the outer box from the active graphic, facing and rotation.
    /// Actors without per-pixel collisions reuse their hitbox.
    pub fn update_aabb(&mut self, config: &PhysicsConfig) {
        if !self.is_per_pixel() {
            self.on_update_hitbox();
            self.aabb = self.aabb_inner;
            return;
        }

        let Some(res) = self.active_resource() else {
            return;
        };
        let aabb = if self.sprite.is_rotated(config.rotation_epsilon) {
            let size = res.frame_dimensions().as_vec2();
            let transform = self.sprite_transform(res);
            projected_corners(&transform, size)
        } else {
            self.sprite_box(res)
        };
        self.aabb = aabb;
    }

    /// Hotspot-relative sprite space to world: mirror if facing left, rotate, then translate.
    pub(crate) fn sprite_transform(&self, res: &GraphicResource) -> Affine2 {
        let mut local = Affine2::from_translation(-res.hotspot().as_vec2());
        if self.is_facing_left() {
            local = Affine2::from_scale(Vec2::new(-1.0, 1.0)) * local;
        }
        Affine2::from_translation(self.pos) * Affine2::from_angle(self.sprite.rotation) * local
    }

    /// Unrotated world rectangle covered by the sprite frame.
    pub(crate) fn sprite_box(&self, res: &GraphicResource) -> Aabb {
        let hotspot = res.hotspot().as_vec2();
        let size = res.frame_dimensions().as_vec2();
        let l = if self.is_facing_left() {
            self.pos.x + hotspot.x - size.x
        } else {
            self.pos.x - hotspot.x
        };
        Aabb::from_pos_size(Vec2::new(l, self.pos.y - hotspot.y), size)
    }
}

/// World box around a transformed `size` rectangle.
pub(crate) fn projected_corners(transform: &Affine2, size: Vec2) -> Aabb {
    let corners = [
        transform.transform_point2(Vec2::ZERO),
        transform.transform_point2(Vec2::new(size.x, 0.0)),
        transform.transform_point2(Vec2::new(0.0, size.y)),
        transform.transform_point2(size),
    ];
    // Four corners are always present.
    Aabb::from_points(&corners).unwrap_or_default()
}
