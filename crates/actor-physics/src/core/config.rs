use serde::{Deserialize, Serialize};

/// Tuning constants for the movement and collision kernel.
/// Provided once by the game; every field has a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Granularity of every sub-step search, in world units (default: 0.5).
    pub collision_check_step: f32,
    /// Stride of the per-pixel sampling grid (default: 3).
    pub per_pixel_collision_step: i32,
    /// Mask samples strictly above this alpha are solid (default: 40).
    pub alpha_threshold: u8,
    /// Velocity clamp on both axes, units per frame (default: 16).
    pub max_speed: f32,
    /// Rotations at or below this magnitude use the axis-aligned paths (default: 0.1 rad).
    pub rotation_epsilon: f32,
    /// Frames before another unstuck nudge may be attempted (default: 60).
    pub unstuck_cooldown: f32,
    /// Height of the hitbox strip probed before an unstuck nudge (default: 14).
    pub unstuck_probe_height: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            collision_check_step: 0.5,
            per_pixel_collision_step: 3,
            alpha_threshold: 40,
            max_speed: 16.0,
            rotation_epsilon: 0.1,
            unstuck_cooldown: 60.0,
            unstuck_probe_height: 14.0,
        }
    }
}

impl PhysicsConfig {
    /// Parse a config from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Per-pixel stride, never below one sample.
    pub fn pixel_step(&self) -> i32 {
        self.per_pixel_collision_step.max(1)
    }

    /// Sub-step size, never below a tiny positive value so searches terminate.
    pub fn check_step(&self) -> f32 {
        self.collision_check_step.max(0.01)
    }

    pub fn with_pixel_step(mut self, step: i32) -> Self {
        self.per_pixel_collision_step = step;
        self
    }
}

/// Level-wide physical environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    /// Gravity under the alternate ruleset (default: 0.3 units/frame²).
    pub base_gravity: f32,
    /// Y of the liquid surface; actors at or below it are submerged (default: none).
    pub water_level: f32,
    /// Alternate ("reforged") ruleset; classic rules use 80% gravity.
    pub reforged: bool,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            base_gravity: 0.3,
            water_level: f32::MAX,
            reforged: true,
        }
    }
}

impl Environment {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Effective gravity for the active ruleset.
    pub fn gravity(&self) -> f32 {
        if self.reforged {
            self.base_gravity
        } else {
            self.base_gravity * 0.8
        }
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.base_gravity = gravity;
        self
    }

    pub fn with_water_level(mut self, water_level: f32) -> Self {
        self.water_level = water_level;
        self
    }
}
