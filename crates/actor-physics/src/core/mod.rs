// core/mod.rs
//
// The per-frame kernel: movement integration, hitbox upkeep, pixel-mask
// collision tests and the scene that drives them.

pub mod config;
pub mod hitbox;
pub mod integrator;
pub mod level;
pub mod movement;
pub mod narrow_phase;
pub mod scene;
pub mod time;

#[cfg(test)]
pub(crate) mod test_support;
