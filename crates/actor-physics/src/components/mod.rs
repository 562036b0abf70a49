pub mod aabb;
pub mod actor;
pub mod sprite;
pub mod state;
pub mod tilemap;
