pub mod api;
pub mod assets;
pub mod components;
pub mod core;

// Re-export key types at crate root for convenience
pub use api::behavior::{ActorBehavior, DefaultBehavior};
pub use api::types::{ActorHandle, CollisionPair};
pub use assets::error::AssetError;
pub use assets::manifest::{GraphicDescriptor, MetadataDescriptor};
pub use assets::mask::CollisionMask;
pub use assets::registry::{ActorMetadata, GraphicBase, GraphicResource, MetadataRegistry};
pub use components::aabb::Aabb;
pub use components::actor::{ActivationDetails, Actor, ActorBody, ActorKind, ShotEffect};
pub use components::sprite::SpriteState;
pub use components::state::{ActorState, MoveType};
pub use components::tilemap::{DestructibleTile, PitType, Tile, TileMap, TILE_SIZE};
pub use crate::core::config::{Environment, PhysicsConfig};
pub use crate::core::level::{LevelQuery, Obstruction, SuspendType, TileCollisionParams, TileDestructType};
pub use crate::core::movement::MoveRequest;
pub use crate::core::scene::Scene;
pub use crate::core::time::FrameTimer;
