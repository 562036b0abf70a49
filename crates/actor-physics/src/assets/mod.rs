pub mod error;
pub mod manifest;
pub mod mask;
pub mod registry;
