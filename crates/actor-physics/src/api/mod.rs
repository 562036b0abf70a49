pub mod behavior;
pub mod types;
