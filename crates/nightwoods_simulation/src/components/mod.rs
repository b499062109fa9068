//! ECS / core компоненты
//!
//! Организация:
//! - agent: состояние stalker агента (позиция, ориентация, locomotion, base spot)
//! - player: marker для target entity (Player)

pub mod agent;
pub mod player;

// Re-exports для удобного импорта
pub use agent::*;
pub use player::*;
