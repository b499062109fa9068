//! Stalker systems (ECS driver для core)

pub mod spawn;
pub mod sync;
pub mod tick;

// Re-export all systems
pub use spawn::*;
pub use sync::*;
pub use tick::*;
