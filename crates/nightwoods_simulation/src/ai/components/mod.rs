//! Stalker ECS components

pub mod stalker;


pub use stalker::*;
