//! Player marker component
//!
//! Отмечает entity, которое преследует stalker (target position reader).

use bevy::prelude::Component;

/// Marker component для player entity
///
/// Stalker systems читают `Transform` entity с этим компонентом как позицию target.
///
/// # Архитектурная заметка
/// - Stalker systems используют `With<Player>` для target и `Without<Player>` для себя
/// - Нет Player (ещё не заспавнен / уже despawned) → tick stalker'ов = no-op
///
/// # Single-player
/// Ожидается ровно один entity с этим компонентом. Если их несколько —
/// target не определён и tick тоже пропускается.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
