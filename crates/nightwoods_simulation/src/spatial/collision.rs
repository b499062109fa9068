//! Collision Layers Constants
//!
//! Rapier collision groups — centralised constants для всего проекта.
//!
//! ## Архитектура:
//! - **Memberships (битовая маска):** На каком слое находится объект
//! - **Filter / mask (битовая маска):** С какими слоями объект коллидирует
//!
//! ## Layers:
//! - Layer 1 (0b1 = 1): Reserved
//! - Layer 2 (0b10 = 2): Actors (player, stalker)
//! - Layer 3 (0b100 = 4): Terrain (земля, склоны)
//! - Layer 4 (0b1000 = 8): Props (деревья, камни, постройки)
//! - Layer 5 (0b10000 = 16): Triggers (sensor volumes — страницы, зоны)

use bevy_rapier3d::prelude::{CollisionGroups, Group};

// ============================================================================
// Layer Битовые Маски
// ============================================================================

/// Layer 2: Actors (player + stalker capsules)
pub const COLLISION_LAYER_ACTORS: u32 = 0b10; // 2

/// Layer 3: Terrain
pub const COLLISION_LAYER_TERRAIN: u32 = 0b100; // 4

/// Layer 4: Props (статичная геометрия поверх terrain)
pub const COLLISION_LAYER_PROPS: u32 = 0b1000; // 8

/// Layer 5: Triggers (sensors, ground probe их игнорирует в любом случае)
pub const COLLISION_LAYER_TRIGGERS: u32 = 0b10000; // 16

// ============================================================================
// Mask Битовые Маски
// ============================================================================

/// Mask: Actors collide with Actors + Terrain + Props
pub const COLLISION_MASK_ACTORS: u32 =
    COLLISION_LAYER_ACTORS | COLLISION_LAYER_TERRAIN | COLLISION_LAYER_PROPS;

/// Mask: все слои (default для ground probe; sensors отсекаются фильтром отдельно)
pub const COLLISION_MASK_ALL: u32 = u32::MAX;

/// Mask: ground probe видит только статичную геометрию
///
/// Actors исключены: иначе Chase с нулевым offset "приземлится" на голову player.
pub const COLLISION_MASK_GROUND_PROBE: u32 = COLLISION_LAYER_TERRAIN | COLLISION_LAYER_PROPS;

// ============================================================================
// Helper Functions
// ============================================================================

/// CollisionGroups для актора (stalker / player)
pub fn actor_groups() -> CollisionGroups {
    CollisionGroups::new(
        Group::from_bits_truncate(COLLISION_LAYER_ACTORS),
        Group::from_bits_truncate(COLLISION_MASK_ACTORS),
    )
}

/// CollisionGroups для shape cast с произвольной маской
pub fn probe_groups(layer_mask: u32) -> CollisionGroups {
    CollisionGroups::new(Group::ALL, Group::from_bits_truncate(layer_mask))
}

/// Получить название слоя для debug логов
pub fn layer_name(layer_bits: u32) -> &'static str {
    match layer_bits {
        COLLISION_LAYER_ACTORS => "Actors",
        COLLISION_LAYER_TERRAIN => "Terrain",
        COLLISION_LAYER_PROPS => "Props",
        COLLISION_LAYER_TRIGGERS => "Triggers",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_mask_excludes_actors_and_triggers() {
        assert_eq!(COLLISION_MASK_GROUND_PROBE & COLLISION_LAYER_ACTORS, 0);
        assert_eq!(COLLISION_MASK_GROUND_PROBE & COLLISION_LAYER_TRIGGERS, 0);
        assert_ne!(COLLISION_MASK_GROUND_PROBE & COLLISION_LAYER_TERRAIN, 0);
    }

    #[test]
    fn test_all_mask_covers_every_layer() {
        for layer in [
            COLLISION_LAYER_ACTORS,
            COLLISION_LAYER_TERRAIN,
            COLLISION_LAYER_PROPS,
            COLLISION_LAYER_TRIGGERS,
        ] {
            assert_ne!(COLLISION_MASK_ALL & layer, 0, "{}", layer_name(layer));
        }
        assert_eq!(probe_groups(COLLISION_MASK_ALL).filters, Group::ALL);
    }

    #[test]
    fn test_layer_names() {
        assert_eq!(layer_name(COLLISION_LAYER_TERRAIN), "Terrain");
        assert_eq!(layer_name(0b1), "Unknown");
    }
}
