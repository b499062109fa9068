//! Stalker events — выход core наружу (audio, static эффект)
//!
//! Хост (рендер/звук) слушает эти events; core про хост ничего не знает.

use bevy::prelude::*;

/// Проиграть clip один раз в точке stalker'а
#[derive(Event, Debug, Clone, PartialEq)]
pub struct TeleportSoundRequested {
    pub stalker: Entity,
    pub clip: String,
}

/// Static эффект включён/выключен (только на пересечении радиуса)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct StaticEffectToggled {
    pub stalker: Entity,
    pub active: bool,
}
