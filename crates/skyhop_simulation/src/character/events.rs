//! Character events (FixedUpdate/Update → анимация, звук, UI)

use bevy::prelude::*;

/// Event: airborne → grounded (ровно один раз на переход)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landed {
    pub entity: Entity,
}

/// Event: смена присяда (только на фронтах)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrouchChanged {
    pub entity: Entity,
    pub crouching: bool,
}

/// Event: прыжок выполнен (импульс применён)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jumped {
    pub entity: Entity,
}

/// Event: trigger принят, снаряд появится после fire_delay
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireStarted {
    pub shooter: Entity,
}

/// Event: снаряд заспавнен
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ProjectileLaunched {
    pub shooter: Entity,
    pub projectile: Entity,
    /// +1 вправо, -1 влево
    pub direction: f32,
}
