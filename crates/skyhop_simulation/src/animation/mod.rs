//! Animation-state seam
//!
//! Gameplay выставляет параметры, host animation controller их читает.
//! Флаги типизированы (`AnimFlag`), без строковых имён.

use bevy::prelude::*;

/// Boolean параметры animation controller'а
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AnimFlag {
    /// Персонаж в цикле выстрела (trigger → cooldown clear)
    Firing,
    /// Враг только что получил попадание
    IsHit,
    IsJumping,
    IsCrouching,
}

impl AnimFlag {
    pub const ALL: [AnimFlag; 4] = [
        AnimFlag::Firing,
        AnimFlag::IsHit,
        AnimFlag::IsJumping,
        AnimFlag::IsCrouching,
    ];

    fn index(self) -> usize {
        match self {
            AnimFlag::Firing => 0,
            AnimFlag::IsHit => 1,
            AnimFlag::IsJumping => 2,
            AnimFlag::IsCrouching => 3,
        }
    }
}

/// Параметры анимации entity
///
/// Опциональный компонент: без него gameplay системы просто не трогают анимацию.
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Animator {
    flags: [bool; 4],
    /// Float параметр "Speed" (blend idle/run)
    pub speed: f32,
}

impl Animator {
    pub fn set(&mut self, flag: AnimFlag, value: bool) {
        self.flags[flag.index()] = value;
    }

    pub fn get(&self, flag: AnimFlag) -> bool {
        self.flags[flag.index()]
    }
}
