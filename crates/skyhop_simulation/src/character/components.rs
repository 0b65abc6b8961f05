//! Компоненты locomotion/combat контроллера

use bevy::prelude::*;

use crate::config::{ControllerConfig, FireConfig, ProjectileConfig};

/// Locomotion контроллер персонажа
///
/// Параметры копируются из `ControllerConfig` при spawn, дальше entity живёт
/// со своими значениями (можно тюнить отдельно для каждого персонажа).
///
/// Состояние: {Grounded, Airborne} × {Standing, Crouching} × {FacingLeft, FacingRight}.
#[derive(Component, Debug, Clone, Copy)]
#[require(PlayerIntent)]
pub struct CharacterController {
    pub config: ControllerConfig,
    pub grounded: bool,
    pub crouching: bool,
    pub facing_right: bool,
    /// Внутренняя скорость сглаживания (state smooth_damp)
    pub smoothing_velocity: f32,
    /// Модуль скорости body после последнего шага (для анимации/UI)
    pub speed: f32,
}

impl CharacterController {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            grounded: false,
            crouching: false,
            facing_right: true,
            smoothing_velocity: 0.0,
            speed: 0.0,
        }
    }

    /// +1 вправо, -1 влево
    pub fn facing_sign(&self) -> f32 {
        if self.facing_right {
            1.0
        } else {
            -1.0
        }
    }

    /// Смещение probe с учётом зеркалирования спрайта
    pub fn mirrored(&self, offset: Vec2) -> Vec2 {
        Vec2::new(offset.x * self.facing_sign(), offset.y)
    }
}

impl Default for CharacterController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

/// Намерения управления (input service → gameplay)
///
/// Заполняется keyboard системой, bot'ом или host'ом.
/// `jump` и `fire` это edge-триггеры, выставляются один раз, сбрасываются
/// системой-потребителем после обработки.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerIntent {
    /// Горизонтальная ось -1..=1
    pub move_axis: f32,
    /// Присед (удерживается)
    pub crouch: bool,
    pub jump: bool,
    pub fire: bool,
}

/// Стрельба персонажа: параметры + cooldown флаг
#[derive(Component, Debug, Clone, Copy)]
pub struct FireControl {
    pub fire: FireConfig,
    /// "Prefab" снаряда
    pub projectile: ProjectileConfig,
    pub on_cooldown: bool,
}

impl FireControl {
    pub fn new(fire: FireConfig, projectile: ProjectileConfig) -> Self {
        Self {
            fire,
            projectile,
            on_cooldown: false,
        }
    }

    /// Trigger: входим в cooldown если готовы. Во время cooldown ничего не происходит
    /// (ни очереди, ни продления).
    pub fn try_trigger(&mut self) -> bool {
        if self.on_cooldown {
            return false;
        }
        self.on_cooldown = true;
        true
    }

    pub fn finish_cooldown(&mut self) {
        self.on_cooldown = false;
    }
}

/// Ссылка на коллайдер, отключаемый в присяде (опционально)
#[derive(Component, Debug, Clone, Copy)]
pub struct CrouchCollider(pub Entity);

/// Включён ли коллайдер (host физика читает флаг)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct ColliderToggle {
    pub enabled: bool,
}

impl Default for ColliderToggle {
    fn default() -> Self {
        Self { enabled: true }
    }
}
