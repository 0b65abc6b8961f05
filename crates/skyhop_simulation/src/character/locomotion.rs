//! Locomotion логика (чистые функции, без ECS)
//!
//! Системы в `systems.rs` только собирают входы (probe'ы, intent, dt)
//! и раскладывают `MoveOutcome` по events/Transform.

use bevy::prelude::*;

use super::CharacterController;
use crate::physics::PhysicsBody;

/// Вход одного fixed шага
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveInput {
    pub axis: f32,
    pub crouch: bool,
    pub jump: bool,
}

/// Что произошло за шаг
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Был ли применён горизонтальный контроль (grounded или air control)
    pub controlled: bool,
    /// Some(new_state): только на фронте присяда
    pub crouch_changed: Option<bool>,
    pub flipped: bool,
    pub jumped: bool,
}

/// Вертикальная скорость, выше которой ground probe не засчитывается
///
/// Сразу после прыжка ступня ещё в радиусе probe; без фильтра персонаж
/// "приземлялся" бы на следующем же тике.
pub const RISING_EPSILON: f32 = 0.01;

impl CharacterController {
    /// Обновляет grounded по результату probe. Возвращает true на фронте приземления.
    pub fn update_grounded(&mut self, touching_ground: bool) -> bool {
        let was_grounded = self.grounded;
        self.grounded = touching_ground;
        touching_ground && !was_grounded
    }

    /// Move(axis, crouch, jump) за один fixed шаг
    ///
    /// `ceiling_blocked`: результат ceiling probe (имеет смысл только при crouch = false).
    pub fn step(
        &mut self,
        input: MoveInput,
        ceiling_blocked: bool,
        body: &mut PhysicsBody,
        delta: f32,
    ) -> MoveOutcome {
        let mut outcome = MoveOutcome::default();

        // Встать нельзя: над головой препятствие
        let crouch = input.crouch || ceiling_blocked;

        if self.grounded || self.config.air_control {
            outcome.controlled = true;
            let mut axis = input.axis.clamp(-1.0, 1.0);

            if crouch {
                if !self.crouching {
                    self.crouching = true;
                    outcome.crouch_changed = Some(true);
                }
                axis *= self.config.crouch_speed_multiplier;
            } else if self.crouching {
                self.crouching = false;
                outcome.crouch_changed = Some(false);
            }

            // Вертикаль не трогаем, сглаживаем только горизонталь
            let target = axis * self.config.movement_speed;
            body.velocity.x = smooth_damp(
                body.velocity.x,
                target,
                &mut self.smoothing_velocity,
                self.config.movement_smoothing,
                delta,
            );
            self.speed = body.velocity.length();

            if (axis > 0.0 && !self.facing_right) || (axis < 0.0 && self.facing_right) {
                self.facing_right = !self.facing_right;
                outcome.flipped = true;
            }
        }

        if self.grounded && input.jump {
            self.grounded = false;
            body.apply_impulse(Vec2::new(0.0, self.config.jump_impulse));
            outcome.jumped = true;
        }

        outcome
    }
}

/// Critically damped сглаживание (экспоненциальное затухание)
///
/// Приближается к `target` асимптотически, без скачков и без перелёта.
/// `velocity`: состояние между вызовами.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, delta: f32) -> f32 {
    if delta <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;

    // Аппроксимация e^(-x) (Padé-подобный полином)
    let x = omega * delta;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * delta;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    // Перелёт через target → фиксируем на target
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }

    output
}
