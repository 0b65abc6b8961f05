//! Rigid body компоненты (velocity + impulse)

use bevy::prelude::*;

use super::LayerMask;

/// Ускорение свободного падения (m/s²)
pub const GRAVITY: f32 = -9.81;

/// Упрощённое rigid body: velocity, масса, масштаб гравитации
///
/// Host физика читает `velocity` после gameplay систем и пишет обратно
/// после своего шага. Headless fallback интегрирует сам.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    pub velocity: Vec2,
    pub mass: f32,
    pub gravity_scale: f32,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            mass: 1.0,
            gravity_scale: 1.0,
        }
    }
}

impl PhysicsBody {
    pub fn new(mass: f32, gravity_scale: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            mass,
            gravity_scale,
        }
    }

    /// Мгновенный импульс: Δv = J / m
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse / self.mass;
    }
}

/// Опора для headless fallback: body приземляется на статику
///
/// `foot_offset`: точка "ступни" относительно центра (совпадает с ground probe).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct GroundSnap {
    pub foot_offset: Vec2,
    pub layers: LayerMask,
}
