//! Projectile spawn (вызывается из scheduler после fire_delay)

use bevy::prelude::*;

use crate::combat::Projectile;
use crate::config::{FireConfig, ProjectileConfig};
use crate::physics::PhysicsBody;

/// Spawn снаряда у дула стрелка
///
/// Позиция: shooter + (direction × muzzle_offset, 0).
/// Начальный импульс: (direction × fire_impulse, fire_lift).
/// Время жизни обслуживает вызывающий (DeferredAction::Despawn).
pub fn launch_projectile(
    commands: &mut Commands,
    shooter: Entity,
    shooter_transform: &Transform,
    facing_right: bool,
    fire: &FireConfig,
    projectile: &ProjectileConfig,
) -> Entity {
    let direction = if facing_right { 1.0 } else { -1.0 };
    let position = shooter_transform.translation + Vec3::new(direction * fire.muzzle_offset, 0.0, 0.0);

    let mut body = PhysicsBody::new(projectile.mass, projectile.gravity_scale);
    body.apply_impulse(Vec2::new(direction * fire.fire_impulse, fire.fire_lift));

    commands
        .spawn((
            Projectile {
                shooter,
                radius: projectile.radius,
            },
            body,
            Transform::from_translation(position),
        ))
        .id()
}
