//! Camera follower
//!
//! Каждый late frame: camera = target + offset. Без сглаживания и границ.

use bevy::prelude::*;

use crate::SkyhopSet;

/// Камера, следующая за entity
///
/// `offset.z`: глубина (камера не должна совпадать по z со спрайтами).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CameraFollow {
    pub target: Entity,
    pub offset: Vec3,
}

pub struct CameraFollowPlugin;

impl Plugin for CameraFollowPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PostUpdate, follow_target.in_set(SkyhopSet::LateFrame));
    }
}

/// Система: копирует позицию цели в камеру
///
/// Цель пропала (despawn) → камера стоит на месте, warning в лог.
pub fn follow_target(
    mut cameras: Query<(Entity, &CameraFollow, &mut Transform)>,
    targets: Query<&Transform, Without<CameraFollow>>,
) {
    for (camera, follow, mut transform) in cameras.iter_mut() {
        match targets.get(follow.target) {
            Ok(target) => {
                transform.translation = target.translation + follow.offset;
            }
            Err(_) => {
                crate::log_warning(&format!(
                    "Camera {:?}: follow target {:?} not found, skipping",
                    camera, follow.target
                ));
            }
        }
    }
}

/// Spawn helper: камера сразу стоит на цели
pub fn spawn_follow_camera(
    commands: &mut Commands,
    target: Entity,
    target_position: Vec3,
    offset: Vec3,
) -> Entity {
    commands
        .spawn((
            CameraFollow { target, offset },
            Transform::from_translation(target_position + offset),
        ))
        .id()
}
