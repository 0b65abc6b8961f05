//! Character domain module
//!
//! Locomotion (move/jump/crouch) + стрельба с cooldown.
//!
//! ECS делает правила, host (или HeadlessPhysicsPlugin) двигает bodies:
//! - FixedUpdate: detect_ground → apply_locomotion (velocity в PhysicsBody)
//! - Update: handle_fire_trigger → DeferredActions (spawn снаряда, cooldown)

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod fire;
pub mod locomotion;
pub mod systems;

#[cfg(test)]
mod locomotion_tests;

pub use components::*;
pub use events::*;
pub use fire::launch_projectile;
pub use locomotion::{smooth_damp, MoveInput, MoveOutcome, RISING_EPSILON};
pub use systems::*;

use crate::animation::Animator;
use crate::config::GameConfig;
use crate::physics::{GroundSnap, PhysicsBody, PhysicsQueries};
use crate::player::Player;
use crate::SkyhopSet;

/// Character Plugin
pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        // Пустая статика по умолчанию, host подменяет через insert_resource
        app.init_resource::<PhysicsQueries>()
            .add_event::<Landed>()
            .add_event::<CrouchChanged>()
            .add_event::<Jumped>()
            .add_event::<FireStarted>()
            .add_event::<ProjectileLaunched>()
            .register_type::<PlayerIntent>()
            .register_type::<ColliderToggle>();

        app.add_systems(FixedUpdate, detect_ground.in_set(SkyhopSet::Sense))
            .add_systems(FixedUpdate, apply_locomotion.in_set(SkyhopSet::Act))
            .add_systems(Update, handle_fire_trigger.in_set(SkyhopSet::Frame));
    }
}

/// Spawn игрока со всеми компонентами контроллера
///
/// Crouch collider: отдельный child entity (host вешает на него верхнюю
/// половину тела и читает `ColliderToggle`).
pub fn spawn_player(commands: &mut Commands, position: Vec2, config: &GameConfig) -> Entity {
    let controller = CharacterController::new(config.controller);

    let player = commands
        .spawn((
            Player,
            controller,
            FireControl::new(config.fire, config.projectile),
            PhysicsBody::new(config.controller.body_mass, config.controller.gravity_scale),
            GroundSnap {
                foot_offset: config.controller.ground_probe(),
                layers: config.controller.ground_layers,
            },
            Animator::default(),
            Transform::from_translation(position.extend(0.0)),
        ))
        .id();

    let collider = commands.spawn(ColliderToggle::default()).id();
    commands.entity(player).add_child(collider).insert(CrouchCollider(collider));

    player
}
