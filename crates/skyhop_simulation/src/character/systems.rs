//! Character systems
//!
//! FixedUpdate: detect_ground (Sense) → apply_locomotion (Act)
//! Update: handle_fire_trigger (Frame)

use bevy::prelude::*;

use super::locomotion::{MoveInput, RISING_EPSILON};
use super::{
    CharacterController, ColliderToggle, CrouchChanged, CrouchCollider, FireControl, FireStarted,
    Jumped, Landed, PlayerIntent,
};
use crate::animation::{AnimFlag, Animator};
use crate::physics::{PhysicsBody, PhysicsQueries};
use crate::scheduler::{DeferredAction, DeferredActions};

/// Система: ground probe каждый fixed шаг + Landed на фронте
pub fn detect_ground(
    mut characters: Query<(Entity, &Transform, &PhysicsBody, &mut CharacterController)>,
    queries: Res<PhysicsQueries>,
    mut landed_events: EventWriter<Landed>,
) {
    for (entity, transform, body, mut controller) in characters.iter_mut() {
        let probe = transform.translation.truncate()
            + controller.mirrored(controller.config.ground_probe());

        let touching = body.velocity.y <= RISING_EPSILON
            && queries.overlap_circle(
                probe,
                controller.config.ground_radius,
                controller.config.ground_layers,
                Some(entity),
            );

        if controller.update_grounded(touching) {
            landed_events.write(Landed { entity });
        }
    }
}

/// Система: Move(axis, crouch, jump) для всех контроллеров
///
/// Jump intent (edge) сбрасывается после шага, даже если прыжок не состоялся.
pub fn apply_locomotion(
    mut characters: Query<(
        Entity,
        &mut CharacterController,
        &mut PlayerIntent,
        &mut PhysicsBody,
        &mut Transform,
        Option<&CrouchCollider>,
    )>,
    mut toggles: Query<&mut ColliderToggle>,
    queries: Res<PhysicsQueries>,
    time: Res<Time<Fixed>>,
    mut crouch_events: EventWriter<CrouchChanged>,
    mut jump_events: EventWriter<Jumped>,
) {
    let delta = time.delta_secs();

    for (entity, mut controller, mut intent, mut body, mut transform, crouch_collider) in
        characters.iter_mut()
    {
        // Ceiling probe нужен только когда хотим стоять
        let ceiling_blocked = !intent.crouch && {
            let probe = transform.translation.truncate()
                + controller.mirrored(controller.config.ceiling_probe());
            queries.overlap_circle(
                probe,
                controller.config.ceiling_radius,
                controller.config.ground_layers,
                Some(entity),
            )
        };

        let input = MoveInput {
            axis: intent.move_axis,
            crouch: intent.crouch,
            jump: intent.jump,
        };
        intent.jump = false;

        let outcome = controller.step(input, ceiling_blocked, &mut body, delta);

        if outcome.controlled {
            if let Some(CrouchCollider(collider)) = crouch_collider {
                if let Ok(mut toggle) = toggles.get_mut(*collider) {
                    toggle.enabled = !controller.crouching;
                }
            }
        }

        if let Some(crouching) = outcome.crouch_changed {
            crouch_events.write(CrouchChanged { entity, crouching });
        }

        if outcome.flipped {
            // Зеркалим спрайт
            transform.scale.x *= -1.0;
        }

        if outcome.jumped {
            jump_events.write(Jumped { entity });
        }
    }
}

/// Система: fire trigger (frame phase)
///
/// Trigger принят → cooldown, `Firing = true`, spawn снаряда через fire_delay.
/// Во время cooldown trigger просто съедается.
pub fn handle_fire_trigger(
    mut shooters: Query<(Entity, &mut PlayerIntent, &mut FireControl, Option<&mut Animator>)>,
    mut actions: ResMut<DeferredActions>,
    time: Res<Time<Virtual>>,
    mut fire_events: EventWriter<FireStarted>,
) {
    let now = time.elapsed_secs_f64();

    for (shooter, mut intent, mut fire, animator) in shooters.iter_mut() {
        if !intent.fire {
            continue;
        }
        intent.fire = false;

        if !fire.try_trigger() {
            continue;
        }

        if let Some(mut animator) = animator {
            animator.set(AnimFlag::Firing, true);
        }

        actions.schedule(now, fire.fire.fire_delay, DeferredAction::SpawnProjectile { shooter });
        fire_events.write(FireStarted { shooter });

        crate::log(&format!("Shooter {:?} fire triggered", shooter));
    }
}
