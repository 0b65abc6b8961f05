//! Animator параметры игрока
//!
//! speed = |axis| × movement_speed, IsJumping: Jumped → true / Landed → false,
//! IsCrouching повторяет CrouchChanged.

use bevy::prelude::*;

use crate::animation::{AnimFlag, Animator};
use crate::character::{CharacterController, CrouchChanged, Jumped, Landed, PlayerIntent};

/// Система: intent + character events → Animator
///
/// Landed обрабатываем до Jumped: приземление и новый прыжок в одном кадре
/// должны оставить `IsJumping = true`.
pub fn sync_player_animator(
    mut animated: Query<(&CharacterController, &PlayerIntent, &mut Animator)>,
    mut landed_events: EventReader<Landed>,
    mut jump_events: EventReader<Jumped>,
    mut crouch_events: EventReader<CrouchChanged>,
) {
    for (controller, intent, mut animator) in animated.iter_mut() {
        animator.speed = intent.move_axis.abs() * controller.config.movement_speed;
    }

    for event in landed_events.read() {
        if let Ok((_, _, mut animator)) = animated.get_mut(event.entity) {
            animator.set(AnimFlag::IsJumping, false);
        }
    }

    for event in jump_events.read() {
        if let Ok((_, _, mut animator)) = animated.get_mut(event.entity) {
            animator.set(AnimFlag::IsJumping, true);
        }
    }

    for event in crouch_events.read() {
        if let Ok((_, _, mut animator)) = animated.get_mut(event.entity) {
            animator.set(AnimFlag::IsCrouching, event.crouching);
        }
    }
}
