//! Keyboard → PlayerIntent
//!
//! Ось: A/D, ←/→. Прыжок: Space. Присед: S/↓. Выстрел: J/LCtrl.

use bevy::prelude::*;

use super::{BotPilot, Player};
use crate::character::PlayerIntent;

const LEFT_KEYS: [KeyCode; 2] = [KeyCode::KeyA, KeyCode::ArrowLeft];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::KeyD, KeyCode::ArrowRight];
const CROUCH_KEYS: [KeyCode; 2] = [KeyCode::KeyS, KeyCode::ArrowDown];
const FIRE_KEYS: [KeyCode; 2] = [KeyCode::KeyJ, KeyCode::ControlLeft];

/// Система: опрос клавиатуры
///
/// Без `ButtonInput<KeyCode>` (headless, нет InputPlugin): no-op.
/// Jump/fire латчатся (`|=`): кадр без fixed шага не теряет нажатие.
pub fn read_keyboard_intent(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut players: Query<&mut PlayerIntent, (With<Player>, Without<BotPilot>)>,
) {
    let Some(keys) = keys else {
        return;
    };

    for mut intent in players.iter_mut() {
        apply_keys(&keys, &mut intent);
    }
}

fn apply_keys(keys: &ButtonInput<KeyCode>, intent: &mut PlayerIntent) {
    let mut axis = 0.0;
    if keys.any_pressed(LEFT_KEYS) {
        axis -= 1.0;
    }
    if keys.any_pressed(RIGHT_KEYS) {
        axis += 1.0;
    }

    intent.move_axis = axis;
    intent.crouch = keys.any_pressed(CROUCH_KEYS);
    intent.jump |= keys.just_pressed(KeyCode::Space);
    intent.fire |= keys.any_just_pressed(FIRE_KEYS);
}
