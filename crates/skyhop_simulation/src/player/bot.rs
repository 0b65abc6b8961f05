//! Seeded bot: случайный, но воспроизводимый ввод для headless прогонов

use bevy::prelude::*;
use rand::Rng;

use crate::character::PlayerIntent;
use crate::DeterministicRng;

/// Bot управляет PlayerIntent вместо клавиатуры
#[derive(Component, Debug, Clone, Copy)]
pub struct BotPilot {
    /// Кадров до смены направления
    pub ticks_left: u32,
    pub jump_chance: f64,
    pub fire_chance: f64,
    pub crouch_chance: f64,
}

impl Default for BotPilot {
    fn default() -> Self {
        Self {
            ticks_left: 0,
            jump_chance: 0.03,
            fire_chance: 0.05,
            crouch_chance: 0.1,
        }
    }
}

/// Система: bot intent (каждый кадр)
///
/// Все случайные решения берутся из `DeterministicRng` → одинаковый seed даёт
/// одинаковую игру.
pub fn drive_bot_intent(
    mut bots: Query<(&mut BotPilot, &mut PlayerIntent)>,
    rng: Option<ResMut<DeterministicRng>>,
) {
    let Some(mut rng) = rng else {
        return;
    };

    for (mut bot, mut intent) in bots.iter_mut() {
        if bot.ticks_left == 0 {
            intent.move_axis = rng.rng.gen_range(-1..=1) as f32;
            intent.crouch = rng.rng.gen_bool(bot.crouch_chance);
            bot.ticks_left = rng.rng.gen_range(20..60);
        } else {
            bot.ticks_left -= 1;
        }

        intent.jump |= rng.rng.gen_bool(bot.jump_chance);
        intent.fire |= rng.rng.gen_bool(bot.fire_chance);
    }
}
