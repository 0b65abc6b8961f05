//! Player module: input companion контроллера
//!
//! - input: keyboard → PlayerIntent (если host поставил InputPlugin)
//! - bot: seeded случайный ввод для headless прогонов
//! - animation: intent/events → Animator параметры

use bevy::prelude::*;

pub mod animation;
pub mod bot;
pub mod input;

pub use animation::sync_player_animator;
pub use bot::{drive_bot_intent, BotPilot};
pub use input::read_keyboard_intent;

use crate::SkyhopSet;

/// Marker component для player-controlled entity
///
/// Keyboard система пишет intent только в `With<Player>` entity без `BotPilot`.
/// Переключение управления:
/// ```ignore
/// commands.entity(actor).insert(BotPilot::default());
/// ```
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (read_keyboard_intent, drive_bot_intent).in_set(SkyhopSet::Input),
        )
        .add_systems(Update, sync_player_animator.in_set(SkyhopSet::Frame));
    }
}
