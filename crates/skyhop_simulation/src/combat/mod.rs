//! Combat module (projectiles vs enemies)
//!
//! ECS ответственность:
//! - Правила попадания: health, hit flag, смерть, очки
//! - Events: TriggerEntered → EnemyHit / EnemyKilled
//!
//! Host ответственность (или headless `detect_projectile_contacts`):
//! - Trigger detection → TriggerEntered

use bevy::prelude::*;

pub mod enemy;
pub mod projectile;

#[cfg(test)]
mod enemy_tests;

pub use enemy::{handle_projectile_hits, spawn_enemy, Enemy, EnemyHit, EnemyKilled};
pub use projectile::{
    detect_projectile_contacts, Hurtbox, Projectile, TriggerContacts, TriggerEntered,
};

use crate::SkyhopSet;

/// Combat Plugin
///
/// Порядок в FixedUpdate (после интеграции позиций):
/// 1. detect_projectile_contacts: пересечения снарядов с hurtbox'ами
/// 2. handle_projectile_hits: урон, hit flag, смерть, очки
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TriggerEntered>()
            .add_event::<EnemyHit>()
            .add_event::<EnemyKilled>()
            .init_resource::<TriggerContacts>();

        app.add_systems(
            FixedUpdate,
            (detect_projectile_contacts, handle_projectile_hits)
                .chain()
                .in_set(SkyhopSet::Contacts),
        );
    }
}
