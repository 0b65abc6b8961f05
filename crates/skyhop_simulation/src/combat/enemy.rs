//! Enemy hit handler
//!
//! Снаряд вошёл в hurtbox → снаряд удаляется, `IsHit` на hit_flag_duration,
//! health -= damage_per_hit. Health <= 0 → враг удаляется сразу, очки в Scoreboard.

use std::collections::HashSet;

use bevy::prelude::*;

use super::{Hurtbox, Projectile, TriggerEntered};
use crate::animation::{AnimFlag, Animator};
use crate::config::EnemyConfig;
use crate::scheduler::{DeferredAction, DeferredActions};
use crate::score::{ScoreChanged, Scoreboard};

/// Враг со счётчиком здоровья
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub health: f32,
    pub damage_per_hit: f32,
    pub hit_flag_duration: f32,
    pub score_per_kill: i64,
    /// Уже стоит ClearHitFlag в очереди (повторные попадания не продлевают)
    pub hit_flag_pending: bool,
}

impl Enemy {
    pub fn from_config(config: &EnemyConfig) -> Self {
        Self {
            health: config.health,
            damage_per_hit: config.damage_per_hit,
            hit_flag_duration: config.hit_flag_duration,
            score_per_kill: config.score_per_kill,
            hit_flag_pending: false,
        }
    }

    /// Применить одно попадание. Возвращает true если враг погиб.
    pub fn take_hit(&mut self) -> bool {
        self.health -= self.damage_per_hit;
        self.health <= 0.0
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

/// Event: попадание (враг выжил или нет)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnemyHit {
    pub enemy: Entity,
    pub projectile: Entity,
    pub remaining_health: f32,
}

/// Event: враг уничтожен
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyKilled {
    pub enemy: Entity,
    pub score_awarded: i64,
}

/// Система: обработка TriggerEntered (projectile → enemy)
///
/// Один снаряд поглощается максимум одним врагом; враг умирает максимум раз
/// (despawn через Commands применяется только после системы).
#[allow(clippy::too_many_arguments)]
pub fn handle_projectile_hits(
    mut commands: Commands,
    mut trigger_events: EventReader<TriggerEntered>,
    projectiles: Query<&Projectile>,
    mut enemies: Query<(&mut Enemy, Option<&mut Animator>)>,
    mut actions: ResMut<DeferredActions>,
    mut scoreboard: ResMut<Scoreboard>,
    time: Res<Time<Virtual>>,
    mut hit_events: EventWriter<EnemyHit>,
    mut killed_events: EventWriter<EnemyKilled>,
    mut score_events: EventWriter<ScoreChanged>,
) {
    let now = time.elapsed_secs_f64();
    let mut consumed: HashSet<Entity> = HashSet::new();

    for event in trigger_events.read() {
        let (projectile, enemy_entity) = (event.trigger, event.other);

        if !projectiles.contains(projectile) || consumed.contains(&projectile) {
            continue;
        }

        let Ok((mut enemy, animator)) = enemies.get_mut(enemy_entity) else {
            continue;
        };

        if enemy.is_dead() {
            continue;
        }

        consumed.insert(projectile);
        if let Ok(mut projectile_commands) = commands.get_entity(projectile) {
            projectile_commands.despawn();
        }

        if let Some(mut animator) = animator {
            animator.set(AnimFlag::IsHit, true);
        }
        if !enemy.hit_flag_pending {
            enemy.hit_flag_pending = true;
            actions.schedule(
                now,
                enemy.hit_flag_duration,
                DeferredAction::ClearHitFlag {
                    enemy: enemy_entity,
                },
            );
        }

        let killed = enemy.take_hit();
        hit_events.write(EnemyHit {
            enemy: enemy_entity,
            projectile,
            remaining_health: enemy.health,
        });

        if killed {
            if let Ok(mut enemy_commands) = commands.get_entity(enemy_entity) {
                enemy_commands.despawn();
            }

            score_events.write(scoreboard.add_score(enemy.score_per_kill));
            killed_events.write(EnemyKilled {
                enemy: enemy_entity,
                score_awarded: enemy.score_per_kill,
            });

            crate::log_info(&format!(
                "Enemy {:?} destroyed, {}",
                enemy_entity,
                scoreboard.text()
            ));
        }
    }
}

/// Spawn врага (hurtbox + animator)
pub fn spawn_enemy(commands: &mut Commands, position: Vec2, config: &EnemyConfig) -> Entity {
    commands
        .spawn((
            Enemy::from_config(config),
            Hurtbox {
                half_extents: Vec2::new(config.hurtbox_half_extents.0, config.hurtbox_half_extents.1),
            },
            Animator::default(),
            Transform::from_translation(position.extend(0.0)),
        ))
        .id()
}
