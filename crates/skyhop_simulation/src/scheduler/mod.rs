//! Deferred actions (отложенные действия по игровому времени)
//!
//! Очередь min-heap по (due, seq): одинаковый due → порядок постановки.
//! Семантика "не раньше чем": действие выполняется на первом кадре, где
//! `Time<Virtual>::elapsed >= due`.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy::prelude::*;

use crate::animation::{AnimFlag, Animator};
use crate::character::{launch_projectile, CharacterController, FireControl, ProjectileLaunched};
use crate::combat::Enemy;
use crate::SkyhopSet;

/// Что выполнить по таймеру
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Spawn снаряда стрелка (после fire_delay)
    SpawnProjectile { shooter: Entity },
    /// Конец fire cooldown, сброс `Firing`
    ClearFireCooldown { shooter: Entity },
    /// Сброс `IsHit` у врага
    ClearHitFlag { enemy: Entity },
    /// Удалить entity (lifetime снаряда)
    Despawn { entity: Entity },
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    due: f64,
    seq: u64,
    action: DeferredAction,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // BinaryHeap: max-heap, поэтому сравнение развёрнуто
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .total_cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Очередь отложенных действий
#[derive(Resource, Debug, Default)]
pub struct DeferredActions {
    queue: BinaryHeap<Scheduled>,
    next_seq: u64,
}

impl DeferredActions {
    /// Поставить действие на `now + delay` (отрицательный delay = 0)
    pub fn schedule(&mut self, now: f64, delay: f32, action: DeferredAction) {
        let due = now + f64::from(delay.max(0.0));
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Scheduled { due, seq, action });
    }

    /// Следующее созревшее действие (due <= now)
    pub fn pop_due(&mut self, now: f64) -> Option<DeferredAction> {
        if self.queue.peek().is_some_and(|next| next.due <= now) {
            self.queue.pop().map(|scheduled| scheduled.action)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

pub struct SchedulerPlugin;

impl Plugin for SchedulerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DeferredActions>().add_systems(
            Update,
            run_deferred_actions
                .after(crate::character::handle_fire_trigger)
                .in_set(SkyhopSet::Frame),
        );
    }
}

/// Система: выполнить все созревшие действия
///
/// Entity могли умереть, пока действие ждало: такие действия пропускаются.
pub fn run_deferred_actions(
    mut commands: Commands,
    mut actions: ResMut<DeferredActions>,
    time: Res<Time<Virtual>>,
    mut shooters: Query<
        (
            Option<&Transform>,
            Option<&CharacterController>,
            &mut FireControl,
            Option<&mut Animator>,
        ),
        Without<Enemy>,
    >,
    mut enemies: Query<(&mut Enemy, Option<&mut Animator>), Without<CharacterController>>,
    mut launched_events: EventWriter<ProjectileLaunched>,
) {
    let now = time.elapsed_secs_f64();

    while let Some(action) = actions.pop_due(now) {
        match action {
            DeferredAction::SpawnProjectile { shooter } => {
                let Ok((transform, controller, fire, _)) = shooters.get(shooter) else {
                    crate::log_warning(&format!(
                        "SpawnProjectile: shooter {:?} не найден, пропуск",
                        shooter
                    ));
                    continue;
                };

                // Cooldown снимается всегда, даже если снаряд не появится
                actions.schedule(
                    now,
                    fire.fire.fire_cooldown,
                    DeferredAction::ClearFireCooldown { shooter },
                );

                let Some(transform) = transform else {
                    crate::log_warning(&format!(
                        "SpawnProjectile: у shooter {:?} нет Transform, снаряд пропущен",
                        shooter
                    ));
                    continue;
                };

                // Без контроллера направление берём из зеркалирования спрайта
                let facing_right =
                    controller.map_or(transform.scale.x >= 0.0, |controller| controller.facing_right);

                let projectile = launch_projectile(
                    &mut commands,
                    shooter,
                    transform,
                    facing_right,
                    &fire.fire,
                    &fire.projectile,
                );

                actions.schedule(
                    now,
                    fire.projectile.lifetime,
                    DeferredAction::Despawn { entity: projectile },
                );

                launched_events.write(ProjectileLaunched {
                    shooter,
                    projectile,
                    direction: if facing_right { 1.0 } else { -1.0 },
                });
            }
            DeferredAction::ClearFireCooldown { shooter } => {
                if let Ok((_, _, mut fire, animator)) = shooters.get_mut(shooter) {
                    fire.finish_cooldown();
                    if let Some(mut animator) = animator {
                        animator.set(AnimFlag::Firing, false);
                    }
                }
            }
            DeferredAction::ClearHitFlag { enemy } => {
                if let Ok((mut state, animator)) = enemies.get_mut(enemy) {
                    state.hit_flag_pending = false;
                    if let Some(mut animator) = animator {
                        animator.set(AnimFlag::IsHit, false);
                    }
                }
            }
            DeferredAction::Despawn { entity } => {
                if let Ok(mut entity_commands) = commands.get_entity(entity) {
                    entity_commands.despawn();
                }
            }
        }
    }
}
