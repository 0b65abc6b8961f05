//! Tests for enemy hit handling (handler без остальной симуляции).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::animation::{AnimFlag, Animator};
    use crate::combat::{
        handle_projectile_hits, spawn_enemy, Enemy, EnemyHit, EnemyKilled, Projectile,
        TriggerEntered,
    };
    use crate::config::EnemyConfig;
    use crate::scheduler::{DeferredAction, DeferredActions};
    use crate::score::{ScoreChanged, Scoreboard};

    fn hit_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<TriggerEntered>()
            .add_event::<EnemyHit>()
            .add_event::<EnemyKilled>()
            .add_event::<ScoreChanged>()
            .init_resource::<DeferredActions>()
            .init_resource::<Scoreboard>()
            .add_systems(Update, handle_projectile_hits);
        app
    }

    fn spawn_projectile(app: &mut App) -> Entity {
        let shooter = app.world_mut().spawn_empty().id();
        app.world_mut()
            .spawn((Projectile { shooter, radius: 0.1 }, Transform::default()))
            .id()
    }

    fn spawn_test_enemy(app: &mut App) -> Entity {
        let enemy = {
            let mut commands = app.world_mut().commands();
            spawn_enemy(&mut commands, Vec2::new(4.0, 0.5), &EnemyConfig::default())
        };
        app.world_mut().flush();
        enemy
    }

    fn hit(app: &mut App, projectile: Entity, enemy: Entity) {
        app.world_mut().send_event(TriggerEntered {
            trigger: projectile,
            other: enemy,
        });
        app.update();
    }

    #[test]
    fn test_first_hit_leaves_enemy_alive() {
        let mut app = hit_app();
        let enemy = spawn_test_enemy(&mut app);
        let projectile = spawn_projectile(&mut app);

        hit(&mut app, projectile, enemy);

        let state = app.world().get::<Enemy>(enemy).unwrap();
        assert_eq!(state.health, 1.0);
        assert!(app.world().get::<Animator>(enemy).unwrap().get(AnimFlag::IsHit));
        assert!(app.world().get_entity(projectile).is_err(), "снаряд удалён сразу");
        assert_eq!(app.world().resource::<Scoreboard>().score(), 0);
    }

    #[test]
    fn test_second_hit_kills_and_scores_once() {
        let mut app = hit_app();
        let enemy = spawn_test_enemy(&mut app);

        let first = spawn_projectile(&mut app);
        hit(&mut app, first, enemy);
        let second = spawn_projectile(&mut app);
        hit(&mut app, second, enemy);

        assert!(app.world().get_entity(enemy).is_err());
        let scoreboard = app.world().resource::<Scoreboard>();
        assert_eq!(scoreboard.score(), 1);
        assert_eq!(scoreboard.text(), "Score: 1");
    }

    #[test]
    fn test_repeat_hits_schedule_single_flag_clear() {
        let mut app = hit_app();
        let enemy = {
            let mut commands = app.world_mut().commands();
            spawn_enemy(
                &mut commands,
                Vec2::ZERO,
                &EnemyConfig {
                    health: 10.0,
                    ..default()
                },
            )
        };
        app.world_mut().flush();

        for _ in 0..3 {
            let projectile = spawn_projectile(&mut app);
            hit(&mut app, projectile, enemy);
        }

        assert_eq!(app.world().get::<Enemy>(enemy).unwrap().health, 7.0);

        let mut actions = app.world_mut().resource_mut::<DeferredActions>();
        assert_eq!(actions.len(), 1);
        assert_eq!(
            actions.pop_due(f64::MAX),
            Some(DeferredAction::ClearHitFlag { enemy })
        );
    }

    #[test]
    fn test_projectile_consumed_by_single_enemy() {
        let mut app = hit_app();
        let first_enemy = spawn_test_enemy(&mut app);
        let second_enemy = spawn_test_enemy(&mut app);
        let projectile = spawn_projectile(&mut app);

        app.world_mut().send_event(TriggerEntered {
            trigger: projectile,
            other: first_enemy,
        });
        app.world_mut().send_event(TriggerEntered {
            trigger: projectile,
            other: second_enemy,
        });
        app.update();

        assert_eq!(app.world().get::<Enemy>(first_enemy).unwrap().health, 1.0);
        assert_eq!(app.world().get::<Enemy>(second_enemy).unwrap().health, 2.0);
    }

    #[test]
    fn test_non_projectile_trigger_ignored() {
        let mut app = hit_app();
        let enemy = spawn_test_enemy(&mut app);
        let not_projectile = app.world_mut().spawn(Transform::default()).id();

        hit(&mut app, not_projectile, enemy);

        assert_eq!(app.world().get::<Enemy>(enemy).unwrap().health, 2.0);
        assert!(app.world().get_entity(not_projectile).is_ok());
    }
}
