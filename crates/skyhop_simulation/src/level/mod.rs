//! Demo level: статика + spawn игрока, врагов и камеры из `LevelConfig`
//!
//! Вместо поиска объектов по имени/тегу сцены все ссылки собираются в
//! `LevelEntities` и передаются явно.

use bevy::prelude::*;

use crate::camera::spawn_follow_camera;
use crate::character::spawn_player;
use crate::combat::spawn_enemy;
use crate::config::{GameConfig, LevelConfig};
use crate::physics::{LayerMask, PhysicsQueries, StaticBox, StaticGeometry};
use crate::player::BotPilot;

/// Entities демо-уровня
#[derive(Resource, Debug, Clone)]
pub struct LevelEntities {
    pub player: Entity,
    pub camera: Entity,
    pub enemies: Vec<Entity>,
}

/// Статическая геометрия уровня (все платформы: ground layer)
pub fn static_geometry(level: &LevelConfig) -> StaticGeometry {
    level
        .platforms
        .iter()
        .fold(StaticGeometry::new(), |geometry, platform| {
            geometry.with_box(StaticBox::new(
                Vec2::new(platform.center.0, platform.center.1),
                Vec2::new(platform.half_extents.0, platform.half_extents.1),
                LayerMask::GROUND,
            ))
        })
}

/// Spawn всего уровня, возвращает ссылки на ключевые entities
pub fn spawn_level(commands: &mut Commands, config: &GameConfig) -> LevelEntities {
    let spawn = Vec2::new(config.level.player_spawn.0, config.level.player_spawn.1);
    let player = spawn_player(commands, spawn, config);

    let enemies = config
        .level
        .enemy_spawns
        .iter()
        .map(|(x, y)| spawn_enemy(commands, Vec2::new(*x, *y), &config.enemy))
        .collect();

    let camera = spawn_follow_camera(commands, player, spawn.extend(0.0), config.camera.offset());

    LevelEntities {
        player,
        camera,
        enemies,
    }
}

/// Startup система headless демо: геометрия + уровень + bot на игроке
pub fn setup_demo_level(mut commands: Commands, config: Res<GameConfig>) {
    commands.insert_resource(PhysicsQueries::new(static_geometry(&config.level)));

    let level = spawn_level(&mut commands, &config);
    commands.entity(level.player).insert(BotPilot::default());

    crate::log_info(&format!(
        "Level spawned: player {:?}, {} enemies, {} platforms",
        level.player,
        level.enemies.len(),
        config.level.platforms.len()
    ));

    commands.insert_resource(level);
}
