//! Skyhop Simulation Core
//!
//! Gameplay 2D платформера на Bevy 0.16 (headless ECS)
//!
//! HOST-AGNOSTIC ARCHITECTURE:
//! - ECS = правила (locomotion, стрельба, попадания, счёт, камера)
//! - Host = физика/рендер/анимация/ввод; общается через intent компоненты,
//!   `PhysicsBody`, `PhysicsQueries`, `Animator` и events
//! - Без host'а: `HeadlessPhysicsPlugin` + bot input (тесты, бинарник)

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod animation;
pub mod camera;
pub mod character;
pub mod combat;
pub mod config;
pub mod level;
pub mod logger;
pub mod physics;
pub mod player;
pub mod scheduler;
pub mod score;

// Re-export основных типов
pub use animation::{AnimFlag, Animator};
pub use camera::{spawn_follow_camera, CameraFollow, CameraFollowPlugin};
pub use character::{
    spawn_player, CharacterController, CharacterPlugin, CrouchChanged, FireControl, FireStarted,
    Jumped, Landed, PlayerIntent, ProjectileLaunched,
};
pub use combat::{spawn_enemy, CombatPlugin, Enemy, EnemyHit, EnemyKilled, Projectile, TriggerEntered};
pub use config::{ConfigError, GameConfig};
pub use level::{setup_demo_level, spawn_level, static_geometry, LevelEntities};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel};
pub use physics::{HeadlessPhysicsPlugin, PhysicsBody, PhysicsQueries};
pub use player::{BotPilot, Player, PlayerPlugin};
pub use scheduler::{DeferredAction, DeferredActions, SchedulerPlugin};
pub use score::{ScoreChanged, ScorePlugin, Scoreboard};

/// Фазы кадра
///
/// FixedUpdate: Sense → Act → Integrate → Contacts
/// Update: Input → Frame
/// PostUpdate: LateFrame
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkyhopSet {
    /// Ground/ceiling probes
    Sense,
    /// Locomotion (velocity, jump impulse)
    Act,
    /// Headless интеграция (host физика сюда ничего не добавляет)
    Integrate,
    /// Trigger contacts → попадания
    Contacts,
    /// Keyboard / bot → PlayerIntent
    Input,
    /// Fire trigger, deferred actions, animator sync
    Frame,
    /// Камера
    LateFrame,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Физику НЕ включает: host добавляет свою (и свой `PhysicsQueries` через insert_resource),
/// в headless режиме нужен `HeadlessPhysicsPlugin`.
#[derive(Default)]
pub struct SkyhopPlugin {
    pub config: GameConfig,
}

impl SkyhopPlugin {
    /// Plugin с проверенной конфигурацией (fail fast до старта App)
    pub fn from_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }
}

impl Plugin for SkyhopPlugin {
    fn build(&self, app: &mut App) {
        logger::set_log_level(self.config.log_level);

        app.insert_resource(Time::<Fixed>::from_hz(self.config.fixed_hz))
            .insert_resource(self.config.clone())
            .register_type::<Animator>()
            .register_type::<PhysicsBody>()
            .register_type::<physics::GroundSnap>()
            .register_type::<CameraFollow>()
            .configure_sets(
                FixedUpdate,
                (
                    SkyhopSet::Sense,
                    SkyhopSet::Act,
                    SkyhopSet::Integrate,
                    SkyhopSet::Contacts,
                )
                    .chain(),
            )
            .configure_sets(Update, (SkyhopSet::Input, SkyhopSet::Frame).chain())
            .configure_sets(PostUpdate, SkyhopSet::LateFrame)
            // Подсистемы
            .add_plugins((
                ScorePlugin,
                SchedulerPlugin,
                CharacterPlugin,
                CombatPlugin,
                PlayerPlugin,
                CameraFollowPlugin,
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время идёт ровно на 1/60 sec за `app.update()` → один fixed шаг на кадр,
/// результат не зависит от скорости машины.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)) // 60Hz FixedUpdate
        .insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(
            Duration::from_secs_f64(1.0 / 60.0),
        ));

    app
}

/// Snapshot gameplay состояния для сравнения детерминизма
///
/// Позиции и скорости тел, здоровье врагов, счёт.
pub fn gameplay_snapshot(world: &mut World) -> Vec<u8> {
    let mut snapshot = Vec::new();

    let mut bodies = world.query::<(Entity, &Transform, &PhysicsBody)>();
    let mut entries: Vec<_> = bodies
        .iter(world)
        .map(|(entity, transform, body)| (entity, transform.translation, body.velocity))
        .collect();
    // Сортируем по Entity ID для детерминизма
    entries.sort_by_key(|(entity, _, _)| entity.index());

    for (entity, position, velocity) in entries {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}{:?}", position, velocity).as_bytes());
    }

    let mut enemies = world.query::<(Entity, &Enemy)>();
    let mut health: Vec<_> = enemies
        .iter(world)
        .map(|(entity, enemy)| (entity.index(), enemy.health))
        .collect();
    health.sort_by_key(|(index, _)| *index);

    for (index, value) in health {
        snapshot.extend_from_slice(&index.to_le_bytes());
        snapshot.extend_from_slice(&value.to_le_bytes());
    }

    if let Some(scoreboard) = world.get_resource::<Scoreboard>() {
        snapshot.extend_from_slice(&scoreboard.score().to_le_bytes());
    }

    snapshot
}
