//! Конфигурация симуляции
//!
//! Один `GameConfig` собирается при старте (RON файл или `Default`),
//! валидируется и дальше только читается. Все секции `#[serde(default)]`,
//! поэтому частичный файл дополняется значениями по умолчанию.
//!
//! Единицы: метры, секунды, импульсы в Н·с (масса body по умолчанию 1 кг).

use std::fmt;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::Deserialize;

use crate::logger::LogLevel;
use crate::physics::LayerMask;

#[cfg(test)]
mod config_tests;

/// Ошибка загрузки/валидации конфига
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(ron::error::SpannedError),
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config {}: {}", path.display(), source)
            }
            ConfigError::Parse(err) => write!(f, "failed to parse config: {}", err),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid config value `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(err: ron::error::SpannedError) -> Self {
        ConfigError::Parse(err)
    }
}

/// Корневой конфиг (Resource: системы читают через `Res<GameConfig>`)
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Минимальный уровень логов
    pub log_level: LogLevel,
    /// Частота FixedUpdate (physics step)
    pub fixed_hz: f64,
    pub controller: ControllerConfig,
    pub fire: FireConfig,
    pub projectile: ProjectileConfig,
    pub enemy: EnemyConfig,
    pub camera: CameraConfig,
    pub level: LevelConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            fixed_hz: 60.0,
            controller: ControllerConfig::default(),
            fire: FireConfig::default(),
            projectile: ProjectileConfig::default(),
            enemy: EnemyConfig::default(),
            camera: CameraConfig::default(),
            level: LevelConfig::default(),
        }
    }
}

impl GameConfig {
    /// Парсит RON и сразу валидирует
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    /// Проверка диапазонов. Вызывается один раз при сборке plugin'а.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("fixed_hz", self.fixed_hz as f32)?;

        let c = &self.controller;
        positive("controller.movement_speed", c.movement_speed)?;
        in_range("controller.movement_smoothing", c.movement_smoothing, 0.0, 0.3)?;
        in_range("controller.crouch_speed_multiplier", c.crouch_speed_multiplier, 0.0, 1.0)?;
        non_negative("controller.jump_impulse", c.jump_impulse)?;
        positive("controller.ground_radius", c.ground_radius)?;
        positive("controller.ceiling_radius", c.ceiling_radius)?;
        positive("controller.body_mass", c.body_mass)?;
        if c.ground_layers.is_empty() {
            return Err(invalid("controller.ground_layers", "mask must select at least one layer"));
        }

        let f = &self.fire;
        non_negative("fire.fire_delay", f.fire_delay)?;
        non_negative("fire.fire_cooldown", f.fire_cooldown)?;
        non_negative("fire.fire_impulse", f.fire_impulse)?;

        let p = &self.projectile;
        positive("projectile.lifetime", p.lifetime)?;
        positive("projectile.radius", p.radius)?;
        positive("projectile.mass", p.mass)?;

        let e = &self.enemy;
        positive("enemy.health", e.health)?;
        positive("enemy.damage_per_hit", e.damage_per_hit)?;
        non_negative("enemy.hit_flag_duration", e.hit_flag_duration)?;
        if e.hurtbox_half_extents.0 <= 0.0 || e.hurtbox_half_extents.1 <= 0.0 {
            return Err(invalid("enemy.hurtbox_half_extents", "extents must be positive"));
        }

        for (index, platform) in self.level.platforms.iter().enumerate() {
            if platform.half_extents.0 <= 0.0 || platform.half_extents.1 <= 0.0 {
                return Err(invalid(
                    "level.platforms",
                    format!("platform #{} has non-positive extents", index),
                ));
            }
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("expected > 0, got {}", value)))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("expected >= 0, got {}", value)))
    }
}

fn in_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(invalid(
            field,
            format!("expected in [{}, {}], got {}", min, max, value),
        ))
    }
}

/// Параметры locomotion контроллера (копируется в `CharacterController` при spawn)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Горизонтальная скорость при |axis| = 1 (m/s)
    pub movement_speed: f32,
    /// Time constant сглаживания скорости (0..=0.3 s)
    pub movement_smoothing: f32,
    /// Управление в воздухе
    pub air_control: bool,
    /// Вертикальный импульс прыжка (Н·с)
    pub jump_impulse: f32,
    /// Множитель скорости в присяде (0..=1)
    pub crouch_speed_multiplier: f32,
    /// Слои, считающиеся землёй (и потолком)
    pub ground_layers: LayerMask,
    pub ground_radius: f32,
    pub ceiling_radius: f32,
    /// Точка ground probe относительно центра персонажа
    pub ground_probe_offset: (f32, f32),
    /// Точка ceiling probe относительно центра персонажа
    pub ceiling_probe_offset: (f32, f32),
    pub body_mass: f32,
    pub gravity_scale: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            movement_speed: 10.0,
            movement_smoothing: 0.05,
            air_control: true,
            jump_impulse: 10.0,
            crouch_speed_multiplier: 0.4,
            ground_layers: LayerMask::GROUND,
            ground_radius: 0.2,
            ceiling_radius: 0.2,
            ground_probe_offset: (0.0, -0.5),
            ceiling_probe_offset: (0.0, 0.5),
            body_mass: 1.0,
            gravity_scale: 1.0,
        }
    }
}

impl ControllerConfig {
    pub fn ground_probe(&self) -> Vec2 {
        Vec2::new(self.ground_probe_offset.0, self.ground_probe_offset.1)
    }

    pub fn ceiling_probe(&self) -> Vec2 {
        Vec2::new(self.ceiling_probe_offset.0, self.ceiling_probe_offset.1)
    }
}

/// Стрельба: задержка выстрела, cooldown, параметры запуска снаряда
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FireConfig {
    /// Задержка между trigger и spawn снаряда (s)
    pub fire_delay: f32,
    /// Cooldown после spawn снаряда (s)
    pub fire_cooldown: f32,
    /// Смещение точки spawn по facing (m)
    pub muzzle_offset: f32,
    /// Горизонтальный импульс снаряда (Н·с)
    pub fire_impulse: f32,
    /// Вертикальный импульс снаряда (Н·с)
    pub fire_lift: f32,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            fire_delay: 0.25,
            fire_cooldown: 0.5,
            muzzle_offset: 0.8,
            fire_impulse: 2.0,
            fire_lift: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Время жизни снаряда (s)
    pub lifetime: f32,
    pub radius: f32,
    pub mass: f32,
    /// 0: летит по прямой (только небольшой подъём от fire_lift)
    pub gravity_scale: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            lifetime: 1.5,
            radius: 0.15,
            mass: 1.0,
            gravity_scale: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub health: f32,
    pub damage_per_hit: f32,
    /// Сколько держится animator flag `IsHit` (s)
    pub hit_flag_duration: f32,
    pub score_per_kill: i64,
    pub hurtbox_half_extents: (f32, f32),
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            health: 2.0,
            damage_per_hit: 1.0,
            hit_flag_duration: 0.25,
            score_per_kill: 1,
            hurtbox_half_extents: (0.4, 0.5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Смещение камеры относительно цели (z: глубина)
    pub depth_offset: (f32, f32, f32),
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            depth_offset: (0.0, 0.0, -1.0),
        }
    }
}

impl CameraConfig {
    pub fn offset(&self) -> Vec3 {
        Vec3::new(self.depth_offset.0, self.depth_offset.1, self.depth_offset.2)
    }
}

/// Статическая платформа уровня (AABB)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PlatformConfig {
    pub center: (f32, f32),
    pub half_extents: (f32, f32),
}

/// Описание demo уровня для headless прогона
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub player_spawn: (f32, f32),
    pub platforms: Vec<PlatformConfig>,
    pub enemy_spawns: Vec<(f32, f32)>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            player_spawn: (0.0, 0.5),
            platforms: vec![
                // Пол
                PlatformConfig {
                    center: (0.0, -0.5),
                    half_extents: (20.0, 0.5),
                },
                // Уступ справа
                PlatformConfig {
                    center: (6.0, 2.0),
                    half_extents: (2.0, 0.25),
                },
            ],
            enemy_spawns: vec![(4.0, 0.5), (-4.0, 0.5), (6.0, 2.75)],
        }
    }
}
