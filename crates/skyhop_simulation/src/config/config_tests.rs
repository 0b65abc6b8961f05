//! Tests for config loading/validation.

#[cfg(test)]
mod tests {
    use crate::config::{ConfigError, GameConfig};
    use crate::logger::LogLevel;
    use crate::physics::LayerMask;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_ron_gives_defaults() {
        let config = GameConfig::from_ron_str("()").unwrap();

        assert_eq!(config.fixed_hz, 60.0);
        assert_eq!(config.controller.movement_speed, 10.0);
        assert_eq!(config.fire.fire_cooldown, 0.5);
        assert_eq!(config.enemy.health, 2.0);
        assert_eq!(config.camera.depth_offset, (0.0, 0.0, -1.0));
        assert_eq!(config.level.enemy_spawns.len(), 3);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = GameConfig::from_ron_str(
            "(log_level: Warning, controller: (movement_speed: 6.5, ground_layers: 3))",
        )
        .unwrap();

        assert_eq!(config.log_level, LogLevel::Warning);
        assert_eq!(config.controller.movement_speed, 6.5);
        assert_eq!(config.controller.ground_layers, LayerMask(3));
        // Остальное: по умолчанию
        assert_eq!(config.controller.crouch_speed_multiplier, 0.4);
        assert!(config.controller.air_control);
    }

    #[test]
    fn test_demo_config_parses() {
        let config = GameConfig::from_ron_str(include_str!("../../config/demo.ron")).unwrap();

        assert_eq!(config.level.platforms.len(), 3);
        assert_eq!(config.level.enemy_spawns.len(), 4);
    }

    #[test]
    fn test_smoothing_out_of_range_rejected() {
        let err = GameConfig::from_ron_str("(controller: (movement_smoothing: 0.5))").unwrap_err();

        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "controller.movement_smoothing"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_crouch_multiplier_above_one_rejected() {
        let mut config = GameConfig::default();
        config.controller.crouch_speed_multiplier = 1.5;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "controller.crouch_speed_multiplier",
                ..
            })
        ));
    }

    #[test]
    fn test_non_positive_values_rejected() {
        let mut config = GameConfig::default();
        config.enemy.health = 0.0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.projectile.lifetime = -1.0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.fire.fire_cooldown = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_ground_mask_rejected() {
        let mut config = GameConfig::default();
        config.controller.ground_layers = LayerMask::NONE;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("controller.ground_layers"));
    }

    #[test]
    fn test_bad_platform_reports_index() {
        let config = GameConfig::from_ron_str(
            "(level: (platforms: [(center: (0.0, 0.0), half_extents: (1.0, 0.0))]))",
        );

        let err = config.unwrap_err();
        assert!(err.to_string().contains("platform #0"), "{}", err);
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        let err = GameConfig::from_ron_str("(fixed_hz: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load("/nonexistent/skyhop.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
