//! Tests for locomotion logic (без App, чистые шаги).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::character::locomotion::{smooth_damp, MoveInput};
    use crate::character::CharacterController;
    use crate::config::ControllerConfig;
    use crate::physics::PhysicsBody;

    const DT: f32 = 1.0 / 60.0;

    fn grounded_controller() -> CharacterController {
        let mut controller = CharacterController::default();
        controller.grounded = true;
        controller
    }

    #[test]
    fn test_landed_fires_once_per_edge() {
        let mut controller = CharacterController::default();
        let contacts = [
            false, true, true, true, false, false, true, true, false, true,
        ];

        let landings: Vec<usize> = contacts
            .iter()
            .enumerate()
            .filter_map(|(tick, touching)| controller.update_grounded(*touching).then_some(tick))
            .collect();

        // Фронты false→true: тики 1, 6, 9
        assert_eq!(landings, vec![1, 6, 9]);
    }

    #[test]
    fn test_landed_never_fires_while_staying_grounded() {
        let mut controller = grounded_controller();
        for _ in 0..100 {
            assert!(!controller.update_grounded(true));
        }
    }

    #[test]
    fn test_crouch_changed_only_on_transitions() {
        let mut controller = grounded_controller();
        let mut body = PhysicsBody::default();
        let intents = [false, true, true, true, false, false, true, false];

        let changes: Vec<(usize, bool)> = intents
            .iter()
            .enumerate()
            .filter_map(|(tick, crouch)| {
                let input = MoveInput {
                    crouch: *crouch,
                    ..default()
                };
                controller
                    .step(input, false, &mut body, DT)
                    .crouch_changed
                    .map(|state| (tick, state))
            })
            .collect();

        assert_eq!(
            changes,
            vec![(1, true), (4, false), (6, true), (7, false)]
        );
    }

    #[test]
    fn test_ceiling_forces_crouch() {
        let mut controller = grounded_controller();
        let mut body = PhysicsBody::default();

        let outcome = controller.step(MoveInput::default(), true, &mut body, DT);

        assert_eq!(outcome.crouch_changed, Some(true));
        assert!(controller.crouching);

        // Препятствие ушло: встаём
        let outcome = controller.step(MoveInput::default(), false, &mut body, DT);
        assert_eq!(outcome.crouch_changed, Some(false));
    }

    #[test]
    fn test_crouch_slows_target_speed() {
        let mut standing = grounded_controller();
        let mut crouching = grounded_controller();
        let mut standing_body = PhysicsBody::default();
        let mut crouching_body = PhysicsBody::default();

        for _ in 0..240 {
            standing.step(
                MoveInput { axis: 1.0, ..default() },
                false,
                &mut standing_body,
                DT,
            );
            crouching.step(
                MoveInput { axis: 1.0, crouch: true, jump: false },
                false,
                &mut crouching_body,
                DT,
            );
        }

        assert!((standing_body.velocity.x - 10.0).abs() < 1e-3);
        assert!((crouching_body.velocity.x - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_flip_once_when_moving_against_facing() {
        let mut controller = grounded_controller();
        controller.facing_right = false;
        let mut body = PhysicsBody::default();

        let flips = (0..10)
            .filter(|_| {
                controller
                    .step(MoveInput { axis: 1.0, ..default() }, false, &mut body, DT)
                    .flipped
            })
            .count();

        assert_eq!(flips, 1);
        assert!(controller.facing_right);
    }

    #[test]
    fn test_zero_axis_never_flips() {
        for facing_right in [true, false] {
            let mut controller = grounded_controller();
            controller.facing_right = facing_right;
            let mut body = PhysicsBody::default();

            for _ in 0..10 {
                let outcome = controller.step(MoveInput::default(), false, &mut body, DT);
                assert!(!outcome.flipped);
            }
            assert_eq!(controller.facing_right, facing_right);
        }
    }

    #[test]
    fn test_vertical_velocity_preserved() {
        let mut controller = grounded_controller();
        let mut body = PhysicsBody::default();
        body.velocity = Vec2::new(0.0, -3.5);

        controller.step(MoveInput { axis: -1.0, ..default() }, false, &mut body, DT);

        assert_eq!(body.velocity.y, -3.5);
        assert!(body.velocity.x < 0.0);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut airborne = CharacterController::default();
        let mut body = PhysicsBody::default();

        let outcome = airborne.step(MoveInput { jump: true, ..default() }, false, &mut body, DT);
        assert!(!outcome.jumped);
        assert_eq!(body.velocity.y, 0.0);

        let mut grounded = grounded_controller();
        let outcome = grounded.step(MoveInput { jump: true, ..default() }, false, &mut body, DT);
        assert!(outcome.jumped);
        assert!(!grounded.grounded, "jump должен сразу пометить airborne");
        assert_eq!(body.velocity.y, ControllerConfig::default().jump_impulse);

        // Второй прыжок в воздухе не проходит
        let outcome = grounded.step(MoveInput { jump: true, ..default() }, false, &mut body, DT);
        assert!(!outcome.jumped);
    }

    #[test]
    fn test_no_air_control_freezes_horizontal() {
        let mut controller = CharacterController::new(ControllerConfig {
            air_control: false,
            ..default()
        });
        let mut body = PhysicsBody::default();
        body.velocity = Vec2::new(2.0, 1.0);

        let outcome = controller.step(MoveInput { axis: -1.0, ..default() }, false, &mut body, DT);

        assert!(!outcome.controlled);
        assert!(!outcome.flipped);
        assert_eq!(body.velocity, Vec2::new(2.0, 1.0));
    }

    #[test]
    fn test_smoothing_never_jumps_to_target() {
        let mut velocity = 0.0;
        let first = smooth_damp(0.0, 10.0, &mut velocity, 0.05, DT);

        assert!(first > 0.0);
        assert!(first < 10.0, "first = {}", first);
    }

    #[test]
    fn test_smoothing_is_monotonic_without_overshoot() {
        let mut velocity = 0.0;
        let mut current = 0.0;

        for _ in 0..600 {
            let next = smooth_damp(current, 10.0, &mut velocity, 0.05, DT);
            assert!(next >= current - 1e-5);
            assert!(next <= 10.0);
            current = next;
        }

        assert!((current - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_smoothing_zero_delta_is_noop() {
        let mut velocity = 1.5;
        assert_eq!(smooth_damp(3.0, 10.0, &mut velocity, 0.05, 0.0), 3.0);
        assert_eq!(velocity, 1.5);
    }
}
