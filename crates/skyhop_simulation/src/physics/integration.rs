//! Headless fallback физика
//!
//! Когда host движка нет (тесты, headless бинарник), velocity интегрируем сами:
//! гравитация → position += velocity * dt → landing snap на статику.
//! Коллизий между динамическими телами нет.

use bevy::prelude::*;

use super::{GroundSnap, PhysicsBody, PhysicsQueries, GRAVITY};
use crate::SkyhopSet;

/// Plugin для headless режима (host с собственной физикой его НЕ добавляет)
pub struct HeadlessPhysicsPlugin;

impl Plugin for HeadlessPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PhysicsQueries>().add_systems(
            FixedUpdate,
            (apply_gravity, integrate_bodies)
                .chain()
                .in_set(SkyhopSet::Integrate),
        );
    }
}

/// Система: гравитация → velocity.y
pub fn apply_gravity(mut bodies: Query<&mut PhysicsBody>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for mut body in bodies.iter_mut() {
        body.velocity.y += GRAVITY * body.gravity_scale * delta;
    }
}

/// Система: velocity → Transform, с приземлением на статику для `GroundSnap` тел
pub fn integrate_bodies(
    mut bodies: Query<(&mut PhysicsBody, &mut Transform, Option<&GroundSnap>)>,
    queries: Res<PhysicsQueries>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut body, mut transform, snap) in bodies.iter_mut() {
        let step = body.velocity * delta;
        let previous = transform.translation.truncate();
        let next = previous + step;

        transform.translation.x = next.x;
        transform.translation.y = next.y;

        let Some(snap) = snap else {
            continue;
        };

        // Landing только при движении вниз
        if body.velocity.y > 0.0 {
            continue;
        }

        let foot_from = previous + snap.foot_offset;
        let fall = (foot_from.y - (next.y + snap.foot_offset.y)).max(0.0);
        let probe = Vec2::new(next.x + snap.foot_offset.x, foot_from.y);

        if let Some(surface) = queries.cast_down(probe, fall, snap.layers) {
            transform.translation.y = surface - snap.foot_offset.y;
            body.velocity.y = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{LayerMask, StaticBox, StaticGeometry};
    use std::time::Duration;

    fn physics_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(
                Duration::from_secs_f64(1.0 / 60.0),
            ))
            .insert_resource(PhysicsQueries::new(StaticGeometry::new().with_box(
                StaticBox::new(Vec2::new(0.0, -0.5), Vec2::new(10.0, 0.5), LayerMask::GROUND),
            )))
            .add_plugins(HeadlessPhysicsPlugin);
        app
    }

    #[test]
    fn test_gravity_logic() {
        let mut body = PhysicsBody::default();
        let delta = 1.0 / 60.0;

        body.velocity.y += GRAVITY * body.gravity_scale * delta;

        // После 1/60 sec: velocity.y = -9.81 / 60 ≈ -0.1635
        assert!(body.velocity.y < -0.16);
        assert!(body.velocity.y > -0.17);
    }

    #[test]
    fn test_falling_body_lands_on_floor() {
        let mut app = physics_app();
        let body = app
            .world_mut()
            .spawn((
                Transform::from_xyz(0.0, 3.0, 0.0),
                PhysicsBody::default(),
                GroundSnap {
                    foot_offset: Vec2::new(0.0, -0.5),
                    layers: LayerMask::GROUND,
                },
            ))
            .id();

        for _ in 0..180 {
            app.update();
        }

        let transform = app.world().get::<Transform>(body).unwrap();
        let physics = app.world().get::<PhysicsBody>(body).unwrap();
        // Ступня на y = 0 (верх пола), центр на 0.5
        assert!((transform.translation.y - 0.5).abs() < 1e-4, "y = {}", transform.translation.y);
        assert_eq!(physics.velocity.y, 0.0);
    }

    #[test]
    fn test_body_without_snap_falls_through() {
        let mut app = physics_app();
        let body = app
            .world_mut()
            .spawn((Transform::from_xyz(0.0, 1.0, 0.0), PhysicsBody::default()))
            .id();

        for _ in 0..120 {
            app.update();
        }

        let transform = app.world().get::<Transform>(body).unwrap();
        assert!(transform.translation.y < 0.0);
    }
}
