//! Projectile trigger contacts
//!
//! Host движок сам шлёт `TriggerEntered`; headless режим считает
//! пересечения circle vs AABB и шлёт event только на входе в контакт.

use std::collections::HashSet;

use bevy::prelude::*;

/// Снаряд (trigger circle)
#[derive(Component, Debug, Clone, Copy)]
pub struct Projectile {
    pub shooter: Entity,
    pub radius: f32,
}

/// Зона попадания врага (AABB вокруг Transform)
#[derive(Component, Debug, Clone, Copy)]
pub struct Hurtbox {
    pub half_extents: Vec2,
}

impl Hurtbox {
    pub fn overlaps_circle(&self, center: Vec2, circle_center: Vec2, radius: f32) -> bool {
        let closest = circle_center.clamp(center - self.half_extents, center + self.half_extents);
        closest.distance_squared(circle_center) <= radius * radius
    }
}

/// Event: trigger вошёл в контакт с другим entity
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEntered {
    pub trigger: Entity,
    pub other: Entity,
}

/// Текущие пары (trigger, other) в контакте
#[derive(Resource, Debug, Default)]
pub struct TriggerContacts {
    touching: HashSet<(Entity, Entity)>,
}

impl TriggerContacts {
    pub fn is_touching(&self, trigger: Entity, other: Entity) -> bool {
        self.touching.contains(&(trigger, other))
    }
}

/// Система: headless trigger detection (projectile vs hurtbox)
///
/// Entered шлём только на фронте; пары, которые разошлись или исчезли, забываем.
pub fn detect_projectile_contacts(
    projectiles: Query<(Entity, &Projectile, &Transform)>,
    hurtboxes: Query<(Entity, &Hurtbox, &Transform)>,
    mut contacts: ResMut<TriggerContacts>,
    mut entered_events: EventWriter<TriggerEntered>,
) {
    let mut current = HashSet::new();

    for (projectile_entity, projectile, projectile_transform) in projectiles.iter() {
        let circle_center = projectile_transform.translation.truncate();

        for (target, hurtbox, target_transform) in hurtboxes.iter() {
            if target == projectile.shooter {
                continue;
            }

            let center = target_transform.translation.truncate();
            if !hurtbox.overlaps_circle(center, circle_center, projectile.radius) {
                continue;
            }

            let pair = (projectile_entity, target);
            if !contacts.touching.contains(&pair) {
                entered_events.write(TriggerEntered {
                    trigger: projectile_entity,
                    other: target,
                });
            }
            current.insert(pair);
        }
    }

    contacts.touching = current;
}
