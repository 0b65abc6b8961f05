//! Physics seam
//!
//! Симуляция НЕ владеет физикой: host движок отвечает за коллизии и шаг.
//! Здесь только то, что нужно gameplay коду:
//! - `PhysicsBody`: velocity/impulse (rigid body service)
//! - `OverlapQuery`: circle overlap / cast down против layer mask
//! - headless fallback (gravity + интеграция + landing snap) для тестов
//!   и headless бинарника

pub mod body;
pub mod integration;
pub mod query;

pub use body::{GroundSnap, PhysicsBody, GRAVITY};
pub use integration::{apply_gravity, integrate_bodies, HeadlessPhysicsPlugin};
pub use query::{LayerMask, OverlapQuery, PhysicsQueries, StaticBox, StaticGeometry};
