//! Overlap queries (physics query service)
//!
//! `OverlapQuery` это seam для host физики, `StaticGeometry` минимальный
//! backend из AABB для headless режима: только статика уровня, без динамики.

use bevy::prelude::*;
use serde::Deserialize;

/// Битовая маска слоёв коллизий
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Reflect)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const GROUND: LayerMask = LayerMask(1 << 0);
    pub const PLATFORM: LayerMask = LayerMask(1 << 1);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn union(self, other: LayerMask) -> LayerMask {
        LayerMask(self.0 | other.0)
    }
}

/// Physics query service (реализуется host движком)
pub trait OverlapQuery: Send + Sync + 'static {
    /// Есть ли коллайдер слоёв `mask` в круге (касание считается overlap).
    /// `ignore`: владелец запроса, его коллайдеры пропускаются.
    fn overlap_circle(
        &self,
        center: Vec2,
        radius: f32,
        mask: LayerMask,
        ignore: Option<Entity>,
    ) -> bool;

    /// Верхняя поверхность под `origin` в пределах `max_distance` (y координата)
    fn cast_down(&self, origin: Vec2, max_distance: f32, mask: LayerMask) -> Option<f32>;
}

/// Resource-обёртка над backend'ом
#[derive(Resource)]
pub struct PhysicsQueries {
    backend: Box<dyn OverlapQuery>,
}

impl PhysicsQueries {
    pub fn new(backend: impl OverlapQuery) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    pub fn overlap_circle(
        &self,
        center: Vec2,
        radius: f32,
        mask: LayerMask,
        ignore: Option<Entity>,
    ) -> bool {
        self.backend.overlap_circle(center, radius, mask, ignore)
    }

    pub fn cast_down(&self, origin: Vec2, max_distance: f32, mask: LayerMask) -> Option<f32> {
        self.backend.cast_down(origin, max_distance, mask)
    }
}

impl Default for PhysicsQueries {
    fn default() -> Self {
        Self::new(StaticGeometry::default())
    }
}

/// Статический AABB коллайдер
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticBox {
    pub center: Vec2,
    pub half_extents: Vec2,
    pub layers: LayerMask,
    pub owner: Option<Entity>,
}

impl StaticBox {
    pub fn new(center: Vec2, half_extents: Vec2, layers: LayerMask) -> Self {
        Self {
            center,
            half_extents,
            layers,
            owner: None,
        }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.half_extents.y
    }

    /// Circle vs AABB: ближайшая точка бокса к центру круга
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = center.clamp(self.min(), self.max());
        closest.distance_squared(center) <= radius * radius
    }
}

/// Headless backend: набор статических боксов уровня
#[derive(Debug, Clone, Default)]
pub struct StaticGeometry {
    boxes: Vec<StaticBox>,
}

impl StaticGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_box(mut self, static_box: StaticBox) -> Self {
        self.boxes.push(static_box);
        self
    }

    pub fn push(&mut self, static_box: StaticBox) {
        self.boxes.push(static_box);
    }

    pub fn boxes(&self) -> &[StaticBox] {
        &self.boxes
    }
}

impl OverlapQuery for StaticGeometry {
    fn overlap_circle(
        &self,
        center: Vec2,
        radius: f32,
        mask: LayerMask,
        ignore: Option<Entity>,
    ) -> bool {
        self.boxes.iter().any(|b| {
            b.layers.intersects(mask)
                && (ignore.is_none() || b.owner != ignore)
                && b.overlaps_circle(center, radius)
        })
    }

    fn cast_down(&self, origin: Vec2, max_distance: f32, mask: LayerMask) -> Option<f32> {
        // Небольшой допуск вверх: ступня, уже стоящая на поверхности, тоже попадает
        const SURFACE_TOLERANCE: f32 = 1e-4;

        self.boxes
            .iter()
            .filter(|b| b.layers.intersects(mask))
            .filter(|b| origin.x >= b.min().x && origin.x <= b.max().x)
            .map(StaticBox::top)
            .filter(|top| *top <= origin.y + SURFACE_TOLERANCE && *top >= origin.y - max_distance)
            .fold(None, |best: Option<f32>, top| Some(best.map_or(top, |b| b.max(top))))
    }
}
