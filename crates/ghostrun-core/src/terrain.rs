//! Terrain probing.
//!
//! The engine never owns level geometry. Everything it needs to know about
//! solid ground is asked through [`TerrainProbe`]: a raycast from an origin
//! along a direction, limited to a distance and filtered by a layer mask.
//!
//! [`BoxTerrain`] is a small reference implementation made of axis-aligned
//! boxes, used by tests, benches and hosts without their own physics.
//! [`FnProbe`] wraps a closure for ad-hoc probes.
//!
//! # Example
//!
//! ```
//! use ghostrun_core::terrain::{BoxTerrain, TerrainProbe};
//! use ghostrun_core::layers::Layers;
//! use glam::Vec2;
//!
//! let terrain = BoxTerrain::flat(0.0);
//! let hit = terrain
//!     .probe(Vec2::new(0.0, 1.0), Vec2::NEG_Y, 5.0, Layers::GROUND)
//!     .expect("ground below");
//! assert!((hit.distance - 1.0).abs() < 1e-5);
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::layers::Layers;

// =============================================================================
// Axis-aligned boxes
// =============================================================================

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec2,
    /// Maximum corner.
    pub max: Vec2,
}

impl Aabb {
    /// Box from two corners.
    #[must_use]
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Box centred on `center` with the given half extents.
    #[must_use]
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Returns true if the boxes share any area or edge.
    #[must_use]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Returns true if the circle touches the box.
    #[must_use]
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = center.clamp(self.min, self.max);
        closest.distance_squared(center) <= radius * radius
    }

    /// Slab test. Returns the distance along `direction` (unit length) to the
    /// first contact within `max_distance`, or zero if `origin` is inside.
    #[must_use]
    pub fn ray_distance(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<f32> {
        let mut t_min = 0.0_f32;
        let mut t_max = max_distance;

        for axis in 0..2 {
            let o = origin[axis];
            let d = direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < f32::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (lo - o) * inv;
            let mut t1 = (hi - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

// =============================================================================
// Probe interface
// =============================================================================

/// A terrain contact reported by a probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    /// Distance from the probe origin to the contact.
    pub distance: f32,
    /// Contact point.
    pub point: Vec2,
}

impl ProbeHit {
    /// Builds a hit `distance` along `direction` from `origin`.
    #[must_use]
    pub fn along(origin: Vec2, direction: Vec2, distance: f32) -> Self {
        Self {
            distance,
            point: origin + direction * distance,
        }
    }
}

/// Raycast query against level geometry.
///
/// Implementations must be pure: the same query always returns the same
/// answer within a tick. `direction` may be any non-zero vector; a zero
/// direction never hits.
pub trait TerrainProbe {
    /// Casts from `origin` along `direction` up to `max_distance`, hitting
    /// only surfaces whose layers intersect `mask`.
    fn probe(&self, origin: Vec2, direction: Vec2, max_distance: f32, mask: Layers)
        -> Option<ProbeHit>;
}

/// Adapts a closure into a [`TerrainProbe`].
///
/// ```
/// use ghostrun_core::terrain::{FnProbe, ProbeHit, TerrainProbe};
/// use ghostrun_core::layers::Layers;
/// use glam::Vec2;
///
/// let wall = FnProbe(|origin: Vec2, dir: Vec2, _max: f32, _mask: Layers| {
///     (dir.x > 0.0).then(|| ProbeHit::along(origin, dir, 0.05))
/// });
/// assert!(wall.probe(Vec2::ZERO, Vec2::X, 1.0, Layers::GROUND).is_some());
/// assert!(wall.probe(Vec2::ZERO, Vec2::NEG_X, 1.0, Layers::GROUND).is_none());
/// ```
pub struct FnProbe<F>(pub F);

impl<F> TerrainProbe for FnProbe<F>
where
    F: Fn(Vec2, Vec2, f32, Layers) -> Option<ProbeHit>,
{
    fn probe(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: Layers,
    ) -> Option<ProbeHit> {
        (self.0)(origin, direction, max_distance, mask)
    }
}

// =============================================================================
// Box terrain
// =============================================================================

/// One solid box of a [`BoxTerrain`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Solid {
    /// Extent of the solid.
    pub bounds: Aabb,
    /// Layers the solid belongs to.
    pub layers: Layers,
}

/// Terrain made of axis-aligned solid boxes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoxTerrain {
    solids: Vec<Solid>,
}

/// How far below the surface a [`BoxTerrain::flat`] floor extends.
const FLOOR_DEPTH: f32 = 1_000.0;
/// Horizontal half-width of a [`BoxTerrain::flat`] floor.
const FLOOR_HALF_WIDTH: f32 = 100_000.0;

impl BoxTerrain {
    /// Empty terrain: every probe misses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An effectively infinite floor whose top surface is at `height`.
    #[must_use]
    pub fn flat(height: f32) -> Self {
        Self::new().with_solid(
            Aabb::new(
                Vec2::new(-FLOOR_HALF_WIDTH, height - FLOOR_DEPTH),
                Vec2::new(FLOOR_HALF_WIDTH, height),
            ),
            Layers::GROUND,
        )
    }

    /// Adds a solid and returns the terrain.
    #[must_use]
    pub fn with_solid(mut self, bounds: Aabb, layers: Layers) -> Self {
        self.add_solid(bounds, layers);
        self
    }

    /// Adds a solid.
    pub fn add_solid(&mut self, bounds: Aabb, layers: Layers) {
        self.solids.push(Solid { bounds, layers });
    }

    /// All solids in insertion order.
    #[must_use]
    pub fn solids(&self) -> &[Solid] {
        &self.solids
    }
}

impl TerrainProbe for BoxTerrain {
    fn probe(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: Layers,
    ) -> Option<ProbeHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec2::ZERO || max_distance < 0.0 {
            return None;
        }

        self.solids
            .iter()
            .filter(|solid| solid.layers.intersects(mask))
            .filter_map(|solid| solid.bounds.ray_distance(origin, direction, max_distance))
            .min_by(f32::total_cmp)
            .map(|distance| ProbeHit::along(origin, direction, distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod aabb_tests {
        use super::*;

        #[test]
        fn overlap_is_symmetric() {
            let a = Aabb::from_center(Vec2::ZERO, Vec2::splat(1.0));
            let b = Aabb::from_center(Vec2::new(1.5, 0.0), Vec2::splat(1.0));
            assert!(a.overlaps(&b));
            assert!(b.overlaps(&a));
        }

        #[test]
        fn separated_boxes_do_not_overlap() {
            let a = Aabb::from_center(Vec2::ZERO, Vec2::splat(1.0));
            let b = Aabb::from_center(Vec2::new(3.0, 0.0), Vec2::splat(1.0));
            assert!(!a.overlaps(&b));
        }

        #[test]
        fn circle_touching_corner() {
            let a = Aabb::from_center(Vec2::ZERO, Vec2::splat(1.0));
            assert!(a.intersects_circle(Vec2::new(1.5, 1.5), 0.75));
            assert!(!a.intersects_circle(Vec2::new(1.5, 1.5), 0.6));
        }

        #[test]
        fn ray_from_inside_hits_at_zero() {
            let a = Aabb::from_center(Vec2::ZERO, Vec2::splat(1.0));
            assert_eq!(a.ray_distance(Vec2::ZERO, Vec2::X, 5.0), Some(0.0));
        }

        #[test]
        fn ray_beyond_range_misses() {
            let a = Aabb::from_center(Vec2::new(10.0, 0.0), Vec2::splat(1.0));
            assert_eq!(a.ray_distance(Vec2::ZERO, Vec2::X, 5.0), None);
        }

        #[test]
        fn parallel_ray_outside_slab_misses() {
            let a = Aabb::from_center(Vec2::new(5.0, 0.0), Vec2::splat(1.0));
            assert_eq!(a.ray_distance(Vec2::new(0.0, 3.0), Vec2::X, 10.0), None);
        }
    }

    mod box_terrain_tests {
        use super::*;

        #[test]
        fn empty_terrain_never_hits() {
            let terrain = BoxTerrain::new();
            assert!(terrain
                .probe(Vec2::ZERO, Vec2::NEG_Y, 100.0, Layers::all())
                .is_none());
        }

        #[test]
        fn flat_floor_reports_distance() {
            let terrain = BoxTerrain::flat(2.0);
            let hit = terrain
                .probe(Vec2::new(3.0, 2.5), Vec2::NEG_Y, 1.0, Layers::GROUND)
                .unwrap();
            assert!((hit.distance - 0.5).abs() < 1e-5);
            assert!((hit.point.y - 2.0).abs() < 1e-5);
        }

        #[test]
        fn mask_filters_solids() {
            let terrain = BoxTerrain::flat(0.0);
            assert!(terrain
                .probe(Vec2::new(0.0, 0.5), Vec2::NEG_Y, 1.0, Layers::PLAYER)
                .is_none());
        }

        #[test]
        fn nearest_solid_wins() {
            let terrain = BoxTerrain::new()
                .with_solid(
                    Aabb::new(Vec2::new(5.0, -1.0), Vec2::new(6.0, 1.0)),
                    Layers::GROUND,
                )
                .with_solid(
                    Aabb::new(Vec2::new(2.0, -1.0), Vec2::new(3.0, 1.0)),
                    Layers::GROUND,
                );
            let hit = terrain
                .probe(Vec2::ZERO, Vec2::X, 10.0, Layers::GROUND)
                .unwrap();
            assert!((hit.distance - 2.0).abs() < 1e-5);
        }

        #[test]
        fn unnormalized_direction_is_normalized() {
            let terrain = BoxTerrain::flat(0.0);
            let hit = terrain
                .probe(Vec2::new(0.0, 1.0), Vec2::new(0.0, -4.0), 2.0, Layers::GROUND)
                .unwrap();
            assert!((hit.distance - 1.0).abs() < 1e-5);
        }

        #[test]
        fn zero_direction_misses() {
            let terrain = BoxTerrain::flat(0.0);
            assert!(terrain
                .probe(Vec2::new(0.0, 1.0), Vec2::ZERO, 2.0, Layers::GROUND)
                .is_none());
        }
    }
}
