//! Geometry primitives: boxes, segments, bearings
//!
//! Everything here is in feet and degrees. Directions are measured in the
//! x,y plane with 0 degrees along +x and 90 degrees along +y.

use geo::coordinate_position::CoordPos;
use geo::dimensions::Dimensions as GeoDimensions;
use geo::relate::Relate;
use geo::{coord, Intersects, Line, Rect};
use glam::{DVec2, DVec3};

use crate::core::types::{Dimensions, Position};

/// Below this length a vector has no usable direction
const DIRECTION_EPSILON: f64 = 1e-9;

/// Axis-aligned bounding box in world feet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Box spanning `dimensions` from `origin` along +x, +y, +z
    pub fn from_origin(origin: Position, dimensions: Dimensions) -> Self {
        let min = origin.to_dvec3();
        let extent = DVec3::new(dimensions.width, dimensions.height, dimensions.depth);
        Self::new(min, min + extent)
    }

    /// Clip the segment `a -> b` against the box (slab method)
    ///
    /// Returns the entry and exit parameters in `[0, 1]` along the segment,
    /// or `None` when the segment misses the box interior. A segment that
    /// only touches a side face, edge or corner misses. Running along the
    /// floor still hits, so ground-level lines meet ground-standing boxes.
    /// A box with no thickness in x or y is a solid plane.
    pub fn clip_segment(&self, a: DVec3, b: DVec3) -> Option<(f64, f64)> {
        let d = b - a;
        let mut t_enter: f64 = 0.0;
        let mut t_exit: f64 = 1.0;

        for axis in 0..3 {
            let origin = a[axis];
            let delta = d[axis];
            let lo = self.min[axis];
            let hi = self.max[axis];

            if delta.abs() < DIRECTION_EPSILON {
                let above_lo = if axis == 2 {
                    origin >= lo - DIRECTION_EPSILON
                } else {
                    origin > lo + DIRECTION_EPSILON
                };
                if !above_lo || origin >= hi - DIRECTION_EPSILON {
                    return None;
                }
                continue;
            }

            let mut t1 = (lo - origin) / delta;
            let mut t2 = (hi - origin) / delta;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_enter = t_enter.max(t1);
            t_exit = t_exit.min(t2);
            if t_enter > t_exit {
                return None;
            }
        }

        if !self.is_thin() && (t_exit - t_enter) * d.length() < DIRECTION_EPSILON {
            return None;
        }

        Some((t_enter, t_exit))
    }

    /// Is `p` inside the box rather than on a side face?
    ///
    /// Points on the floor count as inside, points on the top do not.
    pub fn surrounds(&self, p: DVec3) -> bool {
        p.x > self.min.x + DIRECTION_EPSILON
            && p.x < self.max.x - DIRECTION_EPSILON
            && p.y > self.min.y + DIRECTION_EPSILON
            && p.y < self.max.y - DIRECTION_EPSILON
            && p.z >= self.min.z - DIRECTION_EPSILON
            && p.z < self.max.z - DIRECTION_EPSILON
    }

    /// No thickness in x or y
    fn is_thin(&self) -> bool {
        let extent = self.max - self.min;
        extent.x < DIRECTION_EPSILON || extent.y < DIRECTION_EPSILON
    }

    fn footprint(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min.x, y: self.min.y },
            coord! { x: self.max.x, y: self.max.y },
        )
    }
}

/// Does the ground track of `a -> b` pass through the inside of the box
/// footprint?
///
/// Elevation is ignored: a wall blocks a walker regardless of z. Tracks that
/// start on, end on or run along the footprint's edge do not cross it.
pub fn segment_crosses_footprint(a: Position, b: Position, bounds: &Aabb) -> bool {
    if a.horizontal_distance(&b) < DIRECTION_EPSILON {
        return false;
    }
    let track = Line::new(coord! { x: a.x, y: a.y }, coord! { x: b.x, y: b.y });
    let footprint = bounds.footprint();
    if bounds.is_thin() {
        return track.intersects(&footprint);
    }
    track.relate(&footprint).get(CoordPos::Inside, CoordPos::Inside) != GeoDimensions::Empty
}

/// Closest point to `p` on the segment `a -> b`
pub fn nearest_point_on_segment(p: DVec3, a: DVec3, b: DVec3) -> DVec3 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < DIRECTION_EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Shortest distance from `p` to the segment `a -> b`
pub fn distance_to_segment(p: Position, a: Position, b: Position) -> f64 {
    let p = p.to_dvec3();
    p.distance(nearest_point_on_segment(p, a.to_dvec3(), b.to_dvec3()))
}

/// Unit vector in the x,y plane for a bearing in degrees
pub fn direction_vector(degrees: f64) -> DVec2 {
    let radians = degrees.to_radians();
    DVec2::new(radians.cos(), radians.sin())
}

/// Unsigned angle between two plane vectors in degrees, `None` if either is
/// too short to have a direction
pub fn angle_between_degrees(u: DVec2, v: DVec2) -> Option<f64> {
    let lengths = u.length() * v.length();
    if lengths < DIRECTION_EPSILON {
        return None;
    }
    let cos = (u.dot(v) / lengths).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

/// Bearing from `from` to `to` in degrees, normalized to `[0, 360)`
pub fn bearing_degrees(from: Position, to: Position) -> Option<f64> {
    let delta = to.to_dvec2() - from.to_dvec2();
    if delta.length() < DIRECTION_EPSILON {
        return None;
    }
    Some(delta.y.atan2(delta.x).to_degrees().rem_euclid(360.0))
}
