//! Geometry primitives shared by the battle engine

pub mod geometry;

pub use geometry::{
    angle_between_degrees, bearing_degrees, direction_vector, distance_to_segment,
    nearest_point_on_segment, segment_crosses_footprint, Aabb,
};
