//! Store-floor geometry.
//!
//! Positions are plain 3-D points in metres.  The navigation oracle decides
//! how agents actually travel between them; this module only provides
//! straight-line arithmetic.

use std::ops::{Add, Mul, Sub};

use crate::AgentRng;

/// A point (or offset) on the store floor.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Straight-line (Euclidean) distance.
    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        (other - self).length()
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Move from `self` towards `target` by at most `max_step` metres.
    ///
    /// Returns `target` exactly once it is within reach so callers can test
    /// arrival with a plain distance comparison.
    pub fn step_towards(self, target: Point, max_step: f32) -> Point {
        let delta = target - self;
        let dist = delta.length();
        if dist <= max_step || dist == 0.0 {
            return target;
        }
        self + delta * (max_step / dist)
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Point {
    type Output = Point;
    #[inline]
    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// An axis-aligned box on the floor, e.g. the checkout staging area.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Area {
    pub center:       Point,
    pub half_extents: Point,
}

impl Area {
    pub fn new(center: Point, half_extents: Point) -> Self {
        Self { center, half_extents }
    }

    /// A degenerate area that always yields `center`.
    pub fn point(center: Point) -> Self {
        Self { center, half_extents: Point::ORIGIN }
    }

    pub fn contains(&self, p: Point) -> bool {
        let d = p - self.center;
        d.x.abs() <= self.half_extents.x
            && d.y.abs() <= self.half_extents.y
            && d.z.abs() <= self.half_extents.z
    }

    /// Uniform random point inside the area.
    pub fn random_point(&self, rng: &mut AgentRng) -> Point {
        let mut axis = |half: f32| if half > 0.0 { rng.gen_range(-half..=half) } else { 0.0 };
        let offset = Point::new(
            axis(self.half_extents.x),
            axis(self.half_extents.y),
            axis(self.half_extents.z),
        );
        self.center + offset
    }
}
