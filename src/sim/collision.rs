//! Separating-axis collision tests and the shared reflection response
//!
//! The hard part of the engine: deciding whether a ball overlaps a convex
//! polygon, picking the resolution normal, and turning it into a stable
//! velocity reflection.

use glam::Vec2;

use crate::consts::REFLECT_OFFSET;
use crate::rotate_deg;

/// Result of an axis sweep against a circle
#[derive(Debug, Clone, Copy)]
pub struct SurfaceHit {
    /// Whether the shapes overlap on every axis
    pub hit: bool,
    /// Edge normal with the minimum overlap; the resolution direction
    pub normal: Vec2,
    /// Overlap depth along that normal
    pub overlap: f32,
}

impl SurfaceHit {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            overlap: 0.0,
        }
    }
}

/// Separating-axis sweep of a convex vertex loop against a circle.
///
/// `proj_extent` is the half-width of the circle's projection on each
/// axis: the plain radius for static obstacles, double the radius for
/// flippers, whose fast swings need the wider margin. The two call sites
/// deliberately differ; collision timing is gameplay-visible.
///
/// Zero or negative overlap on any axis proves the shapes disjoint and
/// short-circuits the sweep. Otherwise the axis with the smallest overlap
/// wins (minimum-translation-vector heuristic).
pub fn polygon_circle_overlap(vertices: &[Vec2], center: Vec2, proj_extent: f32) -> SurfaceHit {
    let mut best = SurfaceHit::miss();

    for i in 0..vertices.len() {
        let edge = vertices[(i + 1) % vertices.len()] - vertices[i];
        let normal = edge.perp().normalize_or_zero();

        let mut min_poly = f32::INFINITY;
        let mut max_poly = f32::NEG_INFINITY;
        for v in vertices {
            let p = v.dot(normal);
            min_poly = min_poly.min(p);
            max_poly = max_poly.max(p);
        }

        let center_proj = center.dot(normal);
        let min_ball = center_proj - proj_extent;
        let max_ball = center_proj + proj_extent;

        let overlap = max_poly.min(max_ball) - min_poly.max(min_ball);
        if overlap <= 0.0 {
            return SurfaceHit::miss();
        }

        if !best.hit || overlap < best.overlap {
            best = SurfaceHit {
                hit: true,
                normal,
                overlap,
            };
        }
    }

    best
}

/// Velocity and displacement produced by a surface reflection
#[derive(Debug, Clone, Copy)]
pub struct Reflection {
    pub velocity: Vec2,
    pub displacement: Vec2,
}

/// Impulse-style reflection off a surface with normal `n`.
///
/// The velocity is decomposed against `n` and the tangent
/// `t = rotate(n, -90° * mirror)`; the normal component reverses, the
/// tangential component survives, and the result is rescaled to the
/// incoming speed times `1 + boost`. The displacement pushes the ball
/// [`REFLECT_OFFSET`] units along its new heading so the next tick starts
/// clear of the surface.
///
/// `mirror` is the flipper handedness factor (+1 for static shapes and
/// left flippers, -1 for right flippers). `boost` is nonzero only for a
/// mid-swing flipper, which is how flippers feed energy into the ball.
pub fn reflect_off_surface(velocity: Vec2, normal: Vec2, mirror: f32, boost: f32) -> Reflection {
    let tangent = rotate_deg(normal, -90.0 * mirror);
    let reflected = normal * -velocity.dot(normal) + tangent * velocity.dot(tangent);
    let heading = reflected.normalize_or_zero();

    Reflection {
        velocity: heading * velocity.length() * (1.0 + boost),
        displacement: heading * REFLECT_OFFSET,
    }
}
