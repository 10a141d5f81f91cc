//! Static convex obstacles
//!
//! Rectangles and triangles expose their vertex loop on demand; one SAT
//! routine in [`super::collision`] serves every shape rather than
//! per-type collision code.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Axis-aligned rectangle, positioned by its top-left corner (y grows
/// downward).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rect {
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(position: Vec2, width: f32, height: f32) -> Result<Self, ConfigError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(ConfigError::DegenerateRect { width, height });
        }
        Ok(Self {
            position,
            width,
            height,
        })
    }

    /// Corner loop, wound clockwise in screen coordinates
    pub fn vertices(&self) -> Vec<Vec2> {
        vec![
            self.position,
            self.position + Vec2::new(self.width, 0.0),
            self.position + Vec2::new(self.width, self.height),
            self.position + Vec2::new(0.0, self.height),
        ]
    }
}

/// Triangle given by three non-collinear vertices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Vec2,
    pub b: Vec2,
    pub c: Vec2,
}

impl Triangle {
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Result<Self, ConfigError> {
        if (b - a).perp_dot(c - a) == 0.0 {
            return Err(ConfigError::CollinearTriangle);
        }
        Ok(Self { a, b, c })
    }

    pub fn vertices(&self) -> Vec<Vec2> {
        vec![self.a, self.b, self.c]
    }
}

/// Closed set of static obstacle shapes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Obstacle {
    Rect(Rect),
    Triangle(Triangle),
}

impl Obstacle {
    /// Current vertex loop for axis tests
    pub fn vertices(&self) -> Vec<Vec2> {
        match self {
            Obstacle::Rect(rect) => rect.vertices(),
            Obstacle::Triangle(tri) => tri.vertices(),
        }
    }

    /// Horizontal extent, used by patrol reversal
    pub fn span_x(&self) -> (f32, f32) {
        match self {
            Obstacle::Rect(rect) => (rect.position.x, rect.position.x + rect.width),
            Obstacle::Triangle(tri) => {
                let lo = tri.a.x.min(tri.b.x).min(tri.c.x);
                let hi = tri.a.x.max(tri.b.x).max(tri.c.x);
                (lo, hi)
            }
        }
    }

    /// Shift the shape horizontally (patrol motion)
    pub fn translate_x(&mut self, dx: f32) {
        match self {
            Obstacle::Rect(rect) => rect.position.x += dx,
            Obstacle::Triangle(tri) => {
                tri.a.x += dx;
                tri.b.x += dx;
                tri.c.x += dx;
            }
        }
    }
}

impl From<Rect> for Obstacle {
    fn from(rect: Rect) -> Self {
        Obstacle::Rect(rect)
    }
}

impl From<Triangle> for Obstacle {
    fn from(tri: Triangle) -> Self {
        Obstacle::Triangle(tri)
    }
}
