//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (table slot order)
//! - No rendering or platform dependencies
//!
//! Nothing in here drives its own clock or performs I/O; the caller
//! advances the playfield one tick per call.

pub mod ball;
pub mod collision;
pub mod flipper;
pub mod shape;
pub mod state;
pub mod tick;

pub use ball::Ball;
pub use collision::{Reflection, SurfaceHit, polygon_circle_overlap, reflect_off_surface};
pub use flipper::{Flipper, Side, SwingState};
pub use shape::{Obstacle, Rect, Triangle};
pub use state::{Bumper, Fixture, Patrol, Table, TableEvent};
pub use tick::{TickInput, tick};

/// Construction-time validation failure.
///
/// Degenerate geometry would corrupt every subsequent axis test silently
/// instead of producing a visible error, so constructors reject it up
/// front.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Ball and bumper radii must be positive
    NonPositiveRadius(f32),
    /// Bumpers must be at least the heavy-ball radius to stay immovable
    BumperTooLight(f32),
    /// Rectangle extents must be positive
    DegenerateRect { width: f32, height: f32 },
    /// Triangle vertices must not be collinear
    CollinearTriangle,
    /// Flipper corners must span a real quad
    DegenerateFlipper,
    /// Flipper retraction limit must be positive
    NonPositiveStrikeLimit(f32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositiveRadius(r) => write!(f, "radius must be positive, got {}", r),
            ConfigError::BumperTooLight(r) => {
                write!(f, "bumper radius {} is below the heavy-ball threshold", r)
            }
            ConfigError::DegenerateRect { width, height } => {
                write!(f, "rectangle extents must be positive, got {}x{}", width, height)
            }
            ConfigError::CollinearTriangle => write!(f, "triangle vertices are collinear"),
            ConfigError::DegenerateFlipper => write!(f, "flipper corners do not span a quad"),
            ConfigError::NonPositiveStrikeLimit(limit) => {
                write!(f, "strike limit must be positive, got {}", limit)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
