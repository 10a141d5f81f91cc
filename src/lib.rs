//! Flip Field - a 2D pinball physics and collision engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball dynamics, SAT collision, flippers)
//! - `tuning`: Runtime-adjustable physics knobs
//!
//! The engine is headless. Rendering, audio, input dispatch and score
//! persistence belong to the embedding game loop, which advances the
//! simulation one fixed step per call and reads positions and vertices
//! back for drawing.

pub mod sim;
pub mod tuning;

pub use sim::{Ball, ConfigError, Flipper, Obstacle, Rect, Table, TickInput, Triangle};
pub use tuning::Tuning;

use glam::Vec2;

/// Engine policy constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 0.7;

    /// Playfield extents (pixels); the bounce walls sit here
    pub const FIELD_WIDTH: f32 = 600.0;
    pub const FIELD_HEIGHT: f32 = 800.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_SPAWN: Vec2 = Vec2::new(20.0, 660.0);
    /// Downward gravity, units per tick²
    pub const GRAVITY: Vec2 = Vec2::new(0.0, 0.1);

    /// Wall bounce energy retention
    pub const WALL_DAMPING: f32 = 0.8;
    /// Horizontal friction applied on floor contact
    pub const ROLLING_FRICTION: f32 = 0.995;

    /// Ball-ball velocity exchange damping
    pub const EXCHANGE_DAMPING: f32 = 0.8;
    /// Radius at or above which a ball counts as a fixed bumper
    pub const BUMPER_RADIUS: f32 = 11.0;
    /// Speed amplification when bouncing off a bumper
    pub const BUMPER_KICK: f32 = 1.1;
    /// Outgoing speed at which a bumper strike is reported to the driver
    pub const BUMPER_SIGNAL_SPEED: f32 = 7.0;

    /// Above SPEED_LIMIT the velocity is scaled by SPEED_BRAKE once per tick
    pub const SPEED_LIMIT: f32 = 10.0;
    pub const SPEED_BRAKE: f32 = 0.7;

    /// Post-reflection displacement along the new heading (units)
    pub const REFLECT_OFFSET: f32 = 10.0;

    /// Flipper strike angle (degrees past rest, toward the ball)
    pub const STRIKE_ANGLE: f32 = 20.0;
    /// Default flipper retraction limit (degrees)
    pub const STRIKE_LIMIT: f32 = 50.0;
}

/// Rotate a vector counter-clockwise by an angle in degrees
#[inline]
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Vector components truncated to integers, for the rendering handoff
#[inline]
pub fn int_pair(v: Vec2) -> (i32, i32) {
    (v.x as i32, v.y as i32)
}
