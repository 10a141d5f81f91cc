//! Oscillating flipper actor
//!
//! A quad that pivots about its first corner, swinging one degree per
//! tick between a retraction limit and the strike angle. Once the strike
//! lands it locks until the driver re-arms it, so each player input buys
//! exactly one swing-and-return cycle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::consts::STRIKE_ANGLE;
use crate::{int_pair, rotate_deg};

/// Which way the flipper is mounted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Handedness factor applied to angle thresholds and tangents
    #[inline]
    pub fn mirror(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

/// Activity state of the oscillation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwingState {
    /// Swinging; contact adds the activity boost
    Armed,
    /// Strike landed; holds still until re-armed
    Locked,
}

/// An oscillating flipper.
///
/// `angle` steps by exactly one whole degree per tick starting from
/// zero, so the threshold comparisons below stay exact in f32.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flipper {
    base: [Vec2; 4],
    points: [Vec2; 4],
    pub side: Side,
    /// Current rotation about the pivot, degrees
    pub angle: f32,
    /// Swing direction, +1 or -1
    pub direction: f32,
    /// Retraction limit, degrees
    pub strike_limit: f32,
    /// Completed strikes since the last re-arm; writable by the driver
    pub strike_count: u32,
    pub state: SwingState,
}

impl Flipper {
    /// Build a flipper from its rest-pose corners. The first corner is
    /// the pivot.
    pub fn new(corners: [Vec2; 4], side: Side, strike_limit: f32) -> Result<Self, ConfigError> {
        if strike_limit <= 0.0 {
            return Err(ConfigError::NonPositiveStrikeLimit(strike_limit));
        }
        let e1 = corners[1] - corners[0];
        let e2 = corners[3] - corners[0];
        if e1.perp_dot(e2) == 0.0 {
            return Err(ConfigError::DegenerateFlipper);
        }
        Ok(Self {
            base: corners,
            points: corners,
            side,
            angle: 0.0,
            direction: 1.0,
            strike_limit,
            strike_count: 0,
            state: SwingState::Armed,
        })
    }

    /// Pivot point (first rest-pose corner)
    pub fn pivot(&self) -> Vec2 {
        self.base[0]
    }

    /// Current corner positions at float precision, for axis tests
    pub fn points(&self) -> [Vec2; 4] {
        self.points
    }

    /// Whether a swing is in progress; active contact adds energy
    pub fn is_active(&self) -> bool {
        self.state == SwingState::Armed
    }

    /// Re-arm after a completed swing; the next updates run a fresh cycle
    pub fn rearm(&mut self) {
        self.strike_count = 0;
    }

    /// Advance the oscillation one tick.
    ///
    /// Returns the rotated corners as integer pairs for the renderer;
    /// [`Flipper::points`] keeps the float precision for collision.
    pub fn update(&mut self) -> [(i32, i32); 4] {
        let mirror = self.side.mirror();

        // Turning points: the retraction limit, and the strike angle
        // which also counts the completed strike
        if self.angle == -self.strike_limit * mirror || self.angle == STRIKE_ANGLE * mirror {
            self.direction = -self.direction;
            if self.angle == STRIKE_ANGLE * mirror {
                self.strike_count += 1;
            }
        }

        if self.state == SwingState::Armed {
            self.angle -= self.direction;
        }

        let pivot = self.base[0];
        for (slot, corner) in self.points.iter_mut().zip(self.base) {
            *slot = rotate_deg(corner - pivot, self.angle) + pivot;
        }

        self.state = if self.strike_count >= 1 {
            SwingState::Locked
        } else {
            SwingState::Armed
        };

        [
            int_pair(self.points[0]),
            int_pair(self.points[1]),
            int_pair(self.points[2]),
            int_pair(self.points[3]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn left_flipper(limit: f32) -> Flipper {
        let origin = Vec2::new(145.0, 725.0);
        Flipper::new(
            [
                origin,
                origin + Vec2::new(130.0, 0.0),
                origin + Vec2::new(130.0, 15.0),
                origin + Vec2::new(0.0, 15.0),
            ],
            Side::Left,
            limit,
        )
        .unwrap()
    }

    fn right_flipper(limit: f32) -> Flipper {
        let origin = Vec2::new(455.0, 725.0);
        Flipper::new(
            [
                origin,
                origin + Vec2::new(-130.0, 0.0),
                origin + Vec2::new(-130.0, 15.0),
                origin + Vec2::new(0.0, 15.0),
            ],
            Side::Right,
            limit,
        )
        .unwrap()
    }

    #[test]
    fn test_left_cycle_strikes_once_then_locks() {
        let mut flipper = left_flipper(50.0);
        let mut strike_poses = 0;
        let mut max_angle = f32::NEG_INFINITY;

        for _ in 0..300 {
            flipper.update();
            max_angle = max_angle.max(flipper.angle);
            if flipper.angle == 20.0 {
                strike_poses += 1;
            }
        }

        assert_eq!(strike_poses, 1);
        assert_eq!(max_angle, 20.0);
        assert_eq!(flipper.strike_count, 1);
        assert_eq!(flipper.state, SwingState::Locked);
        // Locked one degree past the strike pose
        assert_eq!(flipper.angle, 19.0);
    }

    #[test]
    fn test_strike_count_not_incremented_early() {
        let mut flipper = left_flipper(50.0);
        // The whole retraction leg plus the climb back to the strike
        // angle leaves the count untouched
        for _ in 0..119 {
            flipper.update();
            assert_eq!(flipper.strike_count, 0);
            assert!(flipper.is_active());
        }
    }

    #[test]
    fn test_right_side_mirrors_thresholds() {
        let mut flipper = right_flipper(50.0);
        for _ in 0..300 {
            flipper.update();
        }
        assert_eq!(flipper.strike_count, 1);
        assert_eq!(flipper.state, SwingState::Locked);
        assert_eq!(flipper.angle, -19.0);
    }

    #[test]
    fn test_rearm_runs_a_second_cycle() {
        let mut flipper = left_flipper(50.0);
        for _ in 0..300 {
            flipper.update();
        }
        assert_eq!(flipper.state, SwingState::Locked);

        flipper.rearm();
        assert_eq!(flipper.strike_count, 0);
        for _ in 0..300 {
            flipper.update();
        }
        assert_eq!(flipper.strike_count, 1);
        assert_eq!(flipper.state, SwingState::Locked);
    }

    #[test]
    fn test_pivot_stays_fixed() {
        let mut flipper = left_flipper(50.0);
        let pivot = flipper.pivot();
        for _ in 0..75 {
            flipper.update();
            assert!((flipper.points()[0] - pivot).length() < 1e-4);
        }
    }

    #[test]
    fn test_update_returns_integer_pairs() {
        let mut flipper = left_flipper(50.0);
        let pairs = flipper.update();
        let points = flipper.points();
        for (pair, point) in pairs.iter().zip(points.iter()) {
            assert_eq!(*pair, (point.x as i32, point.y as i32));
        }
    }

    #[test]
    fn test_short_limit_still_cycles() {
        let mut flipper = right_flipper(10.0);
        for _ in 0..100 {
            flipper.update();
        }
        assert_eq!(flipper.strike_count, 1);
        assert_eq!(flipper.state, SwingState::Locked);
    }

    #[test]
    fn test_invalid_construction_rejected() {
        let origin = Vec2::ZERO;
        let corners = [
            origin,
            Vec2::new(130.0, 0.0),
            Vec2::new(130.0, 15.0),
            Vec2::new(0.0, 15.0),
        ];
        assert!(Flipper::new(corners, Side::Left, 0.0).is_err());

        let flat = [origin, Vec2::new(130.0, 0.0), Vec2::new(260.0, 0.0), Vec2::new(65.0, 0.0)];
        assert_eq!(
            Flipper::new(flat, Side::Left, 50.0).unwrap_err(),
            ConfigError::DegenerateFlipper
        );
    }
}
