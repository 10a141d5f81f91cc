//! Circular rigid bodies: the pinball itself and fixed bumpers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ConfigError;
use super::collision::{polygon_circle_overlap, reflect_off_surface};
use super::flipper::Flipper;
use super::shape::Obstacle;
use crate::consts::{BUMPER_KICK, BUMPER_RADIUS, BUMPER_SIGNAL_SPEED, EXCHANGE_DAMPING, SPEED_BRAKE, SPEED_LIMIT};

/// A circular rigid body.
///
/// Live balls carry gravity. Bumpers are built with zero gravity and a
/// radius at or above [`BUMPER_RADIUS`], which makes them immovable in
/// ball-ball collisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub gravity: Vec2,
    /// Respawn point captured at construction, used by [`Ball::reset`]
    pub spawn: Vec2,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, gravity: Vec2) -> Result<Self, ConfigError> {
        if radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius(radius));
        }
        Ok(Self {
            pos,
            vel,
            radius,
            gravity,
            spawn: pos,
        })
    }

    /// Fixed bumper: no gravity, heavy enough to trip the immovable rule
    pub fn bumper(pos: Vec2, radius: f32) -> Result<Self, ConfigError> {
        if radius < BUMPER_RADIUS {
            return Err(ConfigError::BumperTooLight(radius));
        }
        Self::new(pos, Vec2::ZERO, radius, Vec2::ZERO)
    }

    /// Advance one step of free motion.
    ///
    /// Half the gravity kick lands on the velocity before the position
    /// update uses it; the other half enters the position term directly.
    /// The trajectory depends on keeping both stages in this order.
    pub fn integrate(&mut self, dt: f32) {
        self.vel += self.gravity * dt * 0.5;
        self.pos += self.vel * dt + self.gravity * dt * dt * 0.5;
    }

    /// Bounce off the playfield edges.
    ///
    /// A side the ball has crossed nudges the position back one unit and
    /// negates-and-damps that velocity component; floor contact also
    /// bleeds horizontal speed through `rolling`. No-op inside bounds.
    pub fn check_bounds(&mut self, borders: Vec2, damping: f32, rolling: f32) {
        if self.pos.y > borders.y - self.radius {
            self.pos.y = borders.y - self.radius + 1.0;
            self.vel.y *= -damping;
            self.vel.x *= rolling;
        }
        if self.pos.y < self.radius {
            self.pos.y += 1.0;
            self.vel.y *= -damping;
        }
        if self.pos.x > borders.x - self.radius {
            self.pos.x -= 1.0;
            self.vel.x *= -damping;
        }
        if self.pos.x < self.radius {
            self.pos.x += 1.0;
            self.vel.x *= -damping;
        }
    }

    /// Resolve a collision with another ball, if any.
    ///
    /// Ordinary balls separate by one unit each and swap velocities
    /// damped by [`EXCHANGE_DAMPING`]. A heavy ball
    /// (radius >= [`BUMPER_RADIUS`]) stays put: only this ball is pushed
    /// out, with its velocity reversed and amplified by [`BUMPER_KICK`].
    ///
    /// Returns true when such a bumper strike leaves this ball at or
    /// above [`BUMPER_SIGNAL_SPEED`], so the driver can trigger effects.
    pub fn collide_with_ball(&mut self, other: &mut Ball) -> bool {
        let connecting = other.pos - self.pos;
        let mut distance = connecting.length();
        // Coincident centers: redefine as distance 1 instead of dividing by zero
        if distance == 0.0 {
            distance = 1.0;
        }
        if distance > self.radius.max(other.radius) {
            return false;
        }

        let normal = connecting.normalize_or_zero();
        self.pos -= normal;

        if other.radius >= BUMPER_RADIUS {
            self.vel *= -BUMPER_KICK;
            return self.vel.length() >= BUMPER_SIGNAL_SPEED;
        }

        other.pos += normal;
        let pre = self.vel;
        self.vel = other.vel * EXCHANGE_DAMPING;
        other.vel = pre * EXCHANGE_DAMPING;
        false
    }

    /// Test against a static obstacle and reflect off it on contact.
    ///
    /// Returns whether a hit was resolved; drivers score on it.
    pub fn collide_with_shape(&mut self, shape: &Obstacle) -> bool {
        let vertices = shape.vertices();
        let hit = polygon_circle_overlap(&vertices, self.pos, self.radius);
        if !hit.hit {
            return false;
        }
        let response = reflect_off_surface(self.vel, hit.normal, 1.0, 0.0);
        self.pos += response.displacement;
        self.vel = response.velocity;
        true
    }

    /// Test against a flipper in its current pose.
    ///
    /// The circle projects with a double-radius margin so a fast swing
    /// cannot step over the thin quad between ticks. `boost` feeds extra
    /// outgoing speed while the flipper is mid-swing; a locked flipper is
    /// a passive bounce.
    pub fn collide_with_flipper(&mut self, flipper: &Flipper, boost: f32) -> bool {
        let points = flipper.points();
        let hit = polygon_circle_overlap(&points, self.pos, 2.0 * self.radius);
        if !hit.hit {
            return false;
        }
        let boost = if flipper.is_active() { boost } else { 0.0 };
        let response = reflect_off_surface(self.vel, hit.normal, flipper.side.mirror(), boost);
        self.pos += response.displacement;
        self.vel = response.velocity;
        true
    }

    /// Clamp runaway speed. Applied once per tick by the driver, after
    /// collision response; it is physics policy, not part of the
    /// collision calls themselves.
    pub fn velocity_cap(&mut self) {
        if self.vel.length() > SPEED_LIMIT {
            self.vel *= SPEED_BRAKE;
        }
    }

    /// Return to the spawn point with zero velocity; radius and gravity
    /// are unchanged.
    pub fn reset(&mut self) {
        self.pos = self.spawn;
        self.vel = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BALL_SPAWN, GRAVITY, ROLLING_FRICTION, SIM_DT, WALL_DAMPING};

    fn launch_ball() -> Ball {
        Ball::new(BALL_SPAWN, Vec2::new(0.0, -8.5 * 1.1), 10.0, GRAVITY).unwrap()
    }

    #[test]
    fn test_two_stage_integration() {
        let mut ball = launch_ball();
        ball.integrate(SIM_DT);

        // vel.y = -9.35 + 0.1*0.7*0.5 = -9.315
        assert!((ball.vel.y - (-9.315)).abs() < 1e-4);
        assert_eq!(ball.vel.x, 0.0);
        // pos.y = 660 + (-9.315)*0.7 + 0.1*0.49*0.5
        assert!((ball.pos.y - (660.0 - 6.5205 + 0.0245)).abs() < 1e-3);
        assert!(ball.pos.y < 660.0);
    }

    #[test]
    fn test_integration_is_deterministic() {
        let mut a = launch_ball();
        let mut b = launch_ball();
        for _ in 0..1000 {
            a.integrate(SIM_DT);
            b.integrate(SIM_DT);
        }
        assert_eq!(a.pos, b.pos);
        assert_eq!(a.vel, b.vel);
    }

    #[test]
    fn test_floor_bounce_damps_and_rolls() {
        let mut ball = Ball::new(Vec2::new(100.0, 695.0), Vec2::new(2.0, 5.0), 10.0, GRAVITY).unwrap();
        ball.check_bounds(Vec2::new(600.0, 700.0), WALL_DAMPING, ROLLING_FRICTION);
        assert_eq!(ball.pos.y, 700.0 - 10.0 + 1.0);
        assert!((ball.vel.y - (-4.0)).abs() < 1e-5);
        assert!((ball.vel.x - 2.0 * ROLLING_FRICTION).abs() < 1e-5);
    }

    #[test]
    fn test_side_walls_bounce_without_rolling() {
        let mut ball = Ball::new(Vec2::new(5.0, 300.0), Vec2::new(-3.0, 1.0), 10.0, GRAVITY).unwrap();
        ball.check_bounds(Vec2::new(600.0, 700.0), WALL_DAMPING, ROLLING_FRICTION);
        assert_eq!(ball.pos.x, 6.0);
        assert!((ball.vel.x - 2.4).abs() < 1e-5);
        assert_eq!(ball.vel.y, 1.0);
    }

    #[test]
    fn test_in_bounds_is_noop() {
        let mut ball = Ball::new(Vec2::new(300.0, 300.0), Vec2::new(1.0, 1.0), 10.0, GRAVITY).unwrap();
        let before = ball.clone();
        ball.check_bounds(Vec2::new(600.0, 700.0), WALL_DAMPING, ROLLING_FRICTION);
        assert_eq!(ball.pos, before.pos);
        assert_eq!(ball.vel, before.vel);
    }

    #[test]
    fn test_ball_ball_swaps_damped_velocities() {
        let mut a = Ball::new(Vec2::new(100.0, 100.0), Vec2::new(4.0, 0.0), 10.0, GRAVITY).unwrap();
        let mut b = Ball::new(Vec2::new(105.0, 100.0), Vec2::new(-2.0, 0.0), 10.0, GRAVITY).unwrap();
        let signaled = a.collide_with_ball(&mut b);

        assert!(!signaled);
        assert!((a.vel.x - (-2.0 * 0.8)).abs() < 1e-5);
        assert!((b.vel.x - 4.0 * 0.8).abs() < 1e-5);
        // Separated by one unit each, in opposite directions along the normal
        assert_eq!(a.pos, Vec2::new(99.0, 100.0));
        assert_eq!(b.pos, Vec2::new(106.0, 100.0));
    }

    #[test]
    fn test_heavy_bumper_reflects_only_the_caller() {
        let mut ball = Ball::new(Vec2::new(290.0, 300.0), Vec2::new(6.0, 0.0), 10.0, GRAVITY).unwrap();
        let mut bumper = Ball::bumper(Vec2::new(300.0, 300.0), 30.0).unwrap();
        let signaled = ball.collide_with_ball(&mut bumper);

        // 6.0 * 1.1 = 6.6, below the signal speed
        assert!(!signaled);
        assert_eq!(bumper.pos, Vec2::new(300.0, 300.0));
        assert_eq!(bumper.vel, Vec2::ZERO);
        assert!((ball.vel.x - (-6.6)).abs() < 1e-5);
        assert_eq!(ball.pos, Vec2::new(289.0, 300.0));
    }

    #[test]
    fn test_bumper_signal_threshold() {
        let mut slow = Ball::new(Vec2::new(290.0, 300.0), Vec2::new(5.0, 0.0), 10.0, GRAVITY).unwrap();
        let mut bumper = Ball::bumper(Vec2::new(300.0, 300.0), 30.0).unwrap();
        // 5.0 * 1.1 = 5.5 < 7: no signal
        assert!(!slow.collide_with_ball(&mut bumper));

        let mut fast = Ball::new(Vec2::new(290.0, 300.0), Vec2::new(7.0, 0.0), 10.0, GRAVITY).unwrap();
        // 7.0 * 1.1 = 7.7 >= 7: signal
        assert!(fast.collide_with_ball(&mut bumper));
    }

    #[test]
    fn test_coincident_centers_do_not_blow_up() {
        let mut a = Ball::new(Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0), 10.0, GRAVITY).unwrap();
        let mut b = Ball::new(Vec2::new(100.0, 100.0), Vec2::new(-1.0, 0.0), 10.0, GRAVITY).unwrap();
        a.collide_with_ball(&mut b);
        assert!(a.pos.x.is_finite() && a.vel.x.is_finite());
        assert!(b.pos.x.is_finite() && b.vel.x.is_finite());
    }

    #[test]
    fn test_velocity_cap() {
        let mut ball = Ball::new(Vec2::ZERO, Vec2::new(0.0, 12.0), 10.0, GRAVITY).unwrap();
        ball.velocity_cap();
        assert!((ball.vel.y - 12.0 * 0.7).abs() < 1e-5);

        let mut slow = Ball::new(Vec2::ZERO, Vec2::new(0.0, 9.0), 10.0, GRAVITY).unwrap();
        slow.velocity_cap();
        assert_eq!(slow.vel.y, 9.0);
    }

    #[test]
    fn test_reset_restores_spawn() {
        let mut ball = launch_ball();
        for _ in 0..50 {
            ball.integrate(SIM_DT);
        }
        ball.reset();
        assert_eq!(ball.pos, BALL_SPAWN);
        assert_eq!(ball.vel, Vec2::ZERO);
        assert_eq!(ball.radius, 10.0);
        assert_eq!(ball.gravity, GRAVITY);
    }

    #[test]
    fn test_zero_radius_rejected() {
        assert!(Ball::new(Vec2::ZERO, Vec2::ZERO, 0.0, GRAVITY).is_err());
    }
}
