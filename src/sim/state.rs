//! Playfield state
//!
//! Everything needed to reproduce a run deterministically lives here:
//! balls, bumpers, fixtures, flippers and the table bounds. Events are
//! transient driver output and are skipped by serialization.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ConfigError;
use super::ball::Ball;
use super::flipper::{Flipper, Side};
use super::shape::{Obstacle, Rect, Triangle};
use crate::consts::{BALL_RADIUS, BALL_SPAWN, FIELD_HEIGHT, FIELD_WIDTH, GRAVITY, STRIKE_LIMIT};
use crate::tuning::Tuning;

/// Horizontal back-and-forth drift for a moving fixture or bumper.
/// The speed reverses whenever the body's extent crosses a bound.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Patrol {
    pub speed: f32,
    pub min_x: f32,
    pub max_x: f32,
}

/// An obstacle placed on the table, optionally patrolling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    pub shape: Obstacle,
    #[serde(default)]
    pub patrol: Option<Patrol>,
    /// Hits on scoring fixtures are reported as [`TableEvent::TargetHit`]
    #[serde(default)]
    pub scoring: bool,
}

impl Fixture {
    pub fn fixed(shape: impl Into<Obstacle>) -> Self {
        Self {
            shape: shape.into(),
            patrol: None,
            scoring: false,
        }
    }

    /// Advance the patrol one tick, reversing at its bounds
    pub fn drift(&mut self) {
        if let Some(patrol) = &mut self.patrol {
            let (lo, hi) = self.shape.span_x();
            if lo < patrol.min_x || hi > patrol.max_x {
                patrol.speed = -patrol.speed;
            }
            self.shape.translate_x(patrol.speed);
        }
    }
}

/// A heavy zero-gravity ball acting as a fixed obstacle, optionally
/// drifting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bumper {
    pub body: Ball,
    #[serde(default)]
    pub patrol: Option<Patrol>,
}

impl Bumper {
    pub fn fixed(pos: Vec2, radius: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            body: Ball::bumper(pos, radius)?,
            patrol: None,
        })
    }

    /// Advance the patrol one tick, reversing at its bounds
    pub fn drift(&mut self) {
        if let Some(patrol) = &mut self.patrol {
            let body = &mut self.body;
            if body.pos.x - body.radius < patrol.min_x || body.pos.x + body.radius > patrol.max_x {
                patrol.speed = -patrol.speed;
            }
            body.pos.x += patrol.speed;
        }
    }
}

/// Events surfaced to the driver for scoring and effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEvent {
    /// A ball bounced off a bumper at or above the signal speed
    BumperStruck { ball: usize, bumper: usize },
    /// A scoring fixture was hit
    TargetHit { ball: usize, fixture: usize },
}

/// Complete playfield state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Playfield extents; the bounce walls
    pub bounds: Vec2,
    pub balls: Vec<Ball>,
    pub bumpers: Vec<Bumper>,
    pub fixtures: Vec<Fixture>,
    pub flippers: Vec<Flipper>,
    #[serde(default)]
    pub tuning: Tuning,
    #[serde(skip)]
    pub(crate) events: Vec<TableEvent>,
}

impl Table {
    /// Empty table with the given bounds
    pub fn new(bounds: Vec2) -> Self {
        Self {
            bounds,
            balls: Vec::new(),
            bumpers: Vec::new(),
            fixtures: Vec::new(),
            flippers: Vec::new(),
            tuning: Tuning::default(),
            events: Vec::new(),
        }
    }

    /// The classic layout: one ball in the launch lane, a patrolling
    /// scoring target, two lane rails and a corner deflector, two heavy
    /// bumpers (one drifting), a flipper pair and a short-throw starter
    /// bat.
    pub fn classic() -> Result<Self, ConfigError> {
        let mut table = Table::new(Vec2::new(FIELD_WIDTH, FIELD_HEIGHT));

        table
            .balls
            .push(Ball::new(BALL_SPAWN, Vec2::ZERO, BALL_RADIUS, GRAVITY)?);

        table.bumpers.push(Bumper {
            body: Ball::bumper(Vec2::new(300.0, 300.0), 30.0)?,
            patrol: Some(Patrol {
                speed: 0.4,
                min_x: 46.0 + 4.0 * BALL_RADIUS,
                max_x: FIELD_WIDTH - 4.0 * BALL_RADIUS,
            }),
        });
        table.bumpers.push(Bumper::fixed(Vec2::new(450.0, 200.0), 20.0)?);

        // Patrolling target; the only fixture worth points
        table.fixtures.push(Fixture {
            shape: Rect::new(Vec2::new(300.0, 400.0), 100.0, 20.0)?.into(),
            patrol: Some(Patrol {
                speed: 0.5,
                min_x: 45.0 + 2.0 * BALL_RADIUS,
                max_x: FIELD_WIDTH - 2.0 * BALL_RADIUS,
            }),
            scoring: true,
        });
        // Launch lane rails and the corner deflector
        table
            .fixtures
            .push(Fixture::fixed(Rect::new(Vec2::new(35.0, 150.0), 5.0, 550.0)?));
        table
            .fixtures
            .push(Fixture::fixed(Rect::new(Vec2::new(0.0, 60.0), 5.0, 640.0)?));
        table.fixtures.push(Fixture::fixed(Triangle::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(60.0, 0.0),
            Vec2::new(0.0, 60.0),
        )?));

        let left_origin = Vec2::new(145.0, 725.0);
        table.flippers.push(Flipper::new(
            [
                left_origin,
                left_origin + Vec2::new(130.0, 0.0),
                left_origin + Vec2::new(130.0, 15.0),
                left_origin + Vec2::new(0.0, 15.0),
            ],
            Side::Left,
            STRIKE_LIMIT,
        )?);

        let right_origin = Vec2::new(455.0, 725.0);
        table.flippers.push(Flipper::new(
            [
                right_origin,
                right_origin + Vec2::new(-130.0, 0.0),
                right_origin + Vec2::new(-130.0, 15.0),
                right_origin + Vec2::new(0.0, 15.0),
            ],
            Side::Right,
            STRIKE_LIMIT,
        )?);

        // Short-throw starter bat in the launch lane
        table.flippers.push(Flipper::new(
            [
                Vec2::new(100.0, 700.0),
                Vec2::new(10.0, 700.0),
                Vec2::new(10.0, 710.0),
                Vec2::new(100.0, 710.0),
            ],
            Side::Right,
            10.0,
        )?);

        log::debug!(
            "classic table: {} balls, {} bumpers, {} fixtures, {} flippers",
            table.balls.len(),
            table.bumpers.len(),
            table.fixtures.len(),
            table.flippers.len()
        );
        Ok(table)
    }

    /// Events accumulated since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }
}
