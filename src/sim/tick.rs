//! Fixed timestep playfield tick
//!
//! One call advances the whole table deterministically in a fixed order:
//! actors first, then ball integration, then collision response, then
//! the bounds clamp and speed cap. Collision response must see
//! post-integration positions; reordering changes outcomes.

use super::state::{Table, TableEvent};

/// Driver commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flipper slots to re-arm this tick (player strike inputs)
    pub rearm: Vec<usize>,
}

impl TickInput {
    pub fn rearm_one(slot: usize) -> Self {
        Self { rearm: vec![slot] }
    }
}

/// Advance the table by one fixed timestep
pub fn tick(table: &mut Table, input: &TickInput, dt: f32) {
    // Strike inputs re-arm their flippers
    for &slot in &input.rearm {
        if let Some(flipper) = table.flippers.get_mut(slot) {
            flipper.rearm();
        }
    }

    // Advance actors: flippers swing, patrols drift
    for flipper in &mut table.flippers {
        flipper.update();
    }
    for fixture in &mut table.fixtures {
        fixture.drift();
    }
    for bumper in &mut table.bumpers {
        bumper.drift();
    }

    // Integrate free motion
    for ball in &mut table.balls {
        ball.integrate(dt);
    }

    // Ball-ball pairs, each pair once
    for i in 0..table.balls.len() {
        for j in (i + 1)..table.balls.len() {
            let (head, tail) = table.balls.split_at_mut(j);
            head[i].collide_with_ball(&mut tail[0]);
        }
    }

    // Ball-bumper; signal-speed strikes become events
    for (ball_idx, ball) in table.balls.iter_mut().enumerate() {
        for (bumper_idx, bumper) in table.bumpers.iter_mut().enumerate() {
            if ball.collide_with_ball(&mut bumper.body) {
                log::debug!("ball {} struck bumper {} at signal speed", ball_idx, bumper_idx);
                table.events.push(TableEvent::BumperStruck {
                    ball: ball_idx,
                    bumper: bumper_idx,
                });
            }
        }
    }

    // Fixtures, then flippers
    for (ball_idx, ball) in table.balls.iter_mut().enumerate() {
        for (fixture_idx, fixture) in table.fixtures.iter().enumerate() {
            if ball.collide_with_shape(&fixture.shape) && fixture.scoring {
                table.events.push(TableEvent::TargetHit {
                    ball: ball_idx,
                    fixture: fixture_idx,
                });
            }
        }
        for flipper in &table.flippers {
            ball.collide_with_flipper(flipper, table.tuning.activity_boost);
        }
    }

    // Clamp last: walls, then the speed cap
    for ball in &mut table.balls {
        ball.check_bounds(table.bounds, table.tuning.wall_damping, table.tuning.rolling_friction);
        ball.velocity_cap();
    }
}
