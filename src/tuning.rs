//! Runtime-adjustable physics knobs
//!
//! The values the engine exposes as call parameters rather than fixed
//! policy. Defaults reproduce the stock table feel; a table carries its
//! own copy so variants can be tuned without recompiling.

use serde::{Deserialize, Serialize};

use crate::consts::{ROLLING_FRICTION, WALL_DAMPING};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tuning {
    /// Wall bounce energy retention
    pub wall_damping: f32,
    /// Horizontal friction applied on floor contact
    pub rolling_friction: f32,
    /// Extra outgoing speed fraction for a mid-swing flipper strike
    pub activity_boost: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            wall_damping: WALL_DAMPING,
            rolling_friction: ROLLING_FRICTION,
            activity_boost: 1.0,
        }
    }
}
