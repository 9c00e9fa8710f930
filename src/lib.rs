//! Tenpin - a deterministic ten-pin bowling lane simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, pin rack, scoring, engine)
//! - `settings`: Data-driven lane geometry and physics tuning
//!
//! The crate has no rendering or input surface of its own. A driver feeds
//! aim input through [`sim::GameEngine::request_throw`] and pumps
//! [`sim::GameEngine::tick`]; a renderer or score display reads
//! [`sim::GameSnapshot`] captures. Everything in between is pure state.

pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{GameEngine, GameSnapshot};

/// Lane and physics defaults (lane units)
pub mod consts {
    /// Playfield dimensions
    pub const LANE_WIDTH: f32 = 400.0;
    pub const LANE_LENGTH: f32 = 1000.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 40.0;
    /// Upper clamp on launch speed (per-tick displacement)
    pub const MAX_VELOCITY: f32 = 50.0;
    /// Launch speed used when the driver does not specify one
    pub const DEFAULT_THROW_SPEED: f32 = 30.0;
    /// Per-tick velocity multiplier
    pub const FRICTION: f32 = 0.98;
    /// Speed below which the ball halts
    pub const STOP_THRESHOLD: f32 = 0.5;

    /// Rack geometry - apex pin at PIN_BASE_Y, rows extending up-lane
    pub const PIN_RADIUS: f32 = 15.0;
    pub const PIN_ROW_SPACING: f32 = 80.0;
    pub const PIN_IN_ROW_SPACING: f32 = 32.0;
    pub const PIN_BASE_Y: f32 = 520.0;
    pub const PIN_COUNT: usize = 10;

    /// A shot settles once the ball crosses this fraction of the lane
    /// length from the far end
    pub const PAST_PINS_FRACTION: f32 = 0.2;
    /// Launch anchor sits this fraction of the lane length from the far end
    pub const ANCHOR_Y_FRACTION: f32 = 0.9;

    /// Frames per game
    pub const FRAME_COUNT: usize = 10;
}
