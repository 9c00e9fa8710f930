//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Discrete ticks only, driven by the caller
//! - No randomness, no wall-clock time
//! - Stable iteration order (pins by rack position)
//! - No rendering or platform dependencies

pub mod score;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use score::{FrameRecord, ScoreBook, ScoreError};
pub use snapshot::{BallView, FrameView, GameSnapshot, PinView};
pub use state::{Ball, BallMode, GamePhase, Pin, PinRack};
pub use tick::GameEngine;
