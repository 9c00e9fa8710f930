//! Read-only view of the simulation for renderers and score displays
//!
//! A snapshot is an owned copy built per capture; holding one never
//! borrows from the engine, so a render thread can keep its own copy
//! while the driver keeps ticking.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::GamePhase;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub pos: Vec2,
    pub radius: f32,
    pub in_flight: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinView {
    pub pos: Vec2,
    pub radius: f32,
    pub standing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    pub shots: Vec<u8>,
    pub bonus: u32,
    pub closed: bool,
    /// Shots plus resolved bonus for this frame alone
    pub total: u32,
}

/// Everything an external surface may read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub ball: BallView,
    pub pins: Vec<PinView>,
    /// Current frame, 1..=10
    pub frame: usize,
    /// Current shot within the frame, 1..=3
    pub shot: usize,
    pub total_score: u32,
    pub frames: Vec<FrameView>,
    pub phase: GamePhase,
    pub game_over: bool,
}
