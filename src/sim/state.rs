//! Core simulation entities: ball, pins, rack, phase
//!
//! All motion is integrated in whole ticks; velocities are displacements
//! per tick, so no dt plumbing is needed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts;
use crate::settings::Settings;

/// Current phase of the shot/frame state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball idle at the anchor, waiting for aim input
    AwaitingThrow,
    /// Ball rolling down the lane
    InFlight,
    /// Shot outcome pending one-time processing
    Settling,
    /// All ten frames recorded
    GameOver,
}

/// Ball motion mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallMode {
    /// At rest; position pinned to the anchor between shots
    Idle,
    /// Rolling; friction decays velocity each tick
    InFlight,
}

/// The bowling ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pos: Vec2,
    vel: Vec2,
    radius: f32,
    /// Launch origin on the lane
    anchor: Vec2,
    mode: BallMode,
}

impl Ball {
    pub fn new(anchor: Vec2, radius: f32) -> Self {
        Self {
            pos: anchor,
            vel: Vec2::ZERO,
            radius,
            anchor,
            mode: BallMode::Idle,
        }
    }

    /// Relocate the idle anchor. Ignored while the ball is in flight.
    pub fn set_anchor(&mut self, anchor: Vec2) {
        if self.mode != BallMode::Idle {
            log::debug!("set_anchor ignored: ball in flight");
            return;
        }
        self.anchor = anchor;
        self.pos = anchor;
    }

    /// Launch toward `target_x`. Lateral speed is proportional to the aim
    /// offset, tuned against half the launch distance so a full-lane aim
    /// gives lateral travel comparable to longitudinal travel.
    ///
    /// A launch slower than `stop_threshold` on both axes is ignored: the
    /// ball would count as stopped before its first tick.
    pub fn launch(&mut self, target_x: f32, speed: f32, max_velocity: f32, stop_threshold: f32) {
        if self.mode != BallMode::Idle {
            return;
        }
        let lateral_cap = max_velocity * 0.5;
        let dx = target_x - self.anchor.x;
        let vx = (dx / (self.anchor.y / 2.0) * lateral_cap).clamp(-lateral_cap, lateral_cap);
        // Lane-away is negative Y
        let vy = (-speed).clamp(-max_velocity, max_velocity);
        if vx.abs() < stop_threshold && vy.abs() < stop_threshold {
            log::debug!("launch ignored: speed {speed} under stop threshold");
            return;
        }
        self.vel = Vec2::new(vx, vy);
        self.mode = BallMode::InFlight;
        log::debug!("ball launched: vel=({:.1}, {:.1})", vx, vy);
    }

    /// One tick of motion: integrate, decay, stop-detect.
    pub fn advance(&mut self, friction: f32, stop_threshold: f32) {
        if self.mode != BallMode::InFlight {
            return;
        }
        self.pos += self.vel;
        self.vel *= friction;
        if self.vel.x.abs() < stop_threshold && self.vel.y.abs() < stop_threshold {
            self.vel = Vec2::ZERO;
            self.mode = BallMode::Idle;
            log::debug!("ball stopped at ({:.1}, {:.1})", self.pos.x, self.pos.y);
        }
    }

    /// Force the ball to rest in place.
    pub fn stop(&mut self) {
        self.vel = Vec2::ZERO;
        self.mode = BallMode::Idle;
    }

    /// Return to the anchor, at rest.
    pub fn reset(&mut self) {
        self.pos = self.anchor;
        self.vel = Vec2::ZERO;
        self.mode = BallMode::Idle;
    }

    /// Circle-circle overlap with a standing pin (strict inequality)
    pub fn collides(&self, pin: &Pin) -> bool {
        pin.is_standing() && self.pos.distance(pin.pos()) < self.radius + pin.radius()
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn mode(&self) -> BallMode {
        self.mode
    }

    pub fn is_idle(&self) -> bool {
        self.mode == BallMode::Idle
    }
}

/// A single pin. Falls instantly on ball contact; no secondary physics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pos: Vec2,
    radius: f32,
    standing: bool,
}

impl Pin {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            radius,
            standing: true,
        }
    }

    pub fn fall(&mut self) {
        self.standing = false;
    }

    pub fn reset(&mut self) {
        self.standing = true;
    }

    pub fn is_standing(&self) -> bool {
        self.standing
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

/// The ten pins in standard triangular formation.
///
/// Four rows of 1, 2, 3, 4 pins. The apex (head pin) sits at
/// `(lane_center_x, pin_base_y)`; each further row steps away from the
/// ball (toward smaller y) by `pin_row_spacing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinRack {
    pins: Vec<Pin>,
}

impl PinRack {
    pub fn new(settings: &Settings) -> Self {
        let cx = settings.lane_center_x();
        let mut pins = Vec::with_capacity(consts::PIN_COUNT);
        for row in 0..4usize {
            let y = settings.pin_base_y - settings.pin_row_spacing * row as f32;
            let count = row + 1;
            let first_x = cx - settings.pin_in_row_spacing * (count as f32 - 1.0) / 2.0;
            for slot in 0..count {
                let x = first_x + settings.pin_in_row_spacing * slot as f32;
                pins.push(Pin::new(Vec2::new(x, y), settings.pin_radius));
            }
        }
        debug_assert_eq!(pins.len(), consts::PIN_COUNT);
        Self { pins }
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub(crate) fn pins_mut(&mut self) -> &mut [Pin] {
        &mut self.pins
    }

    pub fn standing_count(&self) -> usize {
        self.pins.iter().filter(|p| p.is_standing()).count()
    }

    pub fn fallen_count(&self) -> usize {
        self.pins.len() - self.standing_count()
    }

    /// Stand all ten pins back up (fresh rack)
    pub fn reset_all(&mut self) {
        for pin in &mut self.pins {
            pin.reset();
        }
    }
}
