//! The game engine and its tick state machine
//!
//! The engine exclusively owns the ball, the rack and the score book; an
//! external driver calls [`GameEngine::request_throw`] and pumps
//! [`GameEngine::tick`], and renderers read [`GameEngine::snapshot`].
//! Within one tick the order is fixed: ball advance, then collision
//! resolution, then settlement check, then score recording. Given the
//! same settings and the same event sequence the outcome is identical.

use crate::consts::FRAME_COUNT;
use crate::settings::Settings;

use super::score::ScoreBook;
use super::snapshot::{BallView, FrameView, GameSnapshot, PinView};
use super::state::{Ball, BallMode, GamePhase, PinRack};

/// Orchestrates ball flight, pin falls and frame/score bookkeeping
#[derive(Debug, Clone)]
pub struct GameEngine {
    settings: Settings,
    ball: Ball,
    rack: PinRack,
    book: ScoreBook,
    phase: GamePhase,
    /// Guards one-time settlement handling per shot
    shot_processed: bool,
    /// Pins already down when the current shot started; the shot's own
    /// count is the delta against this baseline
    fallen_baseline: usize,
}

impl GameEngine {
    pub fn new(settings: Settings) -> Self {
        let ball = Ball::new(settings.anchor(), settings.ball_radius);
        let rack = PinRack::new(&settings);
        Self {
            settings,
            ball,
            rack,
            book: ScoreBook::new(),
            phase: GamePhase::AwaitingThrow,
            shot_processed: true,
            fallen_baseline: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Launch the ball toward `target_x` with the default throw speed.
    ///
    /// Only honored while a throw is awaited with the ball idle; anything
    /// else is a soft no-op returning `false` (the input side is human
    /// driven, so an out-of-phase tap is not an error).
    pub fn request_throw(&mut self, target_x: f32) -> bool {
        if self.phase != GamePhase::AwaitingThrow || !self.ball.is_idle() {
            log::debug!("throw request ignored in phase {:?}", self.phase);
            return false;
        }
        self.fallen_baseline = self.rack.fallen_count();
        self.ball.launch(
            target_x,
            self.settings.default_throw_speed,
            self.settings.max_velocity,
            self.settings.stop_threshold,
        );
        self.shot_processed = false;
        self.phase = GamePhase::InFlight;
        true
    }

    /// Advance the simulation one step.
    pub fn tick(&mut self) {
        match self.phase {
            GamePhase::AwaitingThrow | GamePhase::GameOver => {}
            GamePhase::InFlight => {
                self.ball
                    .advance(self.settings.friction, self.settings.stop_threshold);

                // All overlaps this tick fall together; the ball rolls on
                // undeflected
                for pin in self.rack.pins_mut() {
                    if self.ball.collides(pin) {
                        pin.fall();
                    }
                }

                let past_pins = self.ball.pos().y < self.settings.past_pins_line();
                if self.ball.is_idle() || past_pins {
                    self.ball.stop();
                    self.phase = GamePhase::Settling;
                }
            }
            GamePhase::Settling => {
                if !self.shot_processed {
                    self.settle_shot();
                }
            }
        }
    }

    /// Record the settled shot and drive the frame state machine.
    fn settle_shot(&mut self) {
        let fallen = self.rack.fallen_count();
        let downed = (fallen - self.fallen_baseline) as u8;
        log::info!(
            "frame {} shot {} settled: {downed} down, {} total fallen",
            self.book.frame_number(),
            self.book.shot_number(),
            fallen
        );

        if let Err(err) = self.book.record_shot(downed) {
            // Unreachable when driven through tick(); keep the engine alive
            log::error!("score book rejected {downed} pins: {err}");
        }

        if self.book.current_frame_is_finished() {
            self.rack.reset_all();
            self.ball.reset();
            self.book.advance_frame();
            if self.book.is_complete() {
                self.phase = GamePhase::GameOver;
                log::info!("game over, final score {}", self.book.total());
            } else {
                self.phase = GamePhase::AwaitingThrow;
            }
        } else {
            // Mid-frame: fallen pins stay down, except that the tenth
            // frame re-racks whenever a mark cleared the deck
            if self.book.frame_number() == FRAME_COUNT && self.rack.standing_count() == 0 {
                self.rack.reset_all();
            }
            self.ball.reset();
            self.phase = GamePhase::AwaitingThrow;
        }
        self.shot_processed = true;
    }

    /// Full reset to a fresh game with the same settings.
    pub fn reset(&mut self) {
        *self = Self::new(self.settings.clone());
        log::info!("game reset");
    }

    /// Capture an owned read-only view of the whole game.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            ball: BallView {
                pos: self.ball.pos(),
                radius: self.ball.radius(),
                in_flight: self.ball.mode() == BallMode::InFlight,
            },
            pins: self
                .rack
                .pins()
                .iter()
                .map(|pin| PinView {
                    pos: pin.pos(),
                    radius: pin.radius(),
                    standing: pin.is_standing(),
                })
                .collect(),
            frame: self.book.frame_number(),
            shot: self.book.shot_number(),
            total_score: self.book.total(),
            frames: self
                .book
                .frames()
                .iter()
                .map(|frame| FrameView {
                    shots: frame.shots().to_vec(),
                    bonus: frame.bonus(),
                    closed: frame.is_closed(),
                    total: frame.frame_total(),
                })
                .collect(),
            phase: self.phase,
            game_over: self.phase == GamePhase::GameOver,
        }
    }
}
