//! Frame records and the score book
//!
//! Standard ten-pin scoring: two shots per frame (three in the tenth when
//! a mark is rolled), with strike and spare bonuses credited from whatever
//! shots come next anywhere in the book. A frame's contribution to the
//! running total is deferred until its bonus dependency resolves, so the
//! total only ever moves forward.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::FRAME_COUNT;

/// Pins on a full rack; also the per-shot maximum
pub const PIN_COUNT: u8 = 10;

/// Errors emitted by the score book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreError {
    /// Pin count out of range, or more pins than the rack still holds
    InvalidShot { pins: u8 },
    /// The book already has all ten frames recorded
    GameOver,
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::InvalidShot { pins } => {
                write!(f, "invalid shot of {pins} pins")
            }
            ScoreError::GameOver => write!(f, "game is already over"),
        }
    }
}

impl std::error::Error for ScoreError {}

/// One frame's shots and deferred bonus
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRecord {
    shots: Vec<u8>,
    bonus: u32,
    /// Contribution to the running total is final
    closed: bool,
}

impl FrameRecord {
    pub fn shots(&self) -> &[u8] {
        &self.shots
    }

    pub fn bonus(&self) -> u32 {
        self.bonus
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// All ten on the first shot
    pub fn is_strike(&self) -> bool {
        self.shots.first() == Some(&PIN_COUNT)
    }

    /// All ten across the first two shots, without a strike
    pub fn is_spare(&self) -> bool {
        !self.is_strike() && self.shots.len() >= 2 && self.shots[0] + self.shots[1] == PIN_COUNT
    }

    /// Shots plus any resolved bonus
    pub fn frame_total(&self) -> u32 {
        self.shots.iter().map(|&s| u32::from(s)).sum::<u32>() + self.bonus
    }

    /// Has this frame used up its shot budget?
    fn is_finished(&self, is_tenth: bool) -> bool {
        if is_tenth {
            // A mark buys a third shot
            if self.is_strike() || self.is_spare() {
                self.shots.len() >= 3
            } else {
                self.shots.len() >= 2
            }
        } else {
            self.is_strike() || self.shots.len() >= 2
        }
    }
}

/// The full ten-frame score book with a frame cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBook {
    frames: Vec<FrameRecord>,
    /// 0-based cursor into `frames`
    current: usize,
    complete: bool,
    total: u32,
}

impl Default for ScoreBook {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreBook {
    pub fn new() -> Self {
        Self {
            frames: vec![FrameRecord::default(); FRAME_COUNT],
            current: 0,
            complete: false,
            total: 0,
        }
    }

    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    /// Current frame number, 1-based
    pub fn frame_number(&self) -> usize {
        self.current + 1
    }

    /// Shot number within the current frame, 1-based. Freezes at the last
    /// shot once the frame's budget is spent, so it stays in 1..=3.
    pub fn shot_number(&self) -> usize {
        let frame = &self.frames[self.current];
        if frame.is_finished(self.current == FRAME_COUNT - 1) {
            frame.shots.len()
        } else {
            frame.shots.len() + 1
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Running total over frames whose bonus dependency is resolved
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Record a shot's pin count into the current frame, then resolve any
    /// bonuses the new shot pays off.
    pub fn record_shot(&mut self, pins: u8) -> Result<(), ScoreError> {
        if self.complete {
            return Err(ScoreError::GameOver);
        }
        if pins > PIN_COUNT {
            return Err(ScoreError::InvalidShot { pins });
        }
        let is_tenth = self.current == FRAME_COUNT - 1;
        let frame = &self.frames[self.current];
        if frame.is_finished(is_tenth) {
            // Caller failed to advance the frame first
            return Err(ScoreError::InvalidShot { pins });
        }
        if self.exceeds_rack(frame, pins, is_tenth) {
            return Err(ScoreError::InvalidShot { pins });
        }

        self.frames[self.current].shots.push(pins);
        log::debug!(
            "frame {} shot {}: {pins} pins",
            self.frame_number(),
            self.frames[self.current].shots.len()
        );
        self.resolve_bonuses();
        Ok(())
    }

    /// Would this shot claim more pins than remain standing on one rack?
    /// Tenth-frame racks refresh after a mark, so the pairings differ.
    fn exceeds_rack(&self, frame: &FrameRecord, pins: u8, is_tenth: bool) -> bool {
        if !is_tenth {
            return frame.shots.len() == 1 && !frame.is_strike() && frame.shots[0] + pins > PIN_COUNT;
        }
        match frame.shots.as_slice() {
            // Second shot against the leftovers of a non-strike first
            [first] if *first < PIN_COUNT => first + pins > PIN_COUNT,
            // Third shot against the leftovers of a non-strike second
            [10, second] if *second < PIN_COUNT => second + pins > PIN_COUNT,
            _ => false,
        }
    }

    /// True once the current frame's shot budget is exhausted
    pub fn current_frame_is_finished(&self) -> bool {
        self.frames[self.current].is_finished(self.current == FRAME_COUNT - 1)
    }

    /// Move the cursor to the next frame; completing frame ten ends the book
    pub fn advance_frame(&mut self) {
        if self.current + 1 < FRAME_COUNT {
            self.current += 1;
        } else {
            self.complete = true;
            log::info!("score book complete: {}", self.total);
        }
    }

    /// Walk every unclosed frame and settle what the recorded shots allow.
    ///
    /// Strike bonuses need the next two shots anywhere in the book; spares
    /// need one. Frame ten never owes a bonus and closes once finished.
    fn resolve_bonuses(&mut self) {
        // Flattened (frame index, pins) shot list, in rolled order
        let flat: Vec<(usize, u8)> = self
            .frames
            .iter()
            .enumerate()
            .flat_map(|(i, f)| f.shots.iter().map(move |&s| (i, s)))
            .collect();

        for idx in 0..FRAME_COUNT {
            if self.frames[idx].closed || self.frames[idx].shots.is_empty() {
                continue;
            }
            if idx == FRAME_COUNT - 1 {
                if self.frames[idx].is_finished(true) {
                    self.frames[idx].closed = true;
                }
                continue;
            }
            if self.frames[idx].is_strike() {
                let next_two: Vec<u8> = flat
                    .iter()
                    .filter(|&&(i, _)| i > idx)
                    .map(|&(_, s)| s)
                    .take(2)
                    .collect();
                if next_two.len() == 2 {
                    self.frames[idx].bonus = u32::from(next_two[0]) + u32::from(next_two[1]);
                    self.frames[idx].closed = true;
                }
            } else if self.frames[idx].is_spare() {
                if let Some(&(_, next)) = flat.iter().find(|&&(i, _)| i > idx) {
                    self.frames[idx].bonus = u32::from(next);
                    self.frames[idx].closed = true;
                }
            } else if self.frames[idx].shots.len() >= 2 {
                // Open frame, no bonus owed
                self.frames[idx].closed = true;
            }
        }

        self.total = self
            .frames
            .iter()
            .filter(|f| f.closed)
            .map(FrameRecord::frame_total)
            .sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Drive the book the way the engine does: record, advance when done.
    fn play(shots: &[u8]) -> ScoreBook {
        let mut book = ScoreBook::new();
        for &pins in shots {
            book.record_shot(pins).unwrap();
            if book.current_frame_is_finished() {
                book.advance_frame();
            }
        }
        book
    }

    fn frame_totals(book: &ScoreBook) -> Vec<u32> {
        book.frames().iter().map(FrameRecord::frame_total).collect()
    }

    #[test]
    fn test_gutter_game_scores_zero() {
        let book = play(&[0; 20]);
        assert!(book.is_complete());
        assert_eq!(book.total(), 0);
    }

    #[test]
    fn test_all_nines_scores_ninety() {
        let shots: Vec<u8> = [9, 0].repeat(10);
        let book = play(&shots);
        assert!(book.is_complete());
        assert_eq!(book.total(), 90);
    }

    #[test]
    fn test_all_spares_scores_150() {
        let mut shots: Vec<u8> = [5, 5].repeat(10);
        shots.push(5); // bonus shot for the tenth-frame spare
        let book = play(&shots);
        assert!(book.is_complete());
        assert_eq!(book.total(), 150);
        assert_eq!(book.frames()[0].frame_total(), 15);
    }

    #[test]
    fn test_perfect_game_scores_300() {
        let book = play(&[10; 12]);
        assert!(book.is_complete());
        assert_eq!(book.total(), 300);
        for frame in &book.frames()[..9] {
            assert_eq!(frame.shots(), &[10]);
            assert_eq!(frame.frame_total(), 30);
        }
        assert_eq!(book.frames()[9].shots(), &[10, 10, 10]);
        assert_eq!(book.frames()[9].frame_total(), 30);
    }

    #[test]
    fn test_strike_then_spare_then_open() {
        // (10), (3,7), (5,2), (0,0), gutters to the end
        let mut shots = vec![10, 3, 7, 5, 2, 0, 0];
        shots.extend([0; 12]);
        let book = play(&shots);
        assert!(book.is_complete());
        assert_eq!(
            frame_totals(&book),
            vec![20, 15, 7, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(book.total(), 42);
    }

    #[test]
    fn test_spare_bonus_is_next_single_shot() {
        // (5,5), (3,0), gutters to the end
        let mut shots = vec![5, 5, 3, 0];
        shots.extend([0; 16]);
        let book = play(&shots);
        assert_eq!(book.frames()[0].frame_total(), 13);
        assert_eq!(book.frames()[1].frame_total(), 3);
        assert_eq!(book.total(), 16);
    }

    #[test]
    fn test_double_strike_bonus_crosses_frames() {
        // (10), (10), (5,3), gutters to the end
        let mut shots = vec![10, 10, 5, 3];
        shots.extend([0; 14]);
        let book = play(&shots);
        assert_eq!(book.frames()[0].frame_total(), 25);
        assert_eq!(book.frames()[1].frame_total(), 18);
        assert_eq!(book.frames()[2].frame_total(), 8);
        assert_eq!(book.total(), 51);
    }

    #[test]
    fn test_tenth_frame_turkey_only() {
        // Nine open gutter frames, then strike/strike/strike
        let mut shots = vec![0; 18];
        shots.extend([10, 10, 10]);
        let book = play(&shots);
        assert!(book.is_complete());
        assert_eq!(book.total(), 30);
    }

    #[test]
    fn test_strike_ends_frame_immediately() {
        let mut book = ScoreBook::new();
        book.record_shot(10).unwrap();
        assert!(book.current_frame_is_finished());
        book.advance_frame();
        assert_eq!(book.frame_number(), 2);
        assert_eq!(book.shot_number(), 1);
    }

    #[test]
    fn test_tenth_frame_strike_allows_two_more() {
        let mut shots = vec![0; 18];
        shots.push(10);
        let mut book = play(&shots);
        assert!(!book.current_frame_is_finished());
        book.record_shot(4).unwrap();
        assert!(!book.current_frame_is_finished());
        book.record_shot(6).unwrap();
        assert!(book.current_frame_is_finished());
        book.advance_frame();
        assert!(book.is_complete());
        assert_eq!(book.total(), 20);
    }

    #[test]
    fn test_tenth_frame_open_ends_after_two() {
        let mut shots = vec![0; 18];
        shots.extend([3, 4]);
        let book = play(&shots);
        assert!(book.is_complete());
        assert_eq!(book.total(), 7);
    }

    #[test]
    fn test_shot_number_stays_in_range_when_book_ends() {
        let perfect = play(&[10; 12]);
        assert!(perfect.is_complete());
        assert_eq!(perfect.shot_number(), 3);

        let mut open_tenth = vec![0; 18];
        open_tenth.extend([3, 4]);
        let book = play(&open_tenth);
        assert!(book.is_complete());
        assert_eq!(book.shot_number(), 2);
    }

    #[test]
    fn test_out_of_range_shot_rejected() {
        let mut book = ScoreBook::new();
        assert_eq!(
            book.record_shot(11),
            Err(ScoreError::InvalidShot { pins: 11 })
        );
        assert_eq!(book.shot_number(), 1);
    }

    #[test]
    fn test_open_frame_overflow_rejected() {
        let mut book = ScoreBook::new();
        book.record_shot(5).unwrap();
        assert_eq!(
            book.record_shot(7),
            Err(ScoreError::InvalidShot { pins: 7 })
        );
        // The frame is untouched and a legal shot still lands
        book.record_shot(5).unwrap();
        assert!(book.current_frame_is_finished());
    }

    #[test]
    fn test_tenth_frame_leftover_overflow_rejected() {
        let mut shots = vec![0; 18];
        shots.extend([10, 4]);
        let mut book = play(&shots);
        // Third shot plays against the six pins left after the second
        assert_eq!(
            book.record_shot(7),
            Err(ScoreError::InvalidShot { pins: 7 })
        );
        book.record_shot(6).unwrap();
        assert!(book.current_frame_is_finished());
    }

    #[test]
    fn test_completed_book_rejects_shots() {
        let mut book = play(&[0; 20]);
        assert!(book.is_complete());
        assert_eq!(book.record_shot(5), Err(ScoreError::GameOver));
    }

    #[test]
    fn test_total_monotone_through_sample_game() {
        let shots = [10u8, 10, 5, 5, 9, 0, 10, 0, 0, 8, 2, 10, 10, 10, 9, 1];
        let mut book = ScoreBook::new();
        let mut last = 0;
        for &pins in &shots {
            book.record_shot(pins).unwrap();
            assert!(book.total() >= last);
            last = book.total();
            if book.current_frame_is_finished() {
                book.advance_frame();
            }
        }
        assert!(book.is_complete());
    }

    #[test]
    fn test_replay_reproduces_book() {
        let mut shots = vec![10, 7, 3, 4, 4];
        shots.extend([0; 14]);
        let first = play(&shots);
        let second = play(&shots);
        assert_eq!(first, second);
    }

    proptest! {
        /// Feed arbitrary pin counts, bent into legality against the
        /// current rack, and check the book's structural invariants.
        #[test]
        fn prop_book_invariants(raw in proptest::collection::vec(0u8..=10, 21)) {
            let mut book = ScoreBook::new();
            let mut last_total = 0;

            for &r in &raw {
                if book.is_complete() {
                    break;
                }
                let pins = match book.record_shot(r) {
                    Ok(()) => r,
                    Err(ScoreError::InvalidShot { .. }) => {
                        // Too many for the standing pins; throw a gutter instead
                        book.record_shot(0).unwrap();
                        0
                    }
                    Err(ScoreError::GameOver) => break,
                };
                prop_assert!(pins <= 10);
                prop_assert!(book.total() >= last_total);
                last_total = book.total();
                if book.current_frame_is_finished() {
                    book.advance_frame();
                }
            }

            for (idx, frame) in book.frames().iter().enumerate() {
                let limit = if idx == 9 { 3 } else { 2 };
                prop_assert!(frame.shots().len() <= limit);
                if idx < 9 && frame.is_closed() {
                    prop_assert!(frame.frame_total() <= 30);
                }
                if idx < 9 && !frame.is_strike() && frame.shots().len() == 2 {
                    prop_assert!(frame.shots()[0] + frame.shots()[1] <= 10);
                }
            }
        }
    }
}
