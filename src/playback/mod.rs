//! Headless playback cursor over a produced step sequence.
//!
//! The step sequence is immutable; this is the only mutable state a hosting
//! layer needs. The index is always clamped to `[0, len - 1]`, never wrapped.
//!
//! ```text
//! interval_ms = 1001 - speed        speed ∈ [100, 980]
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Slowest speed setting.
pub const MIN_SPEED: u32 = 100;
/// Fastest speed setting.
pub const MAX_SPEED: u32 = 980;
/// Initial speed setting.
pub const DEFAULT_SPEED: u32 = 800;

/// Cursor state for stepping or playing through a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playback {
    len: usize,
    index: usize,
    playing: bool,
    speed: u32,
}

impl Playback {
    /// Cursor at step 0 of a sequence of `len` steps, paused.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self {
            len,
            index: 0,
            playing: false,
            speed: DEFAULT_SPEED,
        }
    }

    /// Current step index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of steps in the sequence.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the sequence has no steps.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether playback is running.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether the cursor sits on the last step.
    #[must_use]
    pub const fn at_end(&self) -> bool {
        self.index == self.last_index()
    }

    /// Current speed setting.
    #[must_use]
    pub const fn speed(&self) -> u32 {
        self.speed
    }

    /// Time between automatic steps while playing.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(u64::from(1001_u32.saturating_sub(self.speed)))
    }

    /// Set the speed, clamped to `[MIN_SPEED, MAX_SPEED]`.
    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Move one step forward, stopping at the last step.
    pub fn step_forward(&mut self) {
        self.index = (self.index + 1).min(self.last_index());
    }

    /// Move one step back, stopping at step 0.
    pub fn step_backward(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Jump to `index`, clamped into range.
    pub fn seek(&mut self, index: usize) {
        self.index = index.min(self.last_index());
    }

    /// Start playing. Does nothing at the last step.
    pub fn play(&mut self) {
        self.playing = !self.at_end();
    }

    /// Stop playing.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Toggle between playing and paused.
    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Return to step 0 and pause, for a freshly generated sequence of `len`
    /// steps. Speed is kept.
    pub fn reset(&mut self, len: usize) {
        debug!(len, "playback reset");
        self.len = len;
        self.index = 0;
        self.playing = false;
    }

    /// Timer callback: advance while playing and pause on reaching the end.
    ///
    /// Returns `true` if the index moved.
    pub fn tick(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        if self.at_end() {
            self.playing = false;
            return false;
        }
        self.index += 1;
        if self.at_end() {
            self.playing = false;
        }
        true
    }

    const fn last_index(&self) -> usize {
        self.len.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cursor() {
        let p = Playback::new(10);
        assert_eq!(p.index(), 0);
        assert_eq!(p.len(), 10);
        assert!(!p.is_playing());
        assert_eq!(p.speed(), DEFAULT_SPEED);
    }

    #[test]
    fn test_step_forward_clamps_at_end() {
        let mut p = Playback::new(3);
        p.step_forward();
        p.step_forward();
        p.step_forward();
        assert_eq!(p.index(), 2);
        assert!(p.at_end());
    }

    #[test]
    fn test_step_backward_clamps_at_start() {
        let mut p = Playback::new(3);
        p.step_backward();
        assert_eq!(p.index(), 0);
    }

    #[test]
    fn test_seek_clamps() {
        let mut p = Playback::new(5);
        p.seek(3);
        assert_eq!(p.index(), 3);
        p.seek(100);
        assert_eq!(p.index(), 4);
    }

    #[test]
    fn test_empty_sequence_is_safe() {
        let mut p = Playback::new(0);
        assert!(p.is_empty());
        p.step_forward();
        p.seek(9);
        assert_eq!(p.index(), 0);
        p.play();
        assert!(!p.is_playing());
        assert!(!p.tick());
    }

    #[test]
    fn test_play_until_end_then_auto_pause() {
        let mut p = Playback::new(3);
        p.play();
        assert!(p.tick());
        assert!(p.is_playing());
        assert!(p.tick());
        assert!(!p.is_playing());
        assert!(!p.tick());
        assert_eq!(p.index(), 2);
    }

    #[test]
    fn test_tick_while_paused_does_nothing() {
        let mut p = Playback::new(3);
        assert!(!p.tick());
        assert_eq!(p.index(), 0);
    }

    #[test]
    fn test_toggle() {
        let mut p = Playback::new(3);
        p.toggle();
        assert!(p.is_playing());
        p.toggle();
        assert!(!p.is_playing());
    }

    #[test]
    fn test_play_at_end_stays_paused() {
        let mut p = Playback::new(3);
        p.seek(2);
        p.play();
        assert!(!p.is_playing());
    }

    #[test]
    fn test_reset_keeps_speed() {
        let mut p = Playback::new(3);
        p.set_speed(400);
        p.seek(2);
        p.play();
        p.reset(7);
        assert_eq!(p.index(), 0);
        assert_eq!(p.len(), 7);
        assert!(!p.is_playing());
        assert_eq!(p.speed(), 400);
    }

    #[test]
    fn test_speed_interval() {
        let mut p = Playback::new(1);
        assert_eq!(p.interval(), Duration::from_millis(201));
        p.set_speed(5000);
        assert_eq!(p.speed(), MAX_SPEED);
        assert_eq!(p.interval(), Duration::from_millis(21));
        p.set_speed(0);
        assert_eq!(p.speed(), MIN_SPEED);
        assert_eq!(p.interval(), Duration::from_millis(901));
    }
}
