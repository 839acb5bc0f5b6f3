//! Input intent tracking.
//!
//! Raw key transitions come from the embedder; this module reduces them to
//! a single active direction with most-recent-wins tie-breaking and emits
//! move/stop intents through the channel boundary. It also hosts the
//! transient jump gesture, which is purely cosmetic and never transmitted.

use std::f32::consts::PI;

use plaza_shared::channel::IntentSink;
use plaza_shared::proto::{ClientIntent, Direction};

/// Cosmetic hop applied to the local avatar's draw position.
#[derive(Debug, Clone, Copy)]
pub struct JumpGesture {
    elapsed_ms: f32,
    duration_ms: f32,
    peak: f32,
}

impl JumpGesture {
    /// Vertical draw offset, a half-sine peaking at the midpoint.
    pub fn offset(&self) -> f32 {
        (PI * self.elapsed_ms / self.duration_ms).sin() * self.peak
    }
}

/// Held-direction state machine.
///
/// `held` is ordered most-recent-first; n is bounded by 4, one per
/// direction, so a plain Vec is fine.
#[derive(Default)]
pub struct InputTracker {
    held: Vec<Direction>,
    jump: Option<JumpGesture>,
}

impl InputTracker {
    /// The direction movement currently follows, if any.
    pub fn active(&self) -> Option<Direction> {
        self.held.first().copied()
    }

    /// Key press. Repeat presses of a held direction re-emit the same
    /// intent; the remote source may rely on the refresh.
    pub fn press(&mut self, dir: Direction, sink: &mut dyn IntentSink) -> Option<Direction> {
        if !self.held.contains(&dir) {
            self.held.insert(0, dir);
        }
        sink.try_send(ClientIntent::Move { dir });
        self.active()
    }

    /// Key release. Releasing the active direction resumes whichever held
    /// direction was pressed most recently; releasing any other held key
    /// changes nothing and emits nothing.
    pub fn release(&mut self, dir: Direction, sink: &mut dyn IntentSink) -> Option<Direction> {
        let Some(at) = self.held.iter().position(|&d| d == dir) else {
            return self.active();
        };
        let was_active = at == 0;
        self.held.remove(at);

        match self.active() {
            None => {
                sink.try_send(ClientIntent::Stop);
                None
            }
            Some(front) if was_active => {
                sink.try_send(ClientIntent::Move { dir: front });
                Some(front)
            }
            front => front,
        }
    }

    /// Input focus left the surface: as if every held key was released at
    /// once.
    pub fn focus_lost(&mut self, sink: &mut dyn IntentSink) {
        if self.held.is_empty() {
            return;
        }
        self.held.clear();
        sink.try_send(ClientIntent::Stop);
    }

    /// Starts the jump gesture unless one is already in progress.
    pub fn start_jump(&mut self, duration_ms: f32, peak: f32) {
        if self.jump.is_none() {
            self.jump = Some(JumpGesture {
                elapsed_ms: 0.0,
                duration_ms,
                peak,
            });
        }
    }

    /// Advances the jump gesture and clears it once its duration elapses.
    pub fn advance_jump(&mut self, dt_ms: f32) {
        if let Some(jump) = &mut self.jump {
            jump.elapsed_ms += dt_ms;
            if jump.elapsed_ms >= jump.duration_ms {
                self.jump = None;
            }
        }
    }

    /// Current vertical draw offset for the local avatar.
    pub fn jump_offset(&self) -> f32 {
        self.jump.as_ref().map(JumpGesture::offset).unwrap_or(0.0)
    }

    pub fn jumping(&self) -> bool {
        self.jump.is_some()
    }
}
