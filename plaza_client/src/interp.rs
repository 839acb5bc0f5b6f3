//! Render-state interpolation.
//!
//! The remote source reports positions at its own cadence; the client
//! renders at the display's. Each player carries a smoothed position that
//! converges on the authoritative one, plus a walk-cycle cursor driven by
//! elapsed time. Smoothed state is presentation only and is never sent
//! outbound.

use std::collections::BTreeMap;

use plaza_shared::math::Vec2;
use plaza_shared::proto::PlayerId;

/// Walk animation cycle length.
pub const WALK_CYCLE: usize = 3;

/// Presentation copy of one player's state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    /// Smoothed world position; seeded equal to the authoritative one so
    /// a new entity never visibly teleports in.
    pub pos: Vec2,
    /// Elapsed milliseconds within the current walk frame.
    pub anim_ms: f32,
    /// Walk-cycle frame cursor; 0 is the idle pose.
    pub frame: usize,
}

impl RenderState {
    pub fn seeded(pos: Vec2) -> Self {
        Self {
            pos,
            anim_ms: 0.0,
            frame: 0,
        }
    }
}

/// Per-player render states, keyed in lockstep with the registry.
#[derive(Default)]
pub struct Interpolator {
    states: BTreeMap<PlayerId, RenderState>,
}

impl Interpolator {
    /// Seeds (or re-seeds) a state at an authoritative position.
    pub fn seed(&mut self, id: PlayerId, pos: Vec2) {
        self.states.insert(id, RenderState::seeded(pos));
    }

    pub fn remove(&mut self, id: PlayerId) {
        self.states.remove(&id);
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    pub fn get(&self, id: PlayerId) -> Option<&RenderState> {
        self.states.get(&id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Advances one player's smoothing and animation by `dt_ms`.
    ///
    /// Creates a seeded state if none exists yet. The convergence step is
    /// `smoothed += (authoritative - smoothed) * min(1, dt * rate)`; the
    /// clamp keeps a large `dt` (e.g. after the app was backgrounded) from
    /// overshooting the target.
    pub fn advance(
        &mut self,
        id: PlayerId,
        authoritative: Vec2,
        moving: bool,
        dt_ms: f32,
        smoothing_rate: f32,
        walk_frame_ms: f32,
    ) {
        let state = self
            .states
            .entry(id)
            .or_insert_with(|| RenderState::seeded(authoritative));

        let t = (dt_ms / 1000.0 * smoothing_rate).min(1.0);
        state.pos = state.pos.lerp(authoritative, t);

        if moving {
            state.anim_ms += dt_ms;
            while state.anim_ms >= walk_frame_ms {
                state.anim_ms -= walk_frame_ms;
                state.frame = (state.frame + 1) % WALK_CYCLE;
            }
        } else {
            state.anim_ms = 0.0;
            state.frame = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: f32 = 10.0;
    const FRAME_MS: f32 = 120.0;

    #[test]
    fn missing_state_is_seeded_at_authoritative() {
        let mut interp = Interpolator::default();
        interp.advance(PlayerId(1), Vec2::new(100.0, 100.0), false, 16.0, RATE, FRAME_MS);
        // first sighting snaps, so a tick later it is already at target
        assert_eq!(interp.get(PlayerId(1)).unwrap().pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn convergence_strictly_shrinks_distance() {
        let mut interp = Interpolator::default();
        interp.seed(PlayerId(1), Vec2::new(0.0, 0.0));
        let target = Vec2::new(100.0, 0.0);

        let mut last = f32::MAX;
        for _ in 0..50 {
            interp.advance(PlayerId(1), target, true, 16.0, RATE, FRAME_MS);
            let d = interp.get(PlayerId(1)).unwrap().pos.dist_sq(target);
            assert!(d < last);
            last = d;
        }
        // asymptotic: close, but never snapped exactly
        assert!(last > 0.0);
        assert!(last < 1.0);
    }

    #[test]
    fn large_dt_does_not_overshoot() {
        let mut interp = Interpolator::default();
        interp.seed(PlayerId(1), Vec2::new(0.0, 0.0));
        // 10s of backgrounded time: t clamps to 1 and lands exactly
        interp.advance(PlayerId(1), Vec2::new(100.0, 40.0), false, 10_000.0, RATE, FRAME_MS);
        assert_eq!(interp.get(PlayerId(1)).unwrap().pos, Vec2::new(100.0, 40.0));
    }

    #[test]
    fn walk_cycle_sequences_through_three_frames() {
        let mut interp = Interpolator::default();
        let here = Vec2::new(0.0, 0.0);
        interp.seed(PlayerId(1), here);

        let mut seen = Vec::new();
        for _ in 0..6 {
            interp.advance(PlayerId(1), here, true, FRAME_MS, RATE, FRAME_MS);
            seen.push(interp.get(PlayerId(1)).unwrap().frame);
        }
        assert_eq!(seen, vec![1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn accumulator_carries_remainder_across_frames() {
        let mut interp = Interpolator::default();
        let here = Vec2::new(0.0, 0.0);
        interp.seed(PlayerId(1), here);

        interp.advance(PlayerId(1), here, true, FRAME_MS * 2.5, RATE, FRAME_MS);
        let state = interp.get(PlayerId(1)).unwrap();
        assert_eq!(state.frame, 2);
        assert!((state.anim_ms - FRAME_MS * 0.5).abs() < 1e-3);
    }

    #[test]
    fn idle_resets_animation_immediately() {
        let mut interp = Interpolator::default();
        let here = Vec2::new(0.0, 0.0);
        interp.seed(PlayerId(1), here);
        interp.advance(PlayerId(1), here, true, FRAME_MS * 1.5, RATE, FRAME_MS);
        assert_ne!(interp.get(PlayerId(1)).unwrap().frame, 0);

        interp.advance(PlayerId(1), here, false, 1.0, RATE, FRAME_MS);
        let state = interp.get(PlayerId(1)).unwrap();
        assert_eq!(state.frame, 0);
        assert_eq!(state.anim_ms, 0.0);
    }
}
