//! Client implementation.
//!
//! The client maintains:
//! - The authoritative player registry (last-known remote truth)
//! - Smoothed render states and walk-cycle animation
//! - Camera framing over the local player
//! - Held-direction input state and the outbound intent sink
//! - The memoized sprite cache
//!
//! Inbound events and frame ticks interleave on one task; every handler
//! runs to completion, so shared state is never observed mid-update.

use std::time::Instant;

use anyhow::bail;
use tracing::{debug, info, warn};

use plaza_shared::channel::IntentSink;
use plaza_shared::config::ClientConfig;
use plaza_shared::math::Vec2;
use plaza_shared::proto::{ClientIntent, Direction, PlayerId, ServerEvent};
use plaza_shared::render::DrawSurface;
use plaza_shared::sprite::SpriteDecoder;

use crate::assets::SpriteCache;
use crate::camera::Camera;
use crate::input::InputTracker;
use crate::interp::{Interpolator, RenderState};
use crate::registry::{Registry, Upsert};

/// The client core: one mirror of remote state plus everything derived
/// from it for presentation.
pub struct Client {
    cfg: ClientConfig,
    local_id: Option<PlayerId>,
    registry: Registry,
    interp: Interpolator,
    camera: Camera,
    input: InputTracker,
    sprites: SpriteCache,
    sink: Box<dyn IntentSink>,
    last_tick: Option<Instant>,
}

impl Client {
    pub fn new(
        cfg: ClientConfig,
        sink: Box<dyn IntentSink>,
        decoder: Box<dyn SpriteDecoder>,
    ) -> Self {
        Self {
            cfg,
            local_id: None,
            registry: Registry::default(),
            interp: Interpolator::default(),
            camera: Camera::default(),
            input: InputTracker::default(),
            sprites: SpriteCache::new(decoder),
            sink,
            last_tick: None,
        }
    }

    /// Sends the join intent with the configured display name.
    ///
    /// Best-effort like every send: a closed channel drops it.
    pub fn join(&mut self) {
        let name = self.cfg.player_name.clone();
        self.sink.try_send(ClientIntent::Join { name });
    }

    // ─── Message reconciliation ───

    /// Applies one inbound event to the mirror.
    ///
    /// Errors are recoverable and leave state untouched; reconciliation
    /// never tears down the channel.
    pub fn handle_event(&mut self, event: ServerEvent) -> anyhow::Result<()> {
        match event {
            ServerEvent::JoinResult {
                ok: true,
                player_id,
                players,
                sprite_sets,
                ..
            } => {
                let Some(local) = player_id else {
                    bail!("join accepted without a player id");
                };

                self.registry.replace_all(players);
                self.interp.clear();
                for (id, player) in self.registry.iter() {
                    self.interp.seed(id, player.pos);
                }
                for sheet in sprite_sets {
                    let sid = sheet.id.clone();
                    self.sprites.register(sheet);
                    self.sprites.resolve(&sid);
                }
                self.local_id = Some(local);

                // Recenter now so the first frame has no interpolation lag.
                let (viewport, world) = self.extents();
                if let Some(player) = self.registry.get(local) {
                    self.camera.recenter(player.pos, viewport, world);
                }

                info!(player_id = ?local, players = self.registry.len(), "joined");
                Ok(())
            }
            ServerEvent::JoinResult { ok: false, error, .. } => {
                bail!("join rejected: {}", error.unwrap_or_else(|| "no reason given".into()))
            }
            ServerEvent::PeerJoined { player, sprite_set } => {
                debug!(player_id = ?player.id, name = %player.name, "peer joined");
                let sid = sprite_set.id.clone();
                self.sprites.register(sprite_set);
                self.sprites.resolve(&sid);
                self.interp.seed(player.id, player.pos);
                self.registry.insert(player);
                Ok(())
            }
            ServerEvent::BatchUpdate { updates } => {
                for (id, patch) in &updates {
                    if self.registry.upsert(*id, patch) == Upsert::Inserted {
                        // First sighting through a batch: same as a join,
                        // minus asset registration. The sprite set binds at
                        // draw time once a sheet shows up.
                        self.interp.seed(*id, patch.pos.unwrap_or(Vec2::ZERO));
                    }
                }
                Ok(())
            }
            ServerEvent::PeerLeft { player_id } => {
                self.registry.remove(player_id);
                self.interp.remove(player_id);
                debug!(player_id = ?player_id, "peer left");
                Ok(())
            }
            ServerEvent::Unknown => {
                warn!("unrecognized event kind");
                Ok(())
            }
        }
    }

    // ─── Input ───

    pub fn key_down(&mut self, dir: Direction) {
        let active = self.input.press(dir, self.sink.as_mut());
        self.apply_local_presentation(active);
    }

    pub fn key_up(&mut self, dir: Direction) {
        let active = self.input.release(dir, self.sink.as_mut());
        self.apply_local_presentation(active);
    }

    pub fn focus_lost(&mut self) {
        self.input.focus_lost(self.sink.as_mut());
        self.apply_local_presentation(self.input.active());
    }

    pub fn jump_pressed(&mut self) {
        self.input.start_jump(self.cfg.jump_ms, self.cfg.jump_peak);
    }

    /// Zero-latency feedback: the local avatar turns and walks before any
    /// round-trip confirms it. The next authoritative update wins.
    fn apply_local_presentation(&mut self, active: Option<Direction>) {
        let Some(id) = self.local_id else { return };
        let Some(player) = self.registry.get_mut(id) else { return };
        match active {
            Some(dir) => {
                player.facing = dir.facing();
                player.moving = true;
            }
            None => player.moving = false,
        }
    }

    // ─── Frame driver ───

    /// Advances one presentation frame from wall-clock time.
    pub fn frame(&mut self, now: Instant, surface: &mut dyn DrawSurface) {
        let dt_ms = match self.last_tick {
            Some(prev) => now.saturating_duration_since(prev).as_secs_f32() * 1000.0,
            None => 0.0,
        };
        self.last_tick = Some(now);
        self.tick(dt_ms, surface);
    }

    /// Advances one presentation frame by an explicit elapsed time.
    ///
    /// Never fails: a skipped entity is skipped quietly and the loop keeps
    /// ticking.
    pub fn tick(&mut self, dt_ms: f32, surface: &mut dyn DrawSurface) {
        let dt_ms = dt_ms.max(0.0);
        let (viewport, world) = self.extents();

        for (id, player) in self.registry.iter() {
            self.interp.advance(
                id,
                player.pos,
                player.moving,
                dt_ms,
                self.cfg.smoothing_rate,
                self.cfg.walk_frame_ms,
            );
        }

        // Camera follows the smoothed position, not the raw authoritative
        // one: snapshot arrival must not kick the viewport.
        if let Some(id) = self.local_id {
            if let Some(state) = self.interp.get(id) {
                self.camera.recenter(state.pos, viewport, world);
            }
        }

        surface.draw_background(self.camera.offset);

        let margin = Vec2::new(self.cfg.avatar_w, self.cfg.avatar_h);
        let min = self.camera.offset - margin;
        let max = self.camera.offset + viewport + margin;
        let in_view = |p: Vec2| p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y;

        for (id, player) in self.registry.iter() {
            let Some(state) = self.interp.get(id) else { continue };
            if !in_view(state.pos) {
                continue;
            }
            let Some(frames) = self.sprites.frames(&player.sprite_set) else {
                continue;
            };
            let Some((facing_frames, mirrored)) = frames.facing_frames(player.facing) else {
                continue;
            };
            let handle = facing_frames[state.frame % facing_frames.len()];

            let mut screen = self.camera.world_to_screen(state.pos);
            if Some(id) == self.local_id {
                screen.y -= self.input.jump_offset();
            }
            surface.draw_sprite(handle, player.facing, mirrored, screen);
        }

        for (id, player) in self.registry.iter() {
            if player.name.is_empty() {
                continue;
            }
            let Some(state) = self.interp.get(id) else { continue };
            if !in_view(state.pos) {
                continue;
            }
            let mut screen = self.camera.world_to_screen(state.pos);
            screen.y -= self.cfg.avatar_h;
            surface.draw_label(&player.name, screen);
        }

        self.input.advance_jump(dt_ms);
    }

    fn extents(&self) -> (Vec2, Vec2) {
        (
            Vec2::new(self.cfg.viewport_w, self.cfg.viewport_h),
            Vec2::new(self.cfg.world_w, self.cfg.world_h),
        )
    }

    // ─── Accessors ───

    pub fn config(&self) -> &ClientConfig {
        &self.cfg
    }

    pub fn local_id(&self) -> Option<PlayerId> {
        self.local_id
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn render_state(&self, id: PlayerId) -> Option<&RenderState> {
        self.interp.get(id)
    }

    pub fn render_states(&self) -> usize {
        self.interp.len()
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn active_direction(&self) -> Option<Direction> {
        self.input.active()
    }
}
