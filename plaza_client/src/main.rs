//! Standalone demo client.
//!
//! Usage:
//!   cargo run -p plaza_client -- [--name Ada] [--seconds 5] [--config cfg.json]
//!
//! The transport is out of scope for this workspace, so a scripted feed
//! stands in for the connection: it delivers a join snapshot, wanders two
//! peers around, adds a late joiner, and removes one. The loop drives the
//! full reconcile → interpolate → draw path headlessly and logs a status
//! line once a second.

use std::env;
use std::time::{Duration, Instant};

use rand::Rng;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use plaza_client::Client;
use plaza_shared::channel::MpscSink;
use plaza_shared::config::ClientConfig;
use plaza_shared::math::Vec2;
use plaza_shared::proto::{Facing, Player, PlayerId, PlayerPatch, ServerEvent, SpriteSheet};
use plaza_shared::render::DrawSurface;
use plaza_shared::sprite::{FlatDecoder, SpriteHandle};

fn parse_args() -> (ClientConfig, u64) {
    let mut cfg = ClientConfig::default();
    let mut seconds = 5;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--name" if i + 1 < args.len() => {
                cfg.player_name = args[i + 1].clone();
                i += 2;
            }
            "--seconds" if i + 1 < args.len() => {
                seconds = args[i + 1].parse().unwrap_or(seconds);
                i += 2;
            }
            "--config" if i + 1 < args.len() => {
                match std::fs::read_to_string(&args[i + 1]) {
                    Ok(text) => match ClientConfig::from_json_str(&text) {
                        Ok(parsed) => cfg = parsed,
                        Err(e) => warn!(error = %e, "bad config file, using defaults"),
                    },
                    Err(e) => warn!(error = %e, "unreadable config file, using defaults"),
                }
                i += 2;
            }
            _ => i += 1,
        }
    }
    (cfg, seconds)
}

/// Surface that counts draw calls per frame for the status line.
#[derive(Default)]
struct CountingSurface {
    sprites: usize,
    labels: usize,
}

impl CountingSurface {
    fn reset(&mut self) {
        self.sprites = 0;
        self.labels = 0;
    }
}

impl DrawSurface for CountingSurface {
    fn draw_background(&mut self, _offset: Vec2) {}
    fn draw_sprite(&mut self, _frame: SpriteHandle, _facing: Facing, _mirrored: bool, _screen: Vec2) {
        self.sprites += 1;
    }
    fn draw_label(&mut self, _text: &str, _screen: Vec2) {
        self.labels += 1;
    }
}

fn walker_sheet() -> SpriteSheet {
    SpriteSheet {
        id: "walker".to_string(),
        north: vec!["walker_n0".into(), "walker_n1".into(), "walker_n2".into()],
        south: vec!["walker_s0".into(), "walker_s1".into(), "walker_s2".into()],
        east: vec!["walker_e0".into(), "walker_e1".into(), "walker_e2".into()],
        west: Vec::new(),
    }
}

fn peer(id: u32, name: &str, x: f32, y: f32) -> Player {
    Player {
        id: PlayerId(id),
        pos: Vec2::new(x, y),
        facing: Facing::South,
        moving: false,
        name: name.to_string(),
        sprite_set: "walker".to_string(),
    }
}

/// Scripted stand-in for the connection layer.
async fn run_feed(tx: mpsc::UnboundedSender<ServerEvent>, name: String) {
    let _ = tx.send(ServerEvent::JoinResult {
        ok: true,
        player_id: Some(PlayerId(1)),
        players: vec![
            peer(1, &name, 1000.0, 1000.0),
            peer(2, "Brin", 900.0, 1040.0),
            peer(3, "Cato", 1100.0, 960.0),
        ],
        sprite_sets: vec![walker_sheet()],
        error: None,
    });

    let mut positions = [(900.0f32, 1040.0f32), (1100.0, 960.0)];
    for round in 0u32.. {
        tokio::time::sleep(Duration::from_millis(200)).await;

        // ThreadRng must not live across an await point.
        let mut rng = rand::thread_rng();
        let mut updates = std::collections::BTreeMap::new();
        for (i, (x, y)) in positions.iter_mut().enumerate() {
            *x += rng.gen_range(-20.0..20.0);
            *y += rng.gen_range(-20.0..20.0);
            let facing = if rng.gen_bool(0.5) { Facing::East } else { Facing::West };
            updates.insert(
                PlayerId(2 + i as u32),
                PlayerPatch::movement(Vec2::new(*x, *y), facing, true),
            );
        }
        if tx
            .send(ServerEvent::BatchUpdate { updates })
            .is_err()
        {
            return;
        }

        if round == 5 {
            let _ = tx.send(ServerEvent::PeerJoined {
                player: peer(4, "Dara", 1020.0, 1100.0),
                sprite_set: walker_sheet(),
            });
        }
        if round == 12 {
            let _ = tx.send(ServerEvent::PeerLeft {
                player_id: PlayerId(3),
            });
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let (cfg, seconds) = parse_args();
    info!(name = %cfg.player_name, seconds, "Starting demo client");

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (intent_tx, mut intent_rx) = mpsc::unbounded_channel();

    let mut client = Client::new(
        cfg.clone(),
        Box::new(MpscSink::new(intent_tx)),
        Box::<FlatDecoder>::default(),
    );
    client.join();

    tokio::spawn(run_feed(event_tx, cfg.player_name.clone()));

    // The connection layer would forward these to the remote source.
    tokio::spawn(async move {
        while let Some(intent) = intent_rx.recv().await {
            debug!(?intent, "outbound intent");
        }
    });

    let mut surface = CountingSurface::default();
    let mut interval = tokio::time::interval(Duration::from_millis(16));
    let started = Instant::now();
    let mut last_status = Instant::now();
    let mut pressed = false;
    let mut feed_open = true;

    while started.elapsed().as_secs() < seconds {
        tokio::select! {
            event = event_rx.recv(), if feed_open => {
                match event {
                    Some(event) => {
                        if let Err(e) = client.handle_event(event) {
                            warn!(error = %e, "event rejected");
                        }
                    }
                    // Feed gone: keep ticking on last-known state.
                    None => feed_open = false,
                }
            }
            _ = interval.tick() => {
                surface.reset();
                client.frame(Instant::now(), &mut surface);

                // Exercise local input once the mirror is live.
                if !pressed && client.local_id().is_some() && started.elapsed().as_secs() >= 1 {
                    client.key_down(plaza_shared::proto::Direction::Right);
                    client.jump_pressed();
                    pressed = true;
                }

                if last_status.elapsed().as_secs() >= 1 {
                    last_status = Instant::now();
                    let offset = client.camera().offset;
                    info!(
                        players = client.registry().len(),
                        sprites = surface.sprites,
                        labels = surface.labels,
                        offset_x = offset.x,
                        offset_y = offset.y,
                        "frame"
                    );
                }
            }
        }
    }

    info!("Demo finished");
    Ok(())
}
