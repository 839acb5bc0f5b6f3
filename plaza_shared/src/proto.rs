//! Protocol types.
//!
//! Goals:
//! - Provide the intent and event message types exchanged with the remote
//!   source.
//! - Keep serialization explicit and versionable.
//!
//! Transport framing and the connection lifecycle are owned by the
//! embedding connection layer; this module only defines the payloads it
//! carries.

use std::collections::BTreeMap;

use anyhow::Context;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Protocol version for compatibility checks.
pub const PROTOCOL_VERSION: u32 = 1;

/// Identifies a player for the lifetime of its connection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PlayerId(pub u32);

/// World-facing of an avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    North,
    #[default]
    South,
    East,
    West,
}

/// Screen-relative movement token carried by `Move` intents.
///
/// Distinct from [`Facing`]: intents speak screen directions, entity state
/// speaks compass directions. The mapping lives at the client boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The facing an avatar presents while moving this way on screen.
    pub fn facing(self) -> Facing {
        match self {
            Direction::Up => Facing::North,
            Direction::Down => Facing::South,
            Direction::Left => Facing::West,
            Direction::Right => Facing::East,
        }
    }
}

/// Authoritative state for one player, as last reported by the remote
/// source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub pos: Vec2,
    pub facing: Facing,
    pub moving: bool,
    pub name: String,
    /// Key into the visual-set table.
    pub sprite_set: String,
}

impl Player {
    /// Builds a full record from a partial one, defaulting absent fields.
    pub fn from_patch(id: PlayerId, patch: &PlayerPatch) -> Self {
        Self {
            id,
            pos: patch.pos.unwrap_or(Vec2::ZERO),
            facing: patch.facing.unwrap_or_default(),
            moving: patch.moving.unwrap_or(false),
            name: patch.name.clone().unwrap_or_default(),
            sprite_set: patch.sprite_set.clone().unwrap_or_default(),
        }
    }

    /// Merges a partial update in place. Absent fields keep their value.
    pub fn apply(&mut self, patch: &PlayerPatch) {
        if let Some(pos) = patch.pos {
            self.pos = pos;
        }
        if let Some(facing) = patch.facing {
            self.facing = facing;
        }
        if let Some(moving) = patch.moving {
            self.moving = moving;
        }
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(sprite_set) = &patch.sprite_set {
            self.sprite_set = sprite_set.clone();
        }
    }
}

/// Partial-or-full player fields carried by batch updates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PlayerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<Vec2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facing: Option<Facing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moving: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite_set: Option<String>,
}

impl PlayerPatch {
    /// Patch carrying only movement fields, the common batch payload.
    pub fn movement(pos: Vec2, facing: Facing, moving: bool) -> Self {
        Self {
            pos: Some(pos),
            facing: Some(facing),
            moving: Some(moving),
            ..Self::default()
        }
    }
}

/// Visual-set record: named frame sources per facing.
///
/// `west` may be empty; the draw path then mirrors the east frames.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpriteSheet {
    pub id: String,
    pub north: Vec<String>,
    pub south: Vec<String>,
    pub east: Vec<String>,
    #[serde(default)]
    pub west: Vec<String>,
}

/// Client → remote source intent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClientIntent {
    /// Sent once after channel establishment.
    Join { name: String },
    /// Desired movement; re-sent on every input transition.
    Move { dir: Direction },
    Stop,
}

/// Remote source → client event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Answer to `Join`. On success carries the local id, the full player
    /// set, and the full visual-set table.
    JoinResult {
        ok: bool,
        #[serde(default)]
        player_id: Option<PlayerId>,
        #[serde(default)]
        players: Vec<Player>,
        #[serde(default)]
        sprite_sets: Vec<SpriteSheet>,
        #[serde(default)]
        error: Option<String>,
    },
    PeerJoined {
        player: Player,
        sprite_set: SpriteSheet,
    },
    BatchUpdate {
        updates: BTreeMap<PlayerId, PlayerPatch>,
    },
    PeerLeft {
        player_id: PlayerId,
    },
    /// Any kind this build does not recognize.
    #[serde(other)]
    Unknown,
}

/// Convenience codec helpers for the connection layer.
pub fn encode_intent(intent: &ClientIntent) -> anyhow::Result<Bytes> {
    let payload = serde_json::to_vec(intent).context("serialize intent")?;
    Ok(Bytes::from(payload))
}

pub fn decode_intent(b: &[u8]) -> anyhow::Result<ClientIntent> {
    serde_json::from_slice(b).context("deserialize intent")
}

pub fn encode_event(event: &ServerEvent) -> anyhow::Result<Bytes> {
    let payload = serde_json::to_vec(event).context("serialize event")?;
    Ok(Bytes::from(payload))
}

pub fn decode_event(b: &[u8]) -> anyhow::Result<ServerEvent> {
    serde_json::from_slice(b).context("deserialize event")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_roundtrip_bytes() {
        let intent = ClientIntent::Move {
            dir: Direction::Left,
        };
        let bytes = encode_intent(&intent).unwrap();
        let back = decode_intent(&bytes).unwrap();
        assert_eq!(intent, back);
    }

    #[test]
    fn event_roundtrip_bytes() {
        let mut updates = BTreeMap::new();
        updates.insert(
            PlayerId(7),
            PlayerPatch::movement(Vec2::new(3.0, 4.0), Facing::East, true),
        );
        let event = ServerEvent::BatchUpdate { updates };
        let bytes = encode_event(&event).unwrap();
        let back = decode_event(&bytes).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn unrecognized_kind_decodes_to_unknown() {
        let event = decode_event(br#"{"kind":"weather_report","rain":true}"#).unwrap();
        assert_eq!(event, ServerEvent::Unknown);
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(decode_event(b"{not json").is_err());
    }

    #[test]
    fn patch_merge_keeps_absent_fields() {
        let mut player = Player {
            id: PlayerId(1),
            pos: Vec2::new(10.0, 20.0),
            facing: Facing::North,
            moving: false,
            name: "Ada".to_string(),
            sprite_set: "warrior".to_string(),
        };
        player.apply(&PlayerPatch::movement(Vec2::new(11.0, 20.0), Facing::East, true));
        assert_eq!(player.pos, Vec2::new(11.0, 20.0));
        assert_eq!(player.facing, Facing::East);
        assert!(player.moving);
        assert_eq!(player.name, "Ada");
        assert_eq!(player.sprite_set, "warrior");
    }

    #[test]
    fn patch_builds_full_record_with_defaults() {
        let patch = PlayerPatch {
            pos: Some(Vec2::new(1.0, 2.0)),
            ..PlayerPatch::default()
        };
        let player = Player::from_patch(PlayerId(9), &patch);
        assert_eq!(player.facing, Facing::South);
        assert!(!player.moving);
        assert!(player.name.is_empty());
        assert!(player.sprite_set.is_empty());
    }
}
