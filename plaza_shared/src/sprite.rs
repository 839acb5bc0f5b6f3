//! Sprite handles and the asset decoding boundary.
//!
//! Image decoding belongs to the embedder. The core only ever sees opaque
//! handles, grouped per facing into a [`FrameSet`].

use crate::proto::{Facing, SpriteSheet};

/// Opaque drawable handle issued by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteHandle(pub u64);

/// Resolved per-facing frame handles for one visual set.
#[derive(Debug, Clone, Default)]
pub struct FrameSet {
    pub north: Vec<SpriteHandle>,
    pub south: Vec<SpriteHandle>,
    pub east: Vec<SpriteHandle>,
    /// May be empty; the draw path then mirrors `east`.
    pub west: Vec<SpriteHandle>,
}

impl FrameSet {
    /// Frames to draw for a facing, with a mirror flag.
    ///
    /// West with no explicit frames falls back to horizontally-mirrored
    /// east frames. Returns `None` when nothing is drawable.
    pub fn facing_frames(&self, facing: Facing) -> Option<(&[SpriteHandle], bool)> {
        let (frames, mirrored) = match facing {
            Facing::North => (&self.north, false),
            Facing::South => (&self.south, false),
            Facing::East => (&self.east, false),
            Facing::West if self.west.is_empty() => (&self.east, true),
            Facing::West => (&self.west, false),
        };
        if frames.is_empty() {
            None
        } else {
            Some((frames.as_slice(), mirrored))
        }
    }
}

/// Decodes a visual-set record into drawable handles.
pub trait SpriteDecoder: Send {
    fn decode(&mut self, sheet: &SpriteSheet) -> anyhow::Result<FrameSet>;
}

/// Decoder that synthesizes handles without any pixel IO.
///
/// Every listed frame source gets a fresh sequential handle. Useful for
/// headless runs and tests.
#[derive(Default)]
pub struct FlatDecoder {
    next: u64,
}

impl FlatDecoder {
    fn take(&mut self, n: usize) -> Vec<SpriteHandle> {
        (0..n)
            .map(|_| {
                let h = SpriteHandle(self.next);
                self.next += 1;
                h
            })
            .collect()
    }
}

impl SpriteDecoder for FlatDecoder {
    fn decode(&mut self, sheet: &SpriteSheet) -> anyhow::Result<FrameSet> {
        Ok(FrameSet {
            north: self.take(sheet.north.len()),
            south: self.take(sheet.south.len()),
            east: self.take(sheet.east.len()),
            west: self.take(sheet.west.len()),
        })
    }
}
