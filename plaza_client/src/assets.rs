//! Sprite resolution cache.
//!
//! Memoizes decoder output per visual-set id. Decode failures are recorded
//! so the draw pass skips the affected entity instead of retrying every
//! frame. Entities surfacing in a batch before their sheet is known simply
//! stay unresolved until a later event registers one.

use std::collections::HashMap;

use tracing::warn;

use plaza_shared::proto::SpriteSheet;
use plaza_shared::sprite::{FrameSet, SpriteDecoder};

pub struct SpriteCache {
    decoder: Box<dyn SpriteDecoder>,
    /// Registered but not necessarily decoded sheets.
    sheets: HashMap<String, SpriteSheet>,
    /// Decode outcome per id; `None` marks a failed attempt.
    resolved: HashMap<String, Option<FrameSet>>,
    cache_hits: usize,
    cache_misses: usize,
}

impl SpriteCache {
    pub fn new(decoder: Box<dyn SpriteDecoder>) -> Self {
        Self {
            decoder,
            sheets: HashMap::new(),
            resolved: HashMap::new(),
            cache_hits: 0,
            cache_misses: 0,
        }
    }

    /// Registers a visual-set record. Re-registering an identical record
    /// keeps any earlier decode; a changed record invalidates it so the
    /// new frames take effect.
    pub fn register(&mut self, sheet: SpriteSheet) {
        if self.sheets.get(&sheet.id) == Some(&sheet) {
            return;
        }
        self.resolved.remove(&sheet.id);
        self.sheets.insert(sheet.id.clone(), sheet);
    }

    /// Decodes a registered sheet now, memoized. Missing registrations and
    /// decode failures are logged, not errors.
    pub fn resolve(&mut self, id: &str) {
        if self.resolved.contains_key(id) {
            return;
        }
        let Some(sheet) = self.sheets.get(id) else {
            warn!(sprite_set = %id, "sprite set referenced before registration");
            return;
        };
        let outcome = match self.decoder.decode(sheet) {
            Ok(frames) => Some(frames),
            Err(e) => {
                warn!(sprite_set = %id, error = %e, "sprite decode failed");
                None
            }
        };
        self.resolved.insert(id.to_string(), outcome);
    }

    /// Frames for a visual set, resolving on first use.
    ///
    /// Returns `None` for unknown or failed sets; the caller skips the
    /// entity for the frame.
    pub fn frames(&mut self, id: &str) -> Option<&FrameSet> {
        if !self.resolved.contains_key(id) {
            if !self.sheets.contains_key(id) {
                self.cache_misses += 1;
                return None;
            }
            self.cache_misses += 1;
            self.resolve(id);
        } else {
            self.cache_hits += 1;
        }
        self.resolved.get(id).and_then(|o| o.as_ref())
    }

    pub fn stats(&self) -> (usize, usize) {
        (self.cache_hits, self.cache_misses)
    }
}
