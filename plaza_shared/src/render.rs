//! Drawing abstraction.
//!
//! This crate intentionally does not depend on a graphics backend.
//! The core computes every position and frame index; pixel compositing is
//! delegated to whatever implements [`DrawSurface`].

use crate::math::Vec2;
use crate::proto::Facing;
use crate::sprite::SpriteHandle;

/// A minimal drawing API.
pub trait DrawSurface: Send {
    /// Draws the world background for the given viewport offset.
    fn draw_background(&mut self, offset: Vec2);
    /// Draws one avatar frame at a screen position.
    ///
    /// `mirrored` asks the surface to flip horizontally; the core uses it
    /// for the west-from-east frame fallback.
    fn draw_sprite(&mut self, frame: SpriteHandle, facing: Facing, mirrored: bool, screen: Vec2);
    /// Draws a name label at a screen position.
    fn draw_label(&mut self, text: &str, screen: Vec2);
}

/// A no-op surface useful for headless tests.
#[derive(Default)]
pub struct NullSurface;

impl DrawSurface for NullSurface {
    fn draw_background(&mut self, _offset: Vec2) {}
    fn draw_sprite(&mut self, _frame: SpriteHandle, _facing: Facing, _mirrored: bool, _screen: Vec2) {}
    fn draw_label(&mut self, _text: &str, _screen: Vec2) {}
}
