//! Viewport camera.
//!
//! Derived state only: recomputed every frame from the local player's
//! smoothed position, never persisted.

use plaza_shared::math::Vec2;

/// World-to-screen offset for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    pub offset: Vec2,
}

impl Camera {
    /// Centers the viewport on `focus`, clamped inside the world.
    ///
    /// A world smaller than the viewport collapses the clamp range; the
    /// offset pins to 0 on that axis and letterboxing is the surface's
    /// concern.
    pub fn recenter(&mut self, focus: Vec2, viewport: Vec2, world: Vec2) {
        self.offset = Vec2::new(
            clamp_axis(focus.x - viewport.x / 2.0, world.x - viewport.x),
            clamp_axis(focus.y - viewport.y / 2.0, world.y - viewport.y),
        );
    }

    /// Translates a world position into screen space.
    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        p - self.offset
    }
}

fn clamp_axis(v: f32, max: f32) -> f32 {
    if max <= 0.0 {
        0.0
    } else {
        v.clamp(0.0, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);
    const WORLD: Vec2 = Vec2::new(2000.0, 2000.0);

    #[test]
    fn centers_on_focus_inside_world() {
        let mut cam = Camera::default();
        cam.recenter(Vec2::new(1000.0, 1000.0), VIEWPORT, WORLD);
        assert_eq!(cam.offset, Vec2::new(600.0, 700.0));
    }

    #[test]
    fn clamps_at_world_edges() {
        let mut cam = Camera::default();
        cam.recenter(Vec2::new(10.0, 1990.0), VIEWPORT, WORLD);
        assert_eq!(cam.offset, Vec2::new(0.0, 1400.0));
    }

    #[test]
    fn world_smaller_than_viewport_pins_to_zero() {
        let mut cam = Camera::default();
        cam.recenter(Vec2::new(300.0, 100.0), VIEWPORT, Vec2::new(400.0, 2000.0));
        assert_eq!(cam.offset.x, 0.0);
        assert_eq!(cam.offset.y, 0.0);
    }

    #[test]
    fn world_to_screen_subtracts_offset() {
        let mut cam = Camera::default();
        cam.recenter(Vec2::new(1000.0, 1000.0), VIEWPORT, WORLD);
        let screen = cam.world_to_screen(Vec2::new(1000.0, 1000.0));
        assert_eq!(screen, Vec2::new(400.0, 300.0));
    }
}
