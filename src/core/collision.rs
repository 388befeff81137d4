//! Axis-aligned overlap testing shared by every game mode.

/// Axis-aligned box in pixel space. Entities expose these already inset by
/// their fairness margin; collision never sees raw sprite bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Hitbox {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Strict interval overlap on both axes.
pub fn overlaps(a: Hitbox, b: Hitbox) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}
