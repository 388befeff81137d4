//! Sprite bitmaps for the runner game.
//!
//! Sprites are rows of `'X'`/`' '` consumed by [`FrameBuffer::draw_sprite`].
//! The dinosaur stands 9 px tall and ducks at 3 px; obstacle sprites carry
//! their own fixed footprint.
//!
//! [`FrameBuffer::draw_sprite`]: crate::display::FrameBuffer::draw_sprite

pub const DINO_STAND_HEIGHT: i32 = 9;
pub const DINO_DUCK_HEIGHT: i32 = 3;
pub const DINO_WIDTH: i32 = 7;

pub const DINO_RUN_1: &[&str] = &[
    "   XXX ",
    "   XXXX",
    "   XX  ",
    "  XXXX ",
    "X XXX  ",
    "XXXX   ",
    " XX    ",
    " X X   ",
    "   X   ",
];

pub const DINO_RUN_2: &[&str] = &[
    "   XXX ",
    "   XXXX",
    "   XX  ",
    "  XXXX ",
    "X XXX  ",
    "XXXX   ",
    " XX    ",
    "  X    ",
    " X     ",
];

pub const DINO_JUMP: &[&str] = &[
    "   XXX ",
    "   XXXX",
    "   XX  ",
    "  XXXX ",
    "X XXX  ",
    "XXXX   ",
    " XX    ",
    " X X   ",
    "       ",
];

pub const DINO_DUCK: &[&str] = &[
    "   XXXX",
    "XXXXXX ",
    " X  X  ",
];

pub const CACTUS_SMALL: &[&str] = &[
    " X ",
    " X ",
    "XX ",
    " XX",
    " X ",
];

pub const CACTUS_MEDIUM: &[&str] = &[
    "  X  ",
    "  X  ",
    "X X  ",
    "XXX X",
    "  XXX",
    "  X  ",
];

pub const CACTUS_TALL: &[&str] = &[
    "  X  ",
    "X X  ",
    "X X  ",
    "XXX X",
    "  XXX",
    "  X  ",
    "  X  ",
];

// Armored variant: same silhouette as the tall cactus with a thicker trunk.
pub const CACTUS_ARMORED: &[&str] = &[
    " XX  ",
    "XXX  ",
    "XXX X",
    "XXXXX",
    "XXXXX",
    " XX  ",
    " XX  ",
];

pub const BIRD_1: &[&str] = &[
    "X X",
    " X ",
];

pub const BIRD_2: &[&str] = &[
    " X ",
    "X X",
];

pub fn sprite_width(rows: &[&str]) -> i32 {
    rows.iter().map(|r| r.len()).max().unwrap_or(0) as i32
}

pub fn sprite_height(rows: &[&str]) -> i32 {
    rows.len() as i32
}
