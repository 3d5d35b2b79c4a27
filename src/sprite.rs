//! Sprites, rectangles and the cell-mask overlap test.
//!
//! A sprite is a grid of glyphs.  A cell is opaque when its glyph is not a
//! space; the opaque cells form the sprite's collision mask.

use crossterm::style::Color;

// ── Rect ─────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle with a fractional top-left corner.
///
/// Entities move by fractional amounts per tick; drawing and collision
/// snap to the nearest cell via `cell_x` / `cell_y`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    /// A rect at the origin sized to `sprite`.
    pub fn of(sprite: &Sprite) -> Self {
        Rect::new(0.0, 0.0, sprite.width() as f32, sprite.height() as f32)
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn centerx(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn centery(&self) -> f32 {
        self.y + self.h / 2.0
    }

    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.h;
    }

    pub fn set_centerx(&mut self, cx: f32) {
        self.x = cx - self.w / 2.0;
    }

    pub fn set_centery(&mut self, cy: f32) {
        self.y = cy - self.h / 2.0;
    }

    pub fn cell_x(&self) -> i32 {
        self.x.round() as i32
    }

    pub fn cell_y(&self) -> i32 {
        self.y.round() as i32
    }
}

// ── Sprite ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    width: usize,
    height: usize,
    glyphs: Vec<char>,
    color: Color,
}

impl Sprite {
    /// Build a sprite from rows of text.  Short rows are padded with
    /// transparent cells.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let width = rows
            .iter()
            .map(|r| r.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        let mut glyphs = Vec::with_capacity(width * rows.len());
        for row in rows {
            let row = row.as_ref();
            let len = row.chars().count();
            glyphs.extend(row.chars());
            glyphs.extend(std::iter::repeat(' ').take(width - len));
        }
        Sprite {
            width,
            height: rows.len(),
            glyphs,
            color: Color::White,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Glyph at (`x`, `y`), or `None` outside the sprite.
    pub fn glyph(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.glyphs[y * self.width + x])
        } else {
            None
        }
    }

    pub fn is_opaque(&self, x: usize, y: usize) -> bool {
        matches!(self.glyph(x, y), Some(c) if c != ' ')
    }
}

/// Map a snake_case palette name to a terminal colour.
pub fn parse_color(name: &str) -> Option<Color> {
    let color = match name.trim() {
        "black" => Color::Black,
        "dark_grey" => Color::DarkGrey,
        "red" => Color::Red,
        "dark_red" => Color::DarkRed,
        "green" => Color::Green,
        "dark_green" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "dark_yellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "dark_blue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "dark_magenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "dark_cyan" => Color::DarkCyan,
        "white" => Color::White,
        "grey" => Color::Grey,
        _ => return None,
    };
    Some(color)
}

// ── Mask collision ───────────────────────────────────────────────────────────

/// True if any opaque cell of `a` (placed at `a_rect`) lands on an opaque
/// cell of `b` (placed at `b_rect`).
pub fn collide_mask(a_rect: &Rect, a: &Sprite, b_rect: &Rect, b: &Sprite) -> bool {
    let (ax, ay) = (a_rect.cell_x(), a_rect.cell_y());
    let (bx, by) = (b_rect.cell_x(), b_rect.cell_y());

    // Overlap of the two cell boxes, in screen cells.
    let left = ax.max(bx);
    let top = ay.max(by);
    let right = (ax + a.width() as i32).min(bx + b.width() as i32);
    let bottom = (ay + a.height() as i32).min(by + b.height() as i32);
    if left >= right || top >= bottom {
        return false;
    }

    for y in top..bottom {
        for x in left..right {
            let a_hit = a.is_opaque((x - ax) as usize, (y - ay) as usize);
            if a_hit && b.is_opaque((x - bx) as usize, (y - by) as usize) {
                return true;
            }
        }
    }
    false
}

