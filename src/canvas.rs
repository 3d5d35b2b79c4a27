//! In-memory frame buffer.
//!
//! The simulation draws into a `Canvas`; the terminal frontend turns the
//! finished canvas into crossterm commands.  Keeping the two apart lets
//! tests inspect exactly what a frame would show.

use crossterm::style::Color;

use crate::sprite::Sprite;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: Color,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        color: Color::Reset,
    };
}

#[derive(Clone, Debug)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Canvas {
            width,
            height,
            cells: vec![Cell::BLANK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Copy the opaque cells of `sprite` with its top-left corner at
    /// (`x`, `y`).  Anything outside the canvas is clipped.
    pub fn blit(&mut self, sprite: &Sprite, x: i32, y: i32) {
        for sy in 0..sprite.height() {
            for sx in 0..sprite.width() {
                let Some(ch) = sprite.glyph(sx, sy) else {
                    continue;
                };
                if ch == ' ' {
                    continue;
                }
                if let Some(i) = self.index(x + sx as i32, y + sy as i32) {
                    self.cells[i] = Cell {
                        ch,
                        color: sprite.color(),
                    };
                }
            }
        }
    }

    /// One row of cells, left to right.
    pub fn row(&self, y: u16) -> &[Cell] {
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// The glyphs of one row as a string.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|c| c.ch).collect()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            None
        } else {
            Some(y as usize * self.width as usize + x as usize)
        }
    }
}
