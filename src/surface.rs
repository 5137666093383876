//! Render surface abstraction and the in-memory cell canvas that backs it.
//!
//! Game code draws in logical playfield pixels.  `Canvas` scales those
//! coordinates onto a grid of terminal cells; the binary then copies the
//! grid to the terminal in one pass.

use crossterm::style::Color;

use crate::assets::{SpriteId, SpriteSheet};

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Size of the playfield an entity moves in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Bounds { width, height }
    }
}

/// Axis-aligned rectangle, top-left anchored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    /// Inclusive on every edge.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        self.x <= px && px <= self.x + self.width && self.y <= py && py <= self.y + self.height
    }
}

// ── Surface contract ──────────────────────────────────────────────────────────

pub trait Surface {
    /// Logical size of the area being drawn on.
    fn field(&self) -> Bounds;

    /// Logical width of one text character.
    fn glyph_width(&self) -> f32;

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn outline_rect(&mut self, rect: Rect, color: Color);

    /// Draws `sprite` stretched over `rect`.  Returns `false` when the
    /// sprite is not available so the caller can draw a placeholder.
    fn blit(&mut self, sprite: SpriteId, rect: Rect) -> bool;

    fn text(&mut self, x: f32, y: f32, text: &str, color: Color);

    /// Horizontally centred text at logical row `y`.
    fn text_centered(&mut self, y: f32, text: &str, color: Color);
}

// ── Canvas ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub color: Color,
}

impl Cell {
    pub const BLANK: Cell = Cell { ch: ' ', color: Color::Reset };
}

/// A `cols × rows` grid of cells covering the whole logical field.
pub struct Canvas {
    cols: u16,
    rows: u16,
    field: Bounds,
    cells: Vec<Cell>,
    sprites: SpriteSheet,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16, field: Bounds, sprites: SpriteSheet) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Canvas {
            cols,
            rows,
            field,
            cells: vec![Cell::BLANK; cols as usize * rows as usize],
            sprites,
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Reallocate for a new terminal size.  No-op if the size is unchanged.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        let cols = cols.max(1);
        let rows = rows.max(1);
        if cols == self.cols && rows == self.rows {
            return;
        }
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![Cell::BLANK; cols as usize * rows as usize];
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    pub fn cell(&self, col: u16, row: u16) -> Cell {
        self.cells[row as usize * self.cols as usize + col as usize]
    }

    pub fn row(&self, row: u16) -> &[Cell] {
        let start = row as usize * self.cols as usize;
        &self.cells[start..start + self.cols as usize]
    }

    /// Centre of terminal cell `(col, row)` in logical pixels.
    pub fn to_field(&self, col: u16, row: u16) -> (f32, f32) {
        let x = (col as f32 + 0.5) * self.field.width / self.cols as f32;
        let y = (row as f32 + 0.5) * self.field.height / self.rows as f32;
        (x, y)
    }

    fn col_of(&self, x: f32) -> i32 {
        (x * self.cols as f32 / self.field.width).floor() as i32
    }

    fn row_of(&self, y: f32) -> i32 {
        (y * self.rows as f32 / self.field.height).floor() as i32
    }

    /// Cell span covered by `rect`, at least one cell wide and tall so thin
    /// shapes (bullets) never vanish.  Not clipped.
    fn span(&self, rect: Rect) -> (i32, i32, i32, i32) {
        let c0 = self.col_of(rect.x);
        let r0 = self.row_of(rect.y);
        let c1 = ((rect.x + rect.width) * self.cols as f32 / self.field.width).ceil() as i32;
        let r1 = ((rect.y + rect.height) * self.rows as f32 / self.field.height).ceil() as i32;
        (c0, r0, c1.max(c0 + 1), r1.max(r0 + 1))
    }

    fn put(&mut self, col: i32, row: i32, ch: char, color: Color) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        let idx = row as usize * self.cols as usize + col as usize;
        self.cells[idx] = Cell { ch, color };
    }
}

impl Surface for Canvas {
    fn field(&self) -> Bounds {
        self.field
    }

    fn glyph_width(&self) -> f32 {
        self.field.width / self.cols as f32
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let (c0, r0, c1, r1) = self.span(rect);
        for row in r0..r1 {
            for col in c0..c1 {
                self.put(col, row, '█', color);
            }
        }
    }

    fn outline_rect(&mut self, rect: Rect, color: Color) {
        let (c0, r0, c1, r1) = self.span(rect);
        let (right, bottom) = (c1 - 1, r1 - 1);
        for col in c0..c1 {
            self.put(col, r0, '─', color);
            self.put(col, bottom, '─', color);
        }
        for row in r0..r1 {
            self.put(c0, row, '│', color);
            self.put(right, row, '│', color);
        }
        self.put(c0, r0, '┌', color);
        self.put(right, r0, '┐', color);
        self.put(c0, bottom, '└', color);
        self.put(right, bottom, '┘', color);
    }

    fn blit(&mut self, sprite: SpriteId, rect: Rect) -> bool {
        let Some(art) = self.sprites.get(sprite).cloned() else {
            return false;
        };
        let (c0, r0, c1, r1) = self.span(rect);
        let (span_w, span_h) = ((c1 - c0) as f32, (r1 - r0) as f32);
        let color = sprite.color();

        // Nearest-neighbour sampling; spaces are transparent.
        for row in r0..r1 {
            let v = ((row - r0) as f32 + 0.5) / span_h;
            let src_row = ((v * art.height() as f32) as usize).min(art.height() - 1);
            for col in c0..c1 {
                let u = ((col - c0) as f32 + 0.5) / span_w;
                let src_col = ((u * art.width() as f32) as usize).min(art.width() - 1);
                let ch = art.glyph(src_col, src_row);
                if ch != ' ' {
                    self.put(col, row, ch, color);
                }
            }
        }
        true
    }

    fn text(&mut self, x: f32, y: f32, text: &str, color: Color) {
        let col = self.col_of(x);
        let row = self.row_of(y);
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, color);
        }
    }

    fn text_centered(&mut self, y: f32, text: &str, color: Color) {
        let len = text.chars().count() as i32;
        let col = self.cols as i32 / 2 - len / 2;
        let row = self.row_of(y);
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, color);
        }
    }
}
