//! Character-grid rasterizer. Pure and infallible: out-of-bounds cells are
//! clipped, never an error. Shapes draw in insertion order, so later marks
//! overwrite earlier ones; color is carried on the shape but not rendered.

use std::fmt;

use scrawl_lang::{Shape, ShapeKind};

pub const DEFAULT_WIDTH: usize = 80;
pub const DEFAULT_HEIGHT: usize = 24;

const CIRCLE_MARK: char = 'o';
const RECT_MARK: char = '#';
const LINE_MARK: char = '*';

/// Bound for truncated shape coordinates. Grids are terminal-sized, so any
/// coordinate this far out draws nothing visible anyway; clamping keeps the
/// integer stepping below free of overflow.
const COORD_LIMIT: i64 = 1 << 20;

/// Truncate to an integer cell coordinate, clamped to `±COORD_LIMIT`.
/// `f64 as i64` saturates, so the clamp is total even for ±inf/NaN.
fn grid_coord(v: f64) -> i64 {
    (v.trunc() as i64).clamp(-COORD_LIMIT, COORD_LIMIT)
}

/// Fixed-size character buffer, space-filled, created fresh per render.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![' '; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    /// Write a mark, silently clipping anything outside the grid.
    fn set(&mut self, x: i64, y: i64, mark: char) {
        if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
            self.cells[y as usize * self.width + x as usize] = mark;
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.width {
                write!(f, "{}", self.cells[y * self.width + x])?;
            }
        }
        Ok(())
    }
}

// ─── Rendering ───────────────────────────────────────────────────────────────

/// Rasterize the shape list onto a fresh `width` × `height` grid.
pub fn render(shapes: &[Shape], width: usize, height: usize) -> Grid {
    let mut grid = Grid::new(width, height);
    for shape in shapes {
        match shape.kind {
            ShapeKind::Circle { center, radius } => draw_circle(&mut grid, center, radius),
            ShapeKind::Rect { origin, size } => draw_rect(&mut grid, origin, size),
            ShapeKind::Line { from, to } => draw_line(&mut grid, from, to),
        }
    }
    grid
}

/// Render at the conventional terminal size of 80×24.
pub fn render_default(shapes: &[Shape]) -> Grid {
    render(shapes, DEFAULT_WIDTH, DEFAULT_HEIGHT)
}

/// One-unit-thick ring: a cell is marked when its distance to the center is
/// within 1.0 of the radius. Not a filled disk.
fn draw_circle(grid: &mut Grid, center: (f64, f64), radius: f64) {
    for y in 0..grid.height {
        for x in 0..grid.width {
            let dx = x as f64 - center.0;
            let dy = y as f64 - center.1;
            let dist = (dx * dx + dy * dy).sqrt();
            if (dist - radius).abs() < 1.0 {
                grid.set(x as i64, y as i64, CIRCLE_MARK);
            }
        }
    }
}

/// Border-only rectangle at integer-truncated origin and size.
fn draw_rect(grid: &mut Grid, origin: (f64, f64), size: (f64, f64)) {
    let x0 = grid_coord(origin.0);
    let y0 = grid_coord(origin.1);
    let w = grid_coord(size.0);
    let h = grid_coord(size.1);

    for x in x0..x0 + w {
        grid.set(x, y0, RECT_MARK);
        grid.set(x, y0 + h - 1, RECT_MARK);
    }
    for y in y0..y0 + h {
        grid.set(x0, y, RECT_MARK);
        grid.set(x0 + w - 1, y, RECT_MARK);
    }
}

/// Integer Bresenham stepping between the truncated endpoints. Off-grid
/// steps are skipped without ending the walk.
fn draw_line(grid: &mut Grid, from: (f64, f64), to: (f64, f64)) {
    let mut x = grid_coord(from.0);
    let mut y = grid_coord(from.1);
    let x1 = grid_coord(to.0);
    let y1 = grid_coord(to.1);

    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        grid.set(x, y, LINE_MARK);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
