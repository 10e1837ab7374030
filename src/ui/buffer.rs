//! The rune-grid draw surface the Spectrum and Sparkline widgets render
//! against (spec §6): `(0,0)` is bottom-left, matching the bottom-up bar
//! geometry in `metrics::geometry`.

#[derive(Debug, Clone, Copy, Default)]
pub struct Style {
    pub fg: Option<ratatui::style::Color>,
    pub bg: Option<ratatui::style::Color>,
}

#[derive(Debug, Clone)]
struct Cell {
    rune: char,
    style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Cell { rune: ' ', style: Style::default() }
    }
}

pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        Buffer {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// `(0,0)` is bottom-left; out-of-range writes are silently ignored so
    /// callers can clip geometry without bounds-checking every cell.
    pub fn set_cell(&mut self, x: i32, y: i32, rune: char, style: Style) {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return;
        }
        let row_from_top = i32::from(self.height) - 1 - y;
        let idx = row_from_top as usize * usize::from(self.width) + x as usize;
        self.cells[idx] = Cell { rune, style };
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, rune: char, style: Style) {
        for dy in 0..h {
            for dx in 0..w {
                self.set_cell(x + dx, y + dy, rune, style);
            }
        }
    }

    /// Top-to-bottom rows as plain strings, with per-cell colors already
    /// applied if a caller wants to re-derive spans; kept simple (no
    /// per-run merging) since only whole-row text is needed downstream.
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(usize::from(self.width))
            .map(|row| row.iter().map(|c| c.rune).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_bottom_left() {
        let mut buf = Buffer::new(3, 2);
        buf.set_cell(0, 0, 'x', Style::default());
        let rows = buf.rows();
        assert_eq!(rows[1].chars().next(), Some('x'));
        assert_eq!(rows[0].chars().next(), Some(' '));
    }

    #[test]
    fn out_of_range_writes_are_ignored() {
        let mut buf = Buffer::new(2, 2);
        buf.set_cell(-1, 0, 'x', Style::default());
        buf.set_cell(5, 5, 'x', Style::default());
        assert_eq!(buf.rows().join(""), "    ");
    }
}
