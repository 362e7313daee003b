// geometry.rs - Board layout in screen space and pointer-to-cell mapping

use eframe::egui;
use egui::{Pos2, Rect, Vec2};

pub const CELL_SIZE: f32 = 12.0;
pub const CELL_SPACING: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardGeometry {
    pub origin: Pos2,
    pub cols: usize,
    pub rows: usize,
    pub cell_size: f32,
    pub spacing: f32,
}

impl BoardGeometry {
    pub fn new(origin: Pos2, cols: usize, rows: usize) -> Self {
        Self {
            origin,
            cols,
            rows,
            cell_size: CELL_SIZE,
            spacing: CELL_SPACING,
        }
    }

    fn pitch(&self) -> f32 {
        self.cell_size + self.spacing
    }

    pub fn total_size(&self) -> Vec2 {
        egui::vec2(
            self.pitch() * self.cols as f32 - self.spacing,
            self.pitch() * self.rows as f32 - self.spacing,
        )
    }

    pub fn cell_rect(&self, x: usize, y: usize) -> Rect {
        let min = self.origin + egui::vec2(x as f32 * self.pitch(), y as f32 * self.pitch());
        Rect::from_min_size(min, Vec2::splat(self.cell_size))
    }

    /// The cell under `pos`, or `None` when the pointer is off the board.
    /// The gap after a cell belongs to that cell.
    pub fn cell_at(&self, pos: Pos2) -> Option<(usize, usize)> {
        let offset = pos - self.origin;
        if offset.x < 0.0 || offset.y < 0.0 {
            return None;
        }
        let x = (offset.x / self.pitch()).floor() as usize;
        let y = (offset.y / self.pitch()).floor() as usize;
        (x < self.cols && y < self.rows).then_some((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> BoardGeometry {
        BoardGeometry {
            origin: egui::pos2(100.0, 50.0),
            cols: 64,
            rows: 32,
            cell_size: 10.0,
            spacing: 0.0,
        }
    }

    #[test]
    fn maps_pointer_to_cell() {
        let board = board();
        assert_eq!(board.cell_at(egui::pos2(100.0, 50.0)), Some((0, 0)));
        assert_eq!(board.cell_at(egui::pos2(115.0, 79.9)), Some((1, 2)));
        assert_eq!(board.cell_at(egui::pos2(739.9, 369.9)), Some((63, 31)));
    }

    #[test]
    fn rejects_points_off_the_board() {
        let board = board();
        assert_eq!(board.cell_at(egui::pos2(99.0, 60.0)), None);
        assert_eq!(board.cell_at(egui::pos2(120.0, 49.0)), None);
        assert_eq!(board.cell_at(egui::pos2(740.0, 60.0)), None);
        assert_eq!(board.cell_at(egui::pos2(120.0, 370.0)), None);
    }

    #[test]
    fn rect_and_lookup_agree() {
        let board = BoardGeometry::new(egui::pos2(8.0, 8.0), 64, 32);
        for (x, y) in [(0, 0), (5, 7), (63, 31)] {
            assert_eq!(board.cell_at(board.cell_rect(x, y).center()), Some((x, y)));
        }
    }
}
