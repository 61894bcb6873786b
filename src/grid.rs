use crate::types::{Placement, Span};

/// Cell occupancy of a grid with a fixed column count and a row count that
/// only grows. Cells are stored row-major, so adding a row appends `cols`
/// free cells without moving existing ones.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    cols: u32,
    rows: u32,
    occupied: Vec<bool>,
}

impl OccupancyGrid {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            occupied: vec![false; cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    fn index(&self, row: u32, col: u32) -> usize {
        (row as usize - 1) * self.cols as usize + (col as usize - 1)
    }

    /// Out-of-grid cells count as free.
    pub fn is_occupied(&self, row: u32, col: u32) -> bool {
        if row == 0 || col == 0 || row > self.rows || col > self.cols {
            return false;
        }
        self.occupied[self.index(row, col)]
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.iter().filter(|&&c| c).count()
    }

    /// First anchor in row-major order (top to bottom, then left to right)
    /// where `span` stays inside the grid and covers only free cells.
    /// The scan order decides the visual arrangement and must not change.
    pub fn find_fit(&self, span: Span) -> Option<Placement> {
        for row in 1..=self.rows {
            for col in 1..=self.cols {
                if self.can_place(span, row, col) {
                    return Some(Placement::new(row, col, span));
                }
            }
        }
        None
    }

    fn can_place(&self, span: Span, row: u32, col: u32) -> bool {
        if row + span.rows - 1 > self.rows || col + span.cols - 1 > self.cols {
            return false;
        }
        (row..row + span.rows).all(|r| (col..col + span.cols).all(|c| !self.is_occupied(r, c)))
    }

    pub fn occupy(&mut self, placement: &Placement) {
        for row in placement.row..placement.row_end() {
            for col in placement.col..placement.col_end() {
                let idx = self.index(row, col);
                self.occupied[idx] = true;
            }
        }
    }

    /// Appends one empty row and returns the new row count. A 1x1 span
    /// always fits in the fresh row.
    pub fn expand(&mut self) -> u32 {
        self.rows += 1;
        self.occupied
            .resize(self.cols as usize * self.rows as usize, false);
        self.rows
    }
}
