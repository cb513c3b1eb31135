use shakmaty::{File, Rank, Square};

/// Terminal position of the top-left board cell and the size of one
/// cell. The renderer and the click mapping both read these, so the
/// drawn board and the clickable board can never drift apart.
pub const BOARD_LEFT: u16 = 3;
pub const BOARD_TOP: u16 = 5;
pub const CELL_W: u16 = 4;
pub const CELL_H: u16 = 2;

/// Fixed 8x8 grid layout in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    pub left: u16,
    pub top: u16,
    pub cell_w: u16,
    pub cell_h: u16,
}

impl Default for BoardGeometry {
    fn default() -> Self {
        BoardGeometry {
            left: BOARD_LEFT,
            top: BOARD_TOP,
            cell_w: CELL_W,
            cell_h: CELL_H,
        }
    }
}

impl BoardGeometry {
    /// Maps a terminal (column, row) to the square drawn there.
    /// Screen rows run top-down while ranks run bottom-up, so the
    /// vertical axis is inverted. Positions outside the grid map to
    /// `None` and are dropped by the caller.
    pub fn square_at(&self, column: u16, row: u16) -> Option<Square> {
        if column < self.left || row < self.top {
            return None;
        }
        let file = (column - self.left) / self.cell_w;
        let display_row = (row - self.top) / self.cell_h;
        if file >= 8 || display_row >= 8 {
            return None;
        }
        let rank = 7 - display_row;
        Some(Square::from_coords(
            File::new(u32::from(file)),
            Rank::new(u32::from(rank)),
        ))
    }
}
