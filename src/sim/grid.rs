//! Beat x pitch grid
//!
//! Cells store occupant ids, not the actors themselves. The owning
//! `GameState` keeps each actor registered in exactly one cell.

use serde::{Deserialize, Serialize};

/// Grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Column (x)
    pub beat: usize,
    /// Row (y), 0 is the top row
    pub pitch: usize,
}

impl Position {
    pub const fn new(beat: usize, pitch: usize) -> Self {
        Self { beat, pitch }
    }
}

/// Which occupant set of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccupantKind {
    Player,
    Mine,
}

/// A single grid tile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cell {
    pub pos: Position,
    /// Player ids, in arrival order
    pub players: Vec<u32>,
    /// Mine ids, in placement order
    pub mines: Vec<u32>,
}

impl Cell {
    fn new(pos: Position) -> Self {
        Self {
            pos,
            players: Vec::new(),
            mines: Vec::new(),
        }
    }

    pub fn occupants(&self, kind: OccupantKind) -> &[u32] {
        match kind {
            OccupantKind::Player => &self.players,
            OccupantKind::Mine => &self.mines,
        }
    }

    fn occupants_mut(&mut self, kind: OccupantKind) -> &mut Vec<u32> {
        match kind {
            OccupantKind::Player => &mut self.players,
            OccupantKind::Mine => &mut self.mines,
        }
    }

    pub fn has_mine(&self) -> bool {
        !self.mines.is_empty()
    }

    pub fn has_player(&self) -> bool {
        !self.players.is_empty()
    }
}

/// Fixed-size grid, stored column-major (`beat * pitches + pitch`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    beats: usize,
    pitches: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocate a grid with every cell empty
    pub fn new(beats: usize, pitches: usize) -> Self {
        let cells = (0..beats)
            .flat_map(|beat| (0..pitches).map(move |pitch| Cell::new(Position::new(beat, pitch))))
            .collect();
        Self {
            beats,
            pitches,
            cells,
        }
    }

    pub fn beats(&self) -> usize {
        self.beats
    }

    pub fn pitches(&self) -> usize {
        self.pitches
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.beat < self.beats && pos.pitch < self.pitches
    }

    #[inline]
    fn index(&self, pos: Position) -> usize {
        debug_assert!(self.contains(pos), "position {pos:?} outside grid");
        pos.beat * self.pitches + pos.pitch
    }

    /// Cell at `pos`. Panics if `pos` is outside the grid.
    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[self.index(pos)]
    }

    fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        let idx = self.index(pos);
        &mut self.cells[idx]
    }

    /// All cells of one beat, top row first
    pub fn column(&self, beat: usize) -> &[Cell] {
        let start = beat * self.pitches;
        &self.cells[start..start + self.pitches]
    }

    /// Every cell, column by column
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Register an occupant in a cell
    pub fn insert_occupant(&mut self, id: u32, at: Position, kind: OccupantKind) {
        self.cell_mut(at).occupants_mut(kind).push(id);
    }

    /// Move an occupant between cells.
    ///
    /// Returns `false` (and changes nothing) if `id` is not registered in
    /// `from`. Both positions must be inside the grid.
    pub fn move_occupant(
        &mut self,
        id: u32,
        from: Position,
        to: Position,
        kind: OccupantKind,
    ) -> bool {
        let source = self.cell_mut(from).occupants_mut(kind);
        let Some(idx) = source.iter().position(|&o| o == id) else {
            return false;
        };
        source.remove(idx);
        self.cell_mut(to).occupants_mut(kind).push(id);
        true
    }

    /// Number of registrations of `id` across all cells
    pub fn count_registrations(&self, id: u32, kind: OccupantKind) -> usize {
        self.cells
            .iter()
            .map(|c| c.occupants(kind).iter().filter(|&&o| o == id).count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(8, 3);
        assert_eq!(grid.cells().count(), 24);
        assert!(grid.cells().all(|c| c.players.is_empty() && c.mines.is_empty()));
        assert_eq!(grid.cell(Position::new(5, 2)).pos, Position::new(5, 2));
    }

    #[test]
    fn test_column_layout() {
        let grid = Grid::new(4, 3);
        let column = grid.column(2);
        assert_eq!(column.len(), 3);
        for (pitch, cell) in column.iter().enumerate() {
            assert_eq!(cell.pos, Position::new(2, pitch));
        }
    }

    #[test]
    fn test_move_occupant() {
        let mut grid = Grid::new(4, 3);
        let from = Position::new(0, 1);
        let to = Position::new(1, 1);
        grid.insert_occupant(7, from, OccupantKind::Player);

        assert!(grid.move_occupant(7, from, to, OccupantKind::Player));
        assert!(grid.cell(from).players.is_empty());
        assert_eq!(grid.cell(to).players, vec![7]);
        assert_eq!(grid.count_registrations(7, OccupantKind::Player), 1);
    }

    #[test]
    fn test_move_missing_occupant_is_noop() {
        let mut grid = Grid::new(4, 3);
        let from = Position::new(0, 0);
        let to = Position::new(1, 0);
        grid.insert_occupant(3, from, OccupantKind::Mine);

        // Wrong kind and wrong id both leave the grid untouched
        assert!(!grid.move_occupant(3, from, to, OccupantKind::Player));
        assert!(!grid.move_occupant(4, from, to, OccupantKind::Mine));
        assert_eq!(grid.cell(from).mines, vec![3]);
        assert!(grid.cell(to).mines.is_empty());
    }
}
