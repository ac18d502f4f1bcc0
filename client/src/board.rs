//! Renderable board built from server snapshots
//!
//! The board is rebuilt from scratch on every render: all cells, walls and
//! avatars from the previous snapshot are discarded before the new snapshot is
//! laid out. Boards are small, so a full rebuild is cheaper to reason about
//! than a diff keyed by position.
//!
//! Game-space puts `(0, 0)` at the bottom-left corner while screen rows are laid
//! out top-to-bottom, so game row `y` lands on screen row `size - 1 - y`.

use crate::error::BoardError;
use shared::{BoardSnapshot, PlayerView, Position};
use std::fmt;

/// Screen-space address of a cell. Row 0 is the top of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub row: usize,
    pub col: usize,
}

impl CellKey {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Maps a game-space position onto the screen grid of a `size × size` board.
    pub fn from_position(position: Position, size: usize) -> Self {
        Self {
            row: size - 1 - position.y,
            col: position.x,
        }
    }

    pub fn to_position(self, size: usize) -> Position {
        Position::new(self.col, size - 1 - self.row)
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terrain {
    Floor,
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarStyle {
    Dead,
    Own,
    Other,
}

impl AvatarStyle {
    /// Dead takes priority over own, which takes priority over other.
    pub fn for_player(player: &PlayerView, self_name: &str) -> Self {
        if !player.is_alive {
            AvatarStyle::Dead
        } else if player.name == self_name {
            AvatarStyle::Own
        } else {
            AvatarStyle::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    pub label: String,
    pub style: AvatarStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub key: CellKey,
    pub terrain: Terrain,
    pub avatars: Vec<Avatar>,
}

impl Cell {
    fn empty(key: CellKey) -> Self {
        Self {
            key,
            terrain: Terrain::Floor,
            avatars: Vec::new(),
        }
    }

    pub fn is_wall(&self) -> bool {
        self.terrain == Terrain::Wall
    }
}

#[derive(Debug, Default)]
pub struct Board {
    size: Option<usize>,
    cells: Vec<Cell>,
    revision: u64,
    last_sequence: Option<u64>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the grid size for the session.
    ///
    /// Repeating the call with the same size is a no-op; a different size is
    /// rejected and the grid keeps its original dimensions.
    pub fn initialize(&mut self, size: usize) -> Result<(), BoardError> {
        if size == 0 {
            return Err(BoardError::EmptyBoard);
        }

        match self.size {
            None => {
                self.size = Some(size);
                Ok(())
            }
            Some(current) if current == size => Ok(()),
            Some(current) => Err(BoardError::SizeChanged {
                current,
                requested: size,
            }),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.size.is_some()
    }

    pub fn size(&self) -> Option<usize> {
        self.size
    }

    /// Number of renders applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Throws away the current view and lays out `snapshot` from scratch.
    pub fn render(&mut self, snapshot: &BoardSnapshot, self_name: &str) -> Result<(), BoardError> {
        let size = self.size.ok_or(BoardError::NotInitialized)?;
        if snapshot.size != size {
            return Err(BoardError::SizeChanged {
                current: size,
                requested: snapshot.size,
            });
        }

        self.cells.clear();

        for row in 0..size {
            for col in 0..size {
                self.cells.push(Cell::empty(CellKey::new(row, col)));
            }
        }

        for wall in &snapshot.walls {
            if let Some(index) = self.index_of(CellKey::from_position(*wall, size)) {
                self.cells[index].terrain = Terrain::Wall;
            }
        }

        for player in &snapshot.players {
            if let Some(index) = self.index_of(CellKey::from_position(player.position, size)) {
                self.cells[index].avatars.push(Avatar {
                    label: player.name.clone(),
                    style: AvatarStyle::for_player(player, self_name),
                });
            }
        }

        self.revision += 1;
        Ok(())
    }

    /// Like [`Board::render`], but ignores a cycle that started before the
    /// last applied one. Returns whether the render was applied.
    pub fn render_sequenced(
        &mut self,
        sequence: u64,
        snapshot: &BoardSnapshot,
        self_name: &str,
    ) -> Result<bool, BoardError> {
        if matches!(self.last_sequence, Some(last) if sequence < last) {
            return Ok(false);
        }

        self.render(snapshot, self_name)?;
        self.last_sequence = Some(sequence);
        Ok(true)
    }

    /// All cells in screen order, top row first.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.unwrap_or(1))
    }

    pub fn cell(&self, key: CellKey) -> Option<&Cell> {
        self.index_of(key).map(|index| &self.cells[index])
    }

    pub fn cell_at(&self, position: Position) -> Option<&Cell> {
        let size = self.size?;
        if !position.in_bounds(size) {
            return None;
        }
        self.cell(CellKey::from_position(position, size))
    }

    pub fn avatar_count(&self) -> usize {
        self.cells.iter().map(|cell| cell.avatars.len()).sum()
    }

    fn index_of(&self, key: CellKey) -> Option<usize> {
        let size = self.size?;
        let index = key.row * size + key.col;
        (key.row < size && key.col < size && index < self.cells.len()).then_some(index)
    }
}
