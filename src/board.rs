use crate::types::{Cell, Position, Side};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// The eight compass directions a capture line can run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    West,
    East,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// `(row, col)` step of one cell.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
            Direction::NorthWest => (-1, -1),
            Direction::NorthEast => (-1, 1),
            Direction::SouthWest => (1, -1),
            Direction::SouthEast => (1, 1),
        }
    }
}

/// Reasons a move is rejected. The board is left untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("position out of bounds: ({row}, {col})")]
    OutOfBounds { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    #[error("move at ({row}, {col}) captures nothing")]
    NoCapture { row: usize, col: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("expected 8 rows, got {0}")]
    RowCount(usize),

    #[error("row {row} has {len} cells, expected 8")]
    RowLength { row: usize, len: usize },

    #[error("unknown cell {ch:?} in row {row}")]
    UnknownCell { row: usize, ch: char },
}

/// Reversi board state as an 8x8 grid of cells.
///
/// The grid is a plain value: copying a `Board` is how moves are simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the initial board:
    /// (3,3)=white, (3,4)=black, (4,3)=black, (4,4)=white.
    pub fn new() -> Self {
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        cells[3][3] = Cell::White;
        cells[3][4] = Cell::Black;
        cells[4][3] = Cell::Black;
        cells[4][4] = Cell::White;
        Self { cells }
    }

    /// Parses a diagram of 8 rows using `.` for empty, `W` for white and `B` for black.
    /// Whitespace inside a row is ignored.
    pub fn from_rows(rows: &[&str]) -> Result<Self, ParseBoardError> {
        if rows.len() != BOARD_SIZE {
            return Err(ParseBoardError::RowCount(rows.len()));
        }

        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (r, line) in rows.iter().enumerate() {
            let parsed = line
                .chars()
                .filter(|ch| !ch.is_whitespace())
                .map(|ch| match ch {
                    '.' => Ok(Cell::Empty),
                    'W' | 'w' => Ok(Cell::White),
                    'B' | 'b' => Ok(Cell::Black),
                    _ => Err(ParseBoardError::UnknownCell { row: r, ch }),
                })
                .collect::<Result<Vec<_>, _>>()?;

            if parsed.len() != BOARD_SIZE {
                return Err(ParseBoardError::RowLength {
                    row: r,
                    len: parsed.len(),
                });
            }
            cells[r].copy_from_slice(&parsed);
        }

        Ok(Self { cells })
    }

    /// Returns the cell at `(row, col)`, or `None` when out of range.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Returns true when `side` may place a piece at `(row, col)`.
    pub fn is_legal_move(&self, row: usize, col: usize, side: Side) -> bool {
        if self.cell(row, col) != Some(Cell::Empty) {
            return false;
        }

        Direction::ALL
            .iter()
            .any(|&dir| !self.capture_line(row, col, dir, side).is_empty())
    }

    /// Walks from `(row, col)` towards `dir` and returns the opponent pieces
    /// that would be bracketed by a piece of `side`.
    /// Returns an empty list when the origin is off the board or the run hits
    /// an empty cell or the edge.
    pub fn capture_line(
        &self,
        row: usize,
        col: usize,
        dir: Direction,
        side: Side,
    ) -> Vec<Position> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Vec::new();
        }

        let (dr, dc) = dir.delta();
        let me = side.to_cell();
        let opp = side.opponent().to_cell();
        let mut line = Vec::new();
        let mut r = row as i32 + dr;
        let mut c = col as i32 + dc;

        while in_bounds(r, c) {
            let cell = self.cells[r as usize][c as usize];
            if cell == opp {
                line.push(Position {
                    row: r as u8,
                    col: c as u8,
                });
            } else if cell == me {
                return line;
            } else {
                break;
            }

            r += dr;
            c += dc;
        }

        Vec::new()
    }

    /// Returns every legal move for `side` in row-major order.
    pub fn legal_moves(&self, side: Side) -> Vec<Position> {
        let mut moves = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if self.is_legal_move(row, col, side) {
                    moves.push(Position {
                        row: row as u8,
                        col: col as u8,
                    });
                }
            }
        }
        moves
    }

    pub fn has_legal_move(&self, side: Side) -> bool {
        (0..NUM_SQUARES)
            .any(|pos| self.is_legal_move(pos / BOARD_SIZE, pos % BOARD_SIZE, side))
    }

    /// Collects the flips for a move without applying it.
    pub fn flips_for(
        &self,
        row: usize,
        col: usize,
        side: Side,
    ) -> Result<Vec<Position>, MoveError> {
        Position::new(row, col)?;
        if self.cells[row][col] != Cell::Empty {
            return Err(MoveError::Occupied { row, col });
        }

        let flips: Vec<Position> = Direction::ALL
            .iter()
            .flat_map(|&dir| self.capture_line(row, col, dir, side))
            .collect();

        if flips.is_empty() {
            return Err(MoveError::NoCapture { row, col });
        }
        Ok(flips)
    }

    /// Places one piece and flips every captured line.
    /// Returns the flipped coordinates; on error the board is unchanged.
    pub fn apply_move(
        &mut self,
        row: usize,
        col: usize,
        side: Side,
    ) -> Result<Vec<Position>, MoveError> {
        let flips = self.flips_for(row, col, side)?;

        let me = side.to_cell();
        self.cells[row][col] = me;
        for pos in &flips {
            self.cells[pos.row as usize][pos.col as usize] = me;
        }

        Ok(flips)
    }

    /// Returns `(white_count, black_count)`.
    pub fn score(&self) -> (u8, u8) {
        self.cells
            .iter()
            .flatten()
            .fold((0, 0), |(white, black), cell| match cell {
                Cell::White => (white + 1, black),
                Cell::Black => (white, black + 1),
                Cell::Empty => (white, black),
            })
    }

    pub fn occupied_count(&self) -> u8 {
        let (white, black) = self.score();
        white + black
    }

    pub fn empty_count(&self) -> u8 {
        NUM_SQUARES as u8 - self.occupied_count()
    }

    /// True when neither side has a legal move.
    pub fn is_terminal(&self) -> bool {
        !self.has_legal_move(Side::White) && !self.has_legal_move(Side::Black)
    }

    /// True when `side` has no move but its opponent does.
    pub fn must_pass(&self, side: Side) -> bool {
        !self.has_legal_move(side) && self.has_legal_move(side.opponent())
    }

    /// Converts the board to row-major wire codes (0=empty, 1=white, 2=black).
    pub fn to_codes(&self) -> [u8; NUM_SQUARES] {
        let mut codes = [0u8; NUM_SQUARES];
        for (code, cell) in codes.iter_mut().zip(self.cells.iter().flatten()) {
            *code = cell.code();
        }
        codes
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}
