//! Squares, pieces, and the 8x8 board.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{Faction, PieceClass};

/// Width and height of the board.
pub const BOARD_SIZE: u8 = 8;

/// Number of cells on the board.
pub const CELL_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// Starting layout, row 0 first. Uppercase is defender, lowercase pathogen.
pub const INITIAL_LAYOUT: [&str; 8] = [
    "rnbqkbnr", "pppppppp", "........", "........", "........", "........", "PPPPPPPP",
    "RNBQKBNR",
];

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    /// Row, 0 at the pathogen side.
    pub row: u8,
    /// Column.
    pub col: u8,
}

impl Square {
    /// Create a square. Bounds are checked by [`Square::is_on_board`].
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Whether the square lies within the 8x8 board.
    #[must_use]
    pub const fn is_on_board(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Absolute column and row deltas to `other`.
    #[must_use]
    pub const fn deltas(self, other: Square) -> (u8, u8) {
        (self.col.abs_diff(other.col), self.row.abs_diff(other.row))
    }

    /// Chebyshev (king-move) distance to `other`.
    #[must_use]
    pub fn distance(self, other: Square) -> u8 {
        let (dx, dy) = self.deltas(other);
        dx.max(dy)
    }

    /// Square shifted by a signed offset, if it stays on the board.
    #[must_use]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        let square = Square::new(row, col);
        square.is_on_board().then_some(square)
    }

    /// Row-major cell index.
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        (self.row as usize) * (BOARD_SIZE as usize) + (self.col as usize)
    }

    /// Square for a row-major cell index.
    #[must_use]
    pub(crate) fn from_index(index: usize) -> Self {
        let size = usize::from(BOARD_SIZE);
        #[allow(clippy::cast_possible_truncation)]
        Square::new((index / size) as u8, (index % size) as u8)
    }

    /// Every square on the board in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..CELL_COUNT).map(Square::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Identity of a placed piece, never reused within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u16);

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    /// Identity used to key status flags and cooldowns.
    pub id: PieceId,
    /// Owner.
    pub faction: Faction,
    /// Movement class.
    pub class: PieceClass,
}

impl Piece {
    /// Piece code: chess letter, uppercase for defender.
    #[must_use]
    pub fn code(&self) -> char {
        let letter = self.class.letter();
        match self.faction {
            Faction::Defender => letter,
            Faction::Pathogen => letter.to_ascii_lowercase(),
        }
    }

    /// Display name, e.g. "marker protein".
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.class.display_name(self.faction)
    }
}

/// Layout parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The layout does not have exactly eight rows.
    #[error("layout has {0} rows, expected 8")]
    RowCount(usize),
    /// A row does not have exactly eight cells.
    #[error("layout row {row} has {len} cells, expected 8")]
    RowLength {
        /// Offending row.
        row: usize,
        /// Cells found.
        len: usize,
    },
    /// A cell is neither '.' nor a piece letter.
    #[error("unknown piece code '{code}' at row {row}")]
    UnknownCode {
        /// Offending row.
        row: usize,
        /// Offending character.
        code: char,
    },
}

/// The 8x8 grid. Each cell holds at most one piece.
#[allow(missing_copy_implementations)] // 64 cells, cloned explicitly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Cells in row-major order.
    cells: [Option<Piece>; CELL_COUNT],
    /// Next identity handed out by [`Board::spawn`].
    next_id: u16,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// A board with no pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cells: [None; CELL_COUNT],
            next_id: 0,
        }
    }

    /// The standard starting position.
    #[must_use]
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for (row, line) in INITIAL_LAYOUT.iter().enumerate() {
            for (col, code) in line.chars().enumerate() {
                if let Some((faction, class)) = parse_code(code) {
                    #[allow(clippy::cast_possible_truncation)]
                    let square = Square::new(row as u8, col as u8);
                    board.spawn(square, faction, class);
                }
            }
        }
        board
    }

    /// Build a board from eight row strings (row 0 first). `.` is empty.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] if the shape or a piece code is invalid.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, LayoutError> {
        if rows.len() != usize::from(BOARD_SIZE) {
            return Err(LayoutError::RowCount(rows.len()));
        }

        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.as_ref().chars().collect();
            if cells.len() != usize::from(BOARD_SIZE) {
                return Err(LayoutError::RowLength {
                    row,
                    len: cells.len(),
                });
            }
            for (col, code) in cells.into_iter().enumerate() {
                if code == '.' {
                    continue;
                }
                let (faction, class) =
                    parse_code(code).ok_or(LayoutError::UnknownCode { row, code })?;
                #[allow(clippy::cast_possible_truncation)]
                let square = Square::new(row as u8, col as u8);
                board.spawn(square, faction, class);
            }
        }
        Ok(board)
    }

    /// Piece on a square, if any. Off-board squares are empty.
    #[must_use]
    pub fn get(&self, square: Square) -> Option<Piece> {
        if square.is_on_board() {
            self.cells[square.index()]
        } else {
            None
        }
    }

    /// Whether the square is on the board and holds no piece.
    #[must_use]
    pub fn is_empty(&self, square: Square) -> bool {
        square.is_on_board() && self.cells[square.index()].is_none()
    }

    /// Place a new piece with a fresh identity, replacing nothing.
    ///
    /// Returns `None` if the square is off the board or occupied, or if the
    /// board has run out of identities.
    pub fn spawn(&mut self, square: Square, faction: Faction, class: PieceClass) -> Option<Piece> {
        let piece = self.next_piece(square, faction, class)?;
        self.place(square, piece);
        Some(piece)
    }

    /// The piece [`Board::spawn`] would create on `square`, without placing it.
    #[must_use]
    pub fn next_piece(&self, square: Square, faction: Faction, class: PieceClass) -> Option<Piece> {
        if !self.is_empty(square) {
            return None;
        }
        // The last identity is never handed out, so `next_id` can always advance.
        self.next_id.checked_add(1)?;
        Some(Piece {
            id: PieceId(self.next_id),
            faction,
            class,
        })
    }

    /// Put a piece from [`Board::next_piece`] on its square.
    pub(crate) fn place(&mut self, square: Square, piece: Piece) {
        if let Some(cell) = self.cells.get_mut(square.index()) {
            *cell = Some(piece);
            self.next_id = self.next_id.max(piece.id.0.saturating_add(1));
        }
    }

    #[cfg(test)]
    pub(crate) fn set_next_id(&mut self, id: u16) {
        self.next_id = id;
    }

    /// Move the piece on `from` to `to`, returning whatever stood on `to`.
    ///
    /// Does nothing and returns `None` if `from` is empty or either square is
    /// off the board.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        if !from.is_on_board() || !to.is_on_board() || from == to {
            return None;
        }
        let piece = self.cells[from.index()].take()?;
        self.cells[to.index()].replace(piece)
    }

    /// Square currently holding the piece with `id`.
    #[must_use]
    pub fn locate(&self, id: PieceId) -> Option<Square> {
        self.cells
            .iter()
            .position(|cell| cell.is_some_and(|p| p.id == id))
            .map(Square::from_index)
    }

    /// Iterate over all occupied squares.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.map(|piece| (Square::from_index(idx), piece)))
    }

    /// Iterate over the pieces of one faction.
    pub fn pieces_of(&self, faction: Faction) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.faction == faction)
    }

    /// Number of pieces a faction has on the board.
    #[must_use]
    pub fn count(&self, faction: Faction) -> usize {
        self.pieces_of(faction).count()
    }

    /// Square of the faction's core, if it is still on the board.
    #[must_use]
    pub fn core_of(&self, faction: Faction) -> Option<Square> {
        self.pieces_of(faction)
            .find(|(_, p)| p.class == PieceClass::Core)
            .map(|(sq, _)| sq)
    }

    /// Raw grid, row-major.
    #[must_use]
    pub fn cells(&self) -> &[Option<Piece>] {
        &self.cells
    }

    /// Rows as piece-code strings, `.` for empty.
    #[must_use]
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(usize::from(BOARD_SIZE))
            .map(|row| row.iter().map(|cell| cell.map_or('.', |p| p.code())).collect())
            .collect()
    }

    /// Squares strictly between `from` and `to` on a straight or diagonal line.
    ///
    /// Returns an empty list when the squares are not aligned or adjacent.
    #[must_use]
    pub fn between(from: Square, to: Square) -> Vec<Square> {
        let (dx, dy) = from.deltas(to);
        let aligned = dx == 0 || dy == 0 || dx == dy;
        if !aligned || from == to {
            return Vec::new();
        }
        let step_row = signum(from.row, to.row);
        let step_col = signum(from.col, to.col);
        let steps = dx.max(dy);

        let mut path = Vec::with_capacity(usize::from(steps.saturating_sub(1)));
        let mut current = from;
        for _ in 1..steps {
            match current.offset(step_row, step_col) {
                Some(next) => {
                    path.push(next);
                    current = next;
                }
                None => break,
            }
        }
        path
    }
}

/// Direction of travel from `a` to `b` along one axis.
fn signum(a: u8, b: u8) -> i8 {
    match a.cmp(&b) {
        std::cmp::Ordering::Less => 1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => -1,
    }
}

/// Faction and class for a piece code character.
fn parse_code(code: char) -> Option<(Faction, PieceClass)> {
    let class = PieceClass::from_letter(code)?;
    let faction = if code.is_ascii_uppercase() {
        Faction::Defender
    } else {
        Faction::Pathogen
    };
    Some((faction, class))
}
