// board.rs - Toroidal Game of Life grid

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::trace;

use crate::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::{BoardError, FormatError};

/// Board shared between a foreground editor and a [`Runner`](crate::Runner).
///
/// A step holds the lock for the whole generation, so edits land either before
/// or after it. A guard may be held across calls into the runner.
pub type SharedBoard = Arc<Mutex<Board>>;

/// Lock a shared board.
///
/// A poisoned lock means `step` panicked on another thread. The grid itself is
/// always structurally whole, so the guard is recovered rather than propagated.
pub fn lock_board(board: &Mutex<Board>) -> MutexGuard<'_, Board> {
    board.lock().unwrap_or_else(PoisonError::into_inner)
}

// Offsets of the eight neighbours, row above first
const NEIGHBORS: [(i64, i64); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// A fixed-size grid whose edges wrap around to the opposite side.
///
/// Cells are addressed by logical `(x, y)` coordinates. Any integer is valid:
/// each axis is reduced with a Euclidean remainder, so `(-1, 0)` is the last
/// column of the first row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<bool>, // row-major, always width * height long
    generation: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cells: vec![false; DEFAULT_WIDTH * DEFAULT_HEIGHT],
            generation: 0,
        }
    }
}

impl Board {
    /// Create an empty board.
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::EmptyDimensions { width, height });
        }
        // Coordinates are wrapped in i64, and the grid must fit one allocation
        let cell_count = width
            .checked_mul(height)
            .filter(|&n| n <= isize::MAX as usize)
            .filter(|_| width as u64 <= i64::MAX as u64 && height as u64 <= i64::MAX as u64)
            .ok_or(BoardError::TooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![false; cell_count],
            generation: 0,
        })
    }

    /// Wrap the board in the mutex a runner expects.
    pub fn into_shared(self) -> SharedBoard {
        Arc::new(Mutex::new(self))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Steps taken since the board was created, cleared or loaded.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn cell(&self, x: i64, y: i64) -> bool {
        self.cells[self.index(x, y)]
    }

    pub fn set_cell(&mut self, x: i64, y: i64, state: bool) {
        let index = self.index(x, y);
        self.cells[index] = state;
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
        self.generation = 0;
    }

    /// Advance one generation.
    ///
    /// Neighbour counts are taken from a snapshot of the previous generation,
    /// so no cell sees a neighbour that was already updated in this step.
    pub fn step(&mut self) {
        let old = self.clone();

        for y in 0..self.height as i64 {
            for x in 0..self.width as i64 {
                let count = old.live_neighbors(x, y);
                let next_state = match (old.cell(x, y), count) {
                    (true, 2) | (true, 3) => true, // Survival
                    (false, 3)            => true, // Birth
                    _                     => false, // Under/overpopulation or stays dead
                };
                self.set_cell(x, y, next_state);
            }
        }

        self.generation += 1;
        trace!(generation = self.generation, "board stepped");
    }

    fn live_neighbors(&self, x: i64, y: i64) -> usize {
        NEIGHBORS
            .iter()
            .filter(|&&(dx, dy)| self.cell(x + dx, y + dy))
            .count()
    }

    /// Text form: width, height, then every cell in row-major order.
    ///
    /// Cells are written as `True`/`False` so files are interchangeable with
    /// pattern files produced by earlier versions of the program.
    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity(16 + self.cells.len() * 6);
        out.push_str(&format!("{} {} ", self.width, self.height));
        for &alive in &self.cells {
            out.push_str(if alive { "True " } else { "False " });
        }
        out
    }

    /// Replace the grid with one read from [`serialize`](Self::serialize) output.
    ///
    /// The header must match this board's dimensions. On error the board is
    /// left untouched.
    pub fn deserialize(&mut self, text: &str) -> Result<(), FormatError> {
        let mut tokens = text.split_whitespace();

        let width = parse_dimension(tokens.next(), "width")?;
        let height = parse_dimension(tokens.next(), "height")?;
        if width != self.width || height != self.height {
            return Err(FormatError::DimensionMismatch {
                expected_width: self.width,
                expected_height: self.height,
                width,
                height,
            });
        }

        let expected = self.cells.len();
        let mut cells = Vec::with_capacity(expected);
        for (index, token) in tokens.take(expected).enumerate() {
            cells.push(parse_cell(token).ok_or_else(|| FormatError::InvalidCell {
                index,
                token: token.to_string(),
            })?);
        }
        if cells.len() < expected {
            return Err(FormatError::TooFewCells { expected, found: cells.len() });
        }

        self.cells = cells;
        self.generation = 0;
        Ok(())
    }

    fn index(&self, x: i64, y: i64) -> usize {
        let col = x.rem_euclid(self.width as i64) as usize;
        let row = y.rem_euclid(self.height as i64) as usize;
        row * self.width + col
    }
}

fn parse_dimension(token: Option<&str>, field: &'static str) -> Result<usize, FormatError> {
    let token = token.ok_or(FormatError::MissingHeader(field))?;
    token.parse().map_err(|_| FormatError::InvalidHeader {
        field,
        token: token.to_string(),
    })
}

fn parse_cell(token: &str) -> Option<bool> {
    if token.eq_ignore_ascii_case("true") {
        Some(true)
    } else if token.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Console rendering: `X` for live cells, blank for dead, one line per row.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for &alive in row {
                write!(f, "{} ", if alive { 'X' } else { ' ' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
