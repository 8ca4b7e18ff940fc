// patterns.rs - Named seed patterns and a pseudo-random fill

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::board::Board;

pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i64, i64)], // (x, y) offsets from the pattern origin
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top half
            (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
            (0, 2), (5, 2), (7, 2), (12, 2),
            (0, 3), (5, 3), (7, 3), (12, 3),
            (0, 4), (5, 4), (7, 4), (12, 4),
            (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
            // Bottom half (mirrored)
            (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
            (0, 8), (5, 8), (7, 8), (12, 8),
            (0, 9), (5, 9), (7, 9), (12, 9),
            (0, 10), (5, 10), (7, 10), (12, 10),
            (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (0, 4), (1, 4), (0, 5), (1, 5),
            (10, 4), (10, 5), (10, 6), (11, 3), (11, 7), (12, 2), (12, 8),
            (13, 2), (13, 8), (14, 5), (15, 3), (15, 7), (16, 4), (16, 5),
            (16, 6), (17, 5), (20, 2), (20, 3), (20, 4), (21, 2), (21, 3),
            (21, 4), (22, 1), (22, 5), (24, 0), (24, 1), (24, 5), (24, 6),
            (34, 2), (34, 3), (35, 2), (35, 3),
        ],
    },
];

impl Pattern {
    /// Look a pattern up by name, ignoring case.
    pub fn find(name: &str) -> Option<&'static Pattern> {
        PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// (width, height) of the pattern's bounding box.
    pub fn extent(&self) -> (i64, i64) {
        let width = self.cells.iter().map(|&(x, _)| x + 1).max().unwrap_or(0);
        let height = self.cells.iter().map(|&(_, y)| y + 1).max().unwrap_or(0);
        (width, height)
    }

    /// Set the pattern's cells live with its origin at `(x, y)`. Other cells are untouched.
    pub fn stamp(&self, board: &mut Board, x: i64, y: i64) {
        for &(dx, dy) in self.cells {
            board.set_cell(x + dx, y + dy, true);
        }
    }

    /// Clear the board and place the pattern in its middle.
    pub fn place_centered(&self, board: &mut Board) {
        board.clear();
        let (width, height) = self.extent();
        let x = (board.width() as i64 - width) / 2;
        let y = (board.height() as i64 - height) / 2;
        self.stamp(board, x, y);
    }
}

/// Clear the board and make roughly a third of the cells live.
///
/// The same seed always produces the same board.
pub fn fill_random(board: &mut Board, seed: u64) {
    board.clear();

    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    let mut state = hasher.finish();

    for y in 0..board.height() as i64 {
        for x in 0..board.width() as i64 {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            board.set_cell(x, y, (state >> 33) % 3 == 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_has_a_unique_name() {
        for (i, a) in PATTERNS.iter().enumerate() {
            for b in &PATTERNS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn find_ignores_case() {
        assert_eq!(Pattern::find("glider").map(|p| p.name), Some("Glider"));
        assert!(Pattern::find("spaceship").is_none());
    }

    #[test]
    fn stamp_places_cells_at_origin() {
        let mut board = Board::new(10, 10).unwrap();
        let blinker = Pattern::find("Blinker").unwrap();
        blinker.stamp(&mut board, 4, 4);
        assert!(board.cell(5, 4));
        assert!(board.cell(5, 5));
        assert!(board.cell(5, 6));
        assert_eq!(board.population(), 3);
    }

    #[test]
    fn stamp_wraps_around_edges() {
        let mut board = Board::new(5, 5).unwrap();
        Pattern::find("Blinker").unwrap().stamp(&mut board, 3, 4);
        assert!(board.cell(4, 4));
        assert!(board.cell(4, 0));
        assert!(board.cell(4, 1));
    }

    #[test]
    fn centred_patterns_fit_the_default_board() {
        for pattern in PATTERNS {
            let mut board = Board::default();
            pattern.place_centered(&mut board);
            assert_eq!(board.population(), pattern.cells.len(), "{}", pattern.name);
        }
    }

    #[test]
    fn pulsar_has_period_three() {
        let mut board = Board::new(24, 24).unwrap();
        Pattern::find("Pulsar").unwrap().place_centered(&mut board);
        let start = board.clone();
        board.step();
        assert_ne!(board.serialize(), start.serialize());
        board.step();
        board.step();
        assert_eq!(board.serialize(), start.serialize());
    }

    #[test]
    fn random_fill_is_deterministic_per_seed() {
        let mut a = Board::new(30, 20).unwrap();
        let mut b = Board::new(30, 20).unwrap();
        fill_random(&mut a, 7);
        fill_random(&mut b, 7);
        assert_eq!(a, b);

        let live = a.population();
        assert!(live > 100 && live < 300, "population {live}");
    }
}
