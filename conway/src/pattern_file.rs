// pattern_file.rs - Load and save boards as `.pat` text files

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::board::Board;
use crate::error::PatternFileError;

/// File extension used for saved patterns.
pub const PATTERN_EXTENSION: &str = "pat";

/// Write the board's text form to `path`, replacing any existing file.
pub fn save(path: impl AsRef<Path>, board: &Board) -> Result<(), PatternFileError> {
    let path = path.as_ref();
    fs::write(path, board.serialize())?;
    info!(path = %path.display(), population = board.population(), "pattern saved");
    Ok(())
}

/// Replace the board's cells with the pattern stored at `path`.
///
/// The board is unchanged if the file cannot be read or does not describe a
/// board of the same size.
pub fn load(path: impl AsRef<Path>, board: &mut Board) -> Result<(), PatternFileError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    if let Err(err) = board.deserialize(&text) {
        warn!(path = %path.display(), error = %err, "rejected pattern file");
        return Err(err.into());
    }
    info!(path = %path.display(), population = board.population(), "pattern loaded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatError;
    use tempfile::TempDir;

    #[test]
    fn saved_pattern_loads_back() {
        let dir = TempDir::new().expect("TempDir should create test directory");
        let path = dir.path().join(format!("glider.{PATTERN_EXTENSION}"));

        let mut board = Board::new(8, 6).unwrap();
        crate::patterns::Pattern::find("Glider").unwrap().stamp(&mut board, 2, 1);
        save(&path, &board).unwrap();

        let mut loaded = Board::new(8, 6).unwrap();
        load(&path, &mut loaded).unwrap();
        assert_eq!(loaded.serialize(), board.serialize());
    }

    #[test]
    fn reads_files_in_the_legacy_layout() {
        let dir = TempDir::new().expect("TempDir should create test directory");
        let path = dir.path().join("legacy.pat");
        fs::write(&path, "3 1 False True False ").unwrap();

        let mut board = Board::new(3, 1).unwrap();
        load(&path, &mut board).unwrap();
        assert!(board.cell(1, 0));
        assert_eq!(board.population(), 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().expect("TempDir should create test directory");
        let mut board = Board::new(2, 2).unwrap();
        let err = load(dir.path().join("absent.pat"), &mut board).unwrap_err();
        assert!(matches!(err, PatternFileError::Io(_)));
    }

    #[test]
    fn truncated_file_is_a_format_error_and_keeps_board() {
        let dir = TempDir::new().expect("TempDir should create test directory");
        let path = dir.path().join("short.pat");
        fs::write(&path, "2 2 True").unwrap();

        let mut board = Board::new(2, 2).unwrap();
        board.set_cell(1, 1, true);
        let err = load(&path, &mut board).unwrap_err();
        assert!(matches!(
            err,
            PatternFileError::Format(FormatError::TooFewCells { expected: 4, found: 1 })
        ));
        assert!(board.cell(1, 1));
        assert_eq!(board.population(), 1);
    }
}
