//! Conway's Game of Life on a wrapping grid, stepped by a rate-adjustable runner.
//!
//! - [`Board`]: the grid, the step rule and the text form used by pattern files.
//! - [`Runner`]: a background tokio task that steps a shared board at an
//!   interval that may change while it runs, publishing [`RunnerEvent`]s.
//!
//! Rendering and input are left to the caller, which owns both values and
//! edits the board through [`lock_board`].

pub mod board;
pub mod config;
pub mod error;
pub mod pattern_file;
pub mod patterns;
pub mod runner;

pub use board::{lock_board, Board, SharedBoard};
pub use config::{interval_for_rate, rate_for_interval, Settings};
pub use error::{BoardError, ConfigError, FormatError, PatternFileError};
pub use patterns::{Pattern, PATTERNS};
pub use runner::{Runner, RunnerEvent};
