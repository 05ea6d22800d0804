//! Program grid
//!
//! The grid is the loaded source, one row per line and one cell per byte.
//! Source files need not be valid UTF-8. It never changes after loading, so
//! every thread reads it through a shared `Arc` without locking.

use std::path::Path;

use super::errors::LoadError;
use super::types::{Instruction, Position, START_MARKER};

/// Immutable grid of instruction bytes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramGrid {
    rows: Vec<Vec<u8>>,
    width: usize,
    start: Position,
}

impl ProgramGrid {
    /// Build a grid from source text
    pub fn from_source(source: &str) -> Self {
        Self::from_bytes(source.as_bytes())
    }

    /// Build a grid from raw source bytes
    ///
    /// Rows are split on `\n` or `\r\n`. The start position is the first `$`
    /// in row-major order, or the origin if the source has none.
    pub fn from_bytes(source: &[u8]) -> Self {
        let mut lines: Vec<&[u8]> = source.split(|&b| b == b'\n').collect();
        if lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        let rows: Vec<Vec<u8>> = lines
            .into_iter()
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line).to_vec())
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);

        let start = rows
            .iter()
            .enumerate()
            .find_map(|(y, row)| {
                row.iter()
                    .position(|&b| b == START_MARKER as u8)
                    .map(|x| Position::new(x as i64, y as i64))
            })
            .unwrap_or(Position::ORIGIN);

        Self { rows, width, start }
    }

    /// Read a source file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let source = std::fs::read(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let grid = Self::from_bytes(&source);
        tracing::debug!(
            path = %path.display(),
            width = grid.width(),
            height = grid.height(),
            start = %grid.start(),
            "loaded program"
        );
        Ok(grid)
    }

    /// Longest row length
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn start(&self) -> Position {
        self.start
    }

    /// Whether `pos` lies inside `[0, width) x [0, height)`
    ///
    /// Positions past the end of a short row are still inside the grid; they
    /// read as no-ops.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as u64) < self.width as u64
            && (pos.y as u64) < self.rows.len() as u64
    }

    /// Raw byte at `pos`, if the position holds one
    pub fn byte_at(&self, pos: Position) -> Option<u8> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let row = self.rows.get(pos.y as usize)?;
        row.get(pos.x as usize).copied()
    }

    /// Instruction at `pos`; anything unreadable is a no-op
    pub fn instruction_at(&self, pos: Position) -> Instruction {
        self.byte_at(pos)
            .map(|b| Instruction::decode(b as char))
            .unwrap_or(Instruction::NoOp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_use_longest_row() {
        let grid = ProgramGrid::from_source("ab\nabcde\n\nabc");
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 4);
    }

    #[test]
    fn test_crlf_terminators_are_not_part_of_rows() {
        let grid = ProgramGrid::from_source("$+.\r\n+++\r\n");
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.byte_at(Position::new(2, 0)), Some(b'.'));
    }

    #[test]
    fn test_out_of_range_reads_are_noops() {
        let grid = ProgramGrid::from_source("+\n+++++");
        let outside = [
            Position::new(-1, 0),
            Position::new(0, -1),
            Position::new(-5, -5),
            Position::new(5, 1),
            Position::new(0, 2),
            Position::new(i64::MAX, i64::MAX),
            // past the end of the short first row, still inside the grid
            Position::new(3, 0),
        ];
        for pos in outside {
            assert_eq!(grid.instruction_at(pos), Instruction::NoOp, "at {}", pos);
        }
        assert_eq!(grid.instruction_at(Position::new(4, 1)), Instruction::Incr);
    }

    #[test]
    fn test_contains_follows_rectangular_bounds() {
        let grid = ProgramGrid::from_source("+\n+++");
        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(2, 0)));
        assert!(!grid.contains(Position::new(3, 0)));
        assert!(!grid.contains(Position::new(0, 2)));
        assert!(!grid.contains(Position::new(-1, 1)));
    }

    #[test]
    fn test_start_is_first_marker_in_row_major_order() {
        let grid = ProgramGrid::from_source("   \n  $ $\n$");
        assert_eq!(grid.start(), Position::new(2, 1));
    }

    #[test]
    fn test_start_defaults_to_origin() {
        let grid = ProgramGrid::from_source("+++\n...");
        assert_eq!(grid.start(), Position::ORIGIN);
    }

    #[test]
    fn test_empty_source() {
        let grid = ProgramGrid::from_source("");
        assert_eq!(grid.width(), 0);
        assert_eq!(grid.height(), 0);
        assert!(!grid.contains(Position::ORIGIN));
    }

    #[test]
    fn test_columns_count_bytes() {
        // `é` is two bytes in UTF-8
        let grid = ProgramGrid::from_source("é+");
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.instruction_at(Position::new(0, 0)), Instruction::NoOp);
        assert_eq!(grid.instruction_at(Position::new(1, 0)), Instruction::NoOp);
        assert_eq!(grid.instruction_at(Position::new(2, 0)), Instruction::Incr);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let err = ProgramGrid::load("/definitely/not/here.snusp").unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.snusp"));
    }

    #[test]
    fn test_load_reads_file() {
        let path = std::env::temp_dir().join(format!("snusp-grid-{}.snusp", std::process::id()));
        std::fs::write(&path, "  $+.\n").unwrap();

        let grid = ProgramGrid::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(grid.start(), Position::new(2, 0));
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 1);
    }

    #[test]
    fn test_load_accepts_latin1_bytes() {
        let path = std::env::temp_dir().join(format!("snusp-latin1-{}.snusp", std::process::id()));
        std::fs::write(&path, b"$+++.  caf\xe9\n").unwrap();

        let grid = ProgramGrid::load(&path);
        std::fs::remove_file(&path).ok();

        let grid = grid.unwrap();
        assert_eq!(grid.width(), 11);
        assert_eq!(grid.height(), 1);
        assert_eq!(grid.byte_at(Position::new(10, 0)), Some(0xe9));
        assert_eq!(grid.instruction_at(Position::new(10, 0)), Instruction::NoOp);
        assert_eq!(grid.instruction_at(Position::new(4, 0)), Instruction::Write);
    }
}
