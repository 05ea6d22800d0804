//! Headings and the two mirror rotations

use serde::{Deserialize, Serialize};

/// Heading of an instruction pointer
///
/// Only the four cardinal headings exist, so the mirror rotations below are
/// total functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Unit step `(dx, dy)` for this heading; y grows downwards
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    /// Rotation applied by the `\` mirror
    pub fn lurd(self) -> Self {
        match self {
            Direction::Left => Direction::Up,
            Direction::Up => Direction::Left,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Right,
        }
    }

    /// Rotation applied by the `/` mirror
    pub fn ruld(self) -> Self {
        match self {
            Direction::Left => Direction::Down,
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Up,
            Direction::Down => Direction::Left,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    #[test]
    fn test_lurd_table() {
        assert_eq!(Direction::Left.lurd(), Direction::Up);
        assert_eq!(Direction::Up.lurd(), Direction::Left);
        assert_eq!(Direction::Right.lurd(), Direction::Down);
        assert_eq!(Direction::Down.lurd(), Direction::Right);
    }

    #[test]
    fn test_ruld_table() {
        assert_eq!(Direction::Left.ruld(), Direction::Down);
        assert_eq!(Direction::Up.ruld(), Direction::Right);
        assert_eq!(Direction::Right.ruld(), Direction::Up);
        assert_eq!(Direction::Down.ruld(), Direction::Left);
    }

    #[test]
    fn test_each_mirror_is_an_involution() {
        for dir in ALL {
            assert_eq!(dir.lurd().lurd(), dir);
            assert_eq!(dir.ruld().ruld(), dir);
        }
    }

    #[test]
    fn test_both_mirrors_reverse_heading() {
        for dir in ALL {
            assert_eq!(dir.lurd().ruld(), dir.reversed());
            assert_eq!(dir.ruld().lurd(), dir.reversed());
        }
    }

    #[test]
    fn test_deltas_are_unit_steps() {
        for dir in ALL {
            let (dx, dy) = dir.delta();
            assert_eq!(dx.abs() + dy.abs(), 1);
            let (rx, ry) = dir.reversed().delta();
            assert_eq!((dx + rx, dy + ry), (0, 0));
        }
    }
}
