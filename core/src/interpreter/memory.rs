//! Shared memory cell store
//!
//! A sparse map from memory coordinate to byte. Every thread of a run holds
//! the same store; each `get` or `set` takes the store-wide lock exactly once,
//! so an accumulating `set` is atomic with respect to every other access.

use parking_lot::RwLock;
use std::collections::HashMap;

use super::types::Position;

#[derive(Debug, Default)]
pub struct MemoryStore {
    cells: RwLock<HashMap<Position, u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the cell at `pos`; unset cells read 0
    pub fn get(&self, pos: Position) -> u8 {
        self.cells.read().get(&pos).copied().unwrap_or(0)
    }

    /// Write `value` into the cell at `pos`
    ///
    /// With `overwrite` the cell becomes `value mod 256`, otherwise `value` is
    /// added to the current contents modulo 256. Negative values wrap.
    pub fn set(&self, pos: Position, value: i64, overwrite: bool) {
        let mut cells = self.cells.write();
        let cell = cells.entry(pos).or_insert(0);
        *cell = if overwrite {
            wrap(value)
        } else {
            wrap(i64::from(*cell).wrapping_add(value))
        };
    }

    /// All cells that were ever written, ordered by row then column
    pub fn snapshot(&self) -> Vec<(Position, u8)> {
        let mut cells: Vec<(Position, u8)> = self
            .cells
            .read()
            .iter()
            .map(|(pos, value)| (*pos, *value))
            .collect();
        cells.sort_by_key(|(pos, _)| (pos.y, pos.x));
        cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.read().is_empty()
    }
}

fn wrap(value: i64) -> u8 {
    value.rem_euclid(256) as u8
}
