use crate::matrix::ModuleMatrix;

/// Side of a finder pattern, in modules.
pub const FINDER_SIZE: usize = 7;

/// Which part of the symbol a module belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Zone {
    Ordinary,
    FinderTopLeft,
    FinderTopRight,
    FinderBottomLeft,
}

impl Zone {
    pub fn is_finder(self) -> bool {
        self != Zone::Ordinary
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Module {
    pub is_dark: bool,
    pub zone: Zone,
}

/// Zone of `(row, col)` in an `n`×`n` grid.
pub fn zone_of(n: usize, row: usize, col: usize) -> Zone {
    let top = row < FINDER_SIZE;
    let left = col < FINDER_SIZE;
    let right = col + FINDER_SIZE >= n;
    let bottom = row + FINDER_SIZE >= n;
    match (top, bottom, left, right) {
        (true, _, true, _) => Zone::FinderTopLeft,
        (true, _, _, true) => Zone::FinderTopRight,
        (_, true, true, _) => Zone::FinderBottomLeft,
        _ => Zone::Ordinary,
    }
}

/// Classifies a module straight from the encoder matrix.
pub fn classify(matrix: &ModuleMatrix, row: usize, col: usize) -> Module {
    Module {
        is_dark: matrix.is_dark(row, col),
        zone: zone_of(matrix.size(), row, col),
    }
}
