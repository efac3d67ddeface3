//! Fixed rows x columns placement.

const DEFAULT_ROWS: u16 = 16;
const DEFAULT_COLUMNS: u16 = 3;

/// Grid dimensions for the rendered page.
///
/// Tile `i` is placed at row `i / columns`, column `i % columns`. Tiles past
/// `rows * columns` are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Number of rows.
    pub rows: u16,
    /// Number of columns.
    pub columns: u16,
}

impl GridLayout {
    /// Creates a layout.
    #[must_use]
    pub fn new(rows: u16, columns: u16) -> Self {
        Self { rows, columns }
    }

    /// Maximum number of tiles shown.
    #[must_use]
    pub fn capacity(&self) -> usize {
        usize::from(self.rows) * usize::from(self.columns)
    }

    /// `(row, column)` of tile `index`, or `None` if it does not fit.
    #[must_use]
    pub fn position(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.capacity() {
            return None;
        }
        let columns = usize::from(self.columns);
        Some((index / columns, index % columns))
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLUMNS)
    }
}
