// Position allocator - first free grid slot for a new component
use crate::domain::canvas::{Component, GridSpec, Position, Size};

const MIN_ROWS: u32 = 10;
/// Largest occupancy matrix the allocator will build.
const MAX_CELLS: usize = 1 << 22;

/// Occupancy matrix of `rows x columns` cells.
struct Occupancy {
    columns: u32,
    rows: u32,
    cells: Vec<bool>,
}

impl Occupancy {
    /// `None` when the matrix would exceed `MAX_CELLS`.
    fn new(columns: u32, rows: u32) -> Option<Self> {
        let len = (columns as usize)
            .checked_mul(rows as usize)
            .filter(|len| *len <= MAX_CELLS)?;
        Some(Self {
            columns,
            rows,
            cells: vec![false; len],
        })
    }

    fn index(&self, col: u32, row: u32) -> usize {
        row as usize * self.columns as usize + col as usize
    }

    fn mark(&mut self, x: u32, y: u32, width: u32, rows: u32) {
        for row in y..y.saturating_add(rows).min(self.rows) {
            for col in x..x.saturating_add(width).min(self.columns) {
                let i = self.index(col, row);
                self.cells[i] = true;
            }
        }
    }

    /// Cells below the matrix are free; nothing has been placed there.
    fn is_free(&self, x: u32, y: u32, width: u32, rows: u32) -> bool {
        (y..y.saturating_add(rows).min(self.rows))
            .all(|row| (x..x + width).all(|col| !self.cells[self.index(col, row)]))
    }
}

/// Find the top-most, then left-most origin where a component of `size`
/// fits without overlapping any of `existing`.
///
/// `size.width` must not exceed `grid.columns`; callers clamp first. An
/// oversized width, or a layout too large to scan, falls through to a
/// fresh row below everything.
pub fn find_position(existing: &[Component], size: Size, grid: &GridSpec) -> Position {
    let needed_rows = grid.rows_for(size.height);
    let max_rows = existing
        .iter()
        .map(|c| c.footprint(grid).bottom())
        .max()
        .unwrap_or(0)
        .max(MIN_ROWS);

    if size.width <= grid.columns {
        if let Some(mut occupancy) = Occupancy::new(grid.columns, max_rows) {
            for component in existing {
                let footprint = component.footprint(grid);
                occupancy.mark(footprint.x, footprint.y, footprint.width, footprint.rows);
            }

            for y in 0..max_rows {
                for x in 0..=(grid.columns - size.width) {
                    if occupancy.is_free(x, y, size.width, needed_rows) {
                        tracing::trace!(x, y, width = size.width, rows = needed_rows, "slot found");
                        return Position::new(x, y);
                    }
                }
            }
        } else {
            tracing::warn!(
                columns = grid.columns,
                rows = max_rows,
                "layout too large to scan, appending below"
            );
        }
    }

    tracing::debug!(
        width = size.width,
        columns = grid.columns,
        "no free slot inside the grid, appending below"
    );
    Position::new(0, max_rows)
}
