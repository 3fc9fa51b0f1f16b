use grid_util::Point;
use itertools::Itertools;

use crate::{euclidean_distance, SearchContext};

/// Ordered cells from start to end inclusive, with the summed Euclidean length of its steps.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    cells: Vec<Point>,
    total_length: f64,
}

impl Path {
    /// Sum of the Euclidean distances between consecutive cells.
    pub fn length_of(cells: &[Point]) -> f64 {
        cells
            .iter()
            .tuple_windows()
            .map(|(p1, p2)| euclidean_distance(p1, p2))
            .sum()
    }

    pub fn from_cells(cells: Vec<Point>) -> Path {
        let total_length = Path::length_of(&cells);
        Path {
            cells,
            total_length,
        }
    }

    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Point> {
        self.cells
    }

    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Number of cells, both terminals included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves.
    pub fn hops(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Point> {
        self.cells.first().copied()
    }

    pub fn end(&self) -> Option<Point> {
        self.cells.last().copied()
    }

    /// Whether every consecutive pair of cells is 8-adjacent.
    pub fn is_connected(&self) -> bool {
        self.cells.iter().tuple_windows().all(|(p1, p2)| {
            let (dx, dy) = ((p1.x - p2.x).abs(), (p1.y - p2.y).abs());
            dx <= 1 && dy <= 1 && (dx, dy) != (0, 0)
        })
    }
}

/// Follows the predecessor links the last search of `context` left behind, from `end` back to
/// the start, and returns the cells in start to end order. The length accumulates over the
/// (child, parent) pairs met on the way back. The path is empty when the chain does not lead to
/// the start of that search.
pub fn reconstruct(context: &SearchContext, end: Point) -> Path {
    // A chain can never be longer than the grid; the bound guards against corrupted links.
    let mut cells: Vec<Point> = std::iter::successors(Some(end), |p| context.predecessor(p))
        .take(context.cell_count() + 1)
        .collect();
    if context.start().is_none() || cells.last().copied() != context.start() {
        return Path::default();
    }
    let total_length = Path::length_of(&cells);
    cells.reverse();
    Path {
        cells,
        total_length,
    }
}
