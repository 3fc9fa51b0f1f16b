//! The expansion loop shared by all [Algorithm]s. Structured like the usual
//! [pathfinding astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html),
//! except that per-cell state lives in flat storage indexed like the grid and is kept after the
//! search returns so that the caller can inspect or animate it.
use grid_util::Point;
use log::{debug, info, warn};

use crate::frontier::FrontierEntry;
use crate::{reconstruct, Algorithm, Path, PathfindingError, PathingGrid};

/// Transient search fields of one cell. Reset to [Default] at the start of every search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellState {
    /// Only used by [Algorithm::Unweighted] to admit a cell at most once.
    pub visited: bool,
    pub cost_from_start: f64,
    pub heuristic_cost: f64,
    /// The cell this one was last reached from.
    pub predecessor: Option<Point>,
}

impl Default for CellState {
    fn default() -> CellState {
        CellState {
            visited: false,
            cost_from_start: f64::INFINITY,
            heuristic_cost: 0.0,
            predecessor: None,
        }
    }
}

impl CellState {
    pub fn total_cost(&self) -> f64 {
        self.cost_from_start + self.heuristic_cost
    }

    /// Whether the last search ever admitted this cell to its frontier.
    pub fn discovered(&self) -> bool {
        self.cost_from_start.is_finite()
    }
}

/// Reusable search state: per-cell [CellState]s and the visitation trace of the last search.
#[derive(Clone, Debug, Default)]
pub struct SearchContext {
    size: usize,
    start: Option<Point>,
    cells: Vec<CellState>,
    trace: Vec<Point>,
    expanded: usize,
}

impl SearchContext {
    pub fn new() -> SearchContext {
        SearchContext::default()
    }

    fn reset(&mut self, size: usize, start: Point) {
        self.size = size;
        self.start = Some(start);
        self.cells.clear();
        self.cells.resize(size * size, CellState::default());
        self.trace.clear();
        self.expanded = 0;
    }

    fn index(&self, point: &Point) -> Option<usize> {
        let in_bounds = point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.size
            && (point.y as usize) < self.size;
        in_bounds.then(|| point.y as usize * self.size + point.x as usize)
    }

    /// Start cell of the last search.
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// State the last search left `point` in.
    pub fn cell(&self, point: &Point) -> Option<&CellState> {
        self.index(point).and_then(|ix| self.cells.get(ix))
    }

    pub fn predecessor(&self, point: &Point) -> Option<Point> {
        self.cell(point).and_then(|state| state.predecessor)
    }

    /// Cells in the order the last search first admitted them to its frontier, starting with the
    /// start cell. Every cell appears at most once.
    pub fn trace(&self) -> &[Point] {
        &self.trace
    }

    /// Number of cells the last search expanded. Stale frontier entries are not counted.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Searches from `start` to `end` on `grid`. The search stops as soon as `end` is taken from
    /// the frontier; when the frontier runs dry [PathfindingError::NotFound] is returned and the
    /// exhausted state is left in place.
    pub fn find_path(
        &mut self,
        grid: &PathingGrid,
        start: Point,
        end: Point,
        algorithm: Algorithm,
    ) -> Result<Path, PathfindingError> {
        if start == end || !grid.in_bounds(&end) || !grid.can_move_to_simple(start) {
            return Err(PathfindingError::MissingEndpoints);
        }
        self.reset(grid.size(), start);

        let mut frontier = algorithm.frontier();
        let start_ix = grid.cell_index(&start);
        let start_state = CellState {
            visited: algorithm.uses_visited_guard(),
            cost_from_start: 0.0,
            heuristic_cost: algorithm.heuristic(&start, &end),
            predecessor: None,
        };
        self.cells[start_ix] = start_state;
        self.trace.push(start);
        frontier.push(start_ix, 0.0, start_state.total_cost());

        while let Some(FrontierEntry { index, cost }) = frontier.pop() {
            let current_state = self.cells[index];
            // We may have pushed a cell several times if we found a cheaper way to reach it.
            // Only the entry carrying the recorded cost is expanded, the others are discarded.
            if cost > current_state.cost_from_start {
                continue;
            }
            let current = grid.point_at(index);
            if current == end {
                let path = reconstruct(self, end);
                info!(
                    "{algorithm} found a path from {start} to {end} of length {:.2} after expanding {} cells",
                    path.total_length(),
                    self.expanded
                );
                return Ok(path);
            }
            self.expanded += 1;

            for (neighbor, move_cost) in grid.neighborhood_points_and_cost(&current) {
                let n_ix = grid.cell_index(&neighbor);
                let tentative_cost = current_state.cost_from_start + move_cost;
                let state = &mut self.cells[n_ix];
                if !algorithm.admits(state.visited, state.cost_from_start, tentative_cost) {
                    continue;
                }
                if !state.discovered() {
                    self.trace.push(neighbor);
                }
                state.visited |= algorithm.uses_visited_guard();
                state.cost_from_start = tentative_cost;
                state.heuristic_cost = algorithm.heuristic(&neighbor, &end);
                state.predecessor = Some(current);
                frontier.push(n_ix, tentative_cost, state.total_cost());
            }
        }
        debug!(
            "{algorithm} exhausted the frontier after expanding {} of {} discovered cells",
            self.expanded,
            self.trace.len()
        );
        if components_claim_reachable(grid, start, end) {
            warn!("Reachable goal {end} could not be pathed to from {start}, are the components correct?");
        } else {
            info!("{algorithm} found no path from {start} to {end}");
        }
        Err(PathfindingError::NotFound { start, end })
    }
}

/// Whether up-to-date components place `start` and `end` on the same component.
fn components_claim_reachable(grid: &PathingGrid, start: Point, end: Point) -> bool {
    !grid.components_dirty() && grid.reachable(&start, &end)
}

/// Runs a single search with a fresh [SearchContext]. Use [SearchContext::find_path] directly to
/// keep the visitation trace and the per-cell state.
pub fn find_path(
    grid: &PathingGrid,
    start: Point,
    end: Point,
    algorithm: Algorithm,
) -> Result<Path, PathfindingError> {
    SearchContext::new().find_path(grid, start, end, algorithm)
}
