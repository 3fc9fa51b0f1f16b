use core::fmt;
use grid_util::Point;
use log::info;

use crate::{
    Algorithm, CellState, GridConfig, Path, PathfindingError, PathingGrid, SearchContext,
};

/// Outcome of [Pathfinder::find_path] as consumed by a front end.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchReport {
    pub algorithm: Algorithm,
    pub found: bool,
    /// Start to end inclusive; empty when no path was found.
    pub path: Vec<Point>,
    pub total_length: f64,
    /// Cells in the order the search discovered them.
    pub visitation_trace: Vec<Point>,
}

/// A pathfinding session: owns the grid, the search state, the selected algorithm and the most
/// recent result. Any change to the grid invalidates that result.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    grid: PathingGrid,
    context: SearchContext,
    algorithm: Algorithm,
    last_report: Option<SearchReport>,
}

impl Pathfinder {
    pub fn new(size: usize) -> Result<Pathfinder, PathfindingError> {
        Pathfinder::with_config(&GridConfig::new(size))
    }

    pub fn with_config(config: &GridConfig) -> Result<Pathfinder, PathfindingError> {
        Ok(Pathfinder {
            grid: PathingGrid::with_config(config)?,
            context: SearchContext::new(),
            algorithm: config.algorithm,
            last_report: None,
        })
    }

    pub fn grid(&self) -> &PathingGrid {
        &self.grid
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn start(&self) -> Option<Point> {
        self.grid.start()
    }

    pub fn end(&self) -> Option<Point> {
        self.grid.end()
    }

    pub fn is_obstacle(&self, point: Point) -> Result<bool, PathfindingError> {
        Ok(self.grid.is_obstacle(point)?)
    }

    fn invalidate_if(&mut self, changed: bool) {
        if changed {
            self.last_report = None;
        }
    }

    /// See [PathingGrid::set_start].
    pub fn set_start(&mut self, point: Point) -> Result<(), PathfindingError> {
        let changed = self.grid.set_start(point)?;
        self.invalidate_if(changed);
        Ok(())
    }

    pub fn clear_start(&mut self) {
        let changed = self.grid.clear_start();
        self.invalidate_if(changed);
    }

    /// See [PathingGrid::set_end].
    pub fn set_end(&mut self, point: Point) -> Result<(), PathfindingError> {
        let changed = self.grid.set_end(point)?;
        self.invalidate_if(changed);
        Ok(())
    }

    pub fn clear_end(&mut self) {
        let changed = self.grid.clear_end();
        self.invalidate_if(changed);
    }

    /// Flips the obstacle state of `point`, returning the new state.
    pub fn toggle_obstacle(&mut self, point: Point) -> Result<bool, PathfindingError> {
        let blocked = self.grid.toggle_obstacle(point)?;
        self.invalidate_if(true);
        Ok(blocked)
    }

    /// Clears obstacles, terminals and the last result. The selected algorithm is kept.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.context = SearchContext::new();
        self.last_report = None;
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        info!("Algorithm set to: {algorithm}");
        self.algorithm = algorithm;
    }

    /// Searches between the configured start and end. Not finding a path is a regular outcome
    /// reported with `found == false`; only missing endpoints are an error.
    pub fn find_path(&mut self, algorithm: Algorithm) -> Result<SearchReport, PathfindingError> {
        let (start, end) = match (self.grid.start(), self.grid.end()) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                info!("Please set start and end cells first");
                return Err(PathfindingError::MissingEndpoints);
            }
        };
        info!("Finding path using {algorithm}...");
        let path = match self.context.find_path(&self.grid, start, end, algorithm) {
            Ok(path) => path,
            Err(PathfindingError::NotFound { .. }) => Path::default(),
            Err(e) => return Err(e),
        };
        let report = SearchReport {
            algorithm,
            found: !path.is_empty(),
            total_length: path.total_length(),
            path: path.into_cells(),
            visitation_trace: self.context.trace().to_vec(),
        };
        self.last_report = Some(report.clone());
        Ok(report)
    }

    /// [find_path](Self::find_path) with the selected algorithm.
    pub fn search(&mut self) -> Result<SearchReport, PathfindingError> {
        self.find_path(self.algorithm)
    }

    /// The result of the last search, unless the grid changed since.
    pub fn last_report(&self) -> Option<&SearchReport> {
        self.last_report.as_ref()
    }

    /// Discovery order of the last search.
    pub fn visitation_trace(&self) -> &[Point] {
        self.context.trace()
    }

    /// Transient search state the last search left at `point`.
    pub fn cell_state(&self, point: Point) -> Option<&CellState> {
        self.context.cell(&point)
    }

    /// Connectivity of two cells, regenerating components first if obstacles were added.
    pub fn reachable(&mut self, start: Point, goal: Point) -> bool {
        self.grid.update();
        self.grid.reachable(&start, &goal)
    }
}

impl fmt::Display for Pathfinder {
    /// The grid with the last path marked by `*`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let path = self
            .last_report
            .as_ref()
            .map(|report| report.path.as_slice())
            .unwrap_or_default();
        self.grid.write_rows(f, path)
    }
}
