//! # grid_pathfinder
//!
//! Pathfinding on a square, 8-connected grid with blocked cells. Three interchangeable
//! strategies share a single expansion loop:
//! - [Algorithm::Unweighted]: [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search),
//!   minimal number of moves;
//! - [Algorithm::ShortestPath]: [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
//!   over the geometric move cost (1 for straight moves, √2 for diagonal moves);
//! - [Algorithm::HeuristicShortestPath]: [A*](https://en.wikipedia.org/wiki/A*_search_algorithm)
//!   guided by the Manhattan distance to the goal.
//!
//! Diagonal moves never cut corners: a diagonal step is refused when either of the two cells
//! it passes between is blocked. Besides the final path every search records the order in
//! which cells were discovered, which a front end can replay.
//!
//! ```
//! use grid_pathfinder::{Algorithm, Pathfinder};
//! use grid_util::Point;
//!
//! let mut pathfinder = Pathfinder::new(5).unwrap();
//! pathfinder.set_start(Point::new(0, 0)).unwrap();
//! pathfinder.set_end(Point::new(4, 4)).unwrap();
//! let report = pathfinder.find_path(Algorithm::HeuristicShortestPath).unwrap();
//! assert!(report.found);
//! assert_eq!(report.path.len(), 5);
//! ```
mod algorithm;
mod config;
mod error;
pub mod frontier;
pub mod path;
pub mod pathfinder;
pub mod pathing_grid;
pub mod search;

pub use algorithm::{Algorithm, ParseAlgorithmError};
pub use config::GridConfig;
pub use error::{ConfigurationError, PathfindingError};
pub use path::{reconstruct, Path};
pub use pathfinder::{Pathfinder, SearchReport};
pub use pathing_grid::PathingGrid;
pub use search::{find_path, CellState, SearchContext};

use grid_util::Point;

/// Side length of the grid used when nothing else is configured.
pub const DEFAULT_GRID_SIZE: usize = 25;

/// Inline capacity of neighbour lists; a cell has at most 8 neighbours.
pub const N_SMALLVEC_SIZE: usize = 8;

/// Neighbour offsets in expansion order: `dx` major, `dy` minor. The visitation trace depends on
/// this order.
pub const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Cost of a move by (`dx`, `dy`): 1 for straight moves, √2 for diagonal ones.
pub fn step_cost(dx: i32, dy: i32) -> f64 {
    let (dx, dy) = (f64::from(dx), f64::from(dy));
    (dx * dx + dy * dy).sqrt()
}

/// Euclidean distance between two points.
pub fn euclidean_distance(p1: &Point, p2: &Point) -> f64 {
    let dx = f64::from(p1.x) - f64::from(p2.x);
    let dy = f64::from(p1.y) - f64::from(p2.y);
    (dx * dx + dy * dy).sqrt()
}
