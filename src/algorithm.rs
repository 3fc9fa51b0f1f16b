use core::fmt;
use std::str::FromStr;

use grid_util::Point;

use crate::frontier::Frontier;

/// Search strategy. All three share the expansion loop in [SearchContext](crate::SearchContext)
/// and only differ in how the frontier is ordered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Breadth-first search. Minimises the number of moves, not their length.
    #[default]
    Unweighted,
    /// Dijkstra's algorithm over the geometric move cost.
    ShortestPath,
    /// A* using the [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) to the goal.
    HeuristicShortestPath,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Unweighted,
        Algorithm::ShortestPath,
        Algorithm::HeuristicShortestPath,
    ];

    /// Estimated remaining cost from `point` to `goal`.
    ///
    /// The Manhattan distance never overestimates axis-aligned moves but does overestimate a
    /// diagonal move (2 against √2), so [Algorithm::HeuristicShortestPath] may return paths that
    /// are up to √2 times longer than optimal.
    pub fn heuristic(&self, point: &Point, goal: &Point) -> f64 {
        match self {
            Algorithm::HeuristicShortestPath => {
                ((point.x - goal.x).abs() + (point.y - goal.y).abs()) as f64
            }
            Algorithm::Unweighted | Algorithm::ShortestPath => 0.0,
        }
    }

    /// Creates an empty frontier with the ordering policy of this algorithm.
    pub fn frontier(&self) -> Frontier {
        match self {
            Algorithm::Unweighted => Frontier::fifo(),
            Algorithm::ShortestPath | Algorithm::HeuristicShortestPath => Frontier::priority(),
        }
    }

    /// Breadth-first search admits a cell at most once; the weighted variants re-admit a cell
    /// whenever its cost strictly improves.
    pub(crate) fn admits(&self, visited: bool, recorded_cost: f64, tentative_cost: f64) -> bool {
        match self {
            Algorithm::Unweighted => !visited,
            Algorithm::ShortestPath | Algorithm::HeuristicShortestPath => {
                tentative_cost < recorded_cost
            }
        }
    }

    pub(crate) fn uses_visited_guard(&self) -> bool {
        matches!(self, Algorithm::Unweighted)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Unweighted => "BFS",
            Algorithm::ShortestPath => "Dijkstra",
            Algorithm::HeuristicShortestPath => "A*",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm '{0}', expected one of bfs, dijkstra, astar")]
pub struct ParseAlgorithmError(String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "bfs" | "unweighted" => Ok(Algorithm::Unweighted),
            "2" | "dijkstra" | "shortest" | "shortestpath" => Ok(Algorithm::ShortestPath),
            "3" | "astar" | "a*" | "heuristic" | "heuristicshortestpath" => {
                Ok(Algorithm::HeuristicShortestPath)
            }
            _ => Err(ParseAlgorithmError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_is_manhattan_for_astar_only() {
        let p = Point::new(1, 1);
        let goal = Point::new(4, 3);
        assert_eq!(Algorithm::HeuristicShortestPath.heuristic(&p, &goal), 5.0);
        assert_eq!(Algorithm::ShortestPath.heuristic(&p, &goal), 0.0);
        assert_eq!(Algorithm::Unweighted.heuristic(&p, &goal), 0.0);
    }

    /// A single diagonal step costs √2 but the heuristic estimates 2: the accepted overestimate.
    #[test]
    fn heuristic_overestimates_diagonal_step() {
        let h = Algorithm::HeuristicShortestPath.heuristic(&Point::new(0, 0), &Point::new(1, 1));
        assert!(h > std::f64::consts::SQRT_2);
    }

    #[test]
    fn parse_names() {
        assert_eq!("BFS".parse::<Algorithm>(), Ok(Algorithm::Unweighted));
        assert_eq!(" dijkstra ".parse::<Algorithm>(), Ok(Algorithm::ShortestPath));
        assert_eq!("A*".parse::<Algorithm>(), Ok(Algorithm::HeuristicShortestPath));
        assert_eq!("3".parse::<Algorithm>(), Ok(Algorithm::HeuristicShortestPath));
        assert!("greedy".parse::<Algorithm>().is_err());
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<Algorithm>(), Ok(algorithm));
        }
    }

    #[test]
    fn admission_rules() {
        assert!(Algorithm::Unweighted.admits(false, 3.0, 10.0));
        assert!(!Algorithm::Unweighted.admits(true, 10.0, 1.0));
        assert!(Algorithm::ShortestPath.admits(true, 2.0, 1.5));
        assert!(!Algorithm::HeuristicShortestPath.admits(false, 2.0, 2.0));
    }
}
