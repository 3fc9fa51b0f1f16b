use grid_pathfinder::{Algorithm, ConfigurationError, Pathfinder, PathfindingError};
use grid_util::Point;
use std::f64::consts::SQRT_2;

fn configured(
    size: usize,
    start: (i32, i32),
    end: (i32, i32),
    obstacles: &[(i32, i32)],
) -> Pathfinder {
    let mut pathfinder = Pathfinder::new(size).unwrap();
    for &(x, y) in obstacles {
        pathfinder.toggle_obstacle(Point::new(x, y)).unwrap();
    }
    pathfinder.set_start(Point::new(start.0, start.1)).unwrap();
    pathfinder.set_end(Point::new(end.0, end.1)).unwrap();
    pathfinder
}

#[test]
fn open_grid_paths_connect_the_endpoints() {
    let endpoints = [
        ((0, 0), (7, 7)),
        ((3, 6), (6, 0)),
        ((7, 0), (0, 2)),
        ((4, 4), (4, 5)),
    ];
    for (start, end) in endpoints {
        let mut pathfinder = configured(8, start, end, &[]);
        for algorithm in Algorithm::ALL {
            let report = pathfinder.find_path(algorithm).unwrap();
            assert!(report.found);
            assert_eq!(report.path.first(), Some(&Point::new(start.0, start.1)));
            assert_eq!(report.path.last(), Some(&Point::new(end.0, end.1)));
        }
    }
}

#[test]
fn reference_example() {
    let mut pathfinder = configured(5, (0, 0), (4, 4), &[]);
    let report = pathfinder
        .find_path(Algorithm::HeuristicShortestPath)
        .unwrap();
    assert_eq!(report.path.len(), 5);
    assert!((report.total_length - 4.0 * SQRT_2).abs() < 1e-9);
}

/// Layouts on which the Manhattan-guided A* is known to stay optimal.
#[test]
fn astar_matches_dijkstra_on_reference_layouts() {
    let layouts: [(usize, (i32, i32), (i32, i32), Vec<(i32, i32)>); 4] = [
        (5, (0, 0), (4, 4), vec![]),
        (3, (0, 0), (2, 2), vec![(1, 0)]),
        (5, (0, 0), (4, 0), vec![(2, 0), (2, 1), (2, 2)]),
        (6, (0, 0), (5, 2), vec![]),
    ];
    for (size, start, end, obstacles) in layouts {
        let mut pathfinder = configured(size, start, end, &obstacles);
        let dijkstra = pathfinder.find_path(Algorithm::ShortestPath).unwrap();
        let astar = pathfinder
            .find_path(Algorithm::HeuristicShortestPath)
            .unwrap();
        assert!((dijkstra.total_length - astar.total_length).abs() < 1e-9);
    }
}

#[test]
fn unweighted_minimises_hops_not_length() {
    let mut pathfinder = configured(3, (0, 2), (2, 2), &[]);
    let bfs = pathfinder.find_path(Algorithm::Unweighted).unwrap();
    let dijkstra = pathfinder.find_path(Algorithm::ShortestPath).unwrap();
    assert_eq!(bfs.path.len(), dijkstra.path.len());
    assert!(bfs.total_length > dijkstra.total_length);
}

#[test]
fn diagonal_gap_is_not_cut() {
    let mut pathfinder = configured(5, (0, 0), (2, 2), &[(1, 0), (0, 1)]);
    for algorithm in Algorithm::ALL {
        let report = pathfinder.find_path(algorithm).unwrap();
        let cut = report
            .path
            .windows(2)
            .any(|w| w[0] == Point::new(0, 0) && w[1] == Point::new(1, 1));
        assert!(!cut);
        assert!(!report.found);
        assert_eq!(report.visitation_trace, vec![Point::new(0, 0)]);
    }
}

#[test]
fn wall_across_the_grid() {
    let wall: Vec<(i32, i32)> = (0..6).map(|x| (x, 3)).collect();
    let mut pathfinder = configured(6, (1, 0), (4, 5), &wall);
    for algorithm in Algorithm::ALL {
        let report = pathfinder.find_path(algorithm).unwrap();
        assert!(!report.found);
        assert_eq!(report.visitation_trace.len(), 18);
    }
}

#[test]
fn toggling_a_terminal_fails() {
    let mut pathfinder = configured(4, (0, 0), (3, 3), &[(1, 1)]);
    let before = pathfinder.grid().to_string();
    for p in [Point::new(0, 0), Point::new(3, 3)] {
        assert_eq!(
            pathfinder.toggle_obstacle(p),
            Err(PathfindingError::InvalidConfiguration(
                ConfigurationError::TerminalCell(p)
            ))
        );
    }
    assert_eq!(pathfinder.grid().to_string(), before);
}

#[test]
fn out_of_bounds_is_invalid_configuration() {
    let mut pathfinder = Pathfinder::new(4).unwrap();
    let p = Point::new(4, 0);
    assert_eq!(
        pathfinder.set_start(p),
        Err(PathfindingError::InvalidConfiguration(
            ConfigurationError::OutOfBounds(p)
        ))
    );
    assert!(pathfinder.is_obstacle(Point::new(0, -1)).is_err());
}
