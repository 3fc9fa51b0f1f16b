use grid_util::Point;
use thiserror::Error;

/// Rejected grid configuration requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("{0} is outside the grid")]
    OutOfBounds(Point),
    #[error("{0} is the start or end cell")]
    TerminalCell(Point),
    #[error("{0} is occupied by an obstacle")]
    Obstacle(Point),
    #[error("grid size must be between 1 and {max}, got {size}")]
    GridSize { size: usize, max: usize },
}

/// Errors returned by configuration and search operations. None of them are fatal: the caller is
/// expected to adjust the grid and try again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathfindingError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),
    #[error("start and end must both be set and distinct")]
    MissingEndpoints,
    #[error("no path from {start} to {end}")]
    NotFound { start: Point, end: Point },
}
