use crate::{Algorithm, ConfigurationError, DEFAULT_GRID_SIZE};

/// Session configuration: the side length of the square grid and the initially selected
/// algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    pub grid_size: usize,
    pub algorithm: Algorithm,
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            grid_size: DEFAULT_GRID_SIZE,
            algorithm: Algorithm::Unweighted,
        }
    }
}

impl GridConfig {
    /// Largest side length whose coordinates and cell count still fit the `i32` coordinates of
    /// [Point](grid_util::Point).
    pub const MAX_GRID_SIZE: usize = 46_340;

    pub fn new(grid_size: usize) -> GridConfig {
        GridConfig {
            grid_size,
            ..GridConfig::default()
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> GridConfig {
        self.algorithm = algorithm;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.grid_size == 0 || self.grid_size > Self::MAX_GRID_SIZE {
            return Err(ConfigurationError::GridSize {
                size: self.grid_size,
                max: Self::MAX_GRID_SIZE,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_grid() {
        let config = GridConfig::default();
        assert_eq!(config.grid_size, 25);
        assert_eq!(config.algorithm, Algorithm::Unweighted);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_sizes() {
        assert_eq!(
            GridConfig::new(0).validate(),
            Err(ConfigurationError::GridSize {
                size: 0,
                max: GridConfig::MAX_GRID_SIZE
            })
        );
        assert!(GridConfig::new(GridConfig::MAX_GRID_SIZE + 1)
            .validate()
            .is_err());
        assert!(GridConfig::new(1).validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn loads_partial_json() {
        let config: GridConfig =
            serde_json::from_str(r#"{"grid_size": 40, "algorithm": "HeuristicShortestPath"}"#)
                .unwrap();
        assert_eq!(
            config,
            GridConfig::new(40).with_algorithm(Algorithm::HeuristicShortestPath)
        );
        let config: GridConfig = serde_json::from_str(r#"{"grid_size": 10}"#).unwrap();
        assert_eq!(config.algorithm, Algorithm::Unweighted);
    }
}
