use core::fmt;
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::{step_cost, ConfigurationError, GridConfig, MOORE_OFFSETS, N_SMALLVEC_SIZE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Terminal {
    Start,
    End,
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Terminal::Start => f.write_str("Start"),
            Terminal::End => f.write_str("End"),
        }
    }
}

/// [PathingGrid] owns the square obstacle grid ([true] is blocked) together with the designated
/// start and end cells. It maintains connected components using a [UnionFind] structure so that
/// reachability can be queried without searching.
///
/// Obstacles and terminals are mutually exclusive: the start and end can not be placed on an
/// obstacle and an obstacle can not be toggled on either of them.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    grid: BoolGrid,
    size: usize,
    start: Option<Point>,
    end: Option<Point>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl PathingGrid {
    /// Creates an empty `size`×`size` grid.
    pub fn new(size: usize) -> Result<PathingGrid, ConfigurationError> {
        PathingGrid::with_config(&GridConfig::new(size))
    }

    pub fn with_config(config: &GridConfig) -> Result<PathingGrid, ConfigurationError> {
        config.validate()?;
        Ok(PathingGrid::blank(config.grid_size))
    }

    fn blank(size: usize) -> PathingGrid {
        let mut pathing_grid = PathingGrid {
            grid: BoolGrid::new(size, size, false),
            size,
            start: None,
            end: None,
            components: UnionFind::new(size * size),
            components_dirty: false,
        };
        pathing_grid.generate_components();
        pathing_grid
    }

    /// Side length N of the N×N grid.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    pub fn start(&self) -> Option<Point> {
        self.start
    }

    pub fn end(&self) -> Option<Point> {
        self.end
    }

    pub fn in_bounds(&self, point: &Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.size
            && (point.y as usize) < self.size
    }

    fn check_bounds(&self, point: Point) -> Result<(), ConfigurationError> {
        if self.in_bounds(&point) {
            Ok(())
        } else {
            Err(ConfigurationError::OutOfBounds(point))
        }
    }

    /// Obstacle state of a cell.
    pub fn is_obstacle(&self, point: Point) -> Result<bool, ConfigurationError> {
        self.check_bounds(point)?;
        Ok(self.grid.get_point(point))
    }

    pub(crate) fn cell_index(&self, point: &Point) -> usize {
        point.y as usize * self.size + point.x as usize
    }

    pub(crate) fn point_at(&self, index: usize) -> Point {
        Point::new((index % self.size) as i32, (index / self.size) as i32)
    }

    /// Whether `pos` is inside the grid and free.
    pub fn can_move_to_simple(&self, pos: Point) -> bool {
        self.in_bounds(&pos) && !self.grid.get_point(pos)
    }

    /// Whether the single step from `start` to the adjacent `pos` is allowed. A diagonal step is
    /// refused when either of the two orthogonal cells it passes between is blocked.
    pub fn can_move_to(&self, pos: Point, start: Point) -> bool {
        debug_assert!((start.x - pos.x).abs() <= 1 && (start.y - pos.y).abs() <= 1);
        self.can_move_to_simple(pos)
            && !self.grid.get_point(Point::new(start.x, pos.y))
            && !self.grid.get_point(Point::new(pos.x, start.y))
    }

    /// Admissible neighbours of `pos` together with the geometric cost of stepping there, in
    /// the fixed [MOORE_OFFSETS] order.
    pub fn neighborhood_points_and_cost(
        &self,
        pos: &Point,
    ) -> SmallVec<[(Point, f64); N_SMALLVEC_SIZE]> {
        MOORE_OFFSETS
            .iter()
            .map(|&(dx, dy)| (Point::new(pos.x + dx, pos.y + dy), step_cost(dx, dy)))
            .filter(|(p, _)| self.can_move_to(*p, *pos))
            .collect()
    }

    /// Designates `point` as the start cell. Selecting the current start again clears it; when a
    /// different start is already set the request is ignored. Returns whether the grid changed.
    pub fn set_start(&mut self, point: Point) -> Result<bool, ConfigurationError> {
        self.designate(Terminal::Start, point)
    }

    /// Same as [set_start](Self::set_start) for the end cell.
    pub fn set_end(&mut self, point: Point) -> Result<bool, ConfigurationError> {
        self.designate(Terminal::End, point)
    }

    pub fn clear_start(&mut self) -> bool {
        self.clear(Terminal::Start)
    }

    pub fn clear_end(&mut self) -> bool {
        self.clear(Terminal::End)
    }

    fn slot_mut(&mut self, terminal: Terminal) -> &mut Option<Point> {
        match terminal {
            Terminal::Start => &mut self.start,
            Terminal::End => &mut self.end,
        }
    }

    fn designate(&mut self, terminal: Terminal, point: Point) -> Result<bool, ConfigurationError> {
        self.check_bounds(point)?;
        let (current, other) = match terminal {
            Terminal::Start => (self.start, self.end),
            Terminal::End => (self.end, self.start),
        };
        if current == Some(point) {
            return Ok(self.clear(terminal));
        }
        if other == Some(point) {
            return Err(ConfigurationError::TerminalCell(point));
        }
        if self.grid.get_point(point) {
            return Err(ConfigurationError::Obstacle(point));
        }
        if let Some(current) = current {
            debug!("{terminal} cell already set at {current}, ignoring {point}");
            return Ok(false);
        }
        *self.slot_mut(terminal) = Some(point);
        info!("{terminal} cell set at {point}");
        Ok(true)
    }

    fn clear(&mut self, terminal: Terminal) -> bool {
        match self.slot_mut(terminal).take() {
            Some(point) => {
                info!("{terminal} cell {point} deselected");
                true
            }
            None => false,
        }
    }

    /// Flips the obstacle state of `point` and returns the new state. Joins newly connected
    /// components when a cell is freed and flags the components as dirty when a cell is blocked.
    pub fn toggle_obstacle(&mut self, point: Point) -> Result<bool, ConfigurationError> {
        self.check_bounds(point)?;
        if self.start == Some(point) || self.end == Some(point) {
            return Err(ConfigurationError::TerminalCell(point));
        }
        let blocked = !self.grid.get_point(point);
        self.grid.set_point(point, blocked);
        if blocked {
            self.components_dirty = true;
        } else {
            let ix = self.cell_index(&point);
            for (n, _) in self.neighborhood_points_and_cost(&point) {
                let n_ix = self.cell_index(&n);
                self.components.union(ix, n_ix);
            }
        }
        info!(
            "Toggled obstacle at {point} ({})",
            if blocked { "on" } else { "off" }
        );
        Ok(blocked)
    }

    /// Removes all obstacles and both terminals.
    pub fn reset(&mut self) {
        info!("Resetting {0}x{0} grid", self.size);
        *self = PathingGrid::blank(self.size);
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.cell_index(point))
    }

    /// Whether obstacles were added since the components were last generated, in which case
    /// [reachable](Self::reachable) may report cells as connected that no longer are.
    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }

    /// Checks if start and goal are free cells on the same component. Only meaningful after
    /// [update](Self::update) when obstacles have been added since the last generation.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        self.can_move_to_simple(*start)
            && self.can_move_to_simple(*goal)
            && self
                .components
                .equiv(self.cell_index(start), self.cell_index(goal))
    }

    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            debug!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up grid neighbours to the same components.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.cell_count());
        self.components_dirty = false;
        for y in 0..self.size as i32 {
            for x in 0..self.size as i32 {
                let point = Point::new(x, y);
                if !self.can_move_to_simple(point) {
                    continue;
                }
                let parent_ix = self.cell_index(&point);
                // Half of the Moore neighbourhood suffices since every edge is undirected.
                for (dx, dy) in [(0, 1), (1, -1), (1, 0), (1, 1)] {
                    let n = Point::new(x + dx, y + dy);
                    if self.can_move_to(n, point) {
                        let ix = self.cell_index(&n);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }

    /// Writes one row per `y` using `S`, `G`, `#` and `.`, marking the cells of `overlay` that are
    /// not terminals with `*`.
    pub(crate) fn write_rows(&self, f: &mut fmt::Formatter, overlay: &[Point]) -> fmt::Result {
        for y in 0..self.size as i32 {
            let row = (0..self.size as i32)
                .map(|x| {
                    let p = Point::new(x, y);
                    if self.start == Some(p) {
                        'S'
                    } else if self.end == Some(p) {
                        'G'
                    } else if self.grid.get_point(p) {
                        '#'
                    } else if overlay.contains(&p) {
                        '*'
                    } else {
                        '.'
                    }
                })
                .collect::<String>();
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_rows(f, &[])
    }
}
